use deal_underwriter::underwriting::{
    analyze_properties, FinancingDefaults, GlobalAssumptions, ListingFilter, ListingImportError,
    ListingImporter, PropertyType,
};

const LISTINGS: &str = "\
id,address,zip_code,list_price,bedrooms,bathrooms,sqft,property_type,year_built,estimated_rent,property_tax_per_year,insurance_per_year,hoa_per_year,listed_on
som-1,14 Highland Avenue,02143,785000,4,2,2210,multi-family,1912,4700,9420,3140,0,2025-08-30
som-2,220 Summer Street,02143,529000,2,1,940,condo,1986,3170,6350,2120,3000,2025-09-11
som-3,7 Spring Hill Terrace,02143,910000,3,3,1980,single-family,1925,5460,10920,3640,,
";

#[test]
fn imported_listings_flow_into_ranked_analysis() {
    let listings = ListingImporter::from_reader(LISTINGS.as_bytes()).expect("import succeeds");
    assert_eq!(listings.len(), 3);
    assert_eq!(listings[2].hoa_per_year, 0.0);
    assert!(listings[2].listed_on.is_none());

    let financing = FinancingDefaults::standard();
    let properties: Vec<_> = listings
        .iter()
        .map(|listing| listing.to_property_input(&financing))
        .collect();
    assert_eq!(properties[1].nickname, "Condo - 220 Summer Street");
    assert_eq!(properties[1].closing_costs, 15_870.0);

    let results = analyze_properties(&properties, &GlobalAssumptions::default(), "02143")
        .expect("valid batch");

    assert_eq!(results.len(), 3);
    assert!(results
        .windows(2)
        .all(|pair| pair[0].overall_score >= pair[1].overall_score));
    for result in &results {
        assert!(result.property.utilities_per_month > 0.0);
        assert_eq!(result.timeline.len(), 5);
    }
}

#[test]
fn filter_narrows_imported_listings() {
    let listings = ListingImporter::from_reader(LISTINGS.as_bytes()).expect("import succeeds");
    let filter = ListingFilter {
        beds_min: Some(3),
        property_types: vec![PropertyType::SingleFamily, PropertyType::MultiFamily],
        ..ListingFilter::for_zip("02143")
    };

    let ids: Vec<&str> = listings
        .iter()
        .filter(|listing| filter.matches(listing))
        .map(|listing| listing.id.as_str())
        .collect();

    assert_eq!(ids, vec!["som-1", "som-3"]);
}

#[test]
fn missing_file_is_an_io_error() {
    let err = ListingImporter::from_path("does/not/exist.csv").expect_err("no such file");
    assert!(matches!(err, ListingImportError::Io(_)));
}
