use super::{CatalogListing, PropertyType};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ListingImportError {
    #[error("failed to read listings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid listings CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown property type '{value}'")]
    PropertyType { row: usize, value: String },
    #[error("row {row}: listed_on '{value}' is not a YYYY-MM-DD date")]
    ListedOn { row: usize, value: String },
}

/// Loads catalog listings from a CSV export.
pub struct ListingImporter;

impl ListingImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogListing>, ListingImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CatalogListing>, ListingImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut listings = Vec::new();

        for (index, record) in csv_reader.deserialize::<ListingRow>().enumerate() {
            // Header occupies line 1.
            let row = index + 2;
            listings.push(record?.into_listing(row)?);
        }

        Ok(listings)
    }
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    id: String,
    address: String,
    zip_code: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
    list_price: f64,
    bedrooms: u8,
    bathrooms: u8,
    sqft: u32,
    property_type: String,
    year_built: u16,
    estimated_rent: f64,
    property_tax_per_year: f64,
    insurance_per_year: f64,
    #[serde(default)]
    hoa_per_year: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    listed_on: Option<String>,
}

impl ListingRow {
    fn into_listing(self, row: usize) -> Result<CatalogListing, ListingImportError> {
        let property_type = self.property_type.parse::<PropertyType>().map_err(|_| {
            ListingImportError::PropertyType {
                row,
                value: self.property_type.clone(),
            }
        })?;

        let listed_on = self
            .listed_on
            .map(|value| {
                NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .map_err(|_| ListingImportError::ListedOn { row, value })
            })
            .transpose()?;

        Ok(CatalogListing {
            id: self.id,
            address: self.address,
            zip_code: self.zip_code,
            lat: self.lat,
            lng: self.lng,
            list_price: self.list_price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            sqft: self.sqft,
            property_type,
            year_built: self.year_built,
            estimated_rent: self.estimated_rent,
            property_tax_per_year: self.property_tax_per_year,
            insurance_per_year: self.insurance_per_year,
            hoa_per_year: self.hoa_per_year.unwrap_or(0.0),
            listed_on,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "id,address,zip_code,lat,lng,list_price,bedrooms,bathrooms,sqft,property_type,year_built,estimated_rent,property_tax_per_year,insurance_per_year,hoa_per_year,listed_on\n";

    #[test]
    fn parses_rows_with_optional_cells() {
        let csv = format!(
            "{HEADER}\
             bos-1, 12 Dorchester Ave ,02127,42.33,-71.05,689000,3,2,1540,multi-family,1910,4200,7100,1650,,2025-09-02\n\
             bos-2,9 Adams St,02122,,,455000,2,1,980,condo,1988,2650,4300,1100,2400,\n"
        );

        let listings = ListingImporter::from_reader(Cursor::new(csv)).expect("valid csv");

        assert_eq!(listings.len(), 2);
        let first = &listings[0];
        assert_eq!(first.address, "12 Dorchester Ave");
        assert_eq!(first.property_type, PropertyType::MultiFamily);
        assert_eq!(first.lat, Some(42.33));
        assert_eq!(first.hoa_per_year, 0.0);
        assert_eq!(first.listed_on, NaiveDate::from_ymd_opt(2025, 9, 2));

        let second = &listings[1];
        assert_eq!(second.lat, None);
        assert_eq!(second.hoa_per_year, 2_400.0);
        assert_eq!(second.listed_on, None);
    }

    #[test]
    fn reports_row_of_unknown_property_type() {
        let csv = format!(
            "{HEADER}bos-3,1 Main St,02118,,,400000,3,2,1400,castle,1900,3000,5000,1200,0,\n"
        );

        let err = ListingImporter::from_reader(Cursor::new(csv)).expect_err("bad type");

        match err {
            ListingImportError::PropertyType { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "castle");
            }
            other => panic!("expected property type error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        let csv = format!(
            "{HEADER}bos-4,1 Main St,02118,,,400000,3,2,1400,condo,1900,3000,5000,1200,0,09/02/2025\n"
        );

        let err = ListingImporter::from_reader(Cursor::new(csv)).expect_err("bad date");

        assert!(matches!(err, ListingImportError::ListedOn { row: 2, .. }));
    }

    #[test]
    fn surfaces_csv_type_errors() {
        let csv = format!(
            "{HEADER}bos-5,1 Main St,02118,,,lots,3,2,1400,condo,1900,3000,5000,1200,0,\n"
        );

        let err = ListingImporter::from_reader(Cursor::new(csv)).expect_err("bad price");

        assert!(matches!(err, ListingImportError::Csv(_)));
    }
}
