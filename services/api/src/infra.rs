use chrono::NaiveDate;
use deal_underwriter::error::AppError;
use deal_underwriter::underwriting::{
    CatalogError, CatalogListing, GlobalAssumptions, ListingFilter, ListingImporter,
    PropertyCatalog, PropertyType,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock, RwLockReadGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) assumptions: GlobalAssumptions,
}

#[derive(Clone)]
pub(crate) struct InMemoryPropertyCatalog {
    listings: Arc<RwLock<Vec<CatalogListing>>>,
}

impl InMemoryPropertyCatalog {
    pub(crate) fn new(listings: Vec<CatalogListing>) -> Self {
        Self {
            listings: Arc::new(RwLock::new(listings)),
        }
    }

    /// Seeds from a CSV export when a path is given, otherwise from the bundled samples.
    pub(crate) fn seeded(listings_csv: Option<&Path>) -> Result<Self, AppError> {
        let listings = match listings_csv {
            Some(path) => ListingImporter::from_path(path)?,
            None => sample_listings(),
        };
        Ok(Self::new(listings))
    }

    pub(crate) fn len(&self) -> usize {
        self.listings.read().map(|guard| guard.len()).unwrap_or(0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<CatalogListing>>, CatalogError> {
        self.listings
            .read()
            .map_err(|_| CatalogError::Unavailable("listing store lock poisoned".to_string()))
    }
}

impl PropertyCatalog for InMemoryPropertyCatalog {
    fn fetch(&self, id: &str) -> Result<Option<CatalogListing>, CatalogError> {
        let guard = self.read()?;
        Ok(guard.iter().find(|listing| listing.id == id).cloned())
    }

    fn search(&self, filter: &ListingFilter) -> Result<Vec<CatalogListing>, CatalogError> {
        let guard = self.read()?;
        Ok(guard
            .iter()
            .filter(|listing| filter.matches(listing))
            .cloned()
            .collect())
    }
}

struct Sample {
    id: &'static str,
    address: &'static str,
    zip_code: &'static str,
    lat: f64,
    lng: f64,
    list_price: f64,
    bedrooms: u8,
    bathrooms: u8,
    sqft: u32,
    property_type: PropertyType,
    year_built: u16,
    hoa_per_year: f64,
}

const SAMPLES: &[Sample] = &[
    Sample {
        id: "bos-02118-1",
        address: "48 Union Park",
        zip_code: "02118",
        lat: 42.3418,
        lng: -71.0712,
        list_price: 689_000.0,
        bedrooms: 3,
        bathrooms: 2,
        sqft: 1_540,
        property_type: PropertyType::Condo,
        year_built: 1899,
        hoa_per_year: 4_800.0,
    },
    Sample {
        id: "bos-02118-2",
        address: "212 Shawmut Avenue",
        zip_code: "02118",
        lat: 42.3432,
        lng: -71.0665,
        list_price: 1_150_000.0,
        bedrooms: 5,
        bathrooms: 3,
        sqft: 2_860,
        property_type: PropertyType::MultiFamily,
        year_built: 1910,
        hoa_per_year: 0.0,
    },
    Sample {
        id: "bos-02118-3",
        address: "17 Rutland Square",
        zip_code: "02118",
        lat: 42.3405,
        lng: -71.0768,
        list_price: 845_000.0,
        bedrooms: 3,
        bathrooms: 2,
        sqft: 1_980,
        property_type: PropertyType::Townhouse,
        year_built: 1872,
        hoa_per_year: 0.0,
    },
    Sample {
        id: "cam-02139-1",
        address: "96 Pearl Street",
        zip_code: "02139",
        lat: 42.3628,
        lng: -71.1031,
        list_price: 925_000.0,
        bedrooms: 4,
        bathrooms: 2,
        sqft: 2_240,
        property_type: PropertyType::MultiFamily,
        year_built: 1925,
        hoa_per_year: 0.0,
    },
    Sample {
        id: "cam-02139-2",
        address: "310 Brookline Street",
        zip_code: "02139",
        lat: 42.3589,
        lng: -71.1067,
        list_price: 575_000.0,
        bedrooms: 2,
        bathrooms: 1,
        sqft: 960,
        property_type: PropertyType::Condo,
        year_built: 1988,
        hoa_per_year: 3_600.0,
    },
    Sample {
        id: "por-03801-1",
        address: "44 Maplewood Avenue",
        zip_code: "03801",
        lat: 43.0790,
        lng: -70.7620,
        list_price: 515_000.0,
        bedrooms: 3,
        bathrooms: 2,
        sqft: 1_720,
        property_type: PropertyType::SingleFamily,
        year_built: 1948,
        hoa_per_year: 0.0,
    },
    Sample {
        id: "por-03801-2",
        address: "9 Islington Street",
        zip_code: "03801",
        lat: 43.0745,
        lng: -70.7652,
        list_price: 640_000.0,
        bedrooms: 4,
        bathrooms: 2,
        sqft: 2_100,
        property_type: PropertyType::MultiFamily,
        year_built: 1905,
        hoa_per_year: 0.0,
    },
    Sample {
        id: "por-03801-3",
        address: "150 Middle Street",
        zip_code: "03801",
        lat: 43.0731,
        lng: -70.7628,
        list_price: 389_000.0,
        bedrooms: 2,
        bathrooms: 1,
        sqft: 890,
        property_type: PropertyType::Condo,
        year_built: 1979,
        hoa_per_year: 2_700.0,
    },
];

/// Bundled New England listings. Rent and carrying costs follow the usual ratios of
/// list price: 0.6% monthly rent, 1.2% annual tax, 0.4% annual insurance.
pub(crate) fn sample_listings() -> Vec<CatalogListing> {
    SAMPLES
        .iter()
        .map(|sample| CatalogListing {
            id: sample.id.to_string(),
            address: sample.address.to_string(),
            zip_code: sample.zip_code.to_string(),
            lat: Some(sample.lat),
            lng: Some(sample.lng),
            list_price: sample.list_price,
            bedrooms: sample.bedrooms,
            bathrooms: sample.bathrooms,
            sqft: sample.sqft,
            property_type: sample.property_type,
            year_built: sample.year_built,
            estimated_rent: (sample.list_price * 0.006).round(),
            property_tax_per_year: (sample.list_price * 0.012).round(),
            insurance_per_year: (sample.list_price * 0.004).round(),
            hoa_per_year: sample.hoa_per_year,
            listed_on: NaiveDate::from_ymd_opt(2025, 9, 15),
        })
        .collect()
}

/// Accepts a comma-separated list such as `condo,multi-family`.
pub(crate) fn parse_property_types(raw: &str) -> Result<Vec<PropertyType>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.parse::<PropertyType>().map_err(|err| err.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_serves_every_zip() {
        let catalog = InMemoryPropertyCatalog::new(sample_listings());

        for zip in ["02118", "02139", "03801"] {
            let listings = catalog.find_by_zip(zip).expect("catalog available");
            assert!(listings.len() >= 2, "zip {zip} needs a comparable pair");
        }
        assert_eq!(catalog.len(), SAMPLES.len());
    }

    #[test]
    fn fetch_returns_listing_by_id() {
        let catalog = InMemoryPropertyCatalog::new(sample_listings());

        let listing = catalog
            .fetch("por-03801-1")
            .expect("catalog available")
            .expect("listing exists");

        assert_eq!(listing.estimated_rent, 3_090.0);
        assert_eq!(listing.property_tax_per_year, 6_180.0);
        assert!(catalog.fetch("missing").expect("catalog available").is_none());
    }

    #[test]
    fn property_type_lists_parse() {
        assert_eq!(
            parse_property_types("condo, multi-family"),
            Ok(vec![PropertyType::Condo, PropertyType::MultiFamily])
        );
        assert_eq!(parse_property_types(""), Ok(Vec::new()));
        assert!(parse_property_types("condo,castle").is_err());
    }
}
