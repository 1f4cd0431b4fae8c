//! Listing lookup consumed by callers of the engine.
//!
//! The engine only ever sees resolved [`PropertyInput`] records; this module describes
//! where those records come from and how a bare listing becomes an underwritable input.

mod import;

pub use import::{ListingImportError, ListingImporter};

use super::domain::PropertyInput;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    SingleFamily,
    MultiFamily,
    Condo,
    Townhouse,
}

impl PropertyType {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::SingleFamily,
            Self::MultiFamily,
            Self::Condo,
            Self::Townhouse,
        ]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::SingleFamily => "single-family",
            Self::MultiFamily => "multi-family",
            Self::Condo => "condo",
            Self::Townhouse => "townhouse",
        }
    }

    /// Sentence-case label used when naming a listing, e.g. "Single family".
    pub const fn label(self) -> &'static str {
        match self {
            Self::SingleFamily => "Single family",
            Self::MultiFamily => "Multi family",
            Self::Condo => "Condo",
            Self::Townhouse => "Townhouse",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown property type '{0}'")]
pub struct UnknownPropertyType(pub String);

impl FromStr for PropertyType {
    type Err = UnknownPropertyType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Self::ordered()
            .into_iter()
            .find(|kind| kind.slug() == normalized)
            .ok_or_else(|| UnknownPropertyType(value.to_string()))
    }
}

/// A for-sale listing as stored by a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogListing {
    pub id: String,
    pub address: String,
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    pub list_price: f64,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub sqft: u32,
    pub property_type: PropertyType,
    pub year_built: u16,
    pub estimated_rent: f64,
    pub property_tax_per_year: f64,
    pub insurance_per_year: f64,
    pub hoa_per_year: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listed_on: Option<NaiveDate>,
}

/// Financing terms applied when a listing is pulled into an analysis unedited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancingDefaults {
    pub down_payment_percent: f64,
    pub interest_rate_percent: f64,
    pub loan_term_years: u32,
    pub closing_cost_percent: f64,
    pub annual_maintenance_percent: f64,
    pub vacancy_rate_percent: f64,
    pub arv_multiple: f64,
}

impl FinancingDefaults {
    pub const fn standard() -> Self {
        Self {
            down_payment_percent: 25.0,
            interest_rate_percent: 7.0,
            loan_term_years: 30,
            closing_cost_percent: 3.0,
            annual_maintenance_percent: 0.1,
            vacancy_rate_percent: 5.0,
            arv_multiple: 1.1,
        }
    }
}

impl Default for FinancingDefaults {
    fn default() -> Self {
        Self::standard()
    }
}

impl CatalogListing {
    pub fn nickname(&self) -> String {
        format!("{} - {}", self.property_type.label(), self.address)
    }

    /// Builds an analysis input. Utilities stay unset so the defaulting step estimates
    /// them from the analysis ZIP.
    pub fn to_property_input(&self, financing: &FinancingDefaults) -> PropertyInput {
        let price = self.list_price;
        PropertyInput {
            id: self.id.clone(),
            nickname: self.nickname(),
            address: format!("{}, {}", self.address, self.zip_code),
            zip_code: self.zip_code.clone(),
            list_price: price,
            estimated_rent: self.estimated_rent,
            property_tax_per_year: self.property_tax_per_year,
            insurance_per_year: self.insurance_per_year,
            hoa_per_year: self.hoa_per_year,
            maintenance_per_month: (price * financing.annual_maintenance_percent / 100.0 / 12.0)
                .round(),
            utilities_per_month: 0.0,
            vacancy_rate_percent: financing.vacancy_rate_percent,
            down_payment_percent: financing.down_payment_percent,
            interest_rate_percent: financing.interest_rate_percent,
            loan_term_years: financing.loan_term_years,
            closing_costs: (price * financing.closing_cost_percent / 100.0).round(),
            renovation_budget: 0.0,
            arv: (price * financing.arv_multiple).round(),
        }
    }
}

/// Listing search criteria. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFilter {
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub price_min: Option<f64>,
    #[serde(default)]
    pub price_max: Option<f64>,
    #[serde(default)]
    pub beds_min: Option<u8>,
    #[serde(default)]
    pub baths_min: Option<u8>,
    #[serde(default)]
    pub property_types: Vec<PropertyType>,
}

impl ListingFilter {
    pub fn for_zip(zip_code: impl Into<String>) -> Self {
        Self {
            zip_code: Some(zip_code.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, listing: &CatalogListing) -> bool {
        if let Some(zip) = self.zip_code.as_deref() {
            if !zip.is_empty() && listing.zip_code != zip {
                return false;
            }
        }
        if self.price_min.is_some_and(|min| listing.list_price < min) {
            return false;
        }
        if self.price_max.is_some_and(|max| listing.list_price > max) {
            return false;
        }
        if self.beds_min.is_some_and(|min| listing.bedrooms < min) {
            return false;
        }
        if self.baths_min.is_some_and(|min| listing.bathrooms < min) {
            return false;
        }
        self.property_types.is_empty() || self.property_types.contains(&listing.property_type)
    }
}

/// Storage abstraction so callers can swap the listing source without touching the
/// engine.
pub trait PropertyCatalog: Send + Sync {
    fn fetch(&self, id: &str) -> Result<Option<CatalogListing>, CatalogError>;
    fn search(&self, filter: &ListingFilter) -> Result<Vec<CatalogListing>, CatalogError>;

    fn find_by_zip(&self, zip_code: &str) -> Result<Vec<CatalogListing>, CatalogError> {
        self.search(&ListingFilter::for_zip(zip_code))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}
