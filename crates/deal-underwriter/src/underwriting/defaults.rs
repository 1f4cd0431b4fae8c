use super::domain::{GlobalAssumptions, PropertyInput};

const FALLBACK_ZIP_PREFIX: &str = "000";
const ZIP_BUCKETS: u32 = 7;

/// Baseline carrying costs estimated from a ZIP code prefix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZipDefaults {
    pub tax_per_year: f64,
    pub insurance_per_year: f64,
    pub utilities_per_month: f64,
}

impl ZipDefaults {
    /// Buckets the first three characters of the ZIP by the sum of their character codes.
    /// Every ZIP sharing a prefix shares a baseline; an empty ZIP uses the `"000"` bucket.
    pub fn for_zip(zip_code: &str) -> Self {
        let bucket = f64::from(zip_bucket(zip_code));
        Self {
            tax_per_year: 4200.0 + bucket * 180.0,
            insurance_per_year: 1200.0 + bucket * 70.0,
            utilities_per_month: 160.0 + bucket * 18.0,
        }
    }
}

fn zip_bucket(zip_code: &str) -> u32 {
    let prefix: String = zip_code.chars().take(3).collect();
    let prefix = if prefix.is_empty() {
        FALLBACK_ZIP_PREFIX.to_string()
    } else {
        prefix
    };

    prefix.chars().map(|ch| ch as u32).sum::<u32>() % ZIP_BUCKETS
}

/// Deterministic multiplier in `[0.9, 1.1)` derived from the BLAKE3 digest of `seed`.
pub fn stable_variation(seed: &str) -> f64 {
    let digest = blake3::hash(seed.as_bytes());
    let bytes = digest.as_bytes();
    let leading = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    0.9 + 0.2 * (f64::from(leading) / 4_294_967_296.0)
}

/// Seed used for a property's variation factor.
pub fn variation_seed(property_id: &str, zip_code: &str) -> String {
    format!("{property_id}:{zip_code}")
}

/// Returns a copy of `property` with every unset (zero) carrying cost replaced by an
/// estimate.
pub fn apply_defaults(
    property: &PropertyInput,
    assumptions: &GlobalAssumptions,
    zip_code: &str,
) -> PropertyInput {
    let baseline = ZipDefaults::for_zip(zip_code);
    let variation = stable_variation(&variation_seed(&property.id, zip_code));

    let vacancy_rate_percent = or_estimate(property.vacancy_rate_percent, || {
        assumptions.default_vacancy_rate_percent
    });
    let maintenance_per_month = or_estimate(property.maintenance_per_month, || {
        property.list_price * (assumptions.default_maintenance_percent / 100.0) / 12.0
    });
    let property_tax_per_year = or_estimate(property.property_tax_per_year, || {
        baseline.tax_per_year * variation
    });
    let insurance_per_year = or_estimate(property.insurance_per_year, || {
        baseline.insurance_per_year * variation
    });
    let utilities_per_month = or_estimate(property.utilities_per_month, || {
        baseline.utilities_per_month * variation
    });

    PropertyInput {
        vacancy_rate_percent,
        maintenance_per_month,
        property_tax_per_year,
        insurance_per_year,
        utilities_per_month,
        ..property.clone()
    }
}

fn or_estimate(value: f64, estimate: impl FnOnce() -> f64) -> f64 {
    if value == 0.0 {
        estimate()
    } else {
        value
    }
}
