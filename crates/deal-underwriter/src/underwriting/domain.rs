use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw and user-editable financial facts for one candidate property.
///
/// Numeric fields left at `0.0` are treated as unset and filled in by
/// [`apply_defaults`](super::defaults::apply_defaults) before any metric is computed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInput {
    pub id: String,
    pub nickname: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub list_price: f64,
    #[serde(default)]
    pub estimated_rent: f64,
    #[serde(default)]
    pub property_tax_per_year: f64,
    #[serde(default)]
    pub insurance_per_year: f64,
    #[serde(default)]
    pub hoa_per_year: f64,
    #[serde(default)]
    pub maintenance_per_month: f64,
    #[serde(default)]
    pub utilities_per_month: f64,
    #[serde(default)]
    pub vacancy_rate_percent: f64,
    #[serde(default)]
    pub down_payment_percent: f64,
    #[serde(default)]
    pub interest_rate_percent: f64,
    #[serde(default)]
    pub loan_term_years: u32,
    #[serde(default)]
    pub closing_costs: f64,
    #[serde(default)]
    pub renovation_budget: f64,
    /// After-repair value.
    #[serde(default)]
    pub arv: f64,
}

impl PropertyInput {
    pub fn down_payment(&self) -> f64 {
        self.list_price * (self.down_payment_percent / 100.0)
    }

    pub fn loan_amount(&self) -> f64 {
        self.list_price - self.down_payment()
    }

    pub fn total_cash_invested(&self) -> f64 {
        self.down_payment() + self.closing_costs + self.renovation_budget
    }

    /// Value the projection appreciates from: ARV when provided, list price otherwise.
    pub fn base_value(&self) -> f64 {
        if self.arv > 0.0 {
            self.arv
        } else {
            self.list_price
        }
    }
}

/// Defaults shared by every property in one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalAssumptions {
    pub default_vacancy_rate_percent: f64,
    pub default_appreciation_rate_percent: f64,
    /// Annual maintenance reserve expressed as a percent of list price.
    pub default_maintenance_percent: f64,
}

impl Default for GlobalAssumptions {
    fn default() -> Self {
        Self {
            default_vacancy_rate_percent: 5.0,
            default_appreciation_rate_percent: 3.0,
            default_maintenance_percent: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingRecommendation {
    BuyNow,
    Watch,
    Avoid,
}

impl TimingRecommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BuyNow => "buy now",
            Self::Watch => "watch",
            Self::Avoid => "avoid",
        }
    }
}

impl fmt::Display for TimingRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Published financial summary for one property. Money and percent fields carry two
/// decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealMetrics {
    pub monthly_mortgage_payment: f64,
    pub monthly_operating_expenses: f64,
    #[serde(rename = "monthlyNOI")]
    pub monthly_noi: f64,
    pub monthly_cash_flow: f64,
    pub cap_rate_percent: f64,
    pub cash_on_cash_return_percent: f64,
    pub five_year_total_roi_percent: f64,
    pub five_year_equity_built: f64,
    pub five_year_total_cash_flow: f64,
    pub risk_level: RiskLevel,
    pub timing_recommendation: TimingRecommendation,
}

/// One year of the five-year timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProjection {
    pub year: u32,
    pub cash_flow_this_year: f64,
    pub equity_this_year: f64,
    pub cumulative_cash_flow: f64,
    pub cumulative_equity: f64,
    pub cumulative_roi_percent: f64,
}

/// Rule-based narrative over the computed metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCommentary {
    pub cash_flow_summary: String,
    pub risk_summary: String,
    pub market_timing_summary: String,
    pub renovation_summary: String,
    pub overall_summary: String,
    pub key_bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAnalysisResult {
    /// Snapshot of the property after defaults were applied.
    pub property: PropertyInput,
    pub metrics: DealMetrics,
    pub timeline: Vec<YearProjection>,
    pub commentary: AgentCommentary,
    pub overall_score: f64,
}

/// Rounds half away from zero to two decimals.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_input_deserializes_camel_case_with_missing_numbers_as_unset() {
        let json = r#"{
            "id": "prop-1",
            "nickname": "Duplex",
            "listPrice": 300000,
            "estimatedRent": 2400,
            "loanTermYears": 30
        }"#;

        let property: PropertyInput = serde_json::from_str(json).expect("valid payload");

        assert_eq!(property.list_price, 300_000.0);
        assert_eq!(property.loan_term_years, 30);
        assert_eq!(property.utilities_per_month, 0.0);
        assert_eq!(property.vacancy_rate_percent, 0.0);
        assert!(property.address.is_empty());
    }

    #[test]
    fn metrics_serialize_with_wire_names() {
        let metrics = DealMetrics {
            monthly_mortgage_payment: 1.0,
            monthly_operating_expenses: 2.0,
            monthly_noi: 3.0,
            monthly_cash_flow: 4.0,
            cap_rate_percent: 5.0,
            cash_on_cash_return_percent: 6.0,
            five_year_total_roi_percent: 7.0,
            five_year_equity_built: 8.0,
            five_year_total_cash_flow: 9.0,
            risk_level: RiskLevel::Medium,
            timing_recommendation: TimingRecommendation::BuyNow,
        };

        let value = serde_json::to_value(&metrics).expect("serializes");

        assert_eq!(value["monthlyNOI"], 3.0);
        assert_eq!(value["cashOnCashReturnPercent"], 6.0);
        assert_eq!(value["riskLevel"], "medium");
        assert_eq!(value["timingRecommendation"], "buy_now");
    }

    #[test]
    fn base_value_prefers_arv() {
        let mut property = PropertyInput {
            list_price: 200_000.0,
            arv: 250_000.0,
            ..PropertyInput::default()
        };
        assert_eq!(property.base_value(), 250_000.0);

        property.arv = 0.0;
        assert_eq!(property.base_value(), 200_000.0);
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(1.005_000_1), 1.01);
        assert_eq!(round2(-2.344), -2.34);
        assert_eq!(round2(12.0), 12.0);
    }
}
