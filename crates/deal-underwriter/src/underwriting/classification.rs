use super::domain::{RiskLevel, TimingRecommendation};

/// Cash-on-cash return below this is high risk.
pub const HIGH_RISK_CASH_ON_CASH_PERCENT: f64 = 3.0;
/// Cash-on-cash return below this (and at or above the high-risk floor) is medium risk.
pub const LOW_RISK_CASH_ON_CASH_PERCENT: f64 = 8.0;

pub fn classify_risk(cash_on_cash_return_percent: f64, monthly_cash_flow: f64) -> RiskLevel {
    if monthly_cash_flow < 0.0 || cash_on_cash_return_percent < HIGH_RISK_CASH_ON_CASH_PERCENT {
        RiskLevel::High
    } else if cash_on_cash_return_percent < LOW_RISK_CASH_ON_CASH_PERCENT {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn recommend_timing(risk: RiskLevel, monthly_cash_flow: f64) -> TimingRecommendation {
    if risk == RiskLevel::High {
        TimingRecommendation::Avoid
    } else if monthly_cash_flow > 0.0 {
        TimingRecommendation::BuyNow
    } else {
        TimingRecommendation::Watch
    }
}
