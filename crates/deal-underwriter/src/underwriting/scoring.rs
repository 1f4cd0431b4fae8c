use super::domain::{round2, DealMetrics, PropertyAnalysisResult, RiskLevel};

pub const CASH_ON_CASH_WEIGHT: f64 = 0.6;
pub const CAP_RATE_WEIGHT: f64 = 0.4;
pub const HIGH_RISK_PENALTY: f64 = 10.0;
/// Five-year ROI contributes one point per this many percent.
pub const FIVE_YEAR_ROI_DIVISOR: f64 = 20.0;

/// Weighted return score used to order a batch, rounded to two decimals.
pub fn overall_score(metrics: &DealMetrics) -> f64 {
    let mut score = metrics.cash_on_cash_return_percent * CASH_ON_CASH_WEIGHT
        + metrics.cap_rate_percent * CAP_RATE_WEIGHT;
    if metrics.risk_level == RiskLevel::High {
        score -= HIGH_RISK_PENALTY;
    }
    round2(score + metrics.five_year_total_roi_percent / FIVE_YEAR_ROI_DIVISOR)
}

/// Sorts results best-first. The sort is stable, so equal scores keep input order.
/// A NaN score ranks after every number.
pub fn rank(results: &mut [PropertyAnalysisResult]) {
    results.sort_by(|a, b| {
        a.overall_score
            .is_nan()
            .cmp(&b.overall_score.is_nan())
            .then_with(|| b.overall_score.total_cmp(&a.overall_score))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::underwriting::domain::{
        AgentCommentary, PropertyInput, TimingRecommendation,
    };

    fn metrics(coc: f64, cap: f64, roi: f64, risk: RiskLevel) -> DealMetrics {
        DealMetrics {
            monthly_mortgage_payment: 0.0,
            monthly_operating_expenses: 0.0,
            monthly_noi: 0.0,
            monthly_cash_flow: 0.0,
            cap_rate_percent: cap,
            cash_on_cash_return_percent: coc,
            five_year_total_roi_percent: roi,
            five_year_equity_built: 0.0,
            five_year_total_cash_flow: 0.0,
            risk_level: risk,
            timing_recommendation: TimingRecommendation::Watch,
        }
    }

    fn result(id: &str, score: f64) -> PropertyAnalysisResult {
        PropertyAnalysisResult {
            property: PropertyInput {
                id: id.to_string(),
                nickname: id.to_string(),
                ..PropertyInput::default()
            },
            metrics: metrics(0.0, 0.0, 0.0, RiskLevel::Medium),
            timeline: Vec::new(),
            commentary: AgentCommentary {
                cash_flow_summary: String::new(),
                risk_summary: String::new(),
                market_timing_summary: String::new(),
                renovation_summary: String::new(),
                overall_summary: String::new(),
                key_bullets: Vec::new(),
            },
            overall_score: score,
        }
    }

    #[test]
    fn score_weights_returns_and_roi() {
        // 10 * 0.6 + 5 * 0.4 + 40 / 20 = 6 + 2 + 2
        assert_eq!(overall_score(&metrics(10.0, 5.0, 40.0, RiskLevel::Low)), 10.0);
    }

    #[test]
    fn high_risk_is_penalized() {
        let medium = overall_score(&metrics(4.0, 5.0, 20.0, RiskLevel::Medium));
        let high = overall_score(&metrics(4.0, 5.0, 20.0, RiskLevel::High));
        assert!((medium - high - HIGH_RISK_PENALTY).abs() < 1e-9);
    }

    #[test]
    fn score_is_rounded_to_cents() {
        let score = overall_score(&metrics(3.333, 4.444, 12.345, RiskLevel::Medium));
        assert_eq!(score, round2(3.333 * 0.6 + 4.444 * 0.4 + 12.345 / 20.0));
    }

    #[test]
    fn rank_orders_descending() {
        let mut results = vec![result("a", 1.5), result("b", 9.25), result("c", -4.0)];
        rank(&mut results);
        let ids: Vec<&str> = results.iter().map(|r| r.property.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn rank_keeps_input_order_for_ties() {
        let mut results = vec![
            result("first", 5.0),
            result("top", 7.0),
            result("second", 5.0),
            result("third", 5.0),
        ];
        rank(&mut results);
        let ids: Vec<&str> = results.iter().map(|r| r.property.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn nan_scores_rank_last_in_input_order() {
        let mut results = vec![
            result("nan-a", f64::NAN),
            result("low", -3.0),
            result("nan-b", f64::NAN),
            result("high", 12.0),
            result("infinite", f64::INFINITY),
        ];
        rank(&mut results);
        let ids: Vec<&str> = results.iter().map(|r| r.property.id.as_str()).collect();
        assert_eq!(ids, vec!["infinite", "high", "low", "nan-a", "nan-b"]);
    }
}
