use super::domain::{
    AgentCommentary, DealMetrics, PropertyInput, RiskLevel, TimingRecommendation,
};

pub const MAX_KEY_BULLETS: usize = 5;
/// Cap rate treated as the market average.
pub const CAP_RATE_BENCHMARK_PERCENT: f64 = 6.0;

const LIGHT_RENOVATION_RATIO: f64 = 0.05;
const MODERATE_RENOVATION_RATIO: f64 = 0.12;
const STRONG_UPLIFT_MULTIPLE: f64 = 1.5;

/// Builds the five narratives and key bullets from published metrics.
///
/// Every figure quoted in the text is formatted from `metrics` at two decimals, which is
/// the precision the metrics are published at.
pub fn generate(property: &PropertyInput, metrics: &DealMetrics) -> AgentCommentary {
    AgentCommentary {
        cash_flow_summary: cash_flow_summary(metrics),
        risk_summary: risk_summary(metrics),
        market_timing_summary: market_timing_summary(metrics),
        renovation_summary: renovation_summary(property),
        overall_summary: overall_summary(property, metrics),
        key_bullets: key_bullets(property, metrics),
    }
}

fn above_benchmark(metrics: &DealMetrics) -> bool {
    metrics.cap_rate_percent > CAP_RATE_BENCHMARK_PERCENT
}

fn cash_flow_summary(metrics: &DealMetrics) -> String {
    let cash_flow = metrics.monthly_cash_flow;
    if cash_flow > 0.0 && above_benchmark(metrics) {
        format!(
            "This property generates strong positive cash flow of {}/month with an above-average cap rate of {:.2}%.",
            format_currency(cash_flow),
            metrics.cap_rate_percent
        )
    } else if cash_flow > 0.0 {
        format!(
            "This property produces positive cash flow of {}/month, though its {:.2}% cap rate is at or below the market average.",
            format_currency(cash_flow),
            metrics.cap_rate_percent
        )
    } else if cash_flow == 0.0 {
        "This property breaks even each month and depends on appreciation for its return."
            .to_string()
    } else {
        format!(
            "This property runs negative cash flow of {}/month and relies more on appreciation than income.",
            format_currency(cash_flow.abs())
        )
    }
}

fn risk_summary(metrics: &DealMetrics) -> String {
    let coc = metrics.cash_on_cash_return_percent;
    match metrics.risk_level {
        RiskLevel::Low => format!(
            "Risk looks contained with a {coc:.2}% cash-on-cash return and a solid buffer."
        ),
        RiskLevel::Medium => format!(
            "Risk is moderate; a {coc:.2}% cash-on-cash return is acceptable but sensitive to small expense swings."
        ),
        RiskLevel::High if metrics.monthly_cash_flow < 0.0 => {
            "Risk is elevated due to negative monthly cash flow.".to_string()
        }
        RiskLevel::High => {
            format!("Risk is elevated due to a thin {coc:.2}% cash-on-cash return.")
        }
    }
}

fn market_timing_summary(metrics: &DealMetrics) -> String {
    let roi = metrics.five_year_total_roi_percent;
    match metrics.timing_recommendation {
        TimingRecommendation::BuyNow => {
            "Current pricing and returns justify moving forward at today's rates.".to_string()
        }
        TimingRecommendation::Watch => format!(
            "Monitor this deal; modest price or rate improvements would materially improve its {roi:.2}% projected 5-year ROI."
        ),
        TimingRecommendation::Avoid => format!(
            "Returns are weak at current terms, with projected 5-year ROI near {roi:.2}%."
        ),
    }
}

fn renovation_summary(property: &PropertyInput) -> String {
    let budget = property.renovation_budget;
    if budget <= 0.0 {
        return "No significant renovation planned; capital stack stays lean.".to_string();
    }

    let ratio = budget / property.list_price.max(1.0);
    let scope = if ratio < LIGHT_RENOVATION_RATIO {
        "Light renovation scope should improve livability without heavy capital risk."
    } else if ratio < MODERATE_RENOVATION_RATIO {
        "Moderate renovation budget signals meaningful updates with balanced risk."
    } else {
        "Heavy renovation budget raises execution risk; verify contractor bids and contingencies."
    };

    let uplift = property.arv - property.list_price;
    let economics = if property.arv <= 0.0 {
        "No after-repair value was provided, so the value-add is unverified.".to_string()
    } else if uplift > budget * STRONG_UPLIFT_MULTIPLE {
        format!(
            "Projected ARV uplift of {} returns {:.0}% of the {} budget.",
            format_currency(uplift),
            uplift / budget * 100.0,
            format_currency(budget)
        )
    } else if uplift > budget {
        format!(
            "Projected ARV uplift of {} roughly covers the {} budget with modest upside.",
            format_currency(uplift),
            format_currency(budget)
        )
    } else {
        format!(
            "Projected ARV uplift does not cover the {} budget; consider trimming scope or negotiating price.",
            format_currency(budget)
        )
    };

    format!("{scope} {economics}")
}

fn overall_summary(property: &PropertyInput, metrics: &DealMetrics) -> String {
    let name = &property.nickname;
    match (metrics.timing_recommendation, metrics.risk_level) {
        (TimingRecommendation::BuyNow, RiskLevel::Low) => {
            format!("{name} is a strong buy with balanced income and appreciation upside.")
        }
        (TimingRecommendation::BuyNow, _) => {
            format!("{name} is viable with acceptable returns for the risk profile.")
        }
        (TimingRecommendation::Watch, _) => {
            format!("{name} has potential but needs improved terms to clear target returns.")
        }
        (TimingRecommendation::Avoid, _) => {
            format!("{name} does not meet return thresholds at current pricing.")
        }
    }
}

fn key_bullets(property: &PropertyInput, metrics: &DealMetrics) -> Vec<String> {
    let mut bullets = Vec::with_capacity(MAX_KEY_BULLETS);

    let cash_flow = metrics.monthly_cash_flow;
    if cash_flow > 0.0 {
        bullets.push(format!(
            "Positive monthly cash flow of {}",
            format_currency(cash_flow)
        ));
    } else if cash_flow == 0.0 {
        bullets.push("Break-even monthly cash flow".to_string());
    } else {
        bullets.push(format!(
            "Negative monthly cash flow of {}",
            format_currency(cash_flow.abs())
        ));
    }

    bullets.push(format!(
        "{:.2}% cap rate ({} the {}% market average)",
        metrics.cap_rate_percent,
        if above_benchmark(metrics) {
            "above"
        } else {
            "at or below"
        },
        CAP_RATE_BENCHMARK_PERCENT
    ));

    bullets.push(format!(
        "5-year projected ROI of {:.2}%",
        metrics.five_year_total_roi_percent
    ));

    match metrics.risk_level {
        RiskLevel::Low => bullets.push("Strong fundamentals with low risk profile".to_string()),
        RiskLevel::High => bullets.push("Elevated risk requires careful consideration".to_string()),
        RiskLevel::Medium => {}
    }

    if property.renovation_budget > 0.0 && property.arv > property.list_price {
        bullets.push(format!(
            "Value-add opportunity with {} potential uplift",
            format_currency(property.arv - property.list_price)
        ));
    }

    bullets.truncate(MAX_KEY_BULLETS);
    bullets
}

/// Formats a dollar amount with thousands separators and two decimals, e.g. `$1,234.50`.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}
