use super::classification::{classify_risk, recommend_timing};
use super::commentary;
use super::defaults::apply_defaults;
use super::domain::{round2, DealMetrics, GlobalAssumptions, PropertyAnalysisResult, PropertyInput};
use super::metrics;
use super::projection::project;
use super::scoring::{overall_score, rank};
use tracing::{debug, info};

/// Caller contract violations. Numeric inputs never produce an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnderwritingError {
    #[error("invalid input: at least one property is required")]
    EmptyPortfolio,
    #[error("invalid input: property #{index} is missing its {field}")]
    MissingIdentity { index: usize, field: &'static str },
}

/// Stateless analyzer bound to one set of global assumptions.
#[derive(Debug, Clone)]
pub struct UnderwritingEngine {
    assumptions: GlobalAssumptions,
}

impl UnderwritingEngine {
    pub fn new(assumptions: GlobalAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &GlobalAssumptions {
        &self.assumptions
    }

    /// Runs the full pipeline for one property. `zip_code` is the analysis ZIP used for
    /// carrying-cost estimates, not necessarily the property's own ZIP.
    pub fn analyze_property(&self, property: &PropertyInput, zip_code: &str) -> PropertyAnalysisResult {
        let property = apply_defaults(property, &self.assumptions, zip_code);
        let figures = metrics::calculate(&property);
        let projection = project(&property, &figures, &self.assumptions);

        let risk_level = classify_risk(
            figures.cash_on_cash_return_percent,
            figures.monthly_cash_flow,
        );
        let timing_recommendation = recommend_timing(risk_level, figures.monthly_cash_flow);

        let metrics = DealMetrics {
            monthly_mortgage_payment: round2(figures.monthly_mortgage_payment),
            monthly_operating_expenses: round2(figures.monthly_operating_expenses),
            monthly_noi: round2(figures.monthly_noi),
            monthly_cash_flow: round2(figures.monthly_cash_flow),
            cap_rate_percent: round2(figures.cap_rate_percent),
            cash_on_cash_return_percent: round2(figures.cash_on_cash_return_percent),
            five_year_total_roi_percent: round2(projection.total_roi_percent),
            five_year_equity_built: round2(projection.equity_built),
            five_year_total_cash_flow: round2(projection.total_cash_flow),
            risk_level,
            timing_recommendation,
        };

        let commentary = commentary::generate(&property, &metrics);
        let overall_score = overall_score(&metrics);

        debug!(
            property_id = %property.id,
            overall_score,
            risk = %metrics.risk_level,
            timing = %metrics.timing_recommendation,
            "property underwritten"
        );

        PropertyAnalysisResult {
            property,
            metrics,
            timeline: projection.timeline,
            commentary,
            overall_score,
        }
    }

    /// Analyzes every property and returns the results best-first.
    ///
    /// Property count limits are the caller's concern; only an empty batch or a property
    /// without identity is rejected.
    pub fn analyze(
        &self,
        properties: &[PropertyInput],
        zip_code: &str,
    ) -> Result<Vec<PropertyAnalysisResult>, UnderwritingError> {
        validate(properties)?;

        let mut results: Vec<PropertyAnalysisResult> = properties
            .iter()
            .map(|property| self.analyze_property(property, zip_code))
            .collect();
        rank(&mut results);

        info!(
            zip_code,
            properties = results.len(),
            top_pick = %results[0].property.id,
            "analysis batch ranked"
        );

        Ok(results)
    }
}

/// Convenience wrapper for one-off analyses.
pub fn analyze_properties(
    properties: &[PropertyInput],
    assumptions: &GlobalAssumptions,
    zip_code: &str,
) -> Result<Vec<PropertyAnalysisResult>, UnderwritingError> {
    UnderwritingEngine::new(*assumptions).analyze(properties, zip_code)
}

fn validate(properties: &[PropertyInput]) -> Result<(), UnderwritingError> {
    if properties.is_empty() {
        return Err(UnderwritingError::EmptyPortfolio);
    }

    for (index, property) in properties.iter().enumerate() {
        if property.id.trim().is_empty() {
            return Err(UnderwritingError::MissingIdentity { index, field: "id" });
        }
        if property.nickname.trim().is_empty() {
            return Err(UnderwritingError::MissingIdentity {
                index,
                field: "nickname",
            });
        }
    }

    Ok(())
}

/// Human-readable headline for a ranked batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSummary(String);

impl AnalysisSummary {
    /// Returns `None` for an empty result set.
    pub fn from_ranked(results: &[PropertyAnalysisResult], zip_code: &str) -> Option<Self> {
        let top = results.first()?;
        Some(Self(format!(
            "Analyzed {} properties in ZIP {}. Top pick: {} with {:.2}% cash-on-cash return and {} risk profile.",
            results.len(),
            zip_code,
            top.property.nickname,
            top.metrics.cash_on_cash_return_percent,
            top.metrics.risk_level
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
