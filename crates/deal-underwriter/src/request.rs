//! Request/response envelope shared by the HTTP routes and the CLI.

use crate::underwriting::{
    AnalysisSummary, GlobalAssumptions, PropertyAnalysisResult, PropertyInput, UnderwritingEngine,
    UnderwritingError,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_PROPERTIES: usize = 2;
pub const MAX_PROPERTIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde(default)]
    pub zip_code: String,
    /// Falls back to the configured assumptions when omitted.
    #[serde(default)]
    pub global_assumptions: Option<GlobalAssumptions>,
    #[serde(default)]
    pub properties: Vec<PropertyInput>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMeta {
    pub zip_code: String,
    pub summary: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub results: Vec<PropertyAnalysisResult>,
    pub meta: AnalysisMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("a ZIP code is required")]
    MissingZip,
    #[error("at least {min} properties are required, got {0}", min = MIN_PROPERTIES)]
    TooFewProperties(usize),
    #[error("at most {max} properties are allowed per analysis, got {0}", max = MAX_PROPERTIES)]
    TooManyProperties(usize),
    #[error(transparent)]
    Underwriting(#[from] UnderwritingError),
}

impl AnalysisRequest {
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.zip_code.trim().is_empty() {
            return Err(RequestError::MissingZip);
        }

        let count = self.properties.len();
        if count < MIN_PROPERTIES {
            return Err(RequestError::TooFewProperties(count));
        }
        if count > MAX_PROPERTIES {
            return Err(RequestError::TooManyProperties(count));
        }

        Ok(())
    }

    /// Validates the envelope, runs the engine and wraps the ranked results.
    pub fn execute(
        self,
        fallback: &GlobalAssumptions,
        generated_at: DateTime<Utc>,
    ) -> Result<AnalysisResponse, RequestError> {
        self.validate()?;

        let zip_code = self.zip_code.trim().to_string();
        let assumptions = self.global_assumptions.unwrap_or(*fallback);
        let engine = UnderwritingEngine::new(assumptions);
        let results = engine.analyze(&self.properties, &zip_code)?;
        let summary = AnalysisSummary::from_ranked(&results, &zip_code)
            .ok_or(UnderwritingError::EmptyPortfolio)?;

        Ok(AnalysisResponse {
            results,
            meta: AnalysisMeta {
                zip_code,
                summary: summary.into_string(),
                generated_at,
            },
        })
    }
}
