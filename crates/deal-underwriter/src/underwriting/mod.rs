//! Property financial-analysis engine.
//!
//! Data flows one way: raw input, defaulted input, loan figures, metrics, five-year
//! timeline, risk/timing classification, commentary, score. Every step is a pure
//! function of the property, the global assumptions and the analysis ZIP code.

pub mod amortization;
pub mod catalog;
pub mod classification;
pub mod commentary;
pub mod defaults;
pub mod domain;
mod engine;
pub mod metrics;
pub mod projection;
pub mod scoring;

pub use catalog::{
    CatalogError, CatalogListing, FinancingDefaults, ListingFilter, ListingImportError,
    ListingImporter, PropertyCatalog, PropertyType,
};
pub use domain::{
    AgentCommentary, DealMetrics, GlobalAssumptions, PropertyAnalysisResult, PropertyInput,
    RiskLevel, TimingRecommendation, YearProjection,
};
pub use engine::{analyze_properties, AnalysisSummary, UnderwritingEngine, UnderwritingError};
