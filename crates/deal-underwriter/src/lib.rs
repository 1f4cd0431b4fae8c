//! Rental deal underwriting.
//!
//! The [`underwriting`] module holds the pure analysis engine: defaulting of missing
//! inputs, loan amortization, deal metrics, the five-year projection, risk and timing
//! classification, commentary and ranking. The remaining modules carry the shared
//! service plumbing (configuration, telemetry, errors) used by the API binary.

pub mod config;
pub mod error;
pub mod request;
pub mod telemetry;
pub mod underwriting;
