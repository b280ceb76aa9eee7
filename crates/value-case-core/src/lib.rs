//! Financial simulation and enterprise-value analysis engine.
//!
//! Imports company financial snapshots, overlays multi-year investment
//! strategies on a constant baseline over a 10-year horizon, and derives
//! enterprise-value estimates under three approaches (DCF, relative
//! multiple, market-based). All computation is synchronous, pure, and
//! decimal-precise; persistence and transport live in the surrounding
//! application layer.

pub mod comparison;
pub mod deal;
pub mod error;
pub mod metrics;
pub mod simulation;
pub mod strategy;
pub mod types;
pub mod valuation;

pub use error::ValueCaseError;
pub use types::*;

/// Standard result type for all value-case operations
pub type ValueCaseResult<T> = Result<T, ValueCaseError>;
