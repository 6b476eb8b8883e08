//! Error types for the analytics crate

use thiserror::Error;

/// Result type for analytics operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors that can occur while generating or summarizing metric series
#[derive(Error, Debug, PartialEq)]
pub enum AnalyticsError {
    #[error("Unknown chart period: {0} (expected 7d, 30d, 90d or 1y)")]
    UnknownPeriod(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Series length mismatch: primary has {primary} points, comparison has {comparison}")]
    LengthMismatch { primary: usize, comparison: usize },
}
