//! Error types for the audit crate

use thiserror::Error;

/// Result type for audit operations
pub type AuditResult<T> = Result<T, AuditError>;

/// Errors that can occur while deriving or exporting audit views
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    #[error("Invalid date bound '{value}': {message}")]
    InvalidDateBound { value: String, message: String },

    #[error("Export error: {message}")]
    ExportError { message: String },

    #[error("Log source error: {message}")]
    SourceError { message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
