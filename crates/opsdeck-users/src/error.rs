//! Error types for the user store

use opsdeck_audit::AuditError;
use thiserror::Error;

/// Result type for user store operations
pub type UserStoreResult<T> = Result<T, UserStoreError>;

/// Errors that can occur in the user directory and its repositories
#[derive(Error, Debug)]
pub enum UserStoreError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("A user with email {0} already exists")]
    DuplicateEmail(String),

    #[error("Invalid user: {message}")]
    InvalidUser { message: String },

    #[error("Unknown role: {0} (expected admin, manager or employee)")]
    UnknownRole(String),

    #[error("Unknown user status: {0}")]
    UnknownStatus(String),

    #[error("Pagination error: {0}")]
    Pagination(#[from] AuditError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl UserStoreError {
    /// Shorthand for [`UserStoreError::InvalidUser`]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidUser {
            message: message.into(),
        }
    }
}
