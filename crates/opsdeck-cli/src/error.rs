// CLI error types

use opsdeck_analytics::AnalyticsError;
use opsdeck_audit::AuditError;
use opsdeck_config::ConfigError;
use opsdeck_users::{DashboardView, Role, UserStoreError};
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Audit log error: {0}")]
    Audit(#[from] AuditError),

    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),

    #[error("User store error: {0}")]
    Users(#[from] UserStoreError),

    #[error("Role '{role}' cannot open the {view} view")]
    AccessDenied { role: Role, view: DashboardView },

    #[error("Failed to load audit logs: {0}")]
    LoadFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CliError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!(
                    "Invalid argument: {}\n\nRun 'opsdeck --help' for usage information.",
                    message
                )
            }
            CliError::Io(e) => format!("File operation failed: {}", e),
            CliError::Config(e) => {
                format!(
                    "Configuration error: {}\n\nRun 'opsdeck config show' to check your configuration.",
                    e
                )
            }
            CliError::Audit(e) => format!("Audit log error: {}", e),
            CliError::Analytics(e) => format!("Analytics error: {}", e),
            CliError::Users(UserStoreError::UserNotFound(id)) => {
                format!(
                    "No user with id '{}'.\n\nRun 'opsdeck users list' to see user ids.",
                    id
                )
            }
            CliError::Users(e) => format!("User store error: {}", e),
            CliError::AccessDenied { role, view } => {
                let allowed = role
                    .views()
                    .iter()
                    .map(|view| view.label())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "The {} view is not available to the {} role.\n\nViews available to {}: {}",
                    view, role, role, allowed
                )
            }
            CliError::LoadFailed(msg) => {
                format!(
                    "Failed to load audit logs: {}\n\nCheck the --source file, or omit it to use sample data.",
                    msg
                )
            }
            CliError::Internal(msg) => {
                format!("Internal error: {}\n\nPlease report this issue.", msg)
            }
        }
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

pub type CliResult<T> = Result<T, CliError>;
