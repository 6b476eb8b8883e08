// Command handlers for the opsdeck CLI

pub mod analytics;
pub mod audit;
pub mod config;
pub mod users;

pub use analytics::AnalyticsCommand;
pub use audit::{AuditAction, AuditCommand, AuditQuery};
pub use config::{ConfigAction, ConfigCommand};
pub use users::{UsersAction, UsersCommand};

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self) -> CliResult<()>;
}
