//! OpsDeck Configuration Management
//!
//! Loads [`DashboardConfig`] from a TOML file with environment overrides,
//! validates it and writes it back.
//!
//! Sources are layered in order: built-in defaults, `config.toml` (optional),
//! then `OPSDECK__<SECTION>__<KEY>` environment variables.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::{ConfigManager, DEFAULT_ENV_PREFIX};
pub use types::{
    AnalyticsSettings, AuditSettings, DashboardConfig, LoaderSettings, LoggingSettings,
    MetricSettings, UserSettings, LOG_LEVELS,
};
