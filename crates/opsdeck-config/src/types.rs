//! Core configuration types

use std::path::PathBuf;
use std::time::Duration;

use opsdeck_analytics::{ChartPeriod, MetricKey, MetricToggles};
use opsdeck_audit::loader::DEFAULT_LOAD_DELAY;
use opsdeck_audit::{ExportColumn, DEFAULT_PAGE_SIZE, DEFAULT_PAGE_WINDOW};
use serde::{Deserialize, Serialize};

/// Log levels accepted by `logging.level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Audit log table
    pub audit: AuditSettings,
    /// Analytics chart
    pub analytics: AnalyticsSettings,
    /// User store
    pub users: UserSettings,
    /// Simulated log loading
    pub loader: LoaderSettings,
    /// Logging
    pub logging: LoggingSettings,
}

/// Audit log table configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuditSettings {
    /// Rows per page
    pub page_size: usize,
    /// Page numbers shown before the control collapses into ellipses
    pub page_window: usize,
    /// Columns written by CSV export and the print view
    pub columns: Vec<ExportColumn>,
}

/// Analytics chart configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Initially selected period
    pub period: ChartPeriod,
    /// Fixed seed for reproducible series; random when unset
    pub seed: Option<u64>,
    /// Metrics shown on the chart
    pub metrics: MetricSettings,
}

/// Per-metric visibility
///
/// Keys are snake_case so they survive the case folding of environment
/// overrides.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MetricSettings {
    pub traffic: bool,
    pub error_rate: bool,
    pub response_time: bool,
    pub success_rate: bool,
}

/// User store configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct UserSettings {
    /// Path of the JSON user store; platform data dir when unset
    pub store_path: Option<PathBuf>,
}

/// Simulated load configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoaderSettings {
    /// Delay before the log source is read, in milliseconds
    pub delay_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Max level: trace, debug, info, warn or error
    pub level: String,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_window: DEFAULT_PAGE_WINDOW,
            columns: ExportColumn::ALL.to_vec(),
        }
    }
}

impl Default for MetricSettings {
    fn default() -> Self {
        Self::from(MetricToggles::default())
    }
}

impl From<MetricToggles> for MetricSettings {
    fn from(toggles: MetricToggles) -> Self {
        Self {
            traffic: toggles.traffic,
            error_rate: toggles.error_rate,
            response_time: toggles.response_time,
            success_rate: toggles.success_rate,
        }
    }
}

impl From<MetricSettings> for MetricToggles {
    fn from(settings: MetricSettings) -> Self {
        let mut toggles = MetricToggles::default();
        toggles.set(MetricKey::Traffic, settings.traffic);
        toggles.set(MetricKey::ErrorRate, settings.error_rate);
        toggles.set(MetricKey::ResponseTime, settings.response_time);
        toggles.set(MetricKey::SuccessRate, settings.success_rate);
        toggles
    }
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_LOAD_DELAY.as_millis() as u64,
        }
    }
}

impl LoaderSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl UserSettings {
    /// Configured store path, or `<data dir>/opsdeck/users.json`
    pub fn resolved_store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("opsdeck")
                .join("users.json")
        })
    }
}
