//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::{debug, info};

use crate::error::{ConfigError, Result};
use crate::types::{DashboardConfig, LOG_LEVELS};

/// Default environment prefix; `OPSDECK__AUDIT__PAGE_SIZE=10` overrides `audit.page_size`
pub const DEFAULT_ENV_PREFIX: &str = "OPSDECK";

/// Configuration manager
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    /// Create with custom config path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get default config path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("opsdeck")
            .join("config.toml")
    }

    /// Load defaults, then the config file if present, then environment overrides
    pub fn load(&self) -> Result<DashboardConfig> {
        let config = Config::builder()
            .add_source(File::from(self.config_path.clone()).required(false))
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let dashboard: DashboardConfig = config.try_deserialize()?;
        self.validate(&dashboard)?;
        debug!(path = %self.config_path.display(), "Loaded configuration");
        Ok(dashboard)
    }

    /// Write `config` as TOML, creating parent directories
    pub fn save(&self, config: &DashboardConfig) -> Result<()> {
        self.validate(config)?;
        let toml = toml::to_string_pretty(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        info!(path = %self.config_path.display(), "Saved configuration");
        Ok(())
    }

    /// Check value ranges the derivations depend on
    pub fn validate(&self, config: &DashboardConfig) -> Result<()> {
        if config.audit.page_size == 0 {
            return Err(ConfigError::Validation(
                "audit.page_size must be greater than 0".to_string(),
            ));
        }
        if config.audit.page_window == 0 {
            return Err(ConfigError::Validation(
                "audit.page_window must be at least 1".to_string(),
            ));
        }
        if config.audit.columns.is_empty() {
            return Err(ConfigError::Validation(
                "audit.columns must name at least one column".to_string(),
            ));
        }
        let level = config.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                config.logging.level
            )));
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
