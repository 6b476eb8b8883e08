// Configuration management

use opsdeck_config::{ConfigManager, DashboardConfig};

use super::Command;
use crate::error::{CliError, CliResult};
use crate::output::OutputStyle;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default config file
    Init { force: bool },
}

/// Manage configuration
pub struct ConfigCommand {
    pub action: ConfigAction,
    /// Effective configuration, already resolved by the router
    pub config: DashboardConfig,
    pub manager: ConfigManager,
}

impl ConfigCommand {
    pub fn new(action: ConfigAction, config: DashboardConfig, manager: ConfigManager) -> Self {
        Self {
            action,
            config,
            manager,
        }
    }

    pub fn run(&self, style: &OutputStyle) -> CliResult<String> {
        match self.action {
            ConfigAction::Show => {
                let body = toml::to_string_pretty(&self.config)
                    .map_err(|e| CliError::Internal(e.to_string()))?;

                let mut lines = vec![style.header("OpsDeck Configuration"), String::new()];
                lines.push(body.trim_end().to_string());
                lines.push(String::new());
                let path = style.code(&self.manager.config_path().display().to_string());
                let source = if self.manager.config_path().exists() {
                    format!("Config file: {}", path)
                } else {
                    format!("Config file: {} (not found, using defaults)", path)
                };
                lines.push(style.info(&source));
                Ok(lines.join("\n"))
            }
            ConfigAction::Init { force } => {
                let path = self.manager.config_path();
                if path.exists() && !force {
                    return Ok(style.warning(&format!(
                        "{} already exists; pass --force to overwrite",
                        path.display()
                    )));
                }
                self.manager.save(&DashboardConfig::default())?;
                Ok(style.success(&format!("Wrote default configuration to {}", path.display())))
            }
        }
    }
}

#[async_trait::async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> CliResult<()> {
        println!("{}", self.run(&OutputStyle::default())?);
        Ok(())
    }
}
