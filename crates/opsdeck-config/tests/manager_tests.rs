//! Integration tests for loading and saving configuration

use opsdeck_analytics::{ChartPeriod, MetricKey, MetricToggles};
use opsdeck_audit::ExportColumn;
use opsdeck_config::{ConfigError, ConfigManager, DashboardConfig};
use proptest::prelude::*;
use tempfile::TempDir;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("config.toml"))
        .with_env_prefix("OPSDECK_TEST_MISSING");

    let config = manager.load().unwrap();

    assert_eq!(config, DashboardConfig::default());
}

#[test]
fn test_file_values_are_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[audit]
page_size = 10
columns = ["timestamp", "userName", "action"]

[analytics]
period = "1y"
seed = 42

[analytics.metrics]
error_rate = false

[loader]
delay_ms = 0
"#,
    )
    .unwrap();

    let config = ConfigManager::with_path(&path)
        .with_env_prefix("OPSDECK_TEST_FILE")
        .load()
        .unwrap();

    assert_eq!(config.audit.page_size, 10);
    assert_eq!(
        config.audit.columns,
        vec![
            ExportColumn::Timestamp,
            ExportColumn::UserName,
            ExportColumn::Action
        ]
    );
    assert_eq!(config.analytics.period, ChartPeriod::OneYear);
    assert_eq!(config.analytics.seed, Some(42));
    assert_eq!(config.loader.delay_ms, 0);

    let toggles = MetricToggles::from(config.analytics.metrics);
    assert!(!toggles.is_enabled(MetricKey::ErrorRate));
    assert!(toggles.is_enabled(MetricKey::Traffic));
}

#[test]
fn test_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[loader]\ndelay_ms = 250\n").unwrap();

    std::env::set_var("OPSDECK_TEST_ENV__LOADER__DELAY_MS", "5");
    let config = ConfigManager::with_path(&path)
        .with_env_prefix("OPSDECK_TEST_ENV")
        .load();
    std::env::remove_var("OPSDECK_TEST_ENV__LOADER__DELAY_MS");

    assert_eq!(config.unwrap().loader.delay_ms, 5);
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[audit]\npage_size = 0\n").unwrap();

    let result = ConfigManager::with_path(&path)
        .with_env_prefix("OPSDECK_TEST_INVALID")
        .load();

    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("nested/config.toml"))
        .with_env_prefix("OPSDECK_TEST_SAVE");

    let mut config = DashboardConfig::default();
    config.audit.page_size = 25;
    config.analytics.period = ChartPeriod::NinetyDays;
    config.analytics.seed = Some(7);
    config.logging.level = "debug".to_string();

    manager.save(&config).unwrap();
    assert_eq!(manager.load().unwrap(), config);
}

#[test]
fn test_save_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("config.toml"));
    let mut config = DashboardConfig::default();
    config.audit.page_window = 0;

    assert!(manager.save(&config).is_err());
    assert!(!manager.config_path().exists());
}

// ============================================================================
// Property: any valid page size and window survive a save/load cycle
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_pagination_settings_persist(page_size in 1usize..500, page_window in 1usize..20) {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("config.toml"))
            .with_env_prefix("OPSDECK_TEST_PROP");

        let mut config = DashboardConfig::default();
        config.audit.page_size = page_size;
        config.audit.page_window = page_window;
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        prop_assert_eq!(loaded.audit.page_size, page_size);
        prop_assert_eq!(loaded.audit.page_window, page_window);
    }
}
