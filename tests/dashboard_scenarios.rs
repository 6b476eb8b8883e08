//! Cross-crate dashboard scenarios
//!
//! Each test drives the same path the CLI does: configuration, then the
//! library crates, checking the observable outcome.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use opsdeck_analytics::{ChartPeriod, MetricSeriesGenerator, MetricToggles, SeededRandom};
use opsdeck_audit::samples::sample_payload;
use opsdeck_audit::{
    derive_audit_view, filtered_records, normalize_records, render_print_view, summarize, to_csv,
    AuditViewState, FilterCriteria, LoadState, LogLoader, PageMarker, Paginator, SortDirection,
    StaticLogSource,
};
use opsdeck_config::{ConfigManager, DashboardConfig};
use opsdeck_users::{
    DashboardView, InMemoryUserRepository, JsonFileUserRepository, Role, UserDirectory, UserQuery,
};
use proptest::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn config_from(dir: &TempDir, toml: &str) -> DashboardConfig {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, toml).unwrap();
    ConfigManager::with_path(path)
        .with_env_prefix("OPSDECK_SCENARIO")
        .load()
        .unwrap()
}

#[test]
fn admin_filters_failed_logins_and_exports_them() {
    let records = normalize_records(&sample_payload());
    let state = AuditViewState::new().with_criteria(
        FilterCriteria::new()
            .with_query("login")
            .with_status("Failed"),
    );

    let filtered = filtered_records(&records, &state);
    assert_eq!(filtered.len(), 3);

    let csv = to_csv(&filtered, &opsdeck_audit::ExportColumn::ALL).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.lines().skip(1).all(|line| line.contains("\"Failed\"")));

    let summary = summarize(&filtered);
    assert_eq!(summary.count("Failed"), 3);
}

#[test]
fn configured_page_size_drives_the_table() {
    let dir = TempDir::new().unwrap();
    let config = config_from(&dir, "[audit]\npage_size = 2\npage_window = 3\n");

    let records = normalize_records(&sample_payload());
    let paginator = Paginator::new(config.audit.page_size).unwrap();
    let mut state = AuditViewState::new().with_page(3);

    let view = derive_audit_view(&records, &mut state, &paginator, config.audit.page_window);

    assert_eq!(view.page.total_pages, 6);
    assert_eq!(view.page.page_number, 3);
    assert_eq!(
        view.page_markers,
        vec![
            PageMarker::Page(1),
            PageMarker::Page(2),
            PageMarker::Page(3),
            PageMarker::Page(4),
            PageMarker::Ellipsis,
            PageMarker::Page(6),
        ]
    );
}

#[test]
fn narrowing_filters_on_a_late_page_lands_on_the_last_page() {
    let records = normalize_records(&sample_payload());
    let paginator = Paginator::new(2).unwrap();
    let mut state = AuditViewState::new().with_page(6);

    let before = derive_audit_view(&records, &mut state, &paginator, 5);
    assert_eq!(before.page.page_number, 6);

    state.criteria = FilterCriteria::new().with_status("Failed");
    let after = derive_audit_view(&records, &mut state, &paginator, 5);

    assert_eq!(after.page.total_pages, 2);
    assert_eq!(after.page.page_number, 2);
    assert_eq!(state.cursor.current(), 2);
}

#[test]
fn single_day_range_includes_late_evening_entries() {
    let records = normalize_records(&sample_payload());
    let criteria = FilterCriteria::new()
        .with_date_from("2023-10-24")
        .with_date_to("2023-10-24");

    let state = AuditViewState::new()
        .with_criteria(criteria)
        .with_direction(SortDirection::Ascending);
    let filtered = filtered_records(&records, &state);

    assert_eq!(filtered.len(), 5);
    assert_eq!(filtered.last().unwrap().timestamp, "2023-10-24T23:59:00Z");
}

#[test]
fn print_view_matches_the_filtered_set() {
    let records = normalize_records(&json!([
        {"id": "x", "timestamp": "2023-10-24T10:00:00Z", "action": "<script>", "status": "Failed"},
        {"id": "y", "timestamp": "2023-10-24T11:00:00Z", "action": "Login", "status": "Success"}
    ]));
    let state = AuditViewState::new().with_criteria(FilterCriteria::new().with_status("Failed"));
    let filtered = filtered_records(&records, &state);

    let generated = chrono::DateTime::parse_from_rfc3339("2023-10-25T00:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let html = render_print_view(&filtered, &opsdeck_audit::ExportColumn::ALL, generated);

    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("Login"));
}

#[tokio::test]
async fn loader_uses_configured_delay_and_falls_back_on_empty_payload() {
    let dir = TempDir::new().unwrap();
    let config = config_from(&dir, "[loader]\ndelay_ms = 1\n");
    assert_eq!(config.loader.delay(), Duration::from_millis(1));

    let loader = LogLoader::new(Arc::new(StaticLogSource::new(json!([]))), config.loader.delay());
    assert_eq!(loader.state().await, LoadState::Loading);

    let state = loader.load().await;
    let records = state.records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "evt_0");
}

#[test]
fn seeded_analytics_from_config_are_reproducible() {
    let dir = TempDir::new().unwrap();
    let config = config_from(
        &dir,
        "[analytics]\nperiod = \"7d\"\nseed = 2024\n\n[analytics.metrics]\nresponse_time = false\n",
    );

    let generator = MetricSeriesGenerator::new(NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
    let seed = config.analytics.seed.unwrap();

    let a = generator
        .snapshot(config.analytics.period, &mut SeededRandom::new(seed))
        .unwrap();
    let b = generator
        .snapshot(config.analytics.period, &mut SeededRandom::new(seed))
        .unwrap();

    assert_eq!(a, b);
    assert_eq!(a.series.period, ChartPeriod::SevenDays);
    assert_eq!(a.series.labels.last().unwrap(), "Sun");

    let toggles = MetricToggles::from(config.analytics.metrics);
    assert_eq!(toggles.enabled().len(), 3);
}

#[test]
fn roles_gate_views_for_directory_users() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let directory = UserDirectory::open(repo).unwrap();

    let managers = directory.search(&UserQuery::new().with_role(Role::Manager));
    assert!(!managers.is_empty());
    for manager in &managers {
        assert!(manager.role.can_access(DashboardView::Analytics));
        assert!(!manager.role.can_access(DashboardView::AuditLog));
    }

    let admins = directory.search(&UserQuery::new().with_role(Role::Admin));
    assert!(admins
        .iter()
        .all(|admin| admin.role.can_access(DashboardView::AuditLog)));
}

#[test]
fn user_store_path_from_config_persists_changes() {
    let dir = TempDir::new().unwrap();
    let store = dir.path().join("data").join("users.json");
    let config = config_from(
        &dir,
        &format!("[users]\nstore_path = {:?}\n", store.display().to_string()),
    );
    assert_eq!(config.users.resolved_store_path(), store);

    let repo = Arc::new(JsonFileUserRepository::new(config.users.resolved_store_path()));
    let mut directory = UserDirectory::open(repo.clone()).unwrap();
    directory.remove("usr_002").unwrap();

    let reopened = UserDirectory::open(repo).unwrap();
    assert!(reopened.get("usr_002").is_none());
    assert_eq!(reopened.len(), 11);
}

proptest! {
    #[test]
    fn any_requested_page_renders_a_valid_page(
        page in 0usize..50,
        page_size in 1usize..15,
        status in prop::sample::select(vec!["All", "Success", "Failed", "Pending", "Nope"]),
    ) {
        let records = normalize_records(&sample_payload());
        let paginator = Paginator::new(page_size).unwrap();
        let mut state = AuditViewState::new()
            .with_criteria(FilterCriteria::new().with_status(status))
            .with_page(page);

        let view = derive_audit_view(&records, &mut state, &paginator, 5);

        prop_assert!(view.page.page_number >= 1);
        prop_assert!(view.page.page_number <= view.page.total_pages);
        prop_assert!(view.page.items.len() <= page_size);
        prop_assert!(view.page_markers.contains(&PageMarker::Page(view.page.page_number)));
    }
}
