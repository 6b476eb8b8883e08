// Audit log table, export and print view

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use opsdeck_audit::samples::sample_payload;
use opsdeck_audit::{
    derive_audit_view, render_print_view, summarize, write_csv_file, AuditView, AuditViewState,
    FilterCriteria, JsonFileLogSource, LoadState, LogLoader, LogRecord, LogSource, Paginator,
    SortDirection, StaticLogSource,
};
use opsdeck_config::AuditSettings;
use tracing::{debug, info};

use super::Command;
use crate::error::{CliError, CliResult};
use crate::output::OutputStyle;

/// Which records to load and how to slice them
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    /// JSON file with raw log entries; built-in sample data when unset
    pub source: Option<PathBuf>,
    pub criteria: FilterCriteria,
    pub direction: SortDirection,
    pub page: usize,
}

#[derive(Debug, Clone)]
pub enum AuditAction {
    /// Render one page of the table
    List,
    /// Write every matching record as CSV into a directory
    Export { out_dir: PathBuf },
    /// Write the printable HTML view, or return it when no path is given
    Print { out: Option<PathBuf> },
}

/// Audit log command
pub struct AuditCommand {
    pub action: AuditAction,
    pub query: AuditQuery,
    pub settings: AuditSettings,
    pub load_delay: Duration,
}

impl AuditCommand {
    pub fn new(
        action: AuditAction,
        query: AuditQuery,
        settings: AuditSettings,
        load_delay: Duration,
    ) -> Self {
        Self {
            action,
            query,
            settings,
            load_delay,
        }
    }

    /// Fetch and normalize records through the loader
    pub async fn load_records(&self) -> CliResult<Vec<LogRecord>> {
        let source: Arc<dyn LogSource> = match &self.query.source {
            Some(path) => Arc::new(JsonFileLogSource::new(path.clone())),
            None => Arc::new(StaticLogSource::new(sample_payload())),
        };

        match LogLoader::new(source, self.load_delay).load().await {
            LoadState::Ready(records) => Ok(records),
            LoadState::Failed(message) => Err(CliError::LoadFailed(message)),
            LoadState::Loading => Err(CliError::Internal(
                "log load finished without a result".to_string(),
            )),
        }
    }

    /// Run the pipeline for the current query
    pub fn derive(&self, records: &[LogRecord]) -> CliResult<AuditView> {
        self.query.criteria.validate()?;
        let paginator = Paginator::new(self.settings.page_size)?;
        let mut state = AuditViewState::new()
            .with_criteria(self.query.criteria.clone())
            .with_direction(self.query.direction)
            .with_page(self.query.page.max(1));

        Ok(derive_audit_view(
            records,
            &mut state,
            &paginator,
            self.settings.page_window,
        ))
    }

    /// Perform the action and return what should be printed
    pub async fn run(&self, style: &OutputStyle) -> CliResult<String> {
        let records = self.load_records().await?;
        let view = self.derive(&records)?;
        debug!(
            total = records.len(),
            matched = view.filtered.len(),
            "Derived audit view"
        );

        match &self.action {
            AuditAction::List => Ok(render_page(&view, style)),
            AuditAction::Export { out_dir } => {
                let path = write_csv_file(
                    out_dir,
                    &view.filtered,
                    &self.settings.columns,
                    Utc::now().date_naive(),
                )?;
                Ok(style.success(&format!(
                    "Exported {} records to {}",
                    view.filtered.len(),
                    path.display()
                )))
            }
            AuditAction::Print { out } => {
                let html = render_print_view(&view.filtered, &self.settings.columns, Utc::now());
                match out {
                    Some(path) => {
                        if let Some(parent) = path.parent() {
                            std::fs::create_dir_all(parent)?;
                        }
                        std::fs::write(path, html)?;
                        info!(path = %path.display(), "Wrote print view");
                        Ok(style.success(&format!("Print view written to {}", path.display())))
                    }
                    None => Ok(html),
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl Command for AuditCommand {
    async fn execute(&self) -> CliResult<()> {
        let style = OutputStyle::default();
        println!("{}", self.run(&style).await?);
        Ok(())
    }
}

/// Summary cards, the page table and the page-number control
pub fn render_page(view: &AuditView, style: &OutputStyle) -> String {
    let summary = summarize(&view.filtered);
    let mut lines = vec![style.header(&format!(
        "Audit Log: {} matching records, {} users",
        summary.total, summary.unique_users
    ))];

    let counts = summary
        .by_status
        .iter()
        .map(|(status, count)| format!("{} {}", style.status(status), count))
        .collect::<Vec<_>>()
        .join("  ");
    if !counts.is_empty() {
        lines.push(counts);
    }
    lines.push(style.key_value("Actions", &view.action_options.join(", ")));
    lines.push(style.key_value("Statuses", &view.status_options.join(", ")));
    if view.filters_active {
        lines.push(style.info("Filters active"));
    }
    lines.push(String::new());

    if view.page.items.is_empty() {
        lines.push(style.info("No audit records match the current filters"));
        return lines.join("\n");
    }

    let rows: Vec<Vec<String>> = view
        .page
        .items
        .iter()
        .map(|record| {
            vec![
                record.timestamp.clone(),
                record.user_name.clone(),
                record.user_email.clone(),
                record.action.clone(),
                record.ip.clone().unwrap_or_default(),
                record.status.clone().unwrap_or_default(),
            ]
        })
        .collect();
    lines.push(style.table(
        &["Timestamp", "User", "Email", "Action", "IP Address", "Status"],
        &rows,
    ));
    lines.push(String::new());

    let markers = view
        .page_markers
        .iter()
        .map(|marker| match marker {
            opsdeck_audit::PageMarker::Page(n) if *n == view.page.page_number => {
                format!("[{}]", n)
            }
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    lines.push(format!(
        "Showing {}-{} of {}  Page {} of {}  {}",
        view.page.first_item_index(),
        view.page.last_item_index(),
        view.page.total_items,
        view.page.page_number,
        view.page.total_pages,
        markers
    ));

    lines.join("\n")
}
