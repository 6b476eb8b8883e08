//! Audit log view controller
//!
//! The view is recomputed from the raw records on every change to the
//! filter, sort direction or page. Nothing derived is patched in place.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::{action_options, filter_records, status_options, FilterCriteria};
use crate::pagination::{visible_page_numbers, PageCursor, PageMarker, PageView, Paginator};
use crate::record::LogRecord;
use crate::sort::{sort_records, SortDirection};

/// User-controlled state of the audit log table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditViewState {
    /// Active filters
    pub criteria: FilterCriteria,
    /// Timestamp sort direction
    pub direction: SortDirection,
    /// Current page
    pub cursor: PageCursor,
}

impl AuditViewState {
    /// Fresh state: no filters, newest first, page 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the filters
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Set the sort direction
    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Request a page; clamped on the next derivation
    pub fn with_page(mut self, page: usize) -> Self {
        self.cursor = PageCursor::at(page);
        self
    }

    /// Flip the sort direction
    pub fn toggle_sort(&mut self) {
        self.direction = self.direction.toggle();
    }
}

/// Everything the audit table renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditView {
    /// Current page of the filtered, sorted records
    pub page: PageView<LogRecord>,
    /// Page-number control entries
    pub page_markers: Vec<PageMarker>,
    /// Every record that passed the filters, sorted; feeds export and print
    pub filtered: Vec<LogRecord>,
    /// Distinct action labels across all records
    pub action_options: Vec<String>,
    /// Distinct status labels across all records
    pub status_options: Vec<String>,
    /// Whether any filter narrowed the records
    pub filters_active: bool,
}

/// Filtered and sorted copy of `records`
pub fn filtered_records(records: &[LogRecord], state: &AuditViewState) -> Vec<LogRecord> {
    let mut filtered = filter_records(records, &state.criteria);
    sort_records(&mut filtered, state.direction);
    filtered
}

/// Derive the table view and re-clamp the page cursor.
///
/// The cursor is synced against the new page count every time, so narrowing
/// the filters while on a late page lands on the new last page.
pub fn derive_audit_view(
    records: &[LogRecord],
    state: &mut AuditViewState,
    paginator: &Paginator,
    window: usize,
) -> AuditView {
    let filtered = filtered_records(records, state);
    let total_pages = paginator.total_pages(filtered.len());
    let page_number = state.cursor.sync(total_pages);

    let page = paginator.paginate(&filtered, page_number);
    let page_markers = visible_page_numbers(page.page_number, page.total_pages, window);

    debug!(
        "Audit view: page {} of {} ({} matching records)",
        page.page_number,
        page.total_pages,
        filtered.len()
    );

    AuditView {
        page,
        page_markers,
        filtered,
        action_options: action_options(records),
        status_options: status_options(records),
        filters_active: state.criteria.is_active(),
    }
}

/// Header-card counts for a record set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// Number of records
    pub total: usize,
    /// Records per status label; records without one count under `Unknown`
    pub by_status: BTreeMap<String, usize>,
    /// Distinct user emails
    pub unique_users: usize,
}

impl AuditSummary {
    /// Count for one status label
    pub fn count(&self, status: &str) -> usize {
        self.by_status.get(status).copied().unwrap_or(0)
    }
}

/// Summarize a record set
pub fn summarize(records: &[LogRecord]) -> AuditSummary {
    let mut by_status = BTreeMap::new();
    for record in records {
        let status = record.status.clone().unwrap_or_else(|| "Unknown".to_string());
        *by_status.entry(status).or_insert(0) += 1;
    }

    let unique_users = records
        .iter()
        .map(|record| record.user_email.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    AuditSummary {
        total: records.len(),
        by_status,
        unique_users,
    }
}
