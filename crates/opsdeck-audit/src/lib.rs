//! OpsDeck audit log derivation
//!
//! This crate turns raw audit log payloads into the views the dashboard
//! renders: normalized records, filtered and sorted result sets, fixed-size
//! pages with a windowed page-number control, CSV exports and a printable
//! HTML table.
//!
//! ## Pipeline
//!
//! ```text
//! raw JSON ─▶ normalize ─▶ filter ─▶ sort ─▶ paginate ─▶ page
//!                                      └──▶ to_csv / render_print_view
//! ```
//!
//! Every stage is a pure function. [`view::derive_audit_view`] runs the whole
//! pipeline from the raw records each time the view state changes.
//!
//! ## Usage
//!
//! ```rust
//! use opsdeck_audit::{
//!     derive_audit_view, normalize_records, AuditViewState, FilterCriteria, Paginator,
//! };
//!
//! let raw = serde_json::json!([
//!     {"userName": "Ana", "action": "Failed Login Attempt", "status": "Failed",
//!      "timestamp": "2023-10-24T10:00:00Z"}
//! ]);
//! let records = normalize_records(&raw);
//!
//! let mut state = AuditViewState::new()
//!     .with_criteria(FilterCriteria::new().with_query("login").with_status("Failed"));
//! let view = derive_audit_view(&records, &mut state, &Paginator::default(), 5);
//! assert_eq!(view.page.total_items, 1);
//! ```

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod normalize;
pub mod pagination;
pub mod print;
pub mod record;
pub mod samples;
pub mod sort;
pub mod view;

pub use error::{AuditError, AuditResult};
pub use export::{export_file_name, to_csv, write_csv_file, ExportColumn};
pub use filter::{
    action_options, filter_records, matches, status_options, FilterCriteria, Selection,
};
pub use loader::{JsonFileLogSource, LoadState, LogLoader, LogSource, StaticLogSource};
pub use normalize::{fallback_records, normalize_records};
pub use pagination::{
    visible_page_numbers, PageCursor, PageMarker, PageView, Paginator, DEFAULT_PAGE_SIZE,
    DEFAULT_PAGE_WINDOW,
};
pub use print::render_print_view;
pub use record::{parse_timestamp, LogRecord};
pub use sort::{compare_timestamps, sort_records, SortDirection};
pub use view::{derive_audit_view, filtered_records, summarize, AuditSummary, AuditView, AuditViewState};
