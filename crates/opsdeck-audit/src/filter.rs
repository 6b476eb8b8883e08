//! Audit log filtering
//!
//! A [`FilterCriteria`] combines four independent predicates with AND: a free
//! text query, an action selection, a status selection and an inclusive date
//! range. Evaluation is pure; invalid input never raises an error here, see
//! [`FilterCriteria::validate`] for checking user input up front.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AuditError, AuditResult};
use crate::record::LogRecord;

/// Label that disables a categorical filter
pub const ALL: &str = "All";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Categorical filter value
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    /// Accept every value
    #[default]
    All,
    /// Accept only this exact value
    Only(String),
}

impl Selection {
    /// Check whether a field value passes this selection.
    ///
    /// A missing value only passes [`Selection::All`].
    pub fn accepts(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => value == Some(expected.as_str()),
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        if value == ALL {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value == ALL {
            Selection::All
        } else {
            Selection::Only(value)
        }
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => ALL.to_string(),
            Selection::Only(value) => value,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "{}", ALL),
            Selection::Only(value) => write!(f, "{}", value),
        }
    }
}

/// Filter criteria for the audit log view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Free text matched against action, user name, user email and IP
    pub query: String,
    /// Exact action filter
    pub action_filter: Selection,
    /// Exact status filter
    pub status_filter: Selection,
    /// Inclusive start date (`YYYY-MM-DD`), empty for none
    pub date_from: String,
    /// Inclusive end date (`YYYY-MM-DD`), empty for none
    pub date_to: String,
}

impl FilterCriteria {
    /// Create criteria that accept every record
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by free text
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Filter by action
    pub fn with_action(mut self, action: impl Into<Selection>) -> Self {
        self.action_filter = action.into();
        self
    }

    /// Filter by status
    pub fn with_status(mut self, status: impl Into<Selection>) -> Self {
        self.status_filter = status.into();
        self
    }

    /// Filter by start date
    pub fn with_date_from(mut self, date: impl Into<String>) -> Self {
        self.date_from = date.into();
        self
    }

    /// Filter by end date
    pub fn with_date_to(mut self, date: impl Into<String>) -> Self {
        self.date_to = date.into();
        self
    }

    /// Check if a record matches all four predicates
    pub fn matches(&self, record: &LogRecord) -> bool {
        self.matches_query(record)
            && self.action_filter.accepts(Some(&record.action))
            && self.status_filter.accepts(record.status.as_deref())
            && self.matches_date_range(record)
    }

    /// Check that non-empty date bounds parse and are ordered
    pub fn validate(&self) -> AuditResult<()> {
        let from = Self::checked_bound(&self.date_from)?;
        let to = Self::checked_bound(&self.date_to)?;

        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(AuditError::InvalidDateBound {
                    value: self.date_from.clone(),
                    message: format!("start date is after end date {}", self.date_to),
                });
            }
        }

        Ok(())
    }

    /// Start of the range: 00:00:00 UTC on `date_from`
    pub fn lower_bound(&self) -> Option<DateTime<Utc>> {
        parse_bound_date(&self.date_from)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// End of the range: 23:59:59 UTC on `date_to`
    pub fn upper_bound(&self) -> Option<DateTime<Utc>> {
        parse_bound_date(&self.date_to)
            .and_then(|date| date.and_hms_opt(23, 59, 59))
            .map(|naive| naive.and_utc())
    }

    /// Whether any predicate is active
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
            || self.action_filter != Selection::All
            || self.status_filter != Selection::All
            || self.lower_bound().is_some()
            || self.upper_bound().is_some()
    }

    fn matches_query(&self, record: &LogRecord) -> bool {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            Some(record.action.as_str()),
            Some(record.user_name.as_str()),
            Some(record.user_email.as_str()),
            record.ip.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_date_range(&self, record: &LogRecord) -> bool {
        let lower = self.lower_bound();
        let upper = self.upper_bound();
        if lower.is_none() && upper.is_none() {
            return true;
        }

        let Some(timestamp) = record.parsed_timestamp() else {
            return false;
        };

        lower.map_or(true, |start| timestamp >= start) && upper.map_or(true, |end| timestamp <= end)
    }

    fn checked_bound(value: &str) -> AuditResult<Option<NaiveDate>> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
            .map(Some)
            .map_err(|e| AuditError::InvalidDateBound {
                value: value.to_string(),
                message: e.to_string(),
            })
    }
}

/// Check whether `record` passes `criteria`
pub fn matches(record: &LogRecord, criteria: &FilterCriteria) -> bool {
    criteria.matches(record)
}

/// Keep the records that pass `criteria`, preserving order
pub fn filter_records(records: &[LogRecord], criteria: &FilterCriteria) -> Vec<LogRecord> {
    let filtered: Vec<_> = records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect();

    debug!("Filter kept {} of {} records", filtered.len(), records.len());
    filtered
}

/// Distinct action labels, sorted, for populating a selection list
pub fn action_options(records: &[LogRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.action.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct status labels, sorted, for populating a selection list
pub fn status_options(records: &[LogRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.status.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// A bound is set only when it is non-empty and parses as a calendar date
fn parse_bound_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}
