//! Chronological ordering of audit records

use std::cmp::{Ordering, Reverse};

use serde::{Deserialize, Serialize};

use crate::record::LogRecord;

/// Sort direction for the timestamp column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Newest first
    #[default]
    Descending,
    /// Oldest first
    Ascending,
}

impl SortDirection {
    /// Flip the direction
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Descending => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Descending => write!(f, "desc"),
            SortDirection::Ascending => write!(f, "asc"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "desc" | "descending" | "newest" => Ok(SortDirection::Descending),
            "asc" | "ascending" | "oldest" => Ok(SortDirection::Ascending),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// Compare two records by parsed timestamp.
///
/// Unparseable timestamps are equal to each other and order below every
/// parseable one in the ascending sense. Descending only flips the sign.
pub fn compare_timestamps(a: &LogRecord, b: &LogRecord, direction: SortDirection) -> Ordering {
    let ascending = a.parsed_timestamp().cmp(&b.parsed_timestamp());
    match direction {
        SortDirection::Ascending => ascending,
        SortDirection::Descending => ascending.reverse(),
    }
}

/// Stable in-place sort by timestamp; ties keep their input order
pub fn sort_records(records: &mut [LogRecord], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => records.sort_by_cached_key(|record| record.parsed_timestamp()),
        SortDirection::Descending => {
            records.sort_by_cached_key(|record| Reverse(record.parsed_timestamp()))
        }
    }
}

/// Sorted copy of `records`
pub fn sorted_records(records: &[LogRecord], direction: SortDirection) -> Vec<LogRecord> {
    let mut sorted = records.to_vec();
    sort_records(&mut sorted, direction);
    sorted
}
