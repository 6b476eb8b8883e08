//! Canonical audit log record

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel used when a record carries no user name
pub const UNKNOWN_USER: &str = "Unknown";
/// Sentinel used when a record carries no user email
pub const MISSING_EMAIL: &str = "N/A";
/// Sentinel used when a record carries no action label
pub const UNKNOWN_ACTION: &str = "Unknown";

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// One audit log entry after normalization.
///
/// Records are built once per load and never mutated afterwards; derived
/// views clone them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Source id, or `evt_<index>` when the source had none
    pub id: String,
    /// ISO-8601 timestamp as received; may not parse
    pub timestamp: String,
    /// Display name of the acting user
    pub user_name: String,
    /// Email of the acting user
    pub user_email: String,
    /// Action label
    pub action: String,
    /// Source IP address
    pub ip: Option<String>,
    /// Outcome label such as `Success` or `Failed`
    pub status: Option<String>,
    /// Free-form details
    pub details: Option<String>,
}

impl LogRecord {
    /// Create a record with sentinel user fields and no optional data
    pub fn new(id: impl Into<String>, timestamp: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
            user_name: UNKNOWN_USER.to_string(),
            user_email: MISSING_EMAIL.to_string(),
            action: action.into(),
            ip: None,
            status: None,
            details: None,
        }
    }

    /// Set the acting user
    pub fn with_user(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.user_name = name.into();
        self.user_email = email.into();
        self
    }

    /// Set the source IP
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    /// Set the outcome status
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the details text
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Parse the timestamp, returning `None` when it is not a recognized ISO-8601 form
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// Parse an ISO-8601 timestamp.
///
/// RFC 3339 strings keep their offset. Naive date-times and bare dates are
/// read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let parsed = parse_timestamp("2023-10-24T10:15:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 10, 24, 10, 15, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_timestamp("2023-10-24T12:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 10, 24, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_forms_as_utc() {
        let expected = Utc.with_ymd_and_hms(2023, 10, 24, 9, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2023-10-24T09:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-10-24 09:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2023-10-24T09:30"), Some(expected));
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        let parsed = parse_timestamp("2023-10-24").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2023, 10, 24, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2023-13-45T99:00:00Z").is_none());
    }

    #[test]
    fn test_builder_defaults() {
        let record = LogRecord::new("evt_1", "2023-10-24T10:00:00Z", "Login")
            .with_status("Success");

        assert_eq!(record.user_name, UNKNOWN_USER);
        assert_eq!(record.user_email, MISSING_EMAIL);
        assert_eq!(record.status.as_deref(), Some("Success"));
        assert!(record.ip.is_none());
        assert!(record.parsed_timestamp().is_some());
    }
}
