//! Normalization of heterogeneous raw log records
//!
//! Log sources deliver records in two shapes: a nested one
//! (`{"user": {"name", "email"}, "action": {"label"}}`) and a flat one
//! (`{"userName", "userEmail", "action": "..."}`). Fields may also be missing
//! entirely. Every field resolves nested first, then flat, then a sentinel.

use serde_json::Value;
use tracing::{debug, warn};

use crate::record::{LogRecord, MISSING_EMAIL, UNKNOWN_ACTION, UNKNOWN_USER};

/// Normalize a raw JSON payload into canonical records.
///
/// Output order matches input order. A payload that is not an array, or is an
/// empty array, yields [`fallback_records`] so views always have something to show.
pub fn normalize_records(raw: &Value) -> Vec<LogRecord> {
    let entries = match raw.as_array() {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            warn!("Log payload is empty or not an array, using fallback records");
            return fallback_records();
        }
    };

    let records: Vec<_> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| normalize_record(index, entry))
        .collect();

    debug!("Normalized {} log records", records.len());
    records
}

/// Normalize a single raw entry. `index` is only used to build a fallback id.
pub fn normalize_record(index: usize, entry: &Value) -> LogRecord {
    let id = text_at(entry, &["/id"]).unwrap_or_else(|| format!("evt_{}", index));
    let timestamp = text_at(entry, &["/timestamp"]).unwrap_or_default();

    let user_name =
        text_at(entry, &["/user/name", "/userName"]).unwrap_or_else(|| UNKNOWN_USER.to_string());
    let user_email =
        text_at(entry, &["/user/email", "/userEmail"]).unwrap_or_else(|| MISSING_EMAIL.to_string());
    let action = text_at(entry, &["/action/label", "/action"])
        .unwrap_or_else(|| UNKNOWN_ACTION.to_string());

    LogRecord {
        id,
        timestamp,
        user_name,
        user_email,
        action,
        ip: text_at(entry, &["/ip"]),
        status: text_at(entry, &["/status"]),
        details: text_at(entry, &["/details"]),
    }
}

/// Minimal built-in record set used when a source delivers nothing usable
pub fn fallback_records() -> Vec<LogRecord> {
    vec![LogRecord::new("evt_0", "2023-10-24T10:00:00Z", "System Initialized")
        .with_user("System", "system@opsdeck.local")
        .with_ip("127.0.0.1")
        .with_status("Success")
        .with_details("No audit data was available from the log source")]
}

/// First non-empty textual value among the given JSON pointers.
///
/// Strings are taken as-is, numbers and booleans are stringified, nested
/// objects are rendered as compact JSON. Objects at a pointer that is
/// expected to hold text (such as a nested `action`) fall through to the
/// next candidate.
fn text_at(entry: &Value, pointers: &[&str]) -> Option<String> {
    pointers.iter().find_map(|pointer| match entry.pointer(pointer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(map) if *pointer == "/details" && !map.is_empty() => {
            Some(Value::Object(map.clone()).to_string())
        }
        _ => None,
    })
}
