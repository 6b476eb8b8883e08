//! CSV export of audit records

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AuditError, AuditResult};
use crate::record::LogRecord;

/// A column of the exported table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportColumn {
    Id,
    Timestamp,
    UserName,
    UserEmail,
    Action,
    Ip,
    Status,
    Details,
}

impl ExportColumn {
    /// Every column, in table order
    pub const ALL: [ExportColumn; 8] = [
        ExportColumn::Id,
        ExportColumn::Timestamp,
        ExportColumn::UserName,
        ExportColumn::UserEmail,
        ExportColumn::Action,
        ExportColumn::Ip,
        ExportColumn::Status,
        ExportColumn::Details,
    ];

    /// Header label
    pub fn header(&self) -> &'static str {
        match self {
            ExportColumn::Id => "ID",
            ExportColumn::Timestamp => "Timestamp",
            ExportColumn::UserName => "User",
            ExportColumn::UserEmail => "Email",
            ExportColumn::Action => "Action",
            ExportColumn::Ip => "IP Address",
            ExportColumn::Status => "Status",
            ExportColumn::Details => "Details",
        }
    }

    /// Value of this column for `record`; `None` when the record lacks it
    pub fn value<'a>(&self, record: &'a LogRecord) -> Option<&'a str> {
        match self {
            ExportColumn::Id => Some(&record.id),
            ExportColumn::Timestamp => Some(&record.timestamp),
            ExportColumn::UserName => Some(&record.user_name),
            ExportColumn::UserEmail => Some(&record.user_email),
            ExportColumn::Action => Some(&record.action),
            ExportColumn::Ip => record.ip.as_deref(),
            ExportColumn::Status => record.status.as_deref(),
            ExportColumn::Details => record.details.as_deref(),
        }
    }
}

impl std::str::FromStr for ExportColumn {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['_', '-', ' '], "");
        match key.as_str() {
            "id" => Ok(ExportColumn::Id),
            "timestamp" | "time" => Ok(ExportColumn::Timestamp),
            "user" | "username" => Ok(ExportColumn::UserName),
            "email" | "useremail" => Ok(ExportColumn::UserEmail),
            "action" => Ok(ExportColumn::Action),
            "ip" | "ipaddress" => Ok(ExportColumn::Ip),
            "status" => Ok(ExportColumn::Status),
            "details" => Ok(ExportColumn::Details),
            _ => Err(AuditError::ExportError {
                message: format!("unknown column '{}'", s),
            }),
        }
    }
}

/// Serialize records to CSV.
///
/// Every field is double-quoted with embedded quotes doubled. Rows are joined
/// with `\n` and there is no trailing newline. Missing values become empty
/// fields. No records yields just the header row.
pub fn to_csv(records: &[LogRecord], columns: &[ExportColumn]) -> AuditResult<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|column| column.header()))?;
    for record in records {
        writer.write_record(columns.iter().map(|column| column.value(record).unwrap_or("")))?;
    }

    let bytes = writer.into_inner().map_err(|e| AuditError::ExportError {
        message: e.to_string(),
    })?;
    let mut text = String::from_utf8(bytes).map_err(|e| AuditError::ExportError {
        message: e.to_string(),
    })?;

    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Download name for an export made on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("audit-logs-{}.csv", date.format("%Y-%m-%d"))
}

/// Write a CSV export into `dir` using [`export_file_name`]; returns the path written
pub fn write_csv_file(
    dir: &std::path::Path,
    records: &[LogRecord],
    columns: &[ExportColumn],
    date: NaiveDate,
) -> AuditResult<std::path::PathBuf> {
    let csv = to_csv(records, columns)?;
    std::fs::create_dir_all(dir)?;

    let path = dir.join(export_file_name(date));
    std::fs::write(&path, csv)?;

    info!("Exported {} audit records to {}", records.len(), path.display());
    Ok(path)
}
