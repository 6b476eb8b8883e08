//! Printable HTML rendering of the filtered audit log

use chrono::{DateTime, Utc};

use crate::export::ExportColumn;
use crate::record::LogRecord;

/// Render `records` as a standalone HTML document with one table.
///
/// Callers pass the filtered set, not the full dataset. An empty slice yields
/// a table with a header and an empty body.
pub fn render_print_view(
    records: &[LogRecord],
    columns: &[ExportColumn],
    generated_at: DateTime<Utc>,
) -> String {
    let mut html = String::with_capacity(512 + records.len() * 256);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Audit Logs</title>\n");
    html.push_str(
        "<style>table{border-collapse:collapse;width:100%}\
         th,td{border:1px solid #ccc;padding:4px 8px;text-align:left;font-size:12px}</style>\n",
    );
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<h1>Audit Logs</h1>\n<p>Generated {} &middot; Records: {}</p>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        records.len()
    ));

    html.push_str("<table>\n<thead>\n<tr>");
    for column in columns {
        html.push_str("<th>");
        html.push_str(&escape_html(column.header()));
        html.push_str("</th>");
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for record in records {
        html.push_str("<tr>");
        for column in columns {
            html.push_str("<td>");
            html.push_str(&escape_html(column.value(record).unwrap_or("")));
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

/// Escape text for use inside HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
