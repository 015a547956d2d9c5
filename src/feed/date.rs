//! Timestamp parsing and HTTP-date formatting for `<pubDate>`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::FeedError;

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Parse a record creation timestamp.
///
/// Accepts RFC 3339 (`2024-01-01T12:00:00.5+02:00`), a naive ISO-8601
/// date-time taken as UTC, or a bare `YYYY-MM-DD` date at midnight UTC.
pub fn parse_created(value: &str) -> Result<DateTime<Utc>, FeedError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| FeedError::Parse(format!("Unparseable timestamp: {:?}", value)))
}

/// Format as an RFC 7231 HTTP-date, e.g. `Tue, 02 Jan 2024 00:00:00 GMT`
pub fn http_date(dt: &DateTime<Utc>) -> String {
    dt.format(HTTP_DATE_FORMAT).to_string()
}

/// Parse an HTTP-date produced by [`http_date`]
pub fn parse_http_date(value: &str) -> Result<DateTime<Utc>, FeedError> {
    NaiveDateTime::parse_from_str(value, HTTP_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| FeedError::Parse(format!("Invalid HTTP-date {:?}: {}", value, e)))
}
