//! HTTP date formatting and parsing.
//!
//! `Last-Modified` and `If-Modified-Since` carry an IMF-fixdate
//! (`Sun, 29 Sep 2024 08:57:41 GMT`), which has whole-second resolution.
//! Comparisons against header times therefore truncate the resource time
//! to seconds first.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an IMF-fixdate header value.
pub fn format_http_date(t: SystemTime) -> String {
    let dt: DateTime<Utc> = t.into();
    dt.format(IMF_FIXDATE).to_string()
}

/// Parse an HTTP date header value.
///
/// Returns `None` for anything unparseable; callers treat that as an
/// absent header per RFC 9110.
pub fn parse_http_date(s: &str) -> Option<SystemTime> {
    DateTime::parse_from_rfc2822(s).ok().map(SystemTime::from)
}

/// Truncate a timestamp to whole seconds.
pub fn truncate_to_seconds(t: SystemTime) -> SystemTime {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => UNIX_EPOCH + Duration::from_secs(d.as_secs()),
        // Pre-epoch times cannot come out of an IMF-fixdate comparison
        // meaningfully; leave them alone.
        Err(_) => t,
    }
}
