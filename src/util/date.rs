use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Which date syntax to try first in [`parse_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// ISO 8601 / W3C-DTF, used by Atom and Dublin Core.
    Iso8601,
    /// RFC 2822, used by RSS 2.0.
    Rfc2822,
}

/// Parses a date string into seconds since the epoch.
///
/// The hinted format is tried first, then the other one. Returns `0` for
/// empty or unparseable input; callers treat `0` as "unknown".
///
/// Dates without a time, and midnight timestamps without a timezone, are
/// moved to 12:00 UTC so that they land on the intended calendar day in
/// every timezone.
pub fn parse_date(s: &str, hint: DateFormat) -> i64 {
    let s = s.trim();
    if s.is_empty() {
        return 0;
    }
    let (first, second): (fn(&str) -> i64, fn(&str) -> i64) = match hint {
        DateFormat::Rfc2822 => (parse_rfc_date, parse_iso_date),
        DateFormat::Iso8601 => (parse_iso_date, parse_rfc_date),
    };
    match first(s) {
        0 => second(s),
        t => t,
    }
}

fn noon_utc(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN))
        .and_utc()
        .timestamp()
}

/// Floating timestamps are read as UTC; floating midnight becomes noon.
fn floating(dt: NaiveDateTime) -> i64 {
    if dt.time() == NaiveTime::MIN {
        noon_utc(dt.date())
    } else {
        Utc.from_utc_datetime(&dt).timestamp()
    }
}

/// Parses an ISO 8601 date, returning `0` on failure.
pub fn parse_iso_date(s: &str) -> i64 {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.timestamp();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return dt.timestamp();
        }
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return floating(dt);
        }
    }
    for fmt in ["%Y-%m-%d", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return noon_utc(date);
        }
    }
    0
}

/// Parses an RFC 2822 date, returning `0` on failure.
///
/// A trailing zone name the parser does not know (`CEST`, `BST`, ...) is
/// dropped and the time read as UTC rather than failing outright.
pub fn parse_rfc_date(s: &str) -> i64 {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return dt.timestamp();
    }
    if let Some((head, zone)) = s.rsplit_once(' ') {
        if !zone.is_empty() && zone.chars().all(|c| c.is_ascii_alphabetic()) {
            if let Ok(dt) = DateTime::parse_from_rfc2822(&format!("{} +0000", head.trim_end())) {
                return dt.timestamp();
            }
        }
    }
    0
}

/// Formats a timestamp as a human-readable UTC string (`Tue Jan 2 15:04:05 2024`).
///
/// Returns an empty string for `0`.
pub fn format_date(timestamp: i64) -> String {
    if timestamp == 0 {
        return String::new();
    }
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%a %b %-d %H:%M:%S %Y").to_string())
        .unwrap_or_default()
}
