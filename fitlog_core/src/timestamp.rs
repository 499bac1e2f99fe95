//! Canonical timestamp handling.
//!
//! Dates are stored as local wall-clock strings in a single format so that
//! lexicographic order equals chronological order:
//! `YYYY-MM-DDTHH:MM:SS`, with `.ffffff` appended only when the
//! microseconds are non-zero.

use crate::{Error, Result};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const MICROS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Naive layouts accepted in addition to RFC 3339
const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Current local wall-clock time
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Render a timestamp in canonical form (sub-microsecond precision is dropped)
pub fn format(ts: NaiveDateTime) -> String {
    let micros = ts.nanosecond() / 1_000;
    if micros == 0 {
        ts.format(SECONDS_FORMAT).to_string()
    } else {
        let ts = ts.with_nanosecond(micros * 1_000).unwrap_or(ts);
        ts.format(MICROS_FORMAT).to_string()
    }
}

/// Parse any accepted date representation into local wall-clock time
pub fn parse(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    for layout in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Ok(ts);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(Error::MalformedDate {
        value: value.to_string(),
        reason: "expected an ISO-8601 date or timestamp".into(),
    })
}

/// Normalize a caller-supplied date into canonical form
pub fn canonicalize(value: &str) -> Result<String> {
    parse(value).map(format)
}

/// Monday 00:00:00 of the week containing `now`
pub fn start_of_week(now: NaiveDateTime) -> NaiveDateTime {
    let offset = i64::from(now.weekday().num_days_from_monday());
    (now.date() - Duration::days(offset)).and_time(NaiveTime::MIN)
}
