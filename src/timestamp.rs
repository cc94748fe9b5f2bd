//! Timestamp normalization.
//!
//! The layouts render times as relative tokens ("2h", "3d", "Just now"),
//! "Yesterday at ..." phrases, or absolute dates in a handful of US formats.
//! Everything is normalized to an absolute `DateTime<Utc>`; text that matches
//! none of the known shapes means "timestamp unknown", not an error.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

#[allow(clippy::expect_used)]
static RELATIVE_MINUTES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*m$").expect("RELATIVE_MINUTES regex"));

#[allow(clippy::expect_used)]
static RELATIVE_HOURS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*h$").expect("RELATIVE_HOURS regex"));

#[allow(clippy::expect_used)]
static RELATIVE_DAYS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*d$").expect("RELATIVE_DAYS regex"));

#[allow(clippy::expect_used)]
static RELATIVE_WEEKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*w$").expect("RELATIVE_WEEKS regex"));

#[allow(clippy::expect_used)]
static RELATIVE_MINUTES_LONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*min").expect("RELATIVE_MINUTES_LONG regex"));

#[allow(clippy::expect_used)]
static RELATIVE_HOURS_LONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*hr").expect("RELATIVE_HOURS_LONG regex"));

#[allow(clippy::expect_used)]
static JUST_NOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^just now").expect("JUST_NOW regex"));

/// Numeric date with a two- or four-digit year. The year width picks the
/// chrono format, because `%Y` would happily parse "24" as the year 24.
#[allow(clippy::expect_used)]
static NUMERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/(\d{2}|\d{4})$").expect("NUMERIC_DATE regex"));

/// Absolute formats carrying an explicit year, tried in order.
const DATETIME_FORMATS: &[&str] = &["%B %d, %Y at %I:%M %p", "%b %d, %Y at %I:%M %p"];

/// Absolute formats without a year; the current year is substituted.
const DATETIME_FORMATS_NO_YEAR: &[&str] = &["%B %d at %I:%M %p", "%b %d at %I:%M %p"];

/// Parse a rendered timestamp into an absolute time, using the current
/// instant as the reference for relative tokens.
///
/// Returns `None` for empty or unrecognizable input; callers treat that as
/// "timestamp unknown".
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    parse_timestamp_at(text, Utc::now())
}

/// Parse a rendered timestamp against an explicit reference instant.
///
/// Recognized forms, first match wins:
/// - relative: "2h", "3d", "1w", "45m", "10 min", "2 hr"
/// - "Just now" (anchored at the start)
/// - "Yesterday ..." (any suffix; the time of day is dropped)
/// - absolute: "January 15, 2024 at 2:30 PM", "January 15 at 2:30 PM",
///   abbreviated-month equivalents, "1/15/2024", "1/15/24"
#[must_use]
pub fn parse_timestamp_at(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    // The checked constructors keep absurd counts ("9999999999999h") from
    // panicking; they fall through to "timestamp unknown" instead.
    let relative: &[(&LazyLock<Regex>, fn(i64) -> Option<Duration>)] = &[
        (&RELATIVE_MINUTES, Duration::try_minutes),
        (&RELATIVE_HOURS, Duration::try_hours),
        (&RELATIVE_DAYS, Duration::try_days),
        (&RELATIVE_WEEKS, Duration::try_weeks),
        (&RELATIVE_MINUTES_LONG, Duration::try_minutes),
        (&RELATIVE_HOURS_LONG, Duration::try_hours),
    ];
    for (pattern, unit) in relative {
        if let Some(caps) = pattern.captures(text) {
            let n: i64 = caps.get(1)?.as_str().parse().ok()?;
            return now.checked_sub_signed(unit(n)?);
        }
    }

    if JUST_NOW.is_match(text) {
        return Some(now);
    }

    if text.to_lowercase().starts_with("yesterday") {
        return Some(now - Duration::days(1));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(parsed.and_utc());
        }
    }

    // chrono has no placeholder-year default to patch afterwards, so the
    // current year is appended before parsing.
    for fmt in DATETIME_FORMATS_NO_YEAR {
        let with_year = format!("{text} {}", now.year());
        let fmt_with_year = format!("{fmt} %Y");
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&with_year, &fmt_with_year) {
            return Some(parsed.and_utc());
        }
    }

    if let Some(caps) = NUMERIC_DATE.captures(text) {
        let fmt = if caps.get(1).map_or(0, |m| m.len()) == 4 {
            "%m/%d/%Y"
        } else {
            "%m/%d/%y"
        };
        if let Ok(parsed) = NaiveDate::parse_from_str(text, fmt) {
            return parsed.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}
