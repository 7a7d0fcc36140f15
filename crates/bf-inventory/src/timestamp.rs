//! Timestamp folding for the date formats BigFix emits.
//!
//! Layouts are tried in a fixed order and the first one that parses wins.
//! Anything unparseable folds to `None`.
//!
//! A leading weekday name is skipped rather than checked against the date.
//! chrono's `%d` accepts both padded and unpadded days, and its RFC 3339
//! parser accepts any number of fractional-second digits, so each of those
//! needs only one entry.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

#[derive(Debug, Clone, Copy)]
enum Layout {
    /// Numeric offset, e.g. `-0700`.
    Offset(&'static str),
    /// Trailing zone abbreviation, e.g. `MST`.
    NamedZone(&'static str),
    Rfc3339,
    /// No zone at all; read as UTC.
    Utc(&'static str),
}

const LAYOUTS: [Layout; 4] = [
    // RFC 1123 with numeric zone
    Layout::Offset("%d %b %Y %H:%M:%S %z"),
    // RFC 1123
    Layout::NamedZone("%d %b %Y %H:%M:%S"),
    Layout::Rfc3339,
    // ANSI C asctime
    Layout::Utc("%b %e %H:%M:%S %Y"),
];

/// Parse a BigFix timestamp, keeping the offset it was written with.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    LAYOUTS.iter().find_map(|layout| parse_with(*layout, value))
}

fn parse_with(layout: Layout, value: &str) -> Option<DateTime<FixedOffset>> {
    match layout {
        Layout::Offset(fmt) => DateTime::parse_from_str(strip_weekday(value, true)?, fmt).ok(),
        Layout::NamedZone(fmt) => {
            let (stamp, zone) = strip_weekday(value, true)?.rsplit_once(' ')?;
            let offset = zone_offset(zone)?;
            let naive = NaiveDateTime::parse_from_str(stamp, fmt).ok()?;
            offset.from_local_datetime(&naive).single()
        }
        Layout::Rfc3339 => DateTime::parse_from_rfc3339(value).ok(),
        Layout::Utc(fmt) => NaiveDateTime::parse_from_str(strip_weekday(value, false)?, fmt)
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset()),
    }
}

/// Drop a leading three-letter weekday, `"Mon, "` or `"Mon "`.
fn strip_weekday(value: &str, comma: bool) -> Option<&str> {
    let (day, rest) = value.split_at_checked(3)?;
    if !day.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let rest = if comma { rest.strip_prefix(',')? } else { rest };
    let trimmed = rest.trim_start();
    (trimmed.len() < rest.len()).then_some(trimmed)
}

/// Offset for a zone abbreviation. Unknown abbreviations read as UTC.
fn zone_offset(zone: &str) -> Option<FixedOffset> {
    if zone.len() < 2 || !zone.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }

    let hours = match zone {
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        _ => 0,
    };
    FixedOffset::east_opt(hours * 3600)
}
