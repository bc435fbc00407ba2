//! Parsing of F5 expiration timestamps.
//!
//! The API reports expirations as `Jan  2 15:04:05 2024 GMT`: month
//! abbreviation, space-padded day, time, four-digit year, zone abbreviation.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use tracing::debug;

const LAYOUT: &str = "%b %d %H:%M:%S %Y";

/// Known zone abbreviations and their UTC offsets in hours.
const ZONES: &[(&str, i32)] = &[
    ("UTC", 0),
    ("GMT", 0),
    ("UT", 0),
    ("Z", 0),
    ("EST", -5),
    ("EDT", -4),
    ("CST", -6),
    ("CDT", -5),
    ("MST", -7),
    ("MDT", -6),
    ("PST", -8),
    ("PDT", -7),
    ("CET", 1),
    ("CEST", 2),
];

/// Parse an F5 expiration string into a UTC instant.
///
/// Unknown zone abbreviations are read as UTC. Returns `None` when the
/// string does not match the layout.
pub fn parse_expiration(raw: &str) -> Option<DateTime<Utc>> {
    let fields: Vec<&str> = raw.split_whitespace().collect();
    let [month, day, time, year, zone] = fields.as_slice() else {
        return None;
    };

    if !zone.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }

    let naive =
        NaiveDateTime::parse_from_str(&format!("{month} {day} {time} {year}"), LAYOUT).ok()?;

    let hours = ZONES
        .iter()
        .find(|(abbr, _)| abbr == zone)
        .map_or_else(
            || {
                debug!(zone = %zone, "unknown zone abbreviation, assuming UTC");
                0
            },
            |(_, hours)| *hours,
        );

    let offset = FixedOffset::east_opt(hours * 3600)?;
    naive
        .and_local_timezone(offset)
        .single()
        .map(|t| t.with_timezone(&Utc))
}
