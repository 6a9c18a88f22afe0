//! Resolution of ICS date and date-time values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

use super::zone::{localize, parse_zone};

/// Resolve an ICS value into an absolute instant.
///
/// - `None` resolves to `reference`.
/// - A trailing `Z` is dropped and the value is read in `zone` (UTC when
///   absent or unknown). A `Z` does not override an explicit `TZID`.
/// - All-day values use their `YYYYMMDD` prefix at local midnight.
/// - Timed values are `YYYYMMDD` with an optional `THHMMSS`; a missing time
///   means midnight.
/// - Anything unparseable resolves to `reference`.
pub fn resolve(
    value: Option<&str>,
    all_day: bool,
    zone: Option<&str>,
    reference: DateTime<Utc>,
) -> DateTime<Tz> {
    let tz = zone_or_utc(zone);
    let Some(raw) = value else {
        return reference.with_timezone(&tz);
    };

    let trimmed = raw.trim();
    let stripped = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    if stripped.len() != trimmed.len() && zone.is_some() {
        debug!(value = trimmed, zone = ?zone, "UTC marker alongside TZID, reading value in TZID zone");
    }

    let naive = if all_day {
        parse_date(stripped).map(|d| d.and_time(NaiveTime::MIN))
    } else {
        parse_date_time(stripped)
    };

    match naive.and_then(|n| localize(tz, n)) {
        Some(dt) => dt,
        None => {
            debug!(value = trimmed, all_day, "unparseable date value, using reference instant");
            reference.with_timezone(&tz)
        }
    }
}

fn zone_or_utc(zone: Option<&str>) -> Tz {
    match zone {
        Some(name) => parse_zone(name).unwrap_or_else(|| {
            debug!(zone = name, "unknown TZID, falling back to UTC");
            Tz::UTC
        }),
        None => Tz::UTC,
    }
}

/// `YYYYMMDD`, ignoring anything after the date.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let digits = value.get(..8)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(digits, "%Y%m%d").ok()
}

/// `YYYYMMDD` or `YYYYMMDDTHHMMSS`.
fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let date = parse_date(value)?;
    let time = match value.get(8..) {
        Some("") => NaiveTime::MIN,
        Some(rest) => {
            let hms = rest.strip_prefix('T')?;
            if hms.len() != 6 || !hms.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            NaiveTime::parse_from_str(hms, "%H%M%S").ok()?
        }
        None => return None,
    };
    Some(date.and_time(time))
}
