//! Agenda request options.

use chrono_tz::Tz;
use tracing::debug;

use super::window::StartFrom;
use crate::error::{CalFeedError, CalFeedResult};
use crate::time::parse_zone;

/// Horizon used when the caller gives none (or an unusable one).
pub const DEFAULT_DAYS: u32 = 7;

/// Longest horizon accepted.
pub const MAX_DAYS: u32 = 366;

/// Options for one agenda request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaOptions {
    /// Number of calendar days in the window, `1..=MAX_DAYS`
    pub days: u32,
    /// Display zone for day boundaries and output timestamps
    pub timezone: Tz,
    pub start_from: StartFrom,
}

impl Default for AgendaOptions {
    fn default() -> Self {
        AgendaOptions {
            days: DEFAULT_DAYS,
            timezone: Tz::UTC,
            start_from: StartFrom::Now,
        }
    }
}

impl AgendaOptions {
    /// Strict constructor for programmatic callers.
    pub fn new(days: u32, timezone: &str, start_from: &str) -> CalFeedResult<Self> {
        if days == 0 || days > MAX_DAYS {
            return Err(CalFeedError::InvalidDays(days));
        }
        let timezone =
            parse_zone(timezone).ok_or_else(|| CalFeedError::UnknownTimezone(timezone.into()))?;

        Ok(AgendaOptions {
            days,
            timezone,
            start_from: StartFrom::parse(start_from),
        })
    }

    /// Lenient constructor for query-string input.
    ///
    /// A missing or unusable `days` becomes [`DEFAULT_DAYS`] (capped at
    /// [`MAX_DAYS`]) and a bad `startFrom` means today. Only an unknown
    /// timezone is rejected, since guessing a zone would silently shift every event.
    pub fn from_query(
        days: Option<&str>,
        timezone: Option<&str>,
        start_from: Option<&str>,
    ) -> CalFeedResult<Self> {
        let timezone = match timezone.map(str::trim).filter(|tz| !tz.is_empty()) {
            Some(name) => {
                parse_zone(name).ok_or_else(|| CalFeedError::UnknownTimezone(name.to_string()))?
            }
            None => Tz::UTC,
        };

        Ok(AgendaOptions {
            days: parse_days(days),
            timezone,
            start_from: start_from.map(StartFrom::parse).unwrap_or_default(),
        })
    }
}

fn parse_days(value: Option<&str>) -> u32 {
    let Some(raw) = value else {
        return DEFAULT_DAYS;
    };

    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => u32::try_from(n).map_or(MAX_DAYS, |n| n.min(MAX_DAYS)),
        _ => {
            debug!(days = raw, "unusable day count, using default");
            DEFAULT_DAYS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_days_and_zone() {
        assert_eq!(
            AgendaOptions::new(0, "UTC", "now"),
            Err(CalFeedError::InvalidDays(0))
        );
        assert_eq!(
            AgendaOptions::new(MAX_DAYS + 1, "UTC", "now"),
            Err(CalFeedError::InvalidDays(MAX_DAYS + 1))
        );
        assert_eq!(
            AgendaOptions::new(7, "Nowhere/Land", "now"),
            Err(CalFeedError::UnknownTimezone("Nowhere/Land".to_string()))
        );

        let options = AgendaOptions::new(3, "Europe/London", "2024-03-20").unwrap();
        assert_eq!(options.days, 3);
        assert_eq!(options.timezone, Tz::Europe__London);
    }

    #[test]
    fn test_from_query_defaults() {
        let options = AgendaOptions::from_query(None, None, None).unwrap();
        assert_eq!(options, AgendaOptions::default());

        let options = AgendaOptions::from_query(None, Some("  "), None).unwrap();
        assert_eq!(options.timezone, Tz::UTC);
    }

    #[test]
    fn test_from_query_substitutes_bad_days() {
        for bad in ["0", "-3", "seven", ""] {
            let options = AgendaOptions::from_query(Some(bad), None, None).unwrap();
            assert_eq!(options.days, DEFAULT_DAYS, "days={bad:?}");
        }

        let options = AgendaOptions::from_query(Some("9999999999"), None, None).unwrap();
        assert_eq!(options.days, MAX_DAYS);

        let options = AgendaOptions::from_query(Some(" 14 "), None, None).unwrap();
        assert_eq!(options.days, 14);
    }

    #[test]
    fn test_from_query_rejects_unknown_zone() {
        assert!(matches!(
            AgendaOptions::from_query(None, Some("Atlantis/Capital"), None),
            Err(CalFeedError::UnknownTimezone(_))
        ));
    }
}
