//! The request window.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::debug;

use super::options::AgendaOptions;
use crate::time::start_of_day;

/// Where the window starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartFrom {
    /// Today in the display zone
    #[default]
    Now,
    /// A calendar date (`YYYY-MM-DD`)
    Date(NaiveDate),
    /// A full timestamp; only its date in the display zone matters
    Instant(DateTime<FixedOffset>),
}

impl StartFrom {
    /// Parse `"now"`, an ISO date or an RFC 3339 timestamp. Anything else
    /// falls back to [`StartFrom::Now`].
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("now") {
            return StartFrom::Now;
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return StartFrom::Date(date);
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
            return StartFrom::Instant(instant);
        }

        debug!(start_from = value, "unparseable startFrom, using today");
        StartFrom::Now
    }

    fn date_in(self, tz: Tz, reference: DateTime<Utc>) -> NaiveDate {
        match self {
            StartFrom::Now => reference.with_timezone(&tz).date_naive(),
            StartFrom::Date(date) => date,
            StartFrom::Instant(instant) => instant.with_timezone(&tz).date_naive(),
        }
    }
}

/// `[start, end)` in the display zone, both at local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Window {
    pub fn new(options: &AgendaOptions, reference: DateTime<Utc>) -> Self {
        let tz = options.timezone;
        let start_date = options.start_from.date_in(tz, reference);
        let end_date = start_date
            .checked_add_days(Days::new(u64::from(options.days)))
            .unwrap_or(start_date);

        Window {
            start: start_of_day(tz, start_date),
            end: start_of_day(tz, end_date),
        }
    }

    pub fn timezone(&self) -> Tz {
        self.start.timezone()
    }

    /// Whether an event spanning `start..end` touches the window.
    ///
    /// An event ending before the window or starting at or after its end is
    /// outside. Anything else is kept whole.
    pub fn admits(&self, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> bool {
        !(end < self.start || start >= self.end)
    }
}
