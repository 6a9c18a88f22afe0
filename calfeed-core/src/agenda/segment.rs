//! Splitting events into per-day segments.

use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

use super::window::Window;
use crate::event::NormalizedEvent;
use crate::time::{end_of_day, rfc3339, start_of_day};

/// The part of an event that falls on one calendar day of the display zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySegment {
    pub title: String,
    #[serde(serialize_with = "rfc3339::serialize")]
    pub start: DateTime<FixedOffset>,
    #[serde(serialize_with = "rfc3339::serialize")]
    pub end: DateTime<FixedOffset>,
    pub description: String,
    pub location: String,
    pub uid: String,
    pub is_full_day: bool,
    /// The parent event covers more than one calendar day
    pub cross_day: bool,
    /// Zone the event was declared in
    pub timezone: String,
}

impl DaySegment {
    fn new(event: &NormalizedEvent, start: DateTime<Tz>, end: DateTime<Tz>, cross_day: bool) -> Self {
        DaySegment {
            title: event.title.clone(),
            start: start.fixed_offset(),
            end: end.fixed_offset(),
            description: event.description.clone(),
            location: event.location.clone(),
            uid: event.uid.clone(),
            is_full_day: event.is_all_day,
            cross_day,
            timezone: event.timezone.clone(),
        }
    }
}

/// Split an admitted event into dated segments.
///
/// A single-day event becomes one segment with its own times. A multi-day
/// event gets one segment per day: the first keeps its start and ends at
/// 23:59:59, middle days run 00:00:00 to 23:59:59, and the last starts at
/// 00:00:00 and keeps its end. Leading days before the window are kept; the
/// split stops at the first day at or after the window end.
pub fn split_into_days(event: &NormalizedEvent, window: &Window) -> Vec<(NaiveDate, DaySegment)> {
    let tz = window.timezone();
    let start = event.start.with_timezone(&tz);
    let end = event.end.with_timezone(&tz);
    let start_date = start.date_naive();
    let end_date = end.date_naive();

    if start_date == end_date {
        return vec![(start_date, DaySegment::new(event, start, end, false))];
    }

    let mut segments = Vec::new();
    let mut day = start_date;

    while day <= end_date {
        let day_start = start_of_day(tz, day);
        if day_start >= window.end {
            break;
        }

        let seg_start = if day == start_date { start } else { day_start };
        let seg_end = if day == end_date { end } else { end_of_day(tz, day) };
        segments.push((day, DaySegment::new(event, seg_start, seg_end, true)));

        let Some(next) = day.succ_opt() else {
            break;
        };
        day = next;
    }

    segments
}
