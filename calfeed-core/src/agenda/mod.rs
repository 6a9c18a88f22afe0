//! Agenda building.
//!
//! Events are filtered against the request window, split into per-day
//! segments in the display zone, grouped by date and sorted. The whole thing is
//! a pure function of the feed text, the options and a reference instant.

mod options;
mod segment;
mod source;
mod window;

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, trace};

use crate::event::NormalizedEvent;
use crate::ics::assemble_events;
use crate::time::rfc3339;

pub use options::{AgendaOptions, DEFAULT_DAYS, MAX_DAYS};
pub use segment::{DaySegment, split_into_days};
pub use source::display_source;
pub use window::{StartFrom, Window};

/// One calendar day of the agenda.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaDay {
    /// `YYYY-MM-DD` in the display zone
    pub date: NaiveDate,
    pub events: Vec<DaySegment>,
}

/// An agenda plus the request metadata it was built for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaResult {
    pub timezone: String,
    pub days: u32,
    /// Hostname of the feed, never the full URL
    pub calendar_source: String,
    /// Resolved window start
    #[serde(serialize_with = "rfc3339::serialize")]
    pub start_from: DateTime<FixedOffset>,
    pub agenda: Vec<AgendaDay>,
}

impl AgendaResult {
    pub fn segment_count(&self) -> usize {
        self.agenda.iter().map(|day| day.events.len()).sum()
    }
}

/// Build an agenda relative to the current time.
pub fn build_agenda(feed_text: &str, options: &AgendaOptions, source_url: &str) -> AgendaResult {
    build_agenda_at(feed_text, options, source_url, Utc::now())
}

/// Build an agenda with `reference` standing in for "now".
pub fn build_agenda_at(
    feed_text: &str,
    options: &AgendaOptions,
    source_url: &str,
    reference: DateTime<Utc>,
) -> AgendaResult {
    let window = Window::new(options, reference);
    let raw_events = assemble_events(feed_text);

    let mut by_date: BTreeMap<NaiveDate, Vec<DaySegment>> = BTreeMap::new();
    for raw in &raw_events {
        let event = NormalizedEvent::from_raw(raw, reference);
        if !window.admits(event.start, event.end) {
            trace!(uid = %event.uid, "event outside window");
            continue;
        }
        for (date, segment) in split_into_days(&event, &window) {
            by_date.entry(date).or_default().push(segment);
        }
    }

    let agenda: Vec<AgendaDay> = by_date
        .into_iter()
        .map(|(date, mut events)| {
            sort_day(&mut events);
            AgendaDay { date, events }
        })
        .collect();

    debug!(
        events = raw_events.len(),
        days_with_events = agenda.len(),
        window_start = %window.start,
        "built agenda"
    );

    AgendaResult {
        timezone: options.timezone.name().to_string(),
        days: options.days,
        calendar_source: display_source(source_url),
        start_from: window.start.fixed_offset(),
        agenda,
    }
}

/// Full-day segments first in encounter order, then timed segments by start.
/// The sort is stable, so equal starts keep encounter order.
fn sort_day(events: &mut [DaySegment]) {
    events.sort_by_key(|seg| (!seg.is_full_day, (!seg.is_full_day).then_some(seg.start)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Tz;

    fn pinned_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 8, 0, 0).unwrap()
    }

    fn options(days: u32, tz: Tz, start_from: &str) -> AgendaOptions {
        AgendaOptions {
            days,
            timezone: tz,
            start_from: StartFrom::parse(start_from),
        }
    }

    fn feed(events: &[&str]) -> String {
        let mut ics = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Test//EN\r\n");
        for event in events {
            ics.push_str("BEGIN:VEVENT\r\n");
            for line in event.lines() {
                ics.push_str(line.trim());
                ics.push_str("\r\n");
            }
            ics.push_str("END:VEVENT\r\n");
        }
        ics.push_str("END:VCALENDAR\r\n");
        ics
    }

    fn titles(day: &AgendaDay) -> Vec<&str> {
        day.events.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_all_day_sorts_before_timed() {
        let ics = feed(&[
            "SUMMARY:Timed Event
             DTSTART:20240320T100000Z
             DTEND:20240320T110000Z",
            "SUMMARY:All Day Event
             DTSTART;VALUE=DATE:20240320",
        ]);

        let result = build_agenda_at(&ics, &options(7, Tz::UTC, "now"), "https://cal.example.com/a.ics", pinned_now());

        assert_eq!(result.agenda.len(), 1);
        assert_eq!(result.agenda[0].date.to_string(), "2024-03-20");
        assert_eq!(titles(&result.agenda[0]), vec!["All Day Event", "Timed Event"]);
        assert!(result.agenda[0].events[0].is_full_day);
    }

    #[test]
    fn test_multi_day_event_spreads_across_buckets() {
        let ics = feed(&["SUMMARY:Conference
             DTSTART:20240320T090000Z
             DTEND:20240322T170000Z"]);

        let result = build_agenda_at(&ics, &options(7, Tz::UTC, "now"), "", pinned_now());

        let dates: Vec<String> = result.agenda.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-20", "2024-03-21", "2024-03-22"]);
        for day in &result.agenda {
            assert_eq!(day.events.len(), 1);
            assert!(day.events[0].cross_day);
        }
        assert_eq!(
            result.agenda[0].events[0].end.to_rfc3339(),
            "2024-03-20T23:59:59+00:00"
        );
        assert_eq!(
            result.agenda[2].events[0].start.to_rfc3339(),
            "2024-03-22T00:00:00+00:00"
        );
        assert_eq!(
            result.agenda[2].events[0].end.to_rfc3339(),
            "2024-03-22T17:00:00+00:00"
        );
    }

    #[test]
    fn test_horizon_limits_buckets() {
        let ics = feed(&[
            "SUMMARY:Long Trip
             DTSTART;VALUE=DATE:20240321
             DTEND;VALUE=DATE:20240405",
            "SUMMARY:Later
             DTSTART:20240325T100000Z
             DTEND:20240325T110000Z",
            "SUMMARY:Edge
             DTSTART:20240325T000000Z
             DTEND:20240325T003000Z",
        ]);

        let result = build_agenda_at(&ics, &options(5, Tz::UTC, "now"), "", pinned_now());

        let last = result.agenda.last().expect("Should have buckets");
        assert_eq!(last.date.to_string(), "2024-03-24");
        assert!(result.agenda.iter().all(|day| titles(day) == vec!["Long Trip"]));
    }

    #[test]
    fn test_event_started_before_window_is_not_clipped() {
        let ics = feed(&["SUMMARY:Conference
             DTSTART:20240318T090000Z
             DTEND:20240322T170000Z"]);

        let result = build_agenda_at(&ics, &options(7, Tz::UTC, "2024-03-20"), "", pinned_now());

        let dates: Vec<String> = result.agenda.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(
            dates,
            vec!["2024-03-18", "2024-03-19", "2024-03-20", "2024-03-21", "2024-03-22"]
        );
        assert_eq!(
            result.agenda[0].events[0].start.to_rfc3339(),
            "2024-03-18T09:00:00+00:00"
        );
        assert_eq!(
            result.agenda[0].events[0].end.to_rfc3339(),
            "2024-03-18T23:59:59+00:00"
        );
    }

    #[test]
    fn test_events_outside_window_are_dropped() {
        let ics = feed(&[
            "SUMMARY:Yesterday
             DTSTART:20240319T100000Z
             DTEND:20240319T110000Z",
            "SUMMARY:Next Month
             DTSTART:20240420T100000Z
             DTEND:20240420T110000Z",
            "SUMMARY:Today
             DTSTART:20240320T100000Z
             DTEND:20240320T110000Z",
        ]);

        let result = build_agenda_at(&ics, &options(7, Tz::UTC, "now"), "", pinned_now());

        assert_eq!(result.segment_count(), 1);
        assert_eq!(titles(&result.agenda[0]), vec!["Today"]);
    }

    #[test]
    fn test_invalid_start_from_falls_back_to_today() {
        let result = build_agenda_at("", &options(7, Tz::UTC, "not-a-date"), "", pinned_now());
        assert_eq!(result.start_from.to_rfc3339(), "2024-03-20T00:00:00+00:00");
        assert!(result.agenda.is_empty());
    }

    #[test]
    fn test_explicit_start_date_in_display_zone() {
        let ics = feed(&["SUMMARY:Breakfast
             DTSTART;TZID=Europe/Berlin:20240401T080000
             DTEND;TZID=Europe/Berlin:20240401T090000"]);

        let result = build_agenda_at(
            &ics,
            &options(1, Tz::America__New_York, "2024-04-01"),
            "",
            pinned_now(),
        );

        assert_eq!(result.start_from.to_rfc3339(), "2024-04-01T00:00:00-04:00");
        assert_eq!(result.timezone, "America/New_York");
        let segment = &result.agenda[0].events[0];
        assert_eq!(segment.start.to_rfc3339(), "2024-04-01T02:00:00-04:00");
        assert_eq!(segment.timezone, "Europe/Berlin");
    }

    #[test]
    fn test_timed_segments_sorted_by_start_with_stable_ties() {
        let ics = feed(&[
            "SUMMARY:Late
             DTSTART:20240320T150000Z",
            "SUMMARY:Tie A
             DTSTART:20240320T090000Z",
            "SUMMARY:Holiday
             DTSTART;VALUE=DATE:20240320",
            "SUMMARY:Tie B
             DTSTART:20240320T090000Z",
            "SUMMARY:Birthday
             DTSTART;VALUE=DATE:20240320",
        ]);

        let result = build_agenda_at(&ics, &options(1, Tz::UTC, "now"), "", pinned_now());

        assert_eq!(
            titles(&result.agenda[0]),
            vec!["Holiday", "Birthday", "Tie A", "Tie B", "Late"]
        );
    }

    #[test]
    fn test_malformed_event_does_not_abort() {
        let ics = feed(&[
            "SUMMARY:Broken
             DTSTART:garbage
             X-JUNK",
            "SUMMARY:Fine
             DTSTART:20240321T100000Z",
        ]);

        let result = build_agenda_at(&ics, &options(7, Tz::UTC, "now"), "", pinned_now());

        // The broken event falls back to the reference instant
        let dates: Vec<String> = result.agenda.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-20", "2024-03-21"]);
        assert_eq!(titles(&result.agenda[0]), vec!["Broken"]);
    }

    #[test]
    fn test_same_input_same_output() {
        let ics = feed(&["SUMMARY:Review
             DTSTART:20240322T130000Z
             DTEND:20240322T140000Z"]);
        let opts = options(7, Tz::UTC, "now");

        let first = build_agenda_at(&ics, &opts, "https://cal.example.com/x.ics", pinned_now());
        let second = build_agenda_at(&ics, &opts, "https://cal.example.com/x.ics", pinned_now());
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_shape() {
        let ics = feed(&["SUMMARY:Review
             DTSTART:20240322T130000Z
             DTEND:20240322T140000Z"]);

        let result = build_agenda_at(
            &ics,
            &options(7, Tz::UTC, "now"),
            "https://calendar.example.com/private/secret-token/basic.ics",
            pinned_now(),
        );
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["calendarSource"], "calendar.example.com");
        assert_eq!(json["days"], 7);
        assert_eq!(json["timezone"], "UTC");
        assert_eq!(json["startFrom"], "2024-03-20T00:00:00+00:00");
        assert_eq!(json["agenda"][0]["date"], "2024-03-22");
        assert_eq!(json["agenda"][0]["events"][0]["isFullDay"], false);
        assert_eq!(json["agenda"][0]["events"][0]["crossDay"], false);
        assert!(!json.to_string().contains("secret-token"));
    }
}
