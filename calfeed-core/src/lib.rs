//! Core engine for calfeed.
//!
//! Turns raw iCalendar feed text into a timezone-aware agenda grouped by day:
//! - `ics` unfolds lines, parses content lines and assembles raw events
//! - `time` resolves ICS date/time values into absolute instants
//! - `event` normalizes raw events
//! - `agenda` filters events against a request window and groups them by day
//!
//! The engine is synchronous and does no I/O. Fetching feeds and serving
//! results over HTTP lives in `calfeed-server`.

pub mod agenda;
pub mod error;
pub mod event;
pub mod ics;
pub mod time;

pub use agenda::{
    AgendaDay, AgendaOptions, AgendaResult, DaySegment, StartFrom, build_agenda, build_agenda_at,
};
pub use error::{CalFeedError, CalFeedResult};
pub use event::NormalizedEvent;
