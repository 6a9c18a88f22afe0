//! ICS feed parsing.
//!
//! A deliberately small reader for the subset of RFC 5545 the agenda needs:
//! physical lines are unfolded, each logical line is split into a content line,
//! and `VEVENT` blocks are assembled into [`RawEvent`] records.

mod assemble;
mod content_line;
mod raw_event;
mod unfold;

pub use assemble::assemble_events;
pub use content_line::{ContentLine, Property};
pub use raw_event::{RawEvent, TemporalField};
pub use unfold::unfold_lines;
