//! Event assembly from a stream of content lines.

use tracing::{debug, trace};

use super::content_line::ContentLine;
use super::raw_event::RawEvent;
use super::unfold::unfold_lines;

/// Collect every complete `VEVENT` block in the feed.
///
/// Properties outside an event are calendar metadata and are ignored, as are
/// properties of components nested inside an event (`VALARM`). A block that is
/// never closed yields nothing.
pub fn assemble_events(input: &str) -> Vec<RawEvent> {
    let mut events = Vec::new();
    let mut current: Option<RawEvent> = None;
    // Depth of sub-components inside the open event
    let mut nested = 0usize;

    for line in unfold_lines(input) {
        let Some(content) = ContentLine::parse(&line) else {
            continue;
        };

        match content {
            ContentLine::BeginEvent => {
                if current.is_some() {
                    debug!("VEVENT opened before previous one closed, discarding partial event");
                }
                current = Some(RawEvent::default());
                nested = 0;
            }
            ContentLine::EndEvent => {
                if let Some(event) = current.take() {
                    trace!(uid = ?event.uid, "assembled event");
                    events.push(event);
                }
                nested = 0;
            }
            ContentLine::Begin(_) if current.is_some() => nested += 1,
            ContentLine::End(_) if current.is_some() => nested = nested.saturating_sub(1),
            ContentLine::Begin(_) | ContentLine::End(_) => {}
            ContentLine::Property(prop) => {
                if nested > 0 {
                    continue;
                }
                if let Some(event) = current.as_mut() {
                    event.apply(&prop);
                }
            }
        }
    }

    if current.is_some() {
        debug!("feed ended inside an unterminated VEVENT, dropping it");
    }

    events
}
