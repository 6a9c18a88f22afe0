//! Date/time resolution.
//!
//! ICS values are resolved into absolute instants in an IANA zone. Every
//! fallback to "now" uses an explicit reference instant handed in by the
//! caller, so results are deterministic under test.

mod resolve;
pub mod rfc3339;
mod zone;

pub use resolve::resolve;
pub use zone::{end_of_day, localize, parse_zone, start_of_day};
