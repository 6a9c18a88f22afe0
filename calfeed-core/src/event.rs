//! Normalized events.
//!
//! A [`NormalizedEvent`] is what the agenda engine consumes: every temporal
//! field is resolved to an absolute instant with an explicit offset and text
//! fields are unescaped.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::ics::{RawEvent, TemporalField};
use crate::time::{resolve, rfc3339};

/// Canonical event record.
///
/// `end >= start` is not guaranteed; feeds get this wrong and the window
/// logic deals with it like any other event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEvent {
    pub title: String,
    #[serde(serialize_with = "rfc3339::serialize")]
    pub start: DateTime<FixedOffset>,
    #[serde(serialize_with = "rfc3339::serialize")]
    pub end: DateTime<FixedOffset>,
    pub description: String,
    pub location: String,
    pub is_all_day: bool,
    /// Zone of `DTSTART` or `"UTC"`. Informational only.
    pub timezone: String,
    pub uid: String,
    #[serde(serialize_with = "rfc3339::serialize_opt")]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(serialize_with = "rfc3339::serialize_opt")]
    pub last_modified: Option<DateTime<FixedOffset>>,
}

impl NormalizedEvent {
    /// Resolve a raw event. `reference` stands in for "now" wherever a value is
    /// missing or unparseable.
    pub fn from_raw(raw: &RawEvent, reference: DateTime<Utc>) -> Self {
        let start_field = raw.dtstart.as_ref();
        let start_zone = start_field.and_then(|f| f.tzid.as_deref());

        let start = resolve(
            start_field.map(|f| f.value.as_str()),
            raw.is_all_day,
            start_zone,
            reference,
        );

        // No DTEND means a zero-length event at DTSTART
        let end_field = raw.dtend.as_ref().or(start_field);
        let end_zone = raw
            .dtend
            .as_ref()
            .and_then(|f| f.tzid.as_deref())
            .or(start_zone);
        let end = resolve(
            end_field.map(|f| f.value.as_str()),
            raw.is_all_day,
            end_zone,
            reference,
        );

        NormalizedEvent {
            title: text(raw.summary.as_deref()),
            start: start.fixed_offset(),
            end: end.fixed_offset(),
            description: text(raw.description.as_deref()),
            location: text(raw.location.as_deref()),
            is_all_day: raw.is_all_day,
            timezone: start_zone.unwrap_or("UTC").to_string(),
            uid: raw.uid.clone().unwrap_or_default(),
            created: raw.created.as_ref().map(|f| stamp(f, reference)),
            last_modified: raw.last_modified.as_ref().map(|f| stamp(f, reference)),
        }
    }
}

fn stamp(field: &TemporalField, reference: DateTime<Utc>) -> DateTime<FixedOffset> {
    resolve(Some(&field.value), false, field.tzid.as_deref(), reference).fixed_offset()
}

fn text(value: Option<&str>) -> String {
    value.map(unescape_text).unwrap_or_default()
}

/// Decode RFC 5545 TEXT escapes (`\\`, `\;`, `\,`, `\n`, `\N`).
fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(escaped @ ('\\' | ';' | ',' | ':' | '"')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
