//! Content line parsing.

use std::collections::BTreeMap;

/// A parsed `NAME;PARAM=VALUE:value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Uppercased property name (`DTSTART`, `SUMMARY`, ...)
    pub name: String,
    /// Parameters keyed by uppercased name
    pub params: BTreeMap<String, String>,
    pub value: String,
}

impl Property {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// `VALUE=DATE` marks a date-only (all-day) value.
    pub fn is_date_value(&self) -> bool {
        self.param("VALUE")
            .is_some_and(|v| v.eq_ignore_ascii_case("DATE"))
    }

    pub fn tzid(&self) -> Option<&str> {
        self.param("TZID").filter(|tz| !tz.is_empty())
    }
}

/// One logical ICS line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLine {
    BeginEvent,
    EndEvent,
    /// `BEGIN` of any other component (`VCALENDAR`, `VALARM`, `VTIMEZONE`, ...)
    Begin(String),
    /// `END` of any other component
    End(String),
    Property(Property),
}

impl ContentLine {
    /// Parse one unfolded line.
    ///
    /// Returns `None` for lines without a `:` or without a name. Feeds are full
    /// of stray vendor lines, so these are skipped rather than treated as errors.
    pub fn parse(line: &str) -> Option<ContentLine> {
        let (head, value) = line.split_once(':')?;
        let value = value.trim();

        let mut segments = head.split(';');
        let name = segments.next()?.trim().to_ascii_uppercase();
        if name.is_empty() {
            return None;
        }

        match name.as_str() {
            "BEGIN" if value.eq_ignore_ascii_case("VEVENT") => return Some(ContentLine::BeginEvent),
            "END" if value.eq_ignore_ascii_case("VEVENT") => return Some(ContentLine::EndEvent),
            "BEGIN" => return Some(ContentLine::Begin(value.to_ascii_uppercase())),
            "END" => return Some(ContentLine::End(value.to_ascii_uppercase())),
            _ => {}
        }

        let params = segments
            .filter_map(|segment| {
                let (key, val) = segment.split_once('=')?;
                let key = key.trim().to_ascii_uppercase();
                if key.is_empty() {
                    return None;
                }
                Some((key, unquote(val.trim()).to_string()))
            })
            .collect();

        Some(ContentLine::Property(Property {
            name,
            params,
            value: value.to_string(),
        }))
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(line: &str) -> Property {
        match ContentLine::parse(line) {
            Some(ContentLine::Property(prop)) => prop,
            other => panic!("Expected property, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_event_markers() {
        assert_eq!(ContentLine::parse("BEGIN:VEVENT"), Some(ContentLine::BeginEvent));
        assert_eq!(ContentLine::parse("END:VEVENT "), Some(ContentLine::EndEvent));
        assert_eq!(
            ContentLine::parse("BEGIN:VALARM"),
            Some(ContentLine::Begin("VALARM".to_string()))
        );
    }

    #[test]
    fn test_parse_value_keeps_later_colons() {
        let prop = property("LOCATION: https://meet.example.com:8443/room ");
        assert_eq!(prop.name, "LOCATION");
        assert_eq!(prop.value, "https://meet.example.com:8443/room");
    }

    #[test]
    fn test_parse_tzid_and_value_date() {
        let prop = property("DTSTART;TZID=\"Europe/Berlin\":20240320T090000");
        assert_eq!(prop.tzid(), Some("Europe/Berlin"));
        assert!(!prop.is_date_value());

        let prop = property("dtstart;value=date:20240320");
        assert_eq!(prop.name, "DTSTART");
        assert!(prop.is_date_value());
    }

    #[test]
    fn test_parse_skips_lines_without_colon() {
        assert_eq!(ContentLine::parse("garbage line"), None);
        assert_eq!(ContentLine::parse(""), None);
        assert_eq!(ContentLine::parse(":no-name"), None);
    }

    #[test]
    fn test_parse_empty_value_is_kept() {
        let prop = property("DESCRIPTION:");
        assert_eq!(prop.value, "");
    }

    #[test]
    fn test_parse_ignores_malformed_params() {
        let prop = property("SUMMARY;X-FLAG;LANGUAGE=en:Hello");
        assert_eq!(prop.params.len(), 1);
        assert_eq!(prop.param("LANGUAGE"), Some("en"));
    }
}
