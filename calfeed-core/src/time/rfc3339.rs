//! Serde helpers writing timestamps with a numeric offset.
//!
//! chrono's own impl writes a zero offset as `Z`; agenda output always spells
//! the offset out (`+00:00`) so every timestamp reads the same way.

use chrono::{DateTime, FixedOffset};
use serde::Serializer;

pub fn serialize<S: Serializer>(dt: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&dt.to_rfc3339())
}

pub fn serialize_opt<S: Serializer>(
    dt: &Option<DateTime<FixedOffset>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match dt {
        Some(dt) => serialize(dt, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset};
    use serde::Serialize;

    #[derive(Serialize)]
    struct Stamped {
        #[serde(serialize_with = "super::serialize")]
        at: DateTime<FixedOffset>,
        #[serde(serialize_with = "super::serialize_opt")]
        maybe: Option<DateTime<FixedOffset>>,
    }

    #[test]
    fn test_zero_offset_is_written_numerically() {
        let stamped = Stamped {
            at: DateTime::parse_from_rfc3339("2024-03-20T10:00:00Z").unwrap(),
            maybe: None,
        };
        let json = serde_json::to_value(&stamped).unwrap();

        assert_eq!(json["at"], "2024-03-20T10:00:00+00:00");
        assert!(json["maybe"].is_null());
    }

    #[test]
    fn test_non_zero_offset_is_kept() {
        let stamped = Stamped {
            at: DateTime::parse_from_rfc3339("2024-03-20T09:00:00-04:00").unwrap(),
            maybe: Some(DateTime::parse_from_rfc3339("2024-03-20T15:30:00+05:30").unwrap()),
        };
        let json = serde_json::to_value(&stamped).unwrap();

        assert_eq!(json["at"], "2024-03-20T09:00:00-04:00");
        assert_eq!(json["maybe"], "2024-03-20T15:30:00+05:30");
    }
}
