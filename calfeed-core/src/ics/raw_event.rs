//! Raw, unresolved event records.

use std::collections::BTreeMap;

use super::content_line::Property;

/// A date/time property value with the zone it was declared in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemporalField {
    pub value: String,
    /// `TZID` parameter attached to this property, if any
    pub tzid: Option<String>,
}

impl TemporalField {
    fn from_property(prop: &Property) -> Self {
        TemporalField {
            value: prop.value.clone(),
            tzid: prop.tzid().map(str::to_string),
        }
    }
}

/// Fields collected from one `BEGIN:VEVENT` … `END:VEVENT` block.
///
/// Values are kept as written in the feed; the event formatter resolves them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    pub uid: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub dtstart: Option<TemporalField>,
    pub dtend: Option<TemporalField>,
    pub created: Option<TemporalField>,
    pub last_modified: Option<TemporalField>,
    /// Set once any property carries `VALUE=DATE`; never cleared
    pub is_all_day: bool,
    /// Properties without a dedicated field (`STATUS`, `RRULE`, `X-*`, ...)
    pub extra: BTreeMap<String, String>,
}

impl RawEvent {
    /// Store a property. A repeated property overwrites the earlier value.
    pub fn apply(&mut self, prop: &Property) {
        if prop.is_date_value() {
            self.is_all_day = true;
        }

        match prop.name.as_str() {
            "UID" => self.uid = Some(prop.value.clone()),
            "SUMMARY" => self.summary = Some(prop.value.clone()),
            "DESCRIPTION" => self.description = Some(prop.value.clone()),
            "LOCATION" => self.location = Some(prop.value.clone()),
            "DTSTART" => self.dtstart = Some(TemporalField::from_property(prop)),
            "DTEND" => self.dtend = Some(TemporalField::from_property(prop)),
            "CREATED" => self.created = Some(TemporalField::from_property(prop)),
            "LAST-MODIFIED" => self.last_modified = Some(TemporalField::from_property(prop)),
            _ => {
                self.extra.insert(prop.name.clone(), prop.value.clone());
            }
        }
    }
}
