//! Zone lookup and local-time helpers.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

/// Look up an IANA zone name (`"UTC"` included).
pub fn parse_zone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}

/// Place a wall-clock time in `tz`.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times that
/// fall in a DST gap are shifted forward by one hour.
pub fn localize(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}

/// First instant of `date` in `tz`.
pub fn start_of_day(tz: Tz, date: NaiveDate) -> DateTime<Tz> {
    localize(tz, date.and_time(NaiveTime::MIN))
        .unwrap_or_else(|| tz.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// 23:59:59 on `date` in `tz`.
pub fn end_of_day(tz: Tz, date: NaiveDate) -> DateTime<Tz> {
    localize(tz, date.and_time(END_OF_DAY))
        .unwrap_or_else(|| tz.from_utc_datetime(&date.and_time(END_OF_DAY)))
}
