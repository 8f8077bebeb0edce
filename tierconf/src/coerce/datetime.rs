//! Date, time and timestamp parsing for date-time fields.
//!
//! Text without a `:` is a date, text without a `-` is a time of day, and
//! anything else is tried against the timestamp formats in order. Values
//! without an offset are taken as UTC; a bare time lands on 0000-01-01.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};

use crate::CoerceError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const LOCAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

type Stamp = DateTime<FixedOffset>;

const TIMESTAMP_PARSERS: [fn(&str) -> Option<Stamp>; 2] = [parse_rfc3339, parse_local_timestamp];

pub(super) fn parse(raw: &str) -> Result<Stamp, CoerceError> {
    let parsed = if !raw.contains(':') {
        parse_date(raw)
    } else if !raw.contains('-') {
        parse_time(raw)
    } else {
        TIMESTAMP_PARSERS.iter().find_map(|parser| parser(raw))
    };
    parsed.ok_or_else(|| CoerceError::DateTime {
        value: raw.to_owned(),
    })
}

/// Renders RFC 3339 with `Z` for UTC and only the sub-second digits present.
pub(super) fn render(value: &Stamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_date(raw: &str) -> Option<Stamp> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(at_utc)
}

fn parse_time(raw: &str) -> Option<Stamp> {
    let time = NaiveTime::parse_from_str(raw, TIME_FORMAT).ok()?;
    NaiveDate::from_ymd_opt(0, 1, 1).map(|date| at_utc(date.and_time(time)))
}

fn parse_rfc3339(raw: &str) -> Option<Stamp> {
    DateTime::parse_from_rfc3339(raw).ok()
}

fn parse_local_timestamp(raw: &str) -> Option<Stamp> {
    NaiveDateTime::parse_from_str(raw, LOCAL_TIMESTAMP_FORMAT)
        .ok()
        .map(at_utc)
}

fn at_utc(naive: NaiveDateTime) -> Stamp {
    Utc.from_utc_datetime(&naive).into()
}
