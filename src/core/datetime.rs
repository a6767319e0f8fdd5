//! UTC instant reconstruction from ADIF's split date and time fields.
//!
//! ADIF dates are `YYYYMMDD` and times are `HHMM` or `HHMMSS`, always UTC.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::adif::record::RawRecord;

use super::{NormalizeError, NormalizeResult};

const LOTW_STAMP_FMT: &str = "%Y-%m-%d %H:%M:%S";
const ISO_DATE_FMT: &str = "%Y-%m-%d";

/// Time used when a date carries no time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBoundary {
    /// 00:00:00.
    Start,
    /// 23:59:59.
    End,
}

impl DayBoundary {
    fn time(self) -> NaiveTime {
        match self {
            Self::Start => NaiveTime::MIN,
            Self::End => NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
        }
    }
}

/// Contact start and end, both always set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Contact start.
    pub start: DateTime<Utc>,
    /// Contact end.
    pub end: DateTime<Utc>,
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parses an 8-digit `YYYYMMDD` date.
pub fn parse_date(tag: &str, value: &str) -> NormalizeResult<NaiveDate> {
    let invalid = || NormalizeError::InvalidDate {
        tag: tag.to_string(),
        value: value.to_string(),
    };
    let v = value.trim();
    if v.len() != 8 || !all_digits(v) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(v, "%Y%m%d").map_err(|_| invalid())
}

/// Parses an `HH`, `HHMM` or `HHMMSS` time of day.
pub fn parse_time(tag: &str, value: &str) -> NormalizeResult<NaiveTime> {
    let invalid = || NormalizeError::InvalidTime {
        tag: tag.to_string(),
        value: value.to_string(),
    };
    let v = value.trim();
    if !matches!(v.len(), 2 | 4 | 6) || !all_digits(v) {
        return Err(invalid());
    }
    let part = |i: usize| v.get(i..i + 2).and_then(|p| p.parse::<u32>().ok()).unwrap_or(0);
    NaiveTime::from_hms_opt(part(0), part(2), part(4)).ok_or_else(invalid)
}

/// Builds a UTC instant from a date field and an optional time field.
pub fn instant(
    date: (&str, &str),
    time: Option<(&str, &str)>,
    default: DayBoundary,
) -> NormalizeResult<DateTime<Utc>> {
    let day = parse_date(date.0, date.1)?;
    let tod = match time {
        Some((tag, v)) => parse_time(tag, v)?,
        None => default.time(),
    };
    Ok(NaiveDateTime::new(day, tod).and_utc())
}

/// Parses a confirmation timestamp.
///
/// Accepts `YYYYMMDD`, `YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS`. Date-only
/// values resolve to the end of that day.
pub fn parse_timestamp(tag: &str, value: &str) -> NormalizeResult<DateTime<Utc>> {
    let v = value.trim();
    if v.len() == 8 && all_digits(v) {
        return instant((tag, v), None, DayBoundary::End);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(v, LOTW_STAMP_FMT) {
        return Ok(dt.and_utc());
    }
    if let Ok(day) = NaiveDate::parse_from_str(v, ISO_DATE_FMT) {
        return Ok(NaiveDateTime::new(day, DayBoundary::End.time()).and_utc());
    }
    Err(NormalizeError::InvalidTimestamp {
        tag: tag.to_string(),
        value: value.to_string(),
    })
}

fn field<'a>(raw: &'a RawRecord, tag: &'a str) -> Option<(&'a str, &'a str)> {
    raw.get(tag).map(|v| (tag, v))
}

/// Reconstructs the contact span from `qso_date`, `time_on`,
/// `qso_date_off` and `time_off`.
///
/// Returns `None` when the record carries no date at all. A lone bound is
/// mirrored into the other. An end time earlier than the start time on the
/// same implied day rolls over to the next day, unless `qso_date_off` was
/// given explicitly.
pub fn reconstruct_span(raw: &RawRecord) -> NormalizeResult<Option<Span>> {
    let date_on = field(raw, "qso_date");
    let time_on = field(raw, "time_on");
    let date_off = field(raw, "qso_date_off");
    let time_off = field(raw, "time_off");

    let start = date_on
        .map(|d| instant(d, time_on, DayBoundary::Start))
        .transpose()?;

    let end = match (date_off, date_on) {
        (Some(off), _) => {
            let boundary = if start.is_some() { DayBoundary::Start } else { DayBoundary::End };
            let end = instant(off, time_off, boundary)?;
            // A date-only end on the start day cannot precede the start.
            match start {
                Some(s) if time_off.is_none() && end < s => Some(s),
                _ => Some(end),
            }
        }
        (None, Some(on)) => match (time_off, start) {
            (Some(t), Some(s)) => {
                let end = instant(on, Some(t), DayBoundary::Start)?;
                Some(if end < s { end + Duration::hours(24) } else { end })
            }
            _ => None,
        },
        (None, None) => None,
    };

    Ok(match (start, end) {
        (Some(start), Some(end)) => Some(Span { start, end }),
        (Some(start), None) => Some(Span { start, end: start }),
        (None, Some(end)) => Some(Span { start: end, end }),
        (None, None) => None,
    })
}
