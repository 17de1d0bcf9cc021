//! Birth timestamp composition.
//!
//! The backend expects an ISO-8601 date-time with an explicit UTC offset
//! (`2024-03-01T08:30:00+09:00`). Users enter a calendar date and an optional
//! clock time, which are combined here and qualified with the offset in effect
//! for that local date-time.

use crate::{Error, Result};
use chrono::{FixedOffset, Local, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone};
use std::fmt;
use std::str::FromStr;

/// Time used when the user leaves the birth time empty.
pub const DEFAULT_TIME: &str = "00:00";

const LOCAL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Zone whose UTC offset qualifies the composed timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BirthZone {
    /// The host's local time zone, DST rules included.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl BirthZone {
    /// Offset in seconds east of UTC for `naive` interpreted in this zone.
    fn offset_at(&self, naive: &NaiveDateTime) -> Option<i32> {
        match self {
            Self::Local => offset_in(&Local, naive),
            Self::Fixed(offset) => offset_in(offset, naive),
        }
    }
}

/// Offset in force in `tz` at the local wall-clock time `naive`.
///
/// Ambiguous times (DST fold) resolve to the earlier instant. Times skipped by
/// a forward transition (DST gap) are read with the offset from before the
/// transition, which lands after it, so the later offset is returned.
fn offset_in<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<i32> {
    match tz.offset_from_local_datetime(naive) {
        LocalResult::Single(offset) | LocalResult::Ambiguous(offset, _) => {
            Some(offset.fix().local_minus_utc())
        }
        LocalResult::None => {
            let day_before = naive.checked_sub_signed(TimeDelta::days(1))?;
            let before = tz.offset_from_utc_datetime(&day_before).fix();
            let instant = naive
                .checked_sub_signed(TimeDelta::seconds(before.local_minus_utc().into()))?;
            Some(tz.offset_from_utc_datetime(&instant).fix().local_minus_utc())
        }
    }
}

impl FromStr for BirthZone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Ok(Self::Local);
        }

        let invalid = || Error::InvalidTimeZone(format!("'{}' (expected 'local' or ±HH:MM)", s));

        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(invalid()),
        };
        let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
        if hours.len() != 2 || minutes.len() != 2 {
            return Err(invalid());
        }
        let hours: i32 = hours.parse().map_err(|_| invalid())?;
        let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
        if minutes >= 60 {
            return Err(invalid());
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Self::Fixed)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for BirthZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Fixed(offset) => f.write_str(&format_offset(offset.local_minus_utc())),
        }
    }
}

/// Combines a `YYYY-MM-DD` date and an optional `HH:MM` time into an
/// offset-qualified timestamp. An absent or empty time means midnight.
pub fn compose_birth_iso(date: &str, time: Option<&str>, zone: BirthZone) -> Option<String> {
    let time = match time {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_TIME,
    };
    with_offset_iso(&format!("{}T{}", date, time), zone)
}

/// Qualifies a local `YYYY-MM-DDTHH:MM[:SS]` value with its UTC offset.
///
/// Returns `None` if the value is empty or not a valid local date-time.
pub fn with_offset_iso(local: &str, zone: BirthZone) -> Option<String> {
    if local.is_empty() {
        return None;
    }

    let normalized = if local.len() == 16 {
        format!("{}:00", local)
    } else {
        local.to_string()
    };

    let naive = NaiveDateTime::parse_from_str(&normalized, LOCAL_DATETIME_FORMAT).ok()?;
    let offset_seconds = zone.offset_at(&naive)?;

    Some(format!(
        "{}{}",
        naive.format(OUTPUT_FORMAT),
        format_offset(offset_seconds)
    ))
}

/// `±HH:MM` for an offset given in seconds east of UTC. Zero is `+00:00`.
pub fn format_offset(seconds_east: i32) -> String {
    let minutes = seconds_east / 60;
    let sign = if minutes >= 0 { '+' } else { '-' };
    let absolute = minutes.abs();
    format!("{}{:02}:{:02}", sign, absolute / 60, absolute % 60)
}
