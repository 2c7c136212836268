//! Time codec -- the integer day and time-of-day encodings used by the
//! timetable provider, and their conversion to absolute instants.
//!
//! - [`TimeCode`] packs a wall-clock time as `HHMM` (e.g. `830` is 08:30).
//! - [`DayCode`] packs a date as `YYYYMMDD` (e.g. `20260316`).
//! - [`TimeCodec`] anchors both to a school's timezone.
//!
//! The codec works at minute precision: seconds are dropped when encoding,
//! so `to_instant(time_code(t), day_code(t))` reproduces `t` truncated to the
//! minute. The one exception is the hour a DST switch repeats: `HHMM` cannot
//! tell its two passes apart, so an instant in the second pass comes back as
//! the same wall-clock minute of the first pass.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Time of day packed as `HHMM`.
///
/// Always valid: hour below 24, minute below 60. Ordering matches
/// chronological order within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct TimeCode(u16);

impl TimeCode {
    /// 00:00, the first code of the day.
    pub const MIDNIGHT: TimeCode = TimeCode(0);

    /// 23:59, the last code of the day.
    pub const LAST_MINUTE: TimeCode = TimeCode(2359);

    /// Validate a packed `HHMM` value.
    pub fn new(hhmm: u16) -> Result<Self> {
        if hhmm / 100 < 24 && hhmm % 100 < 60 {
            Ok(Self(hhmm))
        } else {
            Err(TimetableError::InvalidTimeCode(i64::from(hhmm)))
        }
    }

    pub fn from_hm(hour: u32, minute: u32) -> Result<Self> {
        if hour < 24 && minute < 60 {
            Ok(Self((hour * 100 + minute) as u16))
        } else {
            Err(TimetableError::InvalidTimeCode(
                i64::from(hour) * 100 + i64::from(minute),
            ))
        }
    }

    /// Build a code from minutes elapsed since midnight.
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if minutes < MINUTES_PER_DAY {
            Self::from_hm(minutes / 60, minutes % 60)
        } else {
            Err(TimetableError::InvalidTimeCode(i64::from(minutes)))
        }
    }

    /// The raw `HHMM` value.
    pub fn hhmm(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0 / 100)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0 % 100)
    }

    pub fn minutes_since_midnight(self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Signed wall-clock minutes from `self` to `later`.
    pub fn minutes_until(self, later: TimeCode) -> i64 {
        i64::from(later.minutes_since_midnight()) - i64::from(self.minutes_since_midnight())
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0).unwrap_or(NaiveTime::MIN)
    }

    fn from_naive_time(time: NaiveTime) -> Self {
        Self((time.hour() * 100 + time.minute()) as u16)
    }
}

impl TryFrom<u16> for TimeCode {
    type Error = TimetableError;

    fn try_from(hhmm: u16) -> Result<Self> {
        Self::new(hhmm)
    }
}

impl From<TimeCode> for u16 {
    fn from(code: TimeCode) -> u16 {
        code.0
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Accepts `"HH:MM"` as well as the packed form (`"0830"`, `"830"`).
impl FromStr for TimeCode {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let unparseable = || TimetableError::Unparseable(s.to_string());
        match trimmed.split_once(':') {
            Some((hour, minute)) => {
                let hour: u32 = hour.parse().map_err(|_| unparseable())?;
                let minute: u32 = minute.parse().map_err(|_| unparseable())?;
                Self::from_hm(hour, minute)
            }
            None => {
                let hhmm: u16 = trimmed.parse().map_err(|_| unparseable())?;
                Self::new(hhmm)
            }
        }
    }
}

/// Calendar date packed as `YYYYMMDD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DayCode(NaiveDate);

impl DayCode {
    pub fn new(yyyymmdd: u32) -> Result<Self> {
        let (year, month, day) = (yyyymmdd / 10_000, (yyyymmdd / 100) % 100, yyyymmdd % 100);
        NaiveDate::from_ymd_opt(year as i32, month, day)
            .map(Self)
            .ok_or(TimetableError::InvalidDayCode(i64::from(yyyymmdd)))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// The raw `YYYYMMDD` value.
    pub fn code(self) -> u32 {
        (self.0.year() as u32) * 10_000 + self.0.month() * 100 + self.0.day()
    }
}

impl TryFrom<u32> for DayCode {
    type Error = TimetableError;

    fn try_from(yyyymmdd: u32) -> Result<Self> {
        Self::new(yyyymmdd)
    }
}

impl From<DayCode> for u32 {
    fn from(day: DayCode) -> u32 {
        day.code()
    }
}

impl fmt::Display for DayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Accepts ISO dates (`"2026-03-16"`) and the packed form (`"20260316"`).
impl FromStr for DayCode {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.contains('-') {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(Self)
                .map_err(|_| TimetableError::Unparseable(s.to_string()))
        } else {
            let packed: u32 = trimmed
                .parse()
                .map_err(|_| TimetableError::Unparseable(s.to_string()))?;
            Self::new(packed)
        }
    }
}

/// Converts between instants and day/time codes in a fixed timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeCodec {
    tz: Tz,
}

impl Default for TimeCodec {
    fn default() -> Self {
        Self { tz: Tz::UTC }
    }
}

impl TimeCodec {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build a codec from an IANA timezone name (e.g. `"Europe/Berlin"`).
    pub fn from_name(name: &str) -> Result<Self> {
        let tz: Tz = name
            .parse()
            .map_err(|_| TimetableError::InvalidTimezone(name.to_string()))?;
        Ok(Self { tz })
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// The local date of `instant` in the codec's timezone.
    pub fn day_code<T: TimeZone>(&self, instant: &DateTime<T>) -> DayCode {
        DayCode::from_date(instant.with_timezone(&self.tz).date_naive())
    }

    /// The local time of day of `instant`, truncated to the minute.
    pub fn time_code<T: TimeZone>(&self, instant: &DateTime<T>) -> TimeCode {
        TimeCode::from_naive_time(instant.with_timezone(&self.tz).time())
    }

    /// Resolve a local day and time of day to an absolute instant.
    ///
    /// # Errors
    /// Returns `TimetableError::NonexistentLocalTime` when the wall-clock time
    /// is skipped by a DST transition. Ambiguous times (the repeated hour when
    /// clocks go back) resolve to the earlier instant.
    pub fn to_instant(&self, time: TimeCode, day: DayCode) -> Result<DateTime<Utc>> {
        let local = day.date().and_time(time.to_naive_time());
        self.tz
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or(TimetableError::NonexistentLocalTime {
                day: day.code(),
                time,
            })
    }

    /// Today's date in the codec's timezone.
    pub fn today(&self) -> DayCode {
        self.day_code(&Utc::now())
    }

    /// The current local time of day.
    pub fn now(&self) -> TimeCode {
        self.time_code(&Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_code_rejects_out_of_range_minutes() {
        assert!(TimeCode::new(860).is_err());
        assert!(TimeCode::new(2400).is_err());
        assert_eq!(TimeCode::new(2359).unwrap().minutes_since_midnight(), 1439);
    }

    #[test]
    fn time_code_parses_both_spellings() {
        assert_eq!("08:30".parse::<TimeCode>().unwrap().hhmm(), 830);
        assert_eq!("0830".parse::<TimeCode>().unwrap().hhmm(), 830);
        assert_eq!("830".parse::<TimeCode>().unwrap().hhmm(), 830);
        assert!("8h30".parse::<TimeCode>().is_err());
    }

    #[test]
    fn day_code_rejects_impossible_dates() {
        assert!(DayCode::new(20260230).is_err());
        assert_eq!(DayCode::new(20240229).unwrap().code(), 20240229);
        assert_eq!("2026-03-16".parse::<DayCode>().unwrap().code(), 20260316);
    }
}
