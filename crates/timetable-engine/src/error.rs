//! Error types for timetable-engine operations.

use thiserror::Error;

use crate::codec::TimeCode;
use crate::provider::ProviderError;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Invalid time code: {0} (expected HHMM within 0000..=2359)")]
    InvalidTimeCode(i64),

    #[error("Invalid day code: {0} (expected a calendar date as YYYYMMDD)")]
    InvalidDayCode(i64),

    #[error("Unparseable time or date: {0:?}")]
    Unparseable(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The local wall-clock time falls into a DST gap.
    #[error("Local time {time} does not exist on day {day}")]
    NonexistentLocalTime { day: u32, time: TimeCode },

    #[error("Unknown room: {0}")]
    UnknownRoom(String),

    /// The next change lies before the reference time.
    #[error("Negative countdown from {from} to {to}: {seconds}s")]
    NegativeCountdown {
        from: TimeCode,
        to: TimeCode,
        seconds: i64,
    },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TimetableError>;
