//! Event query -- what is happening in a room at a given time, and how long
//! until that changes.
//!
//! The current event is the last one that started strictly before the
//! reference time. The next change is the earlier of the current lesson's
//! end (if it is still ahead) and the start of the first event at or after
//! the reference time. Countdowns go through the [`TimeCodec`], so they are
//! real elapsed seconds even across a DST switch.

use tracing::trace;

use crate::codec::{DayCode, TimeCode, TimeCodec};
use crate::error::{Result, TimetableError};
use crate::model::Event;
use crate::timeline::{RoomTimeline, Schedule};

/// When the situation in a room next changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextChange {
    /// A change happens at `at`, `seconds` from the reference time.
    In { at: TimeCode, seconds: i64 },
    /// Nothing else happens in the room today.
    EndOfDay,
}

impl NextChange {
    pub fn seconds(&self) -> Option<i64> {
        match self {
            NextChange::In { seconds, .. } => Some(*seconds),
            NextChange::EndOfDay => None,
        }
    }

    pub fn at(&self) -> Option<TimeCode> {
        match self {
            NextChange::In { at, .. } => Some(*at),
            NextChange::EndOfDay => None,
        }
    }
}

/// Result of a point-in-time query against one room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup<'a> {
    /// The most recent event that has already started, if any.
    pub event: Option<&'a Event>,
    pub next: NextChange,
}

/// Query a single timeline as of `as_of` on `day`.
///
/// # Errors
/// Returns `TimetableError::NegativeCountdown` if the codec places the next
/// change before `as_of`, and propagates codec errors for times that do not
/// exist on `day`.
pub fn lookup<'a>(
    timeline: &'a RoomTimeline,
    as_of: TimeCode,
    day: DayCode,
    codec: &TimeCodec,
) -> Result<Lookup<'a>> {
    let event = timeline.before(as_of);
    let lesson_end = event
        .and_then(Event::as_lesson)
        .map(|lesson| lesson.end)
        .filter(|end| *end > as_of);
    let upcoming = timeline.at_or_after(as_of).map(Event::time);

    let next_at = match (lesson_end, upcoming) {
        (Some(end), Some(start)) => Some(end.min(start)),
        (end, start) => end.or(start),
    };

    let next = match next_at {
        None => NextChange::EndOfDay,
        Some(at) => {
            let seconds = (codec.to_instant(at, day)? - codec.to_instant(as_of, day)?).num_seconds();
            if seconds < 0 {
                return Err(TimetableError::NegativeCountdown {
                    from: as_of,
                    to: at,
                    seconds,
                });
            }
            NextChange::In { at, seconds }
        }
    };

    trace!(%as_of, current = ?event.map(Event::time), ?next, "looked up event");
    Ok(Lookup { event, next })
}

impl Schedule {
    /// The event in effect in `room` at `as_of`, and the countdown to the
    /// next change.
    ///
    /// # Errors
    /// Returns `TimetableError::UnknownRoom` when the schedule has no timeline
    /// for `room`; see [`lookup`] for the rest.
    pub fn current_event(&self, room: &str, as_of: TimeCode) -> Result<Lookup<'_>> {
        let timeline = self
            .room(room)
            .ok_or_else(|| TimetableError::UnknownRoom(room.to_string()))?;
        lookup(timeline, as_of, self.day(), self.codec())
    }
}
