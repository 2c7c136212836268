//! Event merger -- coalesce a lesson split over several periods into one event.
//!
//! Events are visited in ascending start order while an "open" event is
//! carried along. A lesson whose room, classes and teachers equal those of
//! the open lesson is absorbed: the open lesson's end moves out, its key stays
//! put. Anything else closes the open event and becomes the new one.
//! Overlapping lessons never shorten the open lesson: its end becomes the
//! later of the two ends.
//! Non-lesson events never merge.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::TimeCode;
use crate::model::Event;
use crate::timeline::RoomTimeline;

/// How far apart two same-content lessons may be and still merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergePolicy {
    /// Largest gap in minutes between the open lesson's end and the next
    /// lesson's start. `None` merges consecutive same-content lessons
    /// whatever the gap.
    #[serde(default)]
    pub max_gap_minutes: Option<u32>,
}

impl MergePolicy {
    /// Merge only lessons that touch (or overlap).
    pub fn contiguous() -> Self {
        Self {
            max_gap_minutes: Some(0),
        }
    }

    pub fn with_max_gap(minutes: u32) -> Self {
        Self {
            max_gap_minutes: Some(minutes),
        }
    }

    fn allows_gap(&self, open_end: TimeCode, next_start: TimeCode) -> bool {
        match self.max_gap_minutes {
            None => true,
            Some(max) => open_end.minutes_until(next_start) <= i64::from(max),
        }
    }
}

/// Coalesce consecutive same-content lessons in `timeline`.
///
/// Returns the number of events absorbed into an earlier one. Never fails;
/// an empty timeline is left untouched, and merging a merged timeline again
/// changes nothing.
pub fn merge_lessons(timeline: &mut RoomTimeline, policy: MergePolicy) -> usize {
    let mut merged: Vec<Event> = Vec::with_capacity(timeline.len());
    let mut absorbed = 0;

    for event in timeline.take_events() {
        if let (Some(Event::Lesson(open)), Event::Lesson(next)) = (merged.last_mut(), &event) {
            if open.same_content(next) && policy.allows_gap(open.end, next.start) {
                open.end = open.end.max(next.end);
                absorbed += 1;
                continue;
            }
        }
        merged.push(event);
    }

    if absorbed > 0 {
        debug!(absorbed, remaining = merged.len(), "merged split lessons");
    }
    *timeline = merged.into_iter().collect();
    absorbed
}
