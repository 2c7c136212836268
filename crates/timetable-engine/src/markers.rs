//! Day markers -- fill the time around lessons with `DayBegin`, `Recess` and
//! `DayEnd` events.
//!
//! Runs on a merged timeline. Given lessons L1..Ln:
//!
//! - `DayBegin` covers 00:00 up to L1 (omitted when L1 starts at 00:00),
//! - `Recess` covers every gap between the end of one lesson and the start
//!   of the next,
//! - `DayEnd` starts when the last lesson ends and runs to 23:59.
//!
//! A timeline without lessons stays empty.

use crate::codec::TimeCode;
use crate::model::{Event, Lesson, Span};
use crate::timeline::RoomTimeline;

/// Replace any existing markers in `timeline` with freshly computed ones.
///
/// Returns the number of markers inserted.
pub fn fill_day_markers(timeline: &mut RoomTimeline) -> usize {
    let lessons: Vec<Lesson> = timeline
        .take_events()
        .filter_map(|event| match event {
            Event::Lesson(lesson) => Some(lesson),
            _ => None,
        })
        .collect();

    let Some(first) = lessons.first() else {
        return 0;
    };
    let room = first.room.clone();
    let span = |start: TimeCode, end: TimeCode| Span {
        room: room.clone(),
        start,
        end,
    };

    let mut markers = Vec::new();
    if first.start > TimeCode::MIDNIGHT {
        markers.push(Event::DayBegin(span(TimeCode::MIDNIGHT, first.start)));
    }

    let mut cursor = first.end;
    for lesson in &lessons[1..] {
        if cursor < lesson.start {
            markers.push(Event::Recess(span(cursor, lesson.start)));
        }
        cursor = cursor.max(lesson.end);
    }

    if cursor < TimeCode::LAST_MINUTE {
        markers.push(Event::DayEnd(span(cursor, TimeCode::LAST_MINUTE)));
    }

    let inserted = markers.len();
    *timeline = lessons
        .into_iter()
        .map(Event::Lesson)
        .chain(markers)
        .collect();
    inserted
}
