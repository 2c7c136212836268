//! Tests for DayBegin / Recess / DayEnd synthesis.

use timetable_engine::{
    fill_day_markers, merge_lessons, Event, EventKind, Lesson, MergePolicy, RoomTimeline, TimeCode,
};

fn t(hhmm: u16) -> TimeCode {
    TimeCode::new(hhmm).unwrap()
}

fn lesson(start: u16, end: u16, class: &str) -> Event {
    Event::Lesson(Lesson {
        room: "2.306".to_string(),
        teachers: "Meyer; ".to_string(),
        classes: class.to_string(),
        subject: "Art; ".to_string(),
        start: t(start),
        end: t(end),
    })
}

fn shape(timeline: &RoomTimeline) -> Vec<(EventKind, u16, u16)> {
    timeline
        .iter()
        .map(|e| (e.kind(), e.start().hhmm(), e.end().hhmm()))
        .collect()
}

#[test]
fn lessons_are_framed_by_day_markers() {
    let mut timeline: RoomTimeline = vec![
        lesson(800, 930, "10a; "),
        lesson(945, 1115, "10b; "),
        lesson(1115, 1200, "10c; "),
    ]
    .into_iter()
    .collect();

    let inserted = fill_day_markers(&mut timeline);

    assert_eq!(inserted, 3);
    assert_eq!(
        shape(&timeline),
        vec![
            (EventKind::DayBegin, 0, 800),
            (EventKind::Lesson, 800, 930),
            (EventKind::Recess, 930, 945),
            (EventKind::Lesson, 945, 1115),
            (EventKind::Lesson, 1115, 1200),
            (EventKind::DayEnd, 1200, 2359),
        ]
    );
}

#[test]
fn markers_carry_the_room() {
    let mut timeline: RoomTimeline = vec![lesson(800, 930, "10a; ")].into_iter().collect();
    fill_day_markers(&mut timeline);

    assert!(timeline.iter().all(|e| e.room() == "2.306"));
}

#[test]
fn lesson_at_midnight_has_no_day_begin() {
    let mut timeline: RoomTimeline = vec![lesson(0, 45, "10a; ")].into_iter().collect();
    fill_day_markers(&mut timeline);

    assert_eq!(
        shape(&timeline),
        vec![(EventKind::Lesson, 0, 45), (EventKind::DayEnd, 45, 2359)]
    );
}

#[test]
fn empty_timeline_gets_no_markers() {
    let mut timeline = RoomTimeline::new();
    assert_eq!(fill_day_markers(&mut timeline), 0);
    assert!(timeline.is_empty());
}

#[test]
fn filling_twice_gives_the_same_timeline() {
    let mut timeline: RoomTimeline = vec![lesson(800, 845, "10a; "), lesson(1000, 1045, "10b; ")]
        .into_iter()
        .collect();

    fill_day_markers(&mut timeline);
    let once = timeline.clone();
    fill_day_markers(&mut timeline);

    assert_eq!(timeline, once);
}

#[test]
fn merging_after_markers_keeps_recess_between_runs() {
    let mut timeline: RoomTimeline = vec![lesson(800, 845, "10a; "), lesson(900, 945, "10a; ")]
        .into_iter()
        .collect();

    fill_day_markers(&mut timeline);
    merge_lessons(&mut timeline, MergePolicy::default());

    let lessons = timeline.iter().filter(|e| e.kind() == EventKind::Lesson).count();
    assert_eq!(lessons, 2, "a recess between them stops the merge");
}
