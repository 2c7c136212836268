//! Build + merge throughput for a full school day.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use timetable_engine::{
    build_events, merge_lessons, Directory, Element, ElementId, MergePolicy, Period, TimeCode,
};

/// Twenty 45-minute periods from 07:00, paired into double lessons.
fn school_day() -> Vec<Period> {
    (0..20u32)
        .map(|i| {
            let start = 7 * 60 + i * 45;
            Period {
                date: None,
                start: TimeCode::from_minutes(start).unwrap(),
                end: TimeCode::from_minutes(start + 45).unwrap(),
                teachers: vec![ElementId(i64::from(i / 2))],
                classes: vec![ElementId(100 + i64::from(i / 2))],
                subjects: vec![ElementId(200)],
            }
        })
        .collect()
}

fn bench_build_and_merge(c: &mut Criterion) {
    let periods = school_day();
    let directory = Directory {
        teachers: (0..10).map(|id| Element::new(id, format!("Teacher {id}"))).collect(),
        classes: (100..110).map(|id| Element::new(id, format!("Class {id}"))).collect(),
        subjects: std::iter::once(Element::new(200, "Math")).collect(),
    };

    c.bench_function("build_and_merge_day", |b| {
        b.iter(|| {
            let mut timeline = build_events("2.312", black_box(&periods), &directory);
            merge_lessons(&mut timeline, MergePolicy::default());
            timeline
        })
    });
}

criterion_group!(benches, bench_build_and_merge);
criterion_main!(benches);
