//! Event builder -- turns raw periods into lesson events.
//!
//! Identifiers are resolved to display names through the [`Directory`]
//! supplied by the caller. An identifier missing from its table resolves to
//! an empty name: a lookup table that failed to load upstream degrades the
//! labels, never the build.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::model::{Element, ElementId, Event, Lesson, Period};
use crate::timeline::RoomTimeline;

/// Appended after every name in a label.
pub const LABEL_SEPARATOR: &str = "; ";

/// Identifier to display-name lookup for one element type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: HashMap<ElementId, String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ElementId, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    /// The display name for `id`, or `""` when unknown.
    pub fn name(&self, id: ElementId) -> &str {
        self.names.get(&id).map(String::as_str).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<Element> for NameTable {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(|e| (e.id, e.name)).collect(),
        }
    }
}

/// The lookup tables needed to label lessons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    pub teachers: NameTable,
    pub classes: NameTable,
    pub subjects: NameTable,
}

/// Join the resolved names of `ids`, each followed by [`LABEL_SEPARATOR`].
///
/// Names are sorted so the label does not depend on the order the provider
/// happened to list the identifiers in. An empty `ids` gives an empty label.
pub fn label(ids: &[ElementId], table: &NameTable) -> String {
    let mut names: Vec<&str> = ids.iter().map(|id| table.name(*id)).collect();
    names.sort_unstable();
    names.into_iter().fold(String::new(), |mut out, name| {
        out.push_str(name);
        out.push_str(LABEL_SEPARATOR);
        out
    })
}

/// Build one lesson per period for `room`, keyed by the period's start.
///
/// Periods whose end is not after their start are skipped. When two periods
/// share a start time the later one wins; both cases are logged.
pub fn build_events(room: &str, periods: &[Period], directory: &Directory) -> RoomTimeline {
    let mut timeline = RoomTimeline::new();

    for period in periods {
        if period.end <= period.start {
            warn!(
                room,
                start = %period.start,
                end = %period.end,
                "skipping period that does not end after it starts"
            );
            continue;
        }

        let lesson = Lesson {
            room: room.to_string(),
            teachers: label(&period.teachers, &directory.teachers),
            classes: label(&period.classes, &directory.classes),
            subject: label(&period.subjects, &directory.subjects),
            start: period.start,
            end: period.end,
        };

        if let Some(displaced) = timeline.insert(Event::Lesson(lesson)) {
            warn!(
                room,
                start = %period.start,
                dropped = %displaced,
                "two periods share a start time, keeping the later one"
            );
        }
    }

    debug!(room, periods = periods.len(), events = timeline.len(), "built events");
    timeline
}
