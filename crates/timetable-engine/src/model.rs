//! Core data types: raw periods from the provider and the typed events
//! derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::builder::LABEL_SEPARATOR;
use crate::codec::{DayCode, TimeCode};

/// Opaque provider identifier for a room, teacher, class or subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub i64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named provider element (room, teacher, class or subject).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub name: String,
}

impl Element {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: ElementId(id),
            name: name.into(),
        }
    }
}

/// A single scheduled block for one room.
///
/// Periods of one room do not overlap, but one conceptual lesson is often
/// split into several adjacent periods (e.g. two 45-minute blocks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Day the period takes place on. Providers that answer a single-day
    /// request may leave it out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DayCode>,
    pub start: TimeCode,
    pub end: TimeCode,
    #[serde(default)]
    pub teachers: Vec<ElementId>,
    #[serde(default)]
    pub classes: Vec<ElementId>,
    #[serde(default)]
    pub subjects: Vec<ElementId>,
}

/// The tag of an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Lesson,
    Recess,
    DayBegin,
    DayEnd,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Lesson => "lesson",
            EventKind::Recess => "recess",
            EventKind::DayBegin => "day begin",
            EventKind::DayEnd => "day end",
        };
        f.write_str(name)
    }
}

/// A lesson held in a room, possibly spanning several merged periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub room: String,
    /// Teacher names, each followed by `"; "`.
    pub teachers: String,
    /// Class names, each followed by `"; "`.
    pub classes: String,
    /// Subject names, each followed by `"; "`.
    pub subject: String,
    pub start: TimeCode,
    pub end: TimeCode,
}

impl Lesson {
    /// Whether `other` continues this lesson: same room, classes and teachers.
    /// The subject is not compared.
    pub fn same_content(&self, other: &Lesson) -> bool {
        self.room == other.room && self.classes == other.classes && self.teachers == other.teachers
    }
}

/// A time range in a room with no lesson attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub room: String,
    pub start: TimeCode,
    pub end: TimeCode,
}

/// What starts happening in a room at a given time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Lesson(Lesson),
    Recess(Span),
    DayBegin(Span),
    DayEnd(Span),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Lesson(_) => EventKind::Lesson,
            Event::Recess(_) => EventKind::Recess,
            Event::DayBegin(_) => EventKind::DayBegin,
            Event::DayEnd(_) => EventKind::DayEnd,
        }
    }

    /// Timeline key: the time the event starts.
    pub fn time(&self) -> TimeCode {
        self.start()
    }

    pub fn start(&self) -> TimeCode {
        match self {
            Event::Lesson(lesson) => lesson.start,
            Event::Recess(span) | Event::DayBegin(span) | Event::DayEnd(span) => span.start,
        }
    }

    pub fn end(&self) -> TimeCode {
        match self {
            Event::Lesson(lesson) => lesson.end,
            Event::Recess(span) | Event::DayBegin(span) | Event::DayEnd(span) => span.end,
        }
    }

    pub fn room(&self) -> &str {
        match self {
            Event::Lesson(lesson) => &lesson.room,
            Event::Recess(span) | Event::DayBegin(span) | Event::DayEnd(span) => &span.room,
        }
    }

    pub fn as_lesson(&self) -> Option<&Lesson> {
        match self {
            Event::Lesson(lesson) => Some(lesson),
            _ => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Lesson(lesson) => write!(
                f,
                "{}-{} lesson in {} | subject: {} | classes: {} | teachers: {}",
                lesson.start,
                lesson.end,
                lesson.room,
                trim_label(&lesson.subject),
                trim_label(&lesson.classes),
                trim_label(&lesson.teachers)
            ),
            other => write!(
                f,
                "{}-{} {} in {}",
                other.start(),
                other.end(),
                other.kind(),
                other.room()
            ),
        }
    }
}

fn trim_label(label: &str) -> &str {
    label.trim_end_matches(LABEL_SEPARATOR)
}
