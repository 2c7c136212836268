//! # timetable-engine
//!
//! Turns a school's daily room timetable into compact per-room event
//! timelines and answers "what is happening in room R right now, and how
//! many seconds until that changes?".
//!
//! Raw periods flow through a fixed sequence of stages, once per run:
//!
//! ```text
//! provider -> builder -> merger -> (markers) -> timeline -> query
//! ```
//!
//! ## Modules
//!
//! - [`codec`]: `HHMM` time codes, `YYYYMMDD` day codes, and their instants
//! - [`model`]: Periods, elements and the `Event` enum
//! - [`builder`]: Periods → lesson events with resolved labels
//! - [`merger`]: Coalesce lessons split across adjacent periods
//! - [`markers`]: Synthesize `DayBegin`/`Recess`/`DayEnd` around lessons
//! - [`timeline`]: Ordered per-room timelines and the day `Schedule`
//! - [`query`]: Current event and countdown to the next change
//! - [`provider`]: Provider session trait and the snapshot provider
//! - [`rooms`]: Resolve configured room names to provider ids
//! - [`pipeline`]: Run every stage against a provider
//! - [`publish`]: Publishers and the full-day simulation
//! - [`config`]: JSON configuration
//! - [`error`]: Error types

pub mod builder;
pub mod codec;
pub mod config;
pub mod error;
pub mod markers;
pub mod merger;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod publish;
pub mod query;
pub mod rooms;
pub mod timeline;

pub use builder::{build_events, Directory, NameTable};
pub use codec::{DayCode, TimeCode, TimeCodec};
pub use config::Config;
pub use error::TimetableError;
pub use markers::fill_day_markers;
pub use merger::{merge_lessons, MergePolicy};
pub use model::{Element, ElementId, Event, EventKind, Lesson, Period, Span};
pub use pipeline::{Pipeline, PipelineSettings};
pub use provider::{Credentials, ProviderError, Snapshot, SnapshotProvider, TimetableProvider};
pub use publish::{simulate_day, JsonLinesPublisher, PublishError, Publisher};
pub use query::{Lookup, NextChange};
pub use rooms::{RoomMapping, RoomSlot};
pub use timeline::{RoomTimeline, Schedule};
