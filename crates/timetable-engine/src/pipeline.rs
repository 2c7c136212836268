//! Pipeline -- fetch, build, merge, and collect every configured room into a
//! [`Schedule`].
//!
//! Failures are sorted by how much they take down with them:
//!
//! - **Fatal**: login or the room list fails. Nothing downstream runs.
//! - **Degraded**: a teacher/class/subject list fails (labels come out
//!   blank) or one room's periods fail (that room gets an empty timeline).
//! - **Data quality**: unknown room names and clashing start times are
//!   logged and otherwise absorbed.

use tracing::{error, info, warn};

use crate::builder::{build_events, Directory, NameTable};
use crate::codec::{DayCode, TimeCodec};
use crate::error::Result;
use crate::markers::fill_day_markers;
use crate::merger::{merge_lessons, MergePolicy};
use crate::model::Element;
use crate::provider::{Credentials, ProviderError, TimetableProvider};
use crate::rooms::RoomMapping;
use crate::timeline::Schedule;

/// Provider grid type used for room timetables.
pub const DEFAULT_GRID_ID: u32 = 4;

/// Everything a pipeline run needs besides the provider itself.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub credentials: Credentials,
    /// Room display names to build timelines for.
    pub rooms: Vec<String>,
    pub grid_id: u32,
    pub merge: MergePolicy,
    /// Add `DayBegin`/`Recess`/`DayEnd` markers after merging.
    pub synthesize_breaks: bool,
    pub codec: TimeCodec,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            rooms: Vec::new(),
            grid_id: DEFAULT_GRID_ID,
            merge: MergePolicy::default(),
            synthesize_breaks: false,
            codec: TimeCodec::default(),
        }
    }
}

/// One run of fetch, build, merge and (optionally) day-marker synthesis.
#[derive(Debug, Clone)]
pub struct Pipeline {
    settings: PipelineSettings,
}

impl Pipeline {
    pub fn new(settings: PipelineSettings) -> Self {
        Self { settings }
    }

    /// Build the schedule for `day`.
    ///
    /// Logs in, runs every stage, and logs out again whether or not the
    /// stages succeeded.
    ///
    /// # Errors
    /// Returns the provider error when login or the room list fails.
    pub fn run<P: TimetableProvider + ?Sized>(
        &self,
        provider: &mut P,
        day: DayCode,
    ) -> Result<Schedule> {
        info!(day = %day, timezone = %self.settings.codec.timezone(), "logging in");
        if let Err(err) = provider.login(&self.settings.credentials) {
            error!(error = %err, "login failed");
            return Err(err.into());
        }

        let outcome = self.run_session(provider, day);

        if let Err(err) = provider.logout() {
            warn!(error = %err, "logout failed");
        }
        outcome
    }

    fn run_session<P: TimetableProvider + ?Sized>(
        &self,
        provider: &P,
        day: DayCode,
    ) -> Result<Schedule> {
        let rooms = match provider.rooms() {
            Ok(rooms) => rooms,
            Err(err) => {
                error!(error = %err, "loading rooms failed");
                return Err(err.into());
            }
        };
        info!(count = rooms.len(), "loaded rooms");

        let mapping = RoomMapping::resolve(&self.settings.rooms, &rooms);
        let unused: Vec<&str> = mapping.unused().collect();
        if !unused.is_empty() {
            warn!(count = unused.len(), rooms = ?unused, "configured rooms without a timeline");
        }
        let directory = Directory {
            teachers: name_table("teachers", provider.teachers()),
            classes: name_table("classes", provider.classes()),
            subjects: name_table("subjects", provider.subjects()),
        };

        let mut schedule = Schedule::new(day, self.settings.codec);
        for (name, id) in mapping.resolved() {
            let periods = match provider.periods(id, self.settings.grid_id, day, day) {
                Ok(periods) => periods,
                Err(err) => {
                    warn!(
                        room = name,
                        id = %id,
                        error = %err,
                        "loading periods failed, room stays empty"
                    );
                    Vec::new()
                }
            };
            info!(room = name, periods = periods.len(), "loaded periods");

            let mut timeline = build_events(name, &periods, &directory);
            merge_lessons(&mut timeline, self.settings.merge);
            if self.settings.synthesize_breaks {
                fill_day_markers(&mut timeline);
            }
            schedule.replace_room(name, timeline);
        }

        info!(rooms = schedule.room_count(), "created event list");
        Ok(schedule)
    }
}

/// Turn a lookup-table fetch into a table, degrading to an empty one.
fn name_table(
    resource: &str,
    fetched: std::result::Result<Vec<Element>, ProviderError>,
) -> NameTable {
    match fetched {
        Ok(elements) => {
            info!(resource, count = elements.len(), "loaded names");
            elements.into_iter().collect()
        }
        Err(err) => {
            warn!(resource, error = %err, "loading names failed, labels will be blank");
            NameTable::new()
        }
    }
}
