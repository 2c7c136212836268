//! Timetable provider -- the session the pipeline pulls rooms, names and
//! periods from.
//!
//! [`TimetableProvider`] is the seam to the scheduling service. The crate
//! ships [`SnapshotProvider`], which answers from a JSON snapshot of one
//! school's data; a networked client implements the same trait.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::DayCode;
use crate::model::{Element, ElementId, Period};

/// Errors raised by a provider call.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not logged in")]
    NotAuthenticated,

    /// A single request failed; other requests may still succeed.
    #[error("Loading {resource} failed: {message}")]
    Request {
        resource: &'static str,
        message: String,
    },

    #[error("Snapshot parse error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Login data for a provider session.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub school: String,
    pub server: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("school", &self.school)
            .field("server", &self.server)
            .finish()
    }
}

/// A logged-in view of a school's timetable data.
///
/// Every call may fail on its own. Query calls before a successful
/// [`login`](TimetableProvider::login) fail with
/// [`ProviderError::NotAuthenticated`].
pub trait TimetableProvider {
    fn login(&mut self, credentials: &Credentials) -> Result<(), ProviderError>;

    fn logout(&mut self) -> Result<(), ProviderError>;

    fn rooms(&self) -> Result<Vec<Element>, ProviderError>;

    fn teachers(&self) -> Result<Vec<Element>, ProviderError>;

    fn classes(&self) -> Result<Vec<Element>, ProviderError>;

    fn subjects(&self) -> Result<Vec<Element>, ProviderError>;

    /// Periods of `room` between `from` and `to` inclusive.
    ///
    /// `grid` selects the provider's element/grid type for the request.
    fn periods(
        &self,
        room: ElementId,
        grid: u32,
        from: DayCode,
        to: DayCode,
    ) -> Result<Vec<Period>, ProviderError>;
}

/// The parts of a snapshot that can be marked unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Rooms,
    Teachers,
    Classes,
    Subjects,
    Periods,
}

impl Resource {
    fn name(self) -> &'static str {
        match self {
            Resource::Rooms => "rooms",
            Resource::Teachers => "teachers",
            Resource::Classes => "classes",
            Resource::Subjects => "subjects",
            Resource::Periods => "periods",
        }
    }
}

/// Periods recorded for one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomPeriods {
    pub room: ElementId,
    #[serde(default)]
    pub periods: Vec<Period>,
}

/// A captured copy of a school's timetable data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub rooms: Vec<Element>,
    #[serde(default)]
    pub teachers: Vec<Element>,
    #[serde(default)]
    pub classes: Vec<Element>,
    #[serde(default)]
    pub subjects: Vec<Element>,
    #[serde(default)]
    pub timetables: Vec<RoomPeriods>,
    /// Resources whose requests fail, as they would when the service
    /// refuses them.
    #[serde(default)]
    pub unavailable: Vec<Resource>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self, ProviderError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ProviderError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Serves a [`Snapshot`] through the provider interface.
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    snapshot: Snapshot,
    session: Option<String>,
}

impl SnapshotProvider {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            session: None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    fn check(&self, resource: Resource) -> Result<(), ProviderError> {
        if self.session.is_none() {
            return Err(ProviderError::NotAuthenticated);
        }
        if self.snapshot.unavailable.contains(&resource) {
            return Err(ProviderError::Request {
                resource: resource.name(),
                message: "resource unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn elements(
        &self,
        resource: Resource,
        elements: &[Element],
    ) -> Result<Vec<Element>, ProviderError> {
        self.check(resource)?;
        Ok(elements.to_vec())
    }
}

impl TimetableProvider for SnapshotProvider {
    fn login(&mut self, credentials: &Credentials) -> Result<(), ProviderError> {
        if credentials.username.trim().is_empty() {
            return Err(ProviderError::Authentication("empty username".to_string()));
        }
        self.session = Some(credentials.username.clone());
        Ok(())
    }

    fn logout(&mut self) -> Result<(), ProviderError> {
        self.session
            .take()
            .map(|_| ())
            .ok_or(ProviderError::NotAuthenticated)
    }

    fn rooms(&self) -> Result<Vec<Element>, ProviderError> {
        self.elements(Resource::Rooms, &self.snapshot.rooms)
    }

    fn teachers(&self) -> Result<Vec<Element>, ProviderError> {
        self.elements(Resource::Teachers, &self.snapshot.teachers)
    }

    fn classes(&self) -> Result<Vec<Element>, ProviderError> {
        self.elements(Resource::Classes, &self.snapshot.classes)
    }

    fn subjects(&self) -> Result<Vec<Element>, ProviderError> {
        self.elements(Resource::Subjects, &self.snapshot.subjects)
    }

    /// Undated periods are treated as taking place on every requested day.
    fn periods(
        &self,
        room: ElementId,
        _grid: u32,
        from: DayCode,
        to: DayCode,
    ) -> Result<Vec<Period>, ProviderError> {
        self.check(Resource::Periods)?;
        Ok(self
            .snapshot
            .timetables
            .iter()
            .filter(|entry| entry.room == room)
            .flat_map(|entry| entry.periods.iter())
            .filter(|period| period.date.is_none_or(|date| from <= date && date <= to))
            .cloned()
            .collect())
    }
}
