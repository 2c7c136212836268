//! JSON configuration: provider credentials, wanted rooms, and how the
//! timelines are built.
//!
//! ```json
//! {
//!   "username": "monitor",
//!   "password": "secret",
//!   "school": "example-school",
//!   "server": "timetable.example.org",
//!   "rooms": ["2.306", "2.312"],
//!   "timezone": "Europe/Berlin",
//!   "merge": { "max_gap_minutes": 5 },
//!   "snapshot": "snapshot.json"
//! }
//! ```
//!
//! Upper-case credential keys (`USERNAME`, `PASSWORD`, `SCHOOL`, `SERVER`)
//! are accepted as well.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::TimeCodec;
use crate::error::{Result, TimetableError};
use crate::merger::MergePolicy;
use crate::pipeline::{PipelineSettings, DEFAULT_GRID_ID};
use crate::provider::Credentials;

pub const DEFAULT_TIMEZONE: &str = "Europe/Berlin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(alias = "USERNAME")]
    pub username: String,
    #[serde(default, alias = "PASSWORD", skip_serializing)]
    pub password: String,
    #[serde(default, alias = "SCHOOL")]
    pub school: String,
    #[serde(default, alias = "SERVER")]
    pub server: String,
    /// Room display names to follow.
    #[serde(default)]
    pub rooms: Vec<String>,
    /// IANA timezone the school's time codes are in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_grid_id")]
    pub grid_id: u32,
    #[serde(default)]
    pub merge: MergePolicy,
    #[serde(default)]
    pub synthesize_breaks: bool,
    /// Timetable snapshot to serve instead of a live session. Relative
    /// paths are resolved against the config file's directory by
    /// [`Config::load`].
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_grid_id() -> u32 {
    DEFAULT_GRID_ID
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let mut config = Self::from_json(&json)?;
        if let Some(snapshot) = config.snapshot.take() {
            config.snapshot = Some(match path.parent() {
                Some(dir) if snapshot.is_relative() => dir.join(snapshot),
                _ => snapshot,
            });
        }
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.codec()?;
        if self.rooms.iter().any(|room| room.trim().is_empty()) {
            return Err(TimetableError::Config("room names must not be blank".to_string()));
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
            school: self.school.clone(),
            server: self.server.clone(),
        }
    }

    pub fn codec(&self) -> Result<TimeCodec> {
        TimeCodec::from_name(&self.timezone)
    }

    pub fn pipeline_settings(&self) -> Result<PipelineSettings> {
        Ok(PipelineSettings {
            credentials: self.credentials(),
            rooms: self.rooms.clone(),
            grid_id: self.grid_id,
            merge: self.merge,
            synthesize_breaks: self.synthesize_breaks,
            codec: self.codec()?,
        })
    }
}
