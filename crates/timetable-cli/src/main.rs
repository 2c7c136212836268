//! `timetable` CLI: build a day's room timelines and query them.
//!
//! ## Usage
//!
//! ```sh
//! # What is happening in every configured room right now?
//! timetable --config config.json now
//!
//! # One room at a fixed time on a fixed day
//! timetable --config config.json --date 2026-03-16 now --room 2.312 --at 08:30
//!
//! # Print the merged timelines (as JSON)
//! timetable --config config.json timeline --json
//!
//! # Scan the whole day and publish each event as a JSON line
//! timetable --config config.json simulate
//!
//! # More log output on stderr (or set RUST_LOG)
//! timetable -vv --config config.json now
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde_json::json;
use timetable_engine::{
    simulate_day, Config, DayCode, JsonLinesPublisher, NextChange, Pipeline, Schedule, Snapshot,
    SnapshotProvider, TimeCode, TimetableError,
};
use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "timetable",
    version,
    about = "Room timetable events: what is on now, and for how long"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the JSON config file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Day to load (YYYY-MM-DD or YYYYMMDD); defaults to today in the school's timezone
    #[arg(long)]
    date: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current event and the countdown to the next change
    Now {
        /// Room to query (repeatable); defaults to every configured room
        #[arg(short, long)]
        room: Vec<String>,
        /// Reference time (HH:MM or HHMM); defaults to the current time
        #[arg(long)]
        at: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the merged timeline of each room
    Timeline {
        /// Only print this room
        #[arg(short, long)]
        room: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Walk the day minute by minute and publish events as JSON lines
    Simulate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config: {}", cli.config.display()))?;
    let settings = config.pipeline_settings()?;
    let day = match cli.date.as_deref() {
        Some(raw) => raw
            .parse::<DayCode>()
            .with_context(|| format!("Invalid --date: {}", raw))?,
        None => settings.codec.today(),
    };

    let snapshot_path = config
        .snapshot
        .clone()
        .context("Config has no `snapshot`; a timetable snapshot is required")?;
    let snapshot = Snapshot::load(&snapshot_path)
        .with_context(|| format!("Failed to read snapshot: {}", snapshot_path.display()))?;
    let mut provider = SnapshotProvider::new(snapshot);

    let schedule = Pipeline::new(settings)
        .run(&mut provider, day)
        .context("Failed to build room timelines")?;

    match cli.command {
        Commands::Now { room, at, json } => {
            let as_of = match at.as_deref() {
                Some(raw) => raw
                    .parse::<TimeCode>()
                    .with_context(|| format!("Invalid --at: {}", raw))?,
                None => schedule.codec().now(),
            };
            let rooms = if room.is_empty() {
                config.rooms.clone()
            } else {
                room
            };
            print_now(&schedule, &rooms, as_of, json)?;
        }
        Commands::Timeline { room, json } => {
            print_timeline(&schedule, room.as_deref(), json)?;
        }
        Commands::Simulate => {
            let stdout = io::stdout();
            let mut publisher = JsonLinesPublisher::new(stdout.lock());
            simulate_day(&schedule, &mut publisher).context("Failed to publish events")?;
        }
    }

    Ok(())
}

/// Route `tracing` output to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,timetable_engine={level},timetable={level}",
            level = level.to_string().to_lowercase()
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn print_now(schedule: &Schedule, rooms: &[String], as_of: TimeCode, json: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    let mut results = Vec::new();

    for room in rooms {
        // A failed query is reported for its room only; the other rooms still print.
        let lookup = match schedule.current_event(room, as_of) {
            Ok(lookup) => lookup,
            Err(err) => {
                let message = match err {
                    TimetableError::UnknownRoom(_) => "unknown room".to_string(),
                    other => {
                        warn!(room = room.as_str(), error = %other, "query failed");
                        other.to_string()
                    }
                };
                if json {
                    results.push(json!({ "room": room, "at": as_of, "error": message }));
                } else {
                    writeln!(out, "{}: {}", room, message)?;
                }
                continue;
            }
        };

        if json {
            let next = lookup
                .next
                .at()
                .zip(lookup.next.seconds())
                .map(|(at, seconds)| json!({ "at": at, "seconds": seconds }));
            results.push(json!({
                "room": room,
                "at": as_of,
                "event": lookup.event,
                "next": next,
            }));
            continue;
        }

        match lookup.event {
            Some(event) => writeln!(out, "{}: {}", room, event)?,
            None => writeln!(out, "{}: no event", room)?,
        }
        match lookup.next {
            NextChange::In { at, seconds } => {
                writeln!(out, "  next change at {} (in {}s)", at, seconds)?
            }
            NextChange::EndOfDay => writeln!(out, "  no further changes today")?,
        }
    }

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?;
    }
    Ok(())
}

fn print_timeline(schedule: &Schedule, room: Option<&str>, json: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    let rooms: Vec<_> = schedule
        .rooms()
        .filter(|(name, _)| room.is_none_or(|wanted| wanted == *name))
        .collect();
    if let Some(wanted) = room {
        if rooms.is_empty() {
            anyhow::bail!("Unknown room: '{}'", wanted);
        }
    }

    if json {
        let mut by_room = serde_json::Map::new();
        for (name, timeline) in &rooms {
            by_room.insert(name.to_string(), serde_json::to_value(timeline)?);
        }
        let document = json!({ "day": schedule.day(), "rooms": by_room });
        writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
        return Ok(());
    }

    writeln!(out, "Day {}", schedule.day())?;
    for (name, timeline) in rooms {
        writeln!(out, "{} ({} events)", name, timeline.len())?;
        for event in timeline {
            writeln!(out, "  {}", event)?;
        }
    }
    Ok(())
}
