//! Publishing events as they start, and a full-day simulation that drives it.

use std::io::Write;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::codec::TimeCode;
use crate::model::Event;
use crate::timeline::Schedule;

/// Raw codes scanned by [`simulate_day`]: `0000` up to `2399`.
const SCAN_RANGE: std::ops::Range<u16> = 0..2400;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Receives events at the moment they start.
pub trait Publisher {
    fn publish(&mut self, at: TimeCode, event: &Event) -> Result<(), PublishError>;
}

impl<P: Publisher + ?Sized> Publisher for &mut P {
    fn publish(&mut self, at: TimeCode, event: &Event) -> Result<(), PublishError> {
        (**self).publish(at, event)
    }
}

/// Collects publications in memory.
impl Publisher for Vec<(TimeCode, Event)> {
    fn publish(&mut self, at: TimeCode, event: &Event) -> Result<(), PublishError> {
        self.push((at, event.clone()));
        Ok(())
    }
}

#[derive(Serialize)]
struct Publication<'a> {
    at: TimeCode,
    event: &'a Event,
}

/// Writes one JSON object per line: `{"at":800,"event":{...}}`.
#[derive(Debug)]
pub struct JsonLinesPublisher<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesPublisher<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Publisher for JsonLinesPublisher<W> {
    fn publish(&mut self, at: TimeCode, event: &Event) -> Result<(), PublishError> {
        serde_json::to_writer(&mut self.writer, &Publication { at, event })?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Walk the day one code at a time and publish every event, across all
/// rooms, at the code it starts.
///
/// Codes that are not valid times of day (e.g. `0860`) are skipped. Returns
/// the number of events published; stops at the first publisher error.
pub fn simulate_day<P: Publisher + ?Sized>(
    schedule: &Schedule,
    publisher: &mut P,
) -> Result<usize, PublishError> {
    let mut published = 0;

    for raw in SCAN_RANGE {
        let Ok(at) = TimeCode::new(raw) else {
            continue;
        };
        for (_, timeline) in schedule.rooms() {
            if let Some(event) = timeline.get(at) {
                publisher.publish(at, event)?;
                published += 1;
            }
        }
    }

    debug!(published, "simulated day");
    Ok(published)
}
