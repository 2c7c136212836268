//! Per-room event timelines and the day schedule that holds them.
//!
//! A [`RoomTimeline`] is keyed by start time and always iterates in
//! ascending key order, which the merger and the query rely on. Keys are
//! unique: inserting a second event at an occupied key displaces the first.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::codec::{DayCode, TimeCode, TimeCodec};
use crate::model::Event;

/// Ordered events of one room for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomTimeline {
    events: BTreeMap<TimeCode, Event>,
}

impl RoomTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `event` at its start time, returning the event it displaced.
    pub fn insert(&mut self, event: Event) -> Option<Event> {
        self.events.insert(event.time(), event)
    }

    pub fn get(&self, at: TimeCode) -> Option<&Event> {
        self.events.get(&at)
    }

    /// The last event starting strictly before `at`.
    pub fn before(&self, at: TimeCode) -> Option<&Event> {
        self.events.range(..at).next_back().map(|(_, event)| event)
    }

    /// The first event starting at or after `at`.
    pub fn at_or_after(&self, at: TimeCode) -> Option<&Event> {
        self.events.range(at..).next().map(|(_, event)| event)
    }

    pub fn first(&self) -> Option<&Event> {
        self.events.values().next()
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.values().next_back()
    }

    /// Events in ascending start order.
    pub fn iter(&self) -> btree_map::Values<'_, TimeCode, Event> {
        self.events.values()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drain all events in ascending start order, leaving the timeline empty.
    pub(crate) fn take_events(&mut self) -> btree_map::IntoValues<TimeCode, Event> {
        std::mem::take(&mut self.events).into_values()
    }
}

impl FromIterator<Event> for RoomTimeline {
    /// Later events displace earlier ones that share a start time.
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        let mut timeline = RoomTimeline::new();
        for event in iter {
            timeline.insert(event);
        }
        timeline
    }
}

impl<'a> IntoIterator for &'a RoomTimeline {
    type Item = &'a Event;
    type IntoIter = btree_map::Values<'a, TimeCode, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for RoomTimeline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.events.values())
    }
}

/// All room timelines of one day, anchored to the day and timezone they were
/// built for.
///
/// Built once by the pipeline and read-only afterwards. A long-lived caller
/// rebuilds a room off to the side and swaps it in with
/// [`Schedule::replace_room`], so readers never see a half-merged timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    day: DayCode,
    #[serde(skip)]
    codec: TimeCodec,
    rooms: BTreeMap<String, RoomTimeline>,
}

impl Schedule {
    pub fn new(day: DayCode, codec: TimeCodec) -> Self {
        Self {
            day,
            codec,
            rooms: BTreeMap::new(),
        }
    }

    pub fn day(&self) -> DayCode {
        self.day
    }

    pub fn codec(&self) -> &TimeCodec {
        &self.codec
    }

    pub fn room(&self, name: &str) -> Option<&RoomTimeline> {
        self.rooms.get(name)
    }

    /// Rooms in name order.
    pub fn rooms(&self) -> impl Iterator<Item = (&str, &RoomTimeline)> {
        self.rooms.iter().map(|(name, timeline)| (name.as_str(), timeline))
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Install a fully built timeline for `room`, returning the previous one.
    pub fn replace_room(
        &mut self,
        room: impl Into<String>,
        timeline: RoomTimeline,
    ) -> Option<RoomTimeline> {
        self.rooms.insert(room.into(), timeline)
    }
}
