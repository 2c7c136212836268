//! Room mapping -- resolve configured room names to provider identifiers.

use tracing::{info, warn};

use crate::model::{Element, ElementId};

/// Outcome of resolving one configured room name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomSlot {
    Resolved(ElementId),
    /// The provider does not know the name; the room is skipped downstream.
    Unused,
}

/// Configured room names in configuration order, each with its slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomMapping {
    entries: Vec<(String, RoomSlot)>,
}

impl RoomMapping {
    /// Match each wanted name against the provider's room list.
    ///
    /// When the provider lists a name twice, the last entry wins. Names
    /// configured twice are kept once.
    pub fn resolve<S: AsRef<str>>(wanted: &[S], rooms: &[Element]) -> Self {
        let mut entries: Vec<(String, RoomSlot)> = Vec::with_capacity(wanted.len());

        for name in wanted.iter().map(AsRef::as_ref) {
            if entries.iter().any(|(known, _)| known == name) {
                continue;
            }
            let slot = match rooms.iter().rev().find(|room| room.name == name) {
                Some(room) => {
                    info!(room = name, id = %room.id, "mapped room");
                    RoomSlot::Resolved(room.id)
                }
                None => {
                    warn!(room = name, "room not found, skipping");
                    RoomSlot::Unused
                }
            };
            entries.push((name.to_string(), slot));
        }

        Self { entries }
    }

    pub fn slot(&self, name: &str) -> Option<RoomSlot> {
        self.entries
            .iter()
            .find(|(known, _)| known == name)
            .map(|(_, slot)| *slot)
    }

    /// Rooms that resolved, in configuration order.
    pub fn resolved(&self) -> impl Iterator<Item = (&str, ElementId)> {
        self.entries.iter().filter_map(|(name, slot)| match slot {
            RoomSlot::Resolved(id) => Some((name.as_str(), *id)),
            RoomSlot::Unused => None,
        })
    }

    pub fn unused(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, slot)| *slot == RoomSlot::Unused)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_provider_names_resolve_to_last() {
        let rooms = vec![Element::new(1, "2.306"), Element::new(7, "2.306")];
        let mapping = RoomMapping::resolve(&["2.306"], &rooms);
        assert_eq!(mapping.slot("2.306"), Some(RoomSlot::Resolved(ElementId(7))));
    }

    #[test]
    fn unknown_names_are_listed_as_unused() {
        let rooms = vec![Element::new(1, "2.306")];
        let mapping = RoomMapping::resolve(&["9.999", "2.306", "0.001"], &rooms);
        assert_eq!(mapping.unused().collect::<Vec<_>>(), vec!["9.999", "0.001"]);
        assert_eq!(mapping.resolved().count(), 1);
    }

    #[test]
    fn repeated_configured_names_kept_once() {
        let rooms = vec![Element::new(1, "2.306")];
        let mapping = RoomMapping::resolve(&["2.306", "2.306"], &rooms);
        assert_eq!(mapping.len(), 1);
    }
}
