//! Avatar runtime state and the registry that owns it.

mod event;

use std::collections::BTreeMap;
use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::error::SnapshotError;
use crate::grid::{Direction, Location};
use crate::world::Interactable;

pub use event::Event;

/// Unique identifier for an avatar, assigned by the external game service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AvatarId(pub u32);

impl fmt::Display for AvatarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bounded item storage carried by an avatar.
pub type Backpack = ArrayVec<Interactable, { SimConfig::BACKPACK_CAPACITY }>;

/// One player's mutable runtime state for the current turn.
///
/// The registry entry is the single source of truth for the avatar's
/// location; the map's occupancy view is a derived projection and is
/// resynchronized by action resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarState {
    pub id: AvatarId,
    pub location: Location,
    /// Facing, as reported by the game service. Informational only: moves
    /// and attacks are direction-addressed and ignore facing.
    pub orientation: Direction,
    pub health: u32,
    pub score: i32,
    pub times_died: u32,
    pub backpack: Backpack,
    /// Observable outcomes accumulated during the current turn.
    pub events: Vec<Event>,
}

impl AvatarState {
    pub fn new(id: AvatarId, location: Location) -> Self {
        Self {
            id,
            location,
            orientation: Direction::North,
            health: SimConfig::MAX_HEALTH,
            score: 0,
            times_died: 0,
            backpack: Backpack::new(),
            events: Vec::new(),
        }
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health;
        self
    }

    pub fn with_score(mut self, score: i32) -> Self {
        self.score = score;
        self
    }

    pub fn with_orientation(mut self, orientation: Direction) -> Self {
        self.orientation = orientation;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub(crate) fn record(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Lethal-damage bookkeeping: full health, respawn location, death
    /// counter. Map occupancy is resynchronized by the caller.
    pub(crate) fn die(&mut self, respawn: Location) {
        self.health = SimConfig::MAX_HEALTH;
        self.times_died += 1;
        self.location = respawn;
    }
}

/// Owns every avatar record for the session.
///
/// Iteration follows ascending id order, which is also the order in which
/// the engine resolves actions.
#[derive(Clone, Debug, Default)]
pub struct AvatarRegistry {
    avatars: BTreeMap<AvatarId, AvatarState>,
}

impl AvatarRegistry {
    pub fn insert(&mut self, avatar: AvatarState) -> Result<(), SnapshotError> {
        if self.avatars.contains_key(&avatar.id) {
            return Err(SnapshotError::DuplicateAvatar(avatar.id));
        }
        self.avatars.insert(avatar.id, avatar);
        Ok(())
    }

    pub fn get(&self, id: AvatarId) -> Option<&AvatarState> {
        self.avatars.get(&id)
    }

    pub fn get_mut(&mut self, id: AvatarId) -> Option<&mut AvatarState> {
        self.avatars.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.avatars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.avatars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AvatarState> {
        self.avatars.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = AvatarId> + '_ {
        self.avatars.keys().copied()
    }

    pub(crate) fn clear_events(&mut self) {
        for avatar in self.avatars.values_mut() {
            avatar.events.clear();
        }
    }

    /// Moves each avatar's accumulated events out, keyed by id.
    pub(crate) fn drain_events(&mut self) -> BTreeMap<AvatarId, Vec<Event>> {
        self.avatars
            .iter_mut()
            .map(|(&id, avatar)| (id, std::mem::take(&mut avatar.events)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_avatar_starts_at_full_health_with_empty_backpack() {
        let avatar = AvatarState::new(AvatarId(1), Location::new(2, 3));
        assert_eq!(avatar.health, SimConfig::MAX_HEALTH);
        assert_eq!(avatar.times_died, 0);
        assert!(avatar.backpack.is_empty());
        assert!(avatar.events.is_empty());
    }

    #[test]
    fn dying_restores_health_and_relocates() {
        let mut avatar = AvatarState::new(AvatarId(1), Location::ORIGIN).with_health(1);
        avatar.health = 0;
        avatar.die(Location::new(10, 10));

        assert_eq!(avatar.health, SimConfig::MAX_HEALTH);
        assert_eq!(avatar.times_died, 1);
        assert_eq!(avatar.location, Location::new(10, 10));
    }

    #[test]
    fn registry_rejects_duplicate_ids() {
        let mut registry = AvatarRegistry::default();
        registry
            .insert(AvatarState::new(AvatarId(1), Location::ORIGIN))
            .unwrap();

        let err = registry
            .insert(AvatarState::new(AvatarId(1), Location::new(1, 1)))
            .unwrap_err();
        assert_eq!(err, SnapshotError::DuplicateAvatar(AvatarId(1)));
    }

    #[test]
    fn registry_iterates_in_id_order() {
        let mut registry = AvatarRegistry::default();
        for id in [3, 1, 2] {
            registry
                .insert(AvatarState::new(AvatarId(id), Location::ORIGIN))
                .unwrap();
        }

        let ids: Vec<_> = registry.ids().collect();
        assert_eq!(ids, vec![AvatarId(1), AvatarId(2), AvatarId(3)]);
    }

    #[test]
    fn drain_events_empties_every_log() {
        let mut registry = AvatarRegistry::default();
        registry
            .insert(AvatarState::new(AvatarId(1), Location::ORIGIN))
            .unwrap();
        registry.get_mut(AvatarId(1)).unwrap().record(Event::FailedPickup);

        let drained = registry.drain_events();
        assert_eq!(drained[&AvatarId(1)], vec![Event::FailedPickup]);
        assert!(registry.get(AvatarId(1)).unwrap().events.is_empty());
    }
}
