//! Per-variant action resolution against the world snapshot.
//!
//! Resolution is total: every in-domain outcome, success or failure, is a
//! typed event on the involved avatars, and the turn never aborts for game
//! reasons. The [`ResolveError`] cases are structural faults that indicate
//! a corrupted snapshot and abort the cycle instead.

use crate::avatar::{AvatarId, AvatarRegistry, Event};
use crate::config::SimConfig;
use crate::grid::Direction;
use crate::world::WorldMap;

use super::Action;

/// Structural faults during resolution. Never produced by routine game
/// outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The acting avatar id is not in the registry.
    #[error("avatar {0} not found in registry")]
    ActorNotFound(AvatarId),

    /// A cell's recorded occupant disagrees with the registry's location.
    #[error("occupancy desync for avatar {avatar}")]
    OccupancyDesync { avatar: AvatarId },

    /// A map lookup failed where presence was already established.
    #[error(transparent)]
    Map(#[from] crate::error::MapError),
}

impl Action {
    /// Resolves this action for `actor`, mutating avatar state and map
    /// occupancy and appending the observable events.
    pub fn resolve(
        self,
        actor: AvatarId,
        map: &mut WorldMap,
        avatars: &mut AvatarRegistry,
    ) -> Result<(), ResolveError> {
        if avatars.get(actor).is_none() {
            return Err(ResolveError::ActorNotFound(actor));
        }
        match self {
            Action::Wait => Ok(()),
            Action::Move { direction } => resolve_move(actor, direction, map, avatars),
            Action::MoveTowards {
                direction: Some(direction),
            } => resolve_move(actor, direction, map, avatars),
            // Inert by construction: no effect, no event.
            Action::MoveTowards { direction: None } => Ok(()),
            Action::Attack { direction } => resolve_attack(actor, direction, map, avatars),
            Action::Pickup => resolve_pickup(actor, map, avatars),
        }
    }
}

fn resolve_move(
    actor: AvatarId,
    direction: Direction,
    map: &mut WorldMap,
    avatars: &mut AvatarRegistry,
) -> Result<(), ResolveError> {
    let state = avatars
        .get_mut(actor)
        .ok_or(ResolveError::ActorNotFound(actor))?;
    let from = state.location;
    let to = from + direction;

    if !map.can_move_to(to) {
        state.record(Event::FailedMove { from, to });
        return Ok(());
    }

    // The registry location is authoritative; resynchronize the map's
    // occupancy projection around it.
    if map.clear_avatar(from)? != Some(actor) {
        return Err(ResolveError::OccupancyDesync { avatar: actor });
    }
    map.place_avatar(to, actor)?;
    state.location = to;
    state.record(Event::Moved { from, to });
    Ok(())
}

fn resolve_attack(
    actor: AvatarId,
    direction: Direction,
    map: &mut WorldMap,
    avatars: &mut AvatarRegistry,
) -> Result<(), ResolveError> {
    let attacker = avatars
        .get(actor)
        .ok_or(ResolveError::ActorNotFound(actor))?;
    let target_location = attacker.location + direction;

    let Some(target_id) = map.cell(target_location).and_then(|cell| cell.avatar) else {
        let attacker = avatars
            .get_mut(actor)
            .ok_or(ResolveError::ActorNotFound(actor))?;
        attacker.record(Event::FailedAttack { target_location });
        return Ok(());
    };

    let damage = SimConfig::ATTACK_DAMAGE;
    let target = avatars
        .get_mut(target_id)
        .ok_or(ResolveError::ActorNotFound(target_id))?;
    target.health = target.health.saturating_sub(damage);
    target.record(Event::ReceivedAttack {
        attacker: actor,
        damage,
    });

    if target.health == 0 {
        let respawn = map.respawn_location();
        tracing::debug!(avatar = %target_id, %respawn, "avatar died, respawning");
        target.die(respawn);
        if map.clear_avatar(target_location)? != Some(target_id) {
            return Err(ResolveError::OccupancyDesync { avatar: target_id });
        }
        map.place_avatar(respawn, target_id)?;
    }

    let attacker = avatars
        .get_mut(actor)
        .ok_or(ResolveError::ActorNotFound(actor))?;
    attacker.record(Event::PerformedAttack {
        target: target_id,
        target_location,
        damage,
    });
    Ok(())
}

fn resolve_pickup(
    actor: AvatarId,
    map: &mut WorldMap,
    avatars: &mut AvatarRegistry,
) -> Result<(), ResolveError> {
    let state = avatars
        .get_mut(actor)
        .ok_or(ResolveError::ActorNotFound(actor))?;
    let cell = map.get_cell_mut(state.location)?;

    let eligible = cell
        .interactable
        .is_some_and(|item| item.kind.is_artefact());
    if !eligible || state.backpack.is_full() {
        state.record(Event::FailedPickup);
        return Ok(());
    }

    if let Some(mut item) = cell.interactable.take() {
        item.held = true;
        // Capacity was checked above; the push cannot overflow.
        state.backpack.push(item);
        state.record(Event::PickedUp { item: item.kind });
    }
    Ok(())
}
