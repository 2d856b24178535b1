//! Observable outcomes of action resolution.

use serde::Serialize;

use crate::grid::Location;
use crate::world::InteractableKind;

use super::AvatarId;

/// One observable outcome of resolving an action.
///
/// Failure variants are routine game outcomes, not errors: the event log is
/// the only channel through which players learn what their action did.
/// Each record is attributed to exactly the avatar whose log it sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum Event {
    /// The actor stepped from `from` to `to`.
    Moved { from: Location, to: Location },
    /// The actor tried to step to `to` and stayed at `from`.
    FailedMove { from: Location, to: Location },
    /// The actor hit `target` at `target_location` for `damage`.
    PerformedAttack {
        target: AvatarId,
        target_location: Location,
        damage: u32,
    },
    /// The avatar was hit by `attacker` for `damage`.
    ReceivedAttack { attacker: AvatarId, damage: u32 },
    /// The attacked cell held no avatar.
    FailedAttack { target_location: Location },
    /// The actor claimed the item on its cell.
    PickedUp { item: InteractableKind },
    /// No artefact on the actor's cell, or its backpack was full.
    FailedPickup,
}
