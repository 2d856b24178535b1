//! Turn driver: deterministic resolution of one action per avatar.

use std::collections::BTreeMap;

use crate::action::{Action, ResolveError};
use crate::avatar::{AvatarId, AvatarRegistry, Event};
use crate::world::WorldMap;

/// Events produced by one resolved turn, keyed by avatar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnOutcome {
    pub events: BTreeMap<AvatarId, Vec<Event>>,
}

/// Resolves one turn's worth of decisions against the snapshot.
///
/// Decisions are applied in ascending avatar-id order (the map's key
/// order), so attack and death side effects on an avatar are visible to
/// every action resolved later in the same cycle. Avatars without a
/// decision implicitly wait. On success the accumulated events are drained
/// out for the reporting layer; a structural fault aborts the cycle with
/// the registry and map in a partially resolved state that must be
/// discarded.
pub fn resolve_turn(
    map: &mut WorldMap,
    avatars: &mut AvatarRegistry,
    decisions: &BTreeMap<AvatarId, Action>,
) -> Result<TurnOutcome, ResolveError> {
    avatars.clear_events();
    for (&actor, &action) in decisions {
        action.resolve(actor, map, avatars)?;
    }
    Ok(TurnOutcome {
        events: avatars.drain_events(),
    })
}
