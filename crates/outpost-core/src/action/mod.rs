//! The closed set of avatar commands and their wire encoding.

mod resolve;

use serde::Serialize;

use crate::grid::Direction;
use crate::world::scan::Artefact;

pub use resolve::ResolveError;

/// One command chosen for an avatar this turn.
///
/// Immutable once constructed, and resolved exactly once per turn.
/// `MoveTowards` bakes its direction at construction time from a scanned
/// artefact's path; an unusable input leaves it inert, which resolves to no
/// effect and no event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Wait,
    Move { direction: Direction },
    Attack { direction: Direction },
    Pickup,
    MoveTowards { direction: Option<Direction> },
}

impl Action {
    /// Builds a move-towards command from a scan result.
    ///
    /// A missing artefact or a trivial path cannot yield a direction; the
    /// resulting action is inert rather than an error, since the caller's
    /// scan may legitimately have come back empty.
    pub fn move_towards(artefact: Option<&Artefact>) -> Self {
        let Some(artefact) = artefact else {
            tracing::warn!("move_towards without an artefact, action will be inert");
            return Self::MoveTowards { direction: None };
        };

        if artefact.path.len() < 2 {
            tracing::warn!(
                target = %artefact.location,
                "move_towards path is trivial, action will be inert"
            );
            return Self::MoveTowards { direction: None };
        }

        // The first entry in the path is the avatar's own cell.
        let direction = Direction::from_step(artefact.path[0], artefact.path[1]);
        if direction.is_none() {
            tracing::warn!(
                target = %artefact.location,
                "move_towards path does not begin with a unit step, action will be inert"
            );
        }
        Self::MoveTowards { direction }
    }

    /// Wire encoding consumed by the external executor.
    ///
    /// Wait and Pickup carry no options; an inert move-towards encodes as
    /// an empty object.
    pub fn to_record(self) -> ActionRecord {
        match self {
            Action::Wait => ActionRecord::bare(ActionType::Wait),
            Action::Pickup => ActionRecord::bare(ActionType::Pickup),
            Action::Move { direction } => ActionRecord::directed(ActionType::Move, direction),
            Action::Attack { direction } => ActionRecord::directed(ActionType::Attack, direction),
            Action::MoveTowards {
                direction: Some(direction),
            } => ActionRecord::directed(ActionType::Move, direction),
            Action::MoveTowards { direction: None } => ActionRecord::empty(),
        }
    }
}

/// Wire discriminant for [`ActionRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Wait,
    Move,
    Attack,
    Pickup,
}

/// Direction payload of a move or attack record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ActionOptions {
    pub direction: Direction,
}

/// Serialized form of an [`Action`] as shipped to the transport layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<ActionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<ActionOptions>,
}

impl ActionRecord {
    fn bare(action_type: ActionType) -> Self {
        Self {
            action_type: Some(action_type),
            options: None,
        }
    }

    fn directed(action_type: ActionType, direction: Direction) -> Self {
        Self {
            action_type: Some(action_type),
            options: Some(ActionOptions { direction }),
        }
    }

    fn empty() -> Self {
        Self {
            action_type: None,
            options: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Location;
    use crate::world::InteractableKind;
    use serde_json::json;

    fn artefact(path: Vec<Location>) -> Artefact {
        Artefact {
            kind: InteractableKind::Chest,
            location: *path.last().unwrap(),
            path,
        }
    }

    #[test]
    fn wait_and_pickup_serialize_without_options() {
        assert_eq!(
            serde_json::to_value(Action::Wait.to_record()).unwrap(),
            json!({"action_type": "wait"})
        );
        assert_eq!(
            serde_json::to_value(Action::Pickup.to_record()).unwrap(),
            json!({"action_type": "pickup"})
        );
    }

    #[test]
    fn move_and_attack_serialize_with_a_direction_token() {
        let record = Action::Move {
            direction: Direction::North,
        }
        .to_record();
        assert_eq!(
            serde_json::to_value(record).unwrap(),
            json!({"action_type": "move", "options": {"direction": "north"}})
        );

        let record = Action::Attack {
            direction: Direction::West,
        }
        .to_record();
        assert_eq!(
            serde_json::to_value(record).unwrap(),
            json!({"action_type": "attack", "options": {"direction": "west"}})
        );
    }

    #[test]
    fn move_towards_derives_its_direction_from_the_path() {
        let action = Action::move_towards(Some(&artefact(vec![
            Location::ORIGIN,
            Location::new(1, 0),
            Location::new(2, 0),
        ])));
        assert_eq!(
            action,
            Action::MoveTowards {
                direction: Some(Direction::East)
            }
        );
        assert_eq!(
            serde_json::to_value(action.to_record()).unwrap(),
            json!({"action_type": "move", "options": {"direction": "east"}})
        );
    }

    #[test]
    fn move_towards_without_an_artefact_is_inert() {
        let action = Action::move_towards(None);
        assert_eq!(action, Action::MoveTowards { direction: None });
        assert_eq!(serde_json::to_value(action.to_record()).unwrap(), json!({}));
    }

    #[test]
    fn move_towards_with_a_trivial_path_is_inert() {
        let action = Action::move_towards(Some(&artefact(vec![Location::ORIGIN])));
        assert_eq!(action, Action::MoveTowards { direction: None });
    }
}
