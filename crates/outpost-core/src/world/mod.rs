//! World model: cells, interactables, and the authoritative map.

pub mod pathfinding;
pub mod scan;
pub mod snapshot;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::avatar::AvatarId;
use crate::error::MapError;
use crate::grid::Location;

/// Closed taxonomy of objects that can sit in a cell alongside avatars.
///
/// The snake_case name is the wire token used by the provider.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InteractableKind {
    Chest,
    Key,
    YellowOrb,
    DamageBoost,
    Invulnerability,
    Health,
    Score,
}

impl InteractableKind {
    /// Artefacts are the scan-discoverable, backpack-eligible kinds.
    pub fn is_artefact(self) -> bool {
        matches!(self, Self::Chest | Self::Key | Self::YellowOrb)
    }

    /// Anything an avatar can consume or carry, artefacts included.
    pub fn is_pickup(self) -> bool {
        self.is_artefact()
            || matches!(self, Self::DamageBoost | Self::Invulnerability | Self::Health)
    }

    pub fn is_score(self) -> bool {
        matches!(self, Self::Score)
    }
}

/// An item sitting in a cell or, once claimed, in a backpack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Interactable {
    #[serde(rename = "type")]
    pub kind: InteractableKind,
    /// Set once an avatar has claimed the item.
    #[serde(default)]
    pub held: bool,
}

impl Interactable {
    pub fn new(kind: InteractableKind) -> Self {
        Self { kind, held: false }
    }
}

/// Terrain blocker. Obstacles have no behavior beyond making their cell
/// uninhabitable and opaque to pathfinding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Obstacle;

/// One addressable grid position and its contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub location: Location,
    /// Non-owning reference into the avatar registry. Never the source of
    /// truth for where the avatar is.
    pub avatar: Option<AvatarId>,
    pub interactable: Option<Interactable>,
    pub obstacle: Option<Obstacle>,
    pub partially_fogged: bool,
}

impl Cell {
    pub fn empty(location: Location) -> Self {
        Self {
            location,
            avatar: None,
            interactable: None,
            obstacle: None,
            partially_fogged: false,
        }
    }

    /// A cell an avatar could stand in: no obstacle and nobody home.
    pub fn habitable(&self) -> bool {
        self.avatar.is_none() && self.obstacle.is_none()
    }

    pub fn has_artefact(&self) -> bool {
        self.interactable
            .is_some_and(|item| item.kind.is_artefact())
    }
}

/// Authoritative snapshot of world state for one turn.
///
/// Owns every cell; exclusively owned by the turn that built it. Avatar
/// occupancy here is a projection of the avatar registry, rebuilt or
/// resynchronized by action resolution after moves and deaths.
#[derive(Clone, Debug, Default)]
pub struct WorldMap {
    cells: BTreeMap<Location, Cell>,
    respawn_location: Location,
}

impl WorldMap {
    pub fn new(cells: BTreeMap<Location, Cell>) -> Self {
        Self {
            cells,
            respawn_location: Location::ORIGIN,
        }
    }

    /// Designates where defeated avatars reappear.
    pub fn with_respawn(mut self, location: Location) -> Self {
        self.respawn_location = location;
        self
    }

    pub fn respawn_location(&self) -> Location {
        self.respawn_location
    }

    /// Plain lookup for callers that treat absence as an ordinary outcome.
    pub fn cell(&self, location: Location) -> Option<&Cell> {
        self.cells.get(&location)
    }

    /// Presence-assuming lookup. Absence, or a cell whose stored location
    /// disagrees with its key, is a structural fault.
    pub fn get_cell(&self, location: Location) -> Result<&Cell, MapError> {
        let cell = self
            .cells
            .get(&location)
            .ok_or(MapError::OutOfBounds(location))?;
        if cell.location != location {
            return Err(MapError::LocationMismatch {
                requested: location,
                found: cell.location,
            });
        }
        Ok(cell)
    }

    pub(crate) fn get_cell_mut(&mut self, location: Location) -> Result<&mut Cell, MapError> {
        let cell = self
            .cells
            .get_mut(&location)
            .ok_or(MapError::OutOfBounds(location))?;
        if cell.location != location {
            return Err(MapError::LocationMismatch {
                requested: location,
                found: cell.location,
            });
        }
        Ok(cell)
    }

    /// Whether the location is part of this snapshot at all, distinguishing
    /// "fogged/unknown" from "known but unreachable".
    pub fn is_visible(&self, location: Location) -> bool {
        self.cells.contains_key(&location)
    }

    /// Whether a single step onto the location could execute right now.
    /// Out-of-bounds is an ordinary `false`, not an error.
    pub fn can_move_to(&self, location: Location) -> bool {
        self.cell(location)
            .is_some_and(|cell| cell.habitable() && cell.avatar.is_none())
    }

    pub fn all_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    pub fn interactable_cells(&self) -> impl Iterator<Item = &Cell> {
        self.all_cells().filter(|cell| cell.interactable.is_some())
    }

    pub fn pickup_cells(&self) -> impl Iterator<Item = &Cell> {
        self.all_cells().filter(|cell| {
            cell.interactable
                .is_some_and(|item| item.kind.is_pickup())
        })
    }

    pub fn score_cells(&self) -> impl Iterator<Item = &Cell> {
        self.all_cells().filter(|cell| {
            cell.interactable
                .is_some_and(|item| item.kind.is_score())
        })
    }

    pub fn partially_fogged_cells(&self) -> impl Iterator<Item = &Cell> {
        self.all_cells().filter(|cell| cell.partially_fogged)
    }

    // ---- occupancy mutators used by action resolution ----

    /// Claims the cell for an avatar.
    pub(crate) fn place_avatar(
        &mut self,
        location: Location,
        avatar: AvatarId,
    ) -> Result<(), MapError> {
        self.get_cell_mut(location)?.avatar = Some(avatar);
        Ok(())
    }

    /// Clears the cell's occupant, returning whoever was recorded there so
    /// the caller can detect occupancy desync.
    pub(crate) fn clear_avatar(&mut self, location: Location) -> Result<Option<AvatarId>, MapError> {
        Ok(self.get_cell_mut(location)?.avatar.take())
    }
}
