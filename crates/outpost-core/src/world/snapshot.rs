//! Wire-format ingestion for provider snapshots.
//!
//! Two snapshot shapes arrive from the game-state provider: a flat list of
//! per-cell records, and a rectangle descriptor carrying overlay lists.
//! Both build the same thing: a [`WorldMap`] plus the [`AvatarRegistry`]
//! that owns every avatar the map references. Malformed snapshots are
//! fatal [`SnapshotError`]s; nothing here is silently repaired.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::avatar::{AvatarId, AvatarRegistry, AvatarState, Backpack};
use crate::error::SnapshotError;
use crate::grid::{Direction, Location};

use super::{Cell, Interactable, InteractableKind, Obstacle, WorldMap};

/// A fully ingested turn snapshot.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub map: WorldMap,
    pub avatars: AvatarRegistry,
}

/// One cell as shipped by the provider.
///
/// Every recognized field is listed here; anything else in the record is
/// rejected. `habitable` is derived state on this side and is accepted only
/// so providers may echo it back.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CellRecord {
    pub location: Location,
    #[serde(default)]
    pub avatar: Option<AvatarRecord>,
    #[serde(default)]
    pub interactable: Option<Interactable>,
    #[serde(default)]
    pub obstacle: Option<ObstacleRecord>,
    #[serde(default)]
    pub partially_fogged: bool,
    /// Derived; discarded on ingestion.
    #[serde(default)]
    pub habitable: Option<bool>,
}

/// Avatar payload embedded in a cell record. The cell supplies the
/// location.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AvatarRecord {
    pub id: AvatarId,
    #[serde(default)]
    pub orientation: Option<Direction>,
    #[serde(default)]
    pub health: Option<u32>,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub backpack: Vec<Interactable>,
}

impl AvatarRecord {
    fn into_state(self, location: Location) -> Result<AvatarState, SnapshotError> {
        let mut state = AvatarState::new(self.id, location);
        if let Some(orientation) = self.orientation {
            state.orientation = orientation;
        }
        if let Some(health) = self.health {
            state.health = health;
        }
        if let Some(score) = self.score {
            state.score = score;
        }
        let mut backpack = Backpack::new();
        for item in self.backpack {
            backpack
                .try_push(item)
                .map_err(|_| SnapshotError::BackpackOverflow(self.id))?;
        }
        state.backpack = backpack;
        Ok(state)
    }
}

/// Obstacle payload. A bare marker today; kept as a record so the wire
/// format stays extensible.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObstacleRecord {}

/// Interactable overlay entry in the rectangle descriptor.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InteractableEntry {
    pub location: Location,
    #[serde(rename = "type")]
    pub kind: InteractableKind,
    #[serde(default)]
    pub held: bool,
}

/// Obstacle overlay entry in the rectangle descriptor.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObstacleEntry {
    pub location: Location,
}

/// Player overlay entry in the rectangle descriptor.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerRecord {
    pub id: AvatarId,
    pub location: Location,
    #[serde(default)]
    pub orientation: Option<Direction>,
    #[serde(default)]
    pub health: Option<u32>,
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub backpack: Vec<Interactable>,
}

impl PlayerRecord {
    fn into_avatar_record(self) -> (Location, AvatarRecord) {
        (
            self.location,
            AvatarRecord {
                id: self.id,
                orientation: self.orientation,
                health: self.health,
                score: self.score,
                backpack: self.backpack,
            },
        )
    }
}

/// Rectangle-shaped snapshot: inclusive corners plus overlay lists, keyed
/// the way the provider emits them.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GameStateRecord {
    pub south_west_corner: Location,
    pub north_east_corner: Location,
    #[serde(default)]
    pub interactables: Vec<InteractableEntry>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleEntry>,
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
}

/// Builds a world from a flat list of cell records.
pub fn world_from_cells(records: Vec<CellRecord>) -> Result<World, SnapshotError> {
    let mut cells = BTreeMap::new();
    let mut avatars = AvatarRegistry::default();

    for record in records {
        let location = record.location;
        let mut cell = Cell::empty(location);
        cell.interactable = record.interactable;
        cell.obstacle = record.obstacle.map(|_| Obstacle);
        cell.partially_fogged = record.partially_fogged;

        if let Some(avatar) = record.avatar {
            let state = avatar.into_state(location)?;
            cell.avatar = Some(state.id);
            avatars.insert(state)?;
        }

        if cells.insert(location, cell).is_some() {
            return Err(SnapshotError::DuplicateCell(location));
        }
    }

    tracing::debug!(
        cells = cells.len(),
        avatars = avatars.len(),
        "built world from cell records"
    );
    Ok(World {
        map: WorldMap::new(cells),
        avatars,
    })
}

/// Builds a world from a rectangle descriptor.
///
/// Every coordinate of the inclusive rectangle gets exactly one cell, then
/// the overlays are applied by location lookup. An overlay outside the
/// rectangle means the snapshot is corrupt.
pub fn world_from_game_state(record: GameStateRecord) -> Result<World, SnapshotError> {
    let south_west = record.south_west_corner;
    let north_east = record.north_east_corner;
    if south_west.x > north_east.x || south_west.y > north_east.y {
        return Err(SnapshotError::InvertedCorners {
            south_west,
            north_east,
        });
    }

    let mut cells = BTreeMap::new();
    for x in south_west.x..=north_east.x {
        for y in south_west.y..=north_east.y {
            let location = Location::new(x, y);
            cells.insert(location, Cell::empty(location));
        }
    }

    for entry in record.interactables {
        let cell = cells
            .get_mut(&entry.location)
            .ok_or(SnapshotError::OverlayOutOfBounds {
                overlay: "interactable",
                location: entry.location,
            })?;
        cell.interactable = Some(Interactable {
            kind: entry.kind,
            held: entry.held,
        });
    }

    for entry in record.obstacles {
        let cell = cells
            .get_mut(&entry.location)
            .ok_or(SnapshotError::OverlayOutOfBounds {
                overlay: "obstacle",
                location: entry.location,
            })?;
        cell.obstacle = Some(Obstacle);
    }

    let mut avatars = AvatarRegistry::default();
    for player in record.players {
        let (location, avatar) = player.into_avatar_record();
        let cell = cells
            .get_mut(&location)
            .ok_or(SnapshotError::OverlayOutOfBounds {
                overlay: "player",
                location,
            })?;
        let state = avatar.into_state(location)?;
        cell.avatar = Some(state.id);
        avatars.insert(state)?;
    }

    tracing::debug!(
        cells = cells.len(),
        avatars = avatars.len(),
        "built world from rectangle descriptor"
    );
    Ok(World {
        map: WorldMap::new(cells),
        avatars,
    })
}
