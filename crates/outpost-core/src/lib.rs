//! Deterministic simulation core for a grid-based, turn-oriented game.
//!
//! The crate owns the authoritative world model (cells, obstacles,
//! interactable items, avatar occupancy), resolves externally supplied
//! actions into state mutation plus observable [`Event`]s, and answers
//! spatial queries (visibility, reachability, nearest-artefact scan)
//! backed by A* search. The surrounding service builds a [`WorldMap`]
//! snapshot each turn, calls [`engine::resolve_turn`], and ships the
//! updated snapshot and events back out; nothing here blocks, persists,
//! or talks to the network.
pub mod action;
pub mod avatar;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod world;

pub use action::{Action, ActionOptions, ActionRecord, ActionType, ResolveError};
pub use avatar::{AvatarId, AvatarRegistry, AvatarState, Backpack, Event};
pub use config::SimConfig;
pub use engine::{TurnOutcome, resolve_turn};
pub use error::{MapError, SnapshotError};
pub use grid::{Direction, Location};
pub use world::pathfinding::find_path;
pub use world::scan::{Artefact, scan_nearby};
pub use world::snapshot::{
    AvatarRecord, CellRecord, GameStateRecord, World, world_from_cells, world_from_game_state,
};
pub use world::{Cell, Interactable, InteractableKind, Obstacle, WorldMap};
