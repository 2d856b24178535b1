//! Structural-fault error types.
//!
//! In-domain failures (blocked moves, missed attacks, full backpacks) are
//! reported as [`Event`](crate::avatar::Event)s, never as errors. The enums
//! here cover corrupted snapshots and lookups that violate an invariant the
//! caller already assumed; the simulation cycle aborts when one surfaces.

use crate::avatar::AvatarId;
use crate::grid::Location;

/// Errors raised by presence-assuming map lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// No cell exists at the requested location.
    #[error("no cell at {0}")]
    OutOfBounds(Location),

    /// The stored cell's own location disagrees with its map key.
    #[error("cell keyed at {requested} reports location {found}")]
    LocationMismatch {
        requested: Location,
        found: Location,
    },
}

/// Errors raised while ingesting a provider snapshot.
///
/// Each of these indicates a corrupted snapshot; continuing would produce
/// undefined game state, so construction aborts instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The south-west corner exceeds the north-east corner on an axis.
    #[error("inverted rectangle corners: south-west {south_west}, north-east {north_east}")]
    InvertedCorners {
        south_west: Location,
        north_east: Location,
    },

    /// Two cell records claimed the same location.
    #[error("duplicate cell record for {0}")]
    DuplicateCell(Location),

    /// An overlay entry referenced a location outside the snapshot rectangle.
    #[error("{overlay} overlay at {location} is outside the snapshot rectangle")]
    OverlayOutOfBounds {
        overlay: &'static str,
        location: Location,
    },

    /// Two avatar records claimed the same id.
    #[error("duplicate avatar record for {0}")]
    DuplicateAvatar(AvatarId),

    /// An avatar record carried more items than a backpack can hold.
    #[error("backpack overflow in avatar record for {0}")]
    BackpackOverflow(AvatarId),
}
