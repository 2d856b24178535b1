//! Spatial primitives: grid locations and cardinal directions.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Discrete grid coordinate.
///
/// Ordering is lexicographic on `(x, y)` so locations can key ordered maps
/// and iteration over the world stays deterministic.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(deny_unknown_fields)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Grid distance ignoring obstacles; the A* heuristic.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Add<Direction> for Location {
    type Output = Location;

    fn add(self, rhs: Direction) -> Location {
        let (dx, dy) = rhs.delta();
        Location::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal unit offset. The snake_case name doubles as the wire token.
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
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Neighbor expansion order for pathfinding; fixed for reproducibility.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// Recovers the direction of a single grid step, if the two locations
    /// are cardinally adjacent.
    pub fn from_step(from: Location, to: Location) -> Option<Direction> {
        let step = (to.x - from.x, to.y - from.y);
        Self::ALL.into_iter().find(|direction| direction.delta() == step)
    }
}
