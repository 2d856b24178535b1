//! A* search over the world map.
//!
//! Paths are route plans, not immediate-move validity: obstacles block,
//! avatar occupancy does not. [`WorldMap::can_move_to`] remains the
//! authority for whether a single step can execute right now.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use crate::grid::{Direction, Location};

use super::WorldMap;

/// Frontier entry ordered by f-score, then discovery sequence. Equal-cost
/// entries pop in insertion order, so repeated queries on the same map
/// return the same path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Frontier {
    f: u32,
    seq: u64,
    location: Location,
}

/// Runs A* from `start` to `goal` with unit step costs and a Manhattan
/// heuristic, 4-directional movement.
///
/// Returns the inclusive cell path (`len() == 1` when `start == goal`), or
/// `None` when the goal is unreachable or the node budget runs out. "No
/// path" is a normal, expected outcome, never an error.
pub fn find_path(
    map: &WorldMap,
    start: Location,
    goal: Location,
    node_budget: usize,
) -> Option<Vec<Location>> {
    if is_blocked(map, start) || is_blocked(map, goal) {
        return None;
    }

    let mut open = BinaryHeap::new();
    let mut came_from: BTreeMap<Location, Location> = BTreeMap::new();
    let mut g_score: BTreeMap<Location, u32> = BTreeMap::new();
    let mut seq = 0u64;
    let mut expanded = 0usize;

    g_score.insert(start, 0);
    open.push(Reverse(Frontier {
        f: start.manhattan_distance(goal),
        seq,
        location: start,
    }));

    while let Some(Reverse(node)) = open.pop() {
        let current = node.location;
        if current == goal {
            return Some(reconstruct(&came_from, current));
        }

        let Some(&current_g) = g_score.get(&current) else {
            continue;
        };
        // Superseded frontier entry: a cheaper route to this cell was found
        // after it was queued.
        if node.f > current_g + current.manhattan_distance(goal) {
            continue;
        }

        expanded += 1;
        if expanded > node_budget {
            tracing::warn!(
                %start,
                %goal,
                node_budget,
                "pathfinding node budget exhausted, treating goal as unreachable"
            );
            return None;
        }

        for direction in Direction::ALL {
            let neighbor = current + direction;
            if is_blocked(map, neighbor) {
                continue;
            }

            let tentative = current_g + 1;
            if g_score.get(&neighbor).is_none_or(|&g| tentative < g) {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                seq += 1;
                open.push(Reverse(Frontier {
                    f: tentative + neighbor.manhattan_distance(goal),
                    seq,
                    location: neighbor,
                }));
            }
        }
    }

    None
}

/// Traversable for route planning: the cell exists and carries no obstacle.
fn is_blocked(map: &WorldMap, location: Location) -> bool {
    map.cell(location)
        .is_none_or(|cell| cell.obstacle.is_some())
}

fn reconstruct(came_from: &BTreeMap<Location, Location>, goal: Location) -> Vec<Location> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        current = previous;
        path.push(current);
    }
    path.reverse();
    path
}
