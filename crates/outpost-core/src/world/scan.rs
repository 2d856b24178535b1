//! Windowed nearest-artefact scan, ranked by true path distance.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::SimConfig;
use crate::grid::Location;

use super::{InteractableKind, WorldMap, pathfinding};

/// A discovered artefact and the route to it.
///
/// `path` starts at the scan origin and ends at the artefact's cell, so a
/// non-trivial route always has at least two entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Artefact {
    #[serde(rename = "type")]
    pub kind: InteractableKind,
    pub location: Location,
    pub path: Vec<Location>,
}

/// Searches the inclusive square window `[origin ± radius]` for artefact
/// cells and returns the nearest ones, nearest first.
///
/// Distance is true path length, not straight-line distance: candidates the
/// pathfinder cannot reach are dropped. Candidates tie by discovery order
/// (window iteration: x ascending, then y ascending), and the result is
/// truncated to `config.scan_limit`.
pub fn scan_nearby(map: &WorldMap, origin: Location, config: &SimConfig) -> Vec<Artefact> {
    let radius = config.scan_radius;
    let mut candidates = Vec::new();
    for x in origin.x - radius..=origin.x + radius {
        for y in origin.y - radius..=origin.y + radius {
            if let Some(cell) = map.cell(Location::new(x, y)) {
                if cell.has_artefact() {
                    candidates.push(cell);
                }
            }
        }
    }

    // Group reachable candidates by path length; BTreeMap keys give the
    // ascending-distance walk, Vec order preserves discovery order.
    let mut by_distance: BTreeMap<usize, Vec<Artefact>> = BTreeMap::new();
    let mut reachable = 0usize;
    for cell in &candidates {
        let Some(item) = cell.interactable else {
            continue;
        };
        let Some(path) = pathfinding::find_path(map, origin, cell.location, config.path_node_budget)
        else {
            continue;
        };
        reachable += 1;
        by_distance.entry(path.len()).or_default().push(Artefact {
            kind: item.kind,
            location: cell.location,
            path,
        });
    }

    tracing::debug!(
        %origin,
        candidates = candidates.len(),
        reachable,
        "artefact scan complete"
    );

    let mut nearest = Vec::new();
    for group in by_distance.into_values() {
        nearest.extend(group);
        if nearest.len() > config.scan_limit {
            break;
        }
    }
    nearest.truncate(config.scan_limit);
    nearest
}
