//! Simulation configuration constants and tunable parameters.

/// Tunable parameters for one simulation instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Half-width of the inclusive square window searched by the artefact
    /// scan.
    pub scan_radius: i32,
    /// Maximum number of artefacts a scan returns.
    pub scan_limit: usize,
    /// Upper bound on A* node expansions for a single query. Exceeding it
    /// resolves to "no path".
    pub path_node_budget: usize,
}

impl SimConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of items an avatar can carry.
    pub const BACKPACK_CAPACITY: usize = 10;

    // ===== fixed game rules =====
    pub const MAX_HEALTH: u32 = 5;
    pub const ATTACK_DAMAGE: u32 = 1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SCAN_RADIUS: i32 = 12;
    pub const DEFAULT_SCAN_LIMIT: usize = 3;
    pub const DEFAULT_PATH_NODE_BUDGET: usize = 4096;

    pub fn new() -> Self {
        Self {
            scan_radius: Self::DEFAULT_SCAN_RADIUS,
            scan_limit: Self::DEFAULT_SCAN_LIMIT,
            path_node_budget: Self::DEFAULT_PATH_NODE_BUDGET,
        }
    }

    pub fn with_scan(mut self, radius: i32, limit: usize) -> Self {
        self.scan_radius = radius;
        self.scan_limit = limit;
        self
    }

    pub fn with_path_node_budget(mut self, budget: usize) -> Self {
        self.path_node_budget = budget;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
