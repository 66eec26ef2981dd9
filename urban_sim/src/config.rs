// Data-driven city configuration.
//
// Tunable parameters for generation, visibility and agent movement live in
// `CityConfig`, loaded from JSON or taken from `Default`. The defaults
// reproduce the classic town: an 8 x 8 grid of 3400-unit cells holding 4
// parks and 60 two-blocks.
//
// Layout geometry inside a cell (lot spacing, fence offsets, footpath width)
// is fixed by the generators and is not configurable: changing it would
// change what a seed means.
//
// See also: `neighborhood.rs` reads `NeighborhoodConfig`, `occlusion.rs`
// reads `OcclusionConfig`, `agent.rs` reads `AgentConfig`.
//
// **Critical constraint: determinism.** Two runs agree on a town only if
// they agree on the seed *and* the neighborhood config.

use crate::error::{Result, UrbanError};
use crate::types::ROAD_WIDTH;
use crate::vect::Vect2;
use serde::{Deserialize, Serialize};

/// Every world coordinate a valid config can produce stays within
/// `±COORDINATE_LIMIT`. The camera multiplies coordinate differences by a
/// scale of up to 220 in i32, which this bound keeps in range.
pub const COORDINATE_LIMIT: i32 = 1 << 22;

/// How far a cell's fixed layout (lots, fences with jitter, roads) can
/// reach from the cell's location.
const CELL_REACH: i32 = 4096;

/// Smallest accepted grid accelerator cell. Smaller cells make every wall
/// occupy a huge number of map entries.
pub const MIN_GRID_CELL_SIZE: i32 = 64;

/// Grid shape and park quota.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborhoodConfig {
    /// Half the grid edge in cells. The grid spans `-edge_half..edge_half`
    /// on both axes.
    pub edge_half: i32,
    /// Exact number of parks placed; every other cell is a two-block.
    pub park_count: usize,
    /// Width of one cell in world units.
    pub unit_space: i32,
    /// World position of cell (0, 0).
    pub origin: Vect2,
}

impl Default for NeighborhoodConfig {
    fn default() -> Self {
        Self {
            edge_half: 4,
            park_count: 4,
            unit_space: 3400,
            origin: Vect2::new(500, 500),
        }
    }
}

impl NeighborhoodConfig {
    pub fn edge(&self) -> i32 {
        self.edge_half * 2
    }

    pub fn cell_count(&self) -> usize {
        let edge = self.edge().max(0) as usize;
        edge * edge
    }

    pub fn twoblock_count(&self) -> usize {
        self.cell_count().saturating_sub(self.park_count)
    }

    /// `unit_space * edge_half + 5 + 2 * ROAD_WIDTH`, or `None` on i32
    /// overflow.
    pub fn checked_extent(&self) -> Option<i32> {
        self.unit_space
            .checked_mul(self.edge_half)?
            .checked_add(5 + 2 * ROAD_WIDTH)
    }

    /// Outer corner of the city: half the grid plus the road margin.
    pub fn top_right(&self) -> Vect2 {
        let extent = self.unit_space * self.edge_half + 5 + 2 * ROAD_WIDTH;
        Vect2::new(extent, extent)
    }

    pub fn bottom_left(&self) -> Vect2 {
        -self.top_right()
    }
}

/// Visibility index sizing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcclusionConfig {
    /// `account_reset` calls between clears of the debug list.
    pub debug_decay_period: u32,
    /// Maximum blocking segments. The default town needs under 80 000.
    pub blocking_capacity: usize,
    /// Maximum debug segments retained between decays.
    pub debug_capacity: usize,
    /// Cell size of the uniform grid accelerator, or `None` for a plain
    /// linear scan. Query results are identical either way.
    pub grid_cell_size: Option<i32>,
}

impl Default for OcclusionConfig {
    fn default() -> Self {
        Self {
            debug_decay_period: 6,
            blocking_capacity: 100_000,
            debug_capacity: 60_000,
            grid_cell_size: Some(1024),
        }
    }
}

/// Agent movement and zoom limits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Divisor applied to `distance * heading` per move. With unit headings
    /// of 26880 this makes one distance unit 20 world units.
    pub step_divisor: i32,
    /// Zoom must stay strictly above this.
    pub zoom_min: i32,
    /// Zoom must stay strictly below this.
    pub zoom_max: i32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            step_divisor: 1344,
            zoom_min: -99,
            zoom_max: 120,
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityConfig {
    pub neighborhood: NeighborhoodConfig,
    pub occlusion: OcclusionConfig,
    pub agent: AgentConfig,
}

impl CityConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CityConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations the generators cannot honor.
    pub fn validate(&self) -> Result<()> {
        let n = &self.neighborhood;
        if n.edge_half <= 0 {
            return Err(UrbanError::InvalidConfig(format!(
                "edge_half must be positive, got {}",
                n.edge_half
            )));
        }
        if n.unit_space <= 0 {
            return Err(UrbanError::InvalidConfig(format!(
                "unit_space must be positive, got {}",
                n.unit_space
            )));
        }
        // Cells sit at `origin + p * unit_space` for p in -edge_half..edge_half,
        // and the boundary fences at `±extent`; both must stay in range.
        let reach = n
            .checked_extent()
            .and_then(|extent| extent.checked_add(CELL_REACH))
            .and_then(|reach| reach.checked_add(n.origin.x.checked_abs()?))
            .and_then(|reach| reach.checked_add(n.origin.y.checked_abs()?));
        match reach {
            Some(reach) if reach <= COORDINATE_LIMIT => {}
            _ => {
                return Err(UrbanError::InvalidConfig(format!(
                    "edge_half {} with unit_space {} around {:?} exceeds coordinate limit {}",
                    n.edge_half, n.unit_space, n.origin, COORDINATE_LIMIT
                )));
            }
        }
        if n.park_count > n.cell_count() {
            return Err(UrbanError::InvalidConfig(format!(
                "{} parks do not fit in {} cells",
                n.park_count,
                n.cell_count()
            )));
        }
        let o = &self.occlusion;
        if o.debug_decay_period == 0 {
            return Err(UrbanError::InvalidConfig(
                "debug_decay_period must be at least 1".into(),
            ));
        }
        if let Some(size) = o.grid_cell_size.filter(|&s| s < MIN_GRID_CELL_SIZE) {
            return Err(UrbanError::InvalidConfig(format!(
                "grid_cell_size must be at least {MIN_GRID_CELL_SIZE}, got {size}"
            )));
        }
        let a = &self.agent;
        if a.step_divisor == 0 {
            return Err(UrbanError::InvalidConfig(
                "step_divisor must be nonzero".into(),
            ));
        }
        if a.zoom_min >= a.zoom_max {
            return Err(UrbanError::InvalidConfig(format!(
                "zoom range ({}, {}) is empty",
                a.zoom_min, a.zoom_max
            )));
        }
        Ok(())
    }
}
