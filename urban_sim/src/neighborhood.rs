// Neighborhood assembly: the whole town from one seed.
//
// The town is a square grid of cells (`edge_half * 2` on a side, 8 x 8 by
// default). Each cell becomes either a park or a two-block: sixteen houses
// on their lots, a road frame with a dividing strip, and eight fences. The
// park/two-block choice is random per cell but the totals are exact:
//
//   threshold = 255 * blocks_remaining / (parks_remaining + blocks_remaining)
//   park if draw & 255 > threshold
//
// with the draw forced to 255 once the two-block quota is met and to 0 once
// the park quota is met. The first cell therefore uses threshold 239 with
// the default 4/60 split. Finally four boundary fences frame the city.
//
// Cells are visited row by row (y outer, x inner), each consuming one
// choice draw followed by all of its content's draws, so the layout of any
// cell depends on every cell before it.
//
// See also: `world.rs` which turns the neighborhood into blocking segments,
// `export.rs` for the dump format, `config.rs` for `NeighborhoodConfig`.

use crate::config::NeighborhoodConfig;
use crate::fence::{Fence, fence_generate};
use crate::house::{Building, house_init};
use crate::park::{Park, park_generate};
use crate::path::{PathGroup, path_generate};
use crate::types::FENCES_PER_TWOBLOCK;
use crate::vect::Vect2;
use urban_prng::Seed;

/// A residential cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TwoBlock {
    /// World position of the cell's first lot.
    pub location: Vect2,
    /// Axis of the dividing road and long fences.
    pub rotation: bool,
    /// Sixteen houses, x-major.
    pub houses: Vec<Building>,
    pub fences: [Fence; FENCES_PER_TWOBLOCK],
    /// Reserved for lot footpaths; generation leaves it empty.
    pub footpath: PathGroup,
    pub road: PathGroup,
}

/// A park cell, with its grid position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParkCell {
    pub location: Vect2,
    pub park: Park,
}

/// The generated town. Built once, read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    pub twoblocks: Vec<TwoBlock>,
    pub parks: Vec<ParkCell>,
    /// City boundary, counter-clockwise from the bottom-left corner.
    pub fences: [Fence; 4],
}

impl Neighborhood {
    pub fn twoblocks(&self) -> &[TwoBlock] {
        &self.twoblocks
    }

    pub fn parks(&self) -> &[ParkCell] {
        &self.parks
    }

    pub fn fences(&self) -> &[Fence; 4] {
        &self.fences
    }

    pub fn house_count(&self) -> usize {
        self.twoblocks.iter().map(|t| t.houses.len()).sum()
    }

    pub fn room_count(&self) -> usize {
        self.twoblocks
            .iter()
            .flat_map(|t| t.houses.iter())
            .map(|h| h.rooms.len())
            .sum()
    }
}

/// Generate one two-block at `location`: rotation draw, houses, road,
/// fences.
pub fn twoblock_generate(seed: &mut Seed, location: Vect2) -> TwoBlock {
    let rotation = seed.masked(1) == 1;
    let houses = house_init(seed, location);
    let road = path_generate(location, rotation, false);
    let fences = fence_generate(seed, rotation, location);
    TwoBlock {
        location,
        rotation,
        houses,
        fences,
        footpath: PathGroup::default(),
        road,
    }
}

/// The four boundary fences, bottom-left → bottom-right → top-right →
/// top-left → bottom-left.
pub fn boundary_fences(config: &NeighborhoodConfig) -> [Fence; 4] {
    let bl = config.bottom_left();
    let tr = config.top_right();
    let br = Vect2::new(tr.x, bl.y);
    let tl = Vect2::new(bl.x, tr.y);
    [
        Fence::new(bl, br),
        Fence::new(br, tr),
        Fence::new(tr, tl),
        Fence::new(tl, bl),
    ]
}

/// Build the whole town.
///
/// Panics if the config asks for more parks than cells; use
/// `CityConfig::validate` first for untrusted configs.
pub fn neighborhood_init(seed: &mut Seed, config: &NeighborhoodConfig) -> Neighborhood {
    let park_quota = config.park_count;
    let block_quota = config.twoblock_count();
    assert!(
        park_quota <= config.cell_count(),
        "neighborhood_init: {park_quota} parks exceed {} cells",
        config.cell_count()
    );

    let mut twoblocks = Vec::with_capacity(block_quota);
    let mut parks = Vec::with_capacity(park_quota);

    for py in -config.edge_half..config.edge_half {
        for px in -config.edge_half..config.edge_half {
            let location = config
                .origin
                .offset(px * config.unit_space, py * config.unit_space);

            let blocks_remaining = block_quota - twoblocks.len();
            let parks_remaining = park_quota - parks.len();
            let mut draw = seed.masked(255);
            if blocks_remaining == 0 {
                draw = 255;
            }
            if parks_remaining == 0 {
                draw = 0;
            }
            let threshold = (255 * blocks_remaining / (parks_remaining + blocks_remaining)) as i32;

            if draw > threshold {
                tracing::debug!(px, py, draw, threshold, "park cell");
                parks.push(ParkCell {
                    location,
                    park: park_generate(seed, location),
                });
            } else {
                tracing::debug!(px, py, draw, threshold, "two-block cell");
                twoblocks.push(twoblock_generate(seed, location));
            }
        }
    }

    let neighborhood = Neighborhood {
        twoblocks,
        parks,
        fences: boundary_fences(config),
    };
    tracing::info!(
        twoblocks = neighborhood.twoblocks.len(),
        parks = neighborhood.parks.len(),
        houses = neighborhood.house_count(),
        rooms = neighborhood.room_count(),
        "neighborhood generated"
    );
    neighborhood
}
