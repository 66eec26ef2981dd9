// World state: the generated town plus its visibility index.
//
// `WorldState` replaces process-wide globals with one owned context. It is
// built once from a seed and a config; afterwards the neighborhood is
// read-only and only the occlusion index's debug trail changes per tick.
//
// Blocking segments are added in a fixed order, which fixes the first-hit
// order of every visibility query:
// 1. for each two-block, for each house, for each room: the four edges of
//    the structural rectangle, then the four edges of the inset rectangle
// 2. then that two-block's eight fences
// 3. finally the four boundary fences
//
// Windows, doors, trees and roads never block.

use crate::config::CityConfig;
use crate::error::Result;
use crate::house::Room;
use crate::neighborhood::{Neighborhood, neighborhood_init};
use crate::occlusion::OcclusionIndex;
use urban_prng::Seed;

/// Everything the simulation needs after generation.
#[derive(Clone, Debug)]
pub struct WorldState {
    pub config: CityConfig,
    /// The seed as it was before generation.
    pub initial_seed: Seed,
    /// The seed after generation, for follow-on draws (agent placement).
    pub seed: Seed,
    pub neighborhood: Neighborhood,
    pub occlusion: OcclusionIndex,
}

fn add_room_walls(index: &mut OcclusionIndex, room: &Room) -> Result<()> {
    for quad in [&room.inner_walls, &room.outer_walls] {
        for i in 0..4 {
            index.add_wall(quad[i], quad[(i + 1) % 4])?;
        }
    }
    Ok(())
}

/// Append the whole town to `index` in blocking order.
pub fn populate_occlusion(index: &mut OcclusionIndex, neighborhood: &Neighborhood) -> Result<()> {
    for twoblock in neighborhood.twoblocks() {
        for house in &twoblock.houses {
            for room in &house.rooms {
                add_room_walls(index, room)?;
            }
        }
        for fence in &twoblock.fences {
            index.add_fence(fence.start, fence.end)?;
        }
    }
    for fence in neighborhood.fences() {
        index.add_fence(fence.start, fence.end)?;
    }
    Ok(())
}

impl WorldState {
    /// Generate the town for `seed` and index it.
    pub fn new(seed: Seed, config: CityConfig) -> Result<Self> {
        config.validate()?;
        let initial_seed = seed;
        let mut seed = seed;
        let neighborhood = neighborhood_init(&mut seed, &config.neighborhood);
        Self::from_neighborhood(initial_seed, seed, neighborhood, config)
    }

    /// Index an existing (for example, imported) neighborhood.
    pub fn from_neighborhood(
        initial_seed: Seed,
        seed: Seed,
        neighborhood: Neighborhood,
        config: CityConfig,
    ) -> Result<Self> {
        let mut occlusion = OcclusionIndex::new(&config.occlusion);
        populate_occlusion(&mut occlusion, &neighborhood)?;
        tracing::info!(
            segments = occlusion.len(),
            accelerated = occlusion.is_accelerated(),
            "occlusion index built"
        );
        Ok(Self {
            config,
            initial_seed,
            seed,
            neighborhood,
            occlusion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occlusion::SegmentKind;

    #[test]
    fn segment_count_matches_geometry() {
        let world = WorldState::new(Seed::new([0x1234, 0x5678, 0x9abc, 0xdef0]), CityConfig::default()).unwrap();
        let rooms = world.neighborhood.room_count();
        let expected = rooms * 8 + 60 * 8 + 4;
        assert_eq!(world.occlusion.len(), expected);
    }

    #[test]
    fn boundary_fences_come_last() {
        let world = WorldState::new(Seed::new([3, 5, 7, 9]), CityConfig::default()).unwrap();
        let blocking = world.occlusion.blocking();
        let tail = &blocking[blocking.len() - 4..];
        for (segment, fence) in tail.iter().zip(world.neighborhood.fences()) {
            assert_eq!(segment.kind, SegmentKind::Fence);
            assert_eq!(segment.start, fence.start);
        }
        // The very first segment is the first room's first wall.
        let first_room = &world.neighborhood.twoblocks()[0].houses[0].rooms[0];
        assert_eq!(blocking[0].start, first_room.inner_walls[0]);
        assert_eq!(blocking[0].end, first_room.inner_walls[1]);
        assert_eq!(blocking[4].start, first_room.outer_walls[0]);
    }

    #[test]
    fn too_small_capacity_fails_loudly() {
        let mut config = CityConfig::default();
        config.occlusion.blocking_capacity = 100;
        assert!(WorldState::new(Seed::new([1, 2, 3, 4]), config).is_err());
    }

    #[test]
    fn generation_advances_seed() {
        let world = WorldState::new(Seed::new([1, 2, 3, 4]), CityConfig::default()).unwrap();
        assert_eq!(world.initial_seed, Seed::new([1, 2, 3, 4]));
        assert_ne!(world.seed, world.initial_seed);
    }
}
