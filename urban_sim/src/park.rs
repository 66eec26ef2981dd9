// Parks: a ring road around a 4 x 4 grid of tree groups.
//
// Park trees use the ordinary `tree_init` layout, then every planted tree's
// radius is re-rolled into `16..=25` so parks read as mature woodland next
// to the smaller lot trees. The re-roll draws happen right after each
// cell's group is planted.

use crate::path::{PathGroup, path_generate};
use crate::tree::{TreeGroup, tree_init};
use crate::types::{LOTS_PER_CELL, RESIDENCE_SPACE};
use crate::vect::Vect2;
use urban_prng::Seed;

/// A generated park.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Park {
    pub road: PathGroup,
    /// Sixteen cells, x-major.
    pub trees: Vec<TreeGroup>,
}

impl Park {
    pub fn tree_count(&self) -> usize {
        self.trees.iter().map(TreeGroup::len).sum()
    }
}

pub fn park_generate(seed: &mut Seed, location: Vect2) -> Park {
    let road = path_generate(location, false, true);
    let mut trees = Vec::with_capacity(LOTS_PER_CELL);
    for px in 0..4 {
        for py in 0..4 {
            let center = location.offset(px * RESIDENCE_SPACE, py * RESIDENCE_SPACE);
            let mut group = tree_init(seed, center);
            for tree in group.iter_mut() {
                tree.radius = seed.below(10) + 16;
            }
            trees.push(group);
        }
    }
    Park { road, trees }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn park_has_ring_road_and_sixteen_cells() {
        let park = park_generate(&mut Seed::new([0x5150, 0x0451, 0, 0]), Vect2::ZERO);
        assert_eq!(park.road.len(), 4);
        assert_eq!(park.trees.len(), 16);
    }

    #[test]
    fn park_trees_are_large() {
        let mut seed = Seed::new([0x1001, 0x2002, 0, 0]);
        let mut total = 0;
        for _ in 0..10 {
            let park = park_generate(&mut seed, Vect2::new(3400, -3400));
            for tree in park.trees.iter().flat_map(TreeGroup::iter) {
                assert!((16..=25).contains(&tree.radius), "radius {}", tree.radius);
            }
            total += park.tree_count();
        }
        assert!(total > 0, "ten parks should plant at least one tree");
    }
}
