// Tree outline generation.
//
// A tree is a wobbly circle: 32 radial offsets produced by a bounded random
// walk around 60, smoothed once, plus an integer radius. Trees come in
// groups of up to four, placed on the corners of a 2 x 2 grid around an
// anchor (a house lot or a park cell).
//
// Draw order per tree group (this *is* the world format):
// 1. mask draw `& 15`
// 2. for each placed tree: x jitter, y jitter, then `tree_generate`
//    (1 wander seed draw, 32 walk draws, 1 radius draw)
//
// The mask bit tested for each corner is the number of trees placed so
// far, not the corner index, so a group always fills its leading slots and
// the first clear bit ends placement for that group.
//
// See also: `park.rs` which re-rolls park tree radii, `house.rs` which
// plants a group on every house lot, `urban_render::scene` for the outline
// drawing.
//
// **Critical constraint: determinism.** Smoothing is in place, so each
// average sees its already-smoothed predecessor. Do not "fix" this into a
// two-buffer pass; it would change every tree.

use crate::types::{POINTS_PER_TREE, TREE_SPACE, TREES_PER_GROUP};
use crate::vect::Vect2;
use serde::{Deserialize, Serialize};
use urban_prng::Seed;

/// Resting radial offset that the walk wanders around.
const TREE_BASE_OFFSET: i32 = 60;

/// A generated tree: outline offsets, center and radius.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub center: Vect2,
    pub radius: i32,
    pub offsets: [i32; POINTS_PER_TREE],
}

/// Up to four trees around one anchor. Slots fill from the front.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeGroup {
    pub slots: [Option<Tree>; TREES_PER_GROUP],
}

impl TreeGroup {
    /// Populated trees in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Tree> {
        self.slots.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tree> {
        self.slots.iter_mut().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// One in-place pass of a circular 3-point moving average.
pub fn smooth_offsets(offsets: &mut [i32; POINTS_PER_TREE]) {
    let n = POINTS_PER_TREE;
    for i in 0..n {
        offsets[i] = (offsets[(i + n - 1) % n] + offsets[i] + offsets[(i + 1) % n]) / 3;
    }
}

/// Generate a single tree at `center`.
pub fn tree_generate(seed: &mut Seed, center: Vect2) -> Tree {
    let mut wander = seed.jitter(11);
    let mut offsets = [0i32; POINTS_PER_TREE];
    for offset in offsets.iter_mut() {
        wander += seed.jitter(11);
        *offset = TREE_BASE_OFFSET - wander;
    }
    smooth_offsets(&mut offsets);
    let radius = seed.below(8) + 5;
    Tree {
        center,
        radius,
        offsets,
    }
}

/// Plant up to four trees around `anchor`.
pub fn tree_init(seed: &mut Seed, anchor: Vect2) -> TreeGroup {
    let mask = seed.masked(15);
    let mut group = TreeGroup::default();
    let mut placed = 0usize;

    for px in -1..1 {
        for py in -1..1 {
            if (mask >> placed) & 1 == 0 {
                continue;
            }
            let jitter_x = seed.jitter(61);
            let jitter_y = seed.jitter(61);
            let center = Vect2::new(
                px * TREE_SPACE + TREE_SPACE / 2 + jitter_x,
                py * TREE_SPACE + TREE_SPACE / 2 + jitter_y,
            ) + anchor;
            group.slots[placed] = Some(tree_generate(seed, center));
            placed += 1;
        }
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_seed() -> Seed {
        Seed::new([0x1234, 0x5678, 0x9abc, 0xdef0])
    }

    #[test]
    fn tree_generate_known_values() {
        let mut seed = reference_seed();
        let tree = tree_generate(&mut seed, Vect2::new(10, 20));
        assert_eq!(tree.center, Vect2::new(10, 20));
        assert_eq!(tree.radius, 11);
        assert_eq!(&tree.offsets[..4], &[82, 67, 65, 65]);
        // 34 draws consumed.
        assert_eq!(seed.words()[..2], [55694, 24234]);
    }

    #[test]
    fn radius_in_range() {
        let mut seed = Seed::new([7, 11, 13, 17]);
        for _ in 0..200 {
            let tree = tree_generate(&mut seed, Vect2::ZERO);
            assert!((5..=12).contains(&tree.radius), "radius {}", tree.radius);
        }
    }

    #[test]
    fn smoothing_is_not_idempotent() {
        let mut seed = Seed::new([0xbeef, 0x1357, 0, 0]);
        let mut changed = 0;
        for _ in 0..10 {
            let tree = tree_generate(&mut seed, Vect2::ZERO);
            let mut again = tree.offsets;
            smooth_offsets(&mut again);
            if again != tree.offsets {
                changed += 1;
            }
        }
        assert!(changed > 0, "a second smoothing pass should move some outline");
    }

    #[test]
    fn smoothing_uses_updated_predecessor() {
        let mut offsets = [0i32; POINTS_PER_TREE];
        offsets[0] = 30;
        offsets[1] = 30;
        smooth_offsets(&mut offsets);
        // i = 0: (0 + 30 + 30) / 3 = 20; i = 1: (20 + 30 + 0) / 3 = 16.
        assert_eq!(offsets[0], 20);
        assert_eq!(offsets[1], 16);
        assert_eq!(offsets[2], 5);
    }

    #[test]
    fn empty_mask_places_nothing() {
        // First draw is 2, so the mask is 2 and bit 0 is clear.
        let mut seed = Seed::new([1, 2, 3, 4]);
        let group = tree_init(&mut seed, Vect2::new(100, 100));
        assert!(group.is_empty());
        // Only the mask draw was consumed.
        let mut fresh = Seed::new([1, 2, 3, 4]);
        fresh.next_u16();
        assert_eq!(seed, fresh);
    }

    #[test]
    fn groups_fill_leading_slots() {
        let mut seed = Seed::new([0x2468, 0xace1, 0, 0]);
        for _ in 0..200 {
            let group = tree_init(&mut seed, Vect2::ZERO);
            let n = group.len();
            for (i, slot) in group.slots.iter().enumerate() {
                assert_eq!(slot.is_some(), i < n);
            }
        }
    }

    #[test]
    fn trees_stay_near_their_corner() {
        let anchor = Vect2::new(5000, -3000);
        let mut seed = Seed::new([0x0bad, 0xf00d, 0, 0]);
        for _ in 0..100 {
            let group = tree_init(&mut seed, anchor);
            for tree in group.iter() {
                let rel = tree.center - anchor;
                assert!((-230..=230).contains(&rel.x), "x {}", rel.x);
                assert!((-230..=230).contains(&rel.y), "y {}", rel.y);
            }
        }
    }
}
