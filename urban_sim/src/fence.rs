// Fence segments inside a two-block.
//
// Each two-block gets two long fences down the middle of its house rows
// and six short fences between lots (every fourth short slot is skipped so
// the rows stay open at one end). Every endpoint is jittered by up to 50
// units; each fence consumes four draws in x1, y1, x2, y2 order.
//
// `rotation` swaps which axis the long fences run along, matching the
// dividing road laid down by `path::path_generate`.

use crate::types::{FENCES_PER_TWOBLOCK, RESIDENCE_SPACE};
use crate::vect::Vect2;
use serde::{Deserialize, Serialize};
use urban_prng::Seed;

const FENCE_WABBLE_SPACE: u16 = 100;
const FENCE_OFFSET: i32 = 400;
const FENCE_START: i32 = -250;
const FENCE_END_LONG: i32 = 2650;
const FENCE_END_SHORT: i32 = 1050;

/// A fence: one blocking segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fence {
    pub start: Vect2,
    pub end: Vect2,
}

impl Fence {
    pub fn new(start: Vect2, end: Vect2) -> Self {
        Self { start, end }
    }
}

fn wabbled(seed: &mut Seed, start: Vect2, end: Vect2) -> Fence {
    let x1 = seed.jitter(FENCE_WABBLE_SPACE);
    let y1 = seed.jitter(FENCE_WABBLE_SPACE);
    let x2 = seed.jitter(FENCE_WABBLE_SPACE);
    let y2 = seed.jitter(FENCE_WABBLE_SPACE);
    Fence::new(start.offset(x1, y1), end.offset(x2, y2))
}

/// Lay out the eight fences of the two-block at `location`.
pub fn fence_generate(seed: &mut Seed, rotation: bool, location: Vect2) -> [Fence; FENCES_PER_TWOBLOCK] {
    let mut fences = [Fence::new(Vect2::ZERO, Vect2::ZERO); FENCES_PER_TWOBLOCK];
    let mut count = 0;

    for px in 0..2 {
        let across = px * RESIDENCE_SPACE * 2 + FENCE_OFFSET;
        let (start, end) = if rotation {
            (
                location.offset(across, FENCE_START),
                location.offset(across, FENCE_END_LONG),
            )
        } else {
            (
                location.offset(FENCE_START, across),
                location.offset(FENCE_END_LONG, across),
            )
        };
        fences[count] = wabbled(seed, start, end);
        count += 1;
    }

    for px in 0..4 {
        for py in 0..2 {
            if px == 3 {
                continue;
            }
            let across = px * RESIDENCE_SPACE + FENCE_OFFSET;
            let along = py * RESIDENCE_SPACE * 2;
            let (start, end) = if rotation {
                (
                    location.offset(along + FENCE_START, across),
                    location.offset(along + FENCE_END_SHORT, across),
                )
            } else {
                (
                    location.offset(across, along + FENCE_START),
                    location.offset(across, along + FENCE_END_SHORT),
                )
            };
            fences[count] = wabbled(seed, start, end);
            count += 1;
        }
    }
    debug_assert_eq!(count, FENCES_PER_TWOBLOCK);
    fences
}
