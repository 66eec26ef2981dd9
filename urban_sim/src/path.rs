// Road and footpath quads.
//
// A path is a 4-point quad, a path group holds up to five. `path_generate`
// is fully deterministic (no PRNG draws): it frames a 3200-unit square cell
// with two horizontal and two vertical strips, and unless the group is a
// ring road, adds a fifth strip across the middle whose axis follows the
// two-block's rotation.
//
// Quad corner order per strip is start, along, along-and-across, across,
// which keeps every strip's outline non-self-intersecting.

use crate::types::{PATHS_PER_GROUP, RESIDENCE_SPACE};
use crate::vect::Vect2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Gap between the lot grid and the near edge of a strip.
pub const FOOTPATH_OFFSET: i32 = 300;

/// Strip width.
pub const FOOTPATH_WIDTH: i32 = 200;

/// One road or footpath quad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub points: [Vect2; 4],
}

/// Up to five quads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathGroup {
    pub paths: SmallVec<[Path; PATHS_PER_GROUP]>,
}

impl PathGroup {
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.paths.iter()
    }
}

/// Strip running along x from `start`, `length` long.
fn horizontal_strip(start: Vect2, length: i32) -> Path {
    let mut points = [start; 4];
    points[1].x += length;
    points[2].x += length;
    points[2].y += FOOTPATH_WIDTH;
    points[3].y += FOOTPATH_WIDTH;
    Path { points }
}

/// Strip running along y from `start`; `extend` lengthens the far end by a
/// strip width so the corner closes.
fn vertical_strip(start: Vect2, length: i32, extend: bool) -> Path {
    let mut points = [start; 4];
    points[1].y += length;
    points[2].y += length;
    if extend {
        points[1].y += FOOTPATH_WIDTH;
        points[2].y += FOOTPATH_WIDTH;
    }
    points[2].x += FOOTPATH_WIDTH;
    points[3].x += FOOTPATH_WIDTH;
    Path { points }
}

/// Frame the cell at `location` with road strips.
///
/// `rotation` picks the axis of the dividing strip; `ring_road` omits it.
pub fn path_generate(location: Vect2, rotation: bool, ring_road: bool) -> PathGroup {
    let inset = FOOTPATH_OFFSET + FOOTPATH_WIDTH;
    let span = RESIDENCE_SPACE * 4;
    let mut group = PathGroup::default();

    for i in 0..2 {
        let start = location.offset(-inset, i * span - inset);
        group.paths.push(horizontal_strip(start, span));
    }
    for i in 0..2 {
        let start = location.offset(i * span - inset, -inset);
        group.paths.push(vertical_strip(start, span, i == 1));
    }

    if !ring_road {
        let half = RESIDENCE_SPACE * 2;
        let divider = if rotation {
            vertical_strip(location.offset(half - inset, -inset), span, false)
        } else {
            horizontal_strip(location.offset(-inset, half - inset), span)
        };
        group.paths.push(divider);
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_road_has_four_strips() {
        let group = path_generate(Vect2::ZERO, false, true);
        assert_eq!(group.len(), 4);
        assert!(!group.paths.spilled());
    }

    #[test]
    fn two_block_road_has_divider() {
        assert_eq!(path_generate(Vect2::ZERO, false, false).len(), 5);
        assert_eq!(path_generate(Vect2::ZERO, true, false).len(), 5);
    }

    #[test]
    fn first_horizontal_strip_geometry() {
        let group = path_generate(Vect2::new(1000, 2000), false, true);
        assert_eq!(
            group.paths[0].points,
            [
                Vect2::new(500, 1500),
                Vect2::new(3700, 1500),
                Vect2::new(3700, 1700),
                Vect2::new(500, 1700),
            ]
        );
    }

    #[test]
    fn far_vertical_strip_is_extended() {
        let group = path_generate(Vect2::ZERO, false, true);
        assert_eq!(
            group.paths[3].points,
            [
                Vect2::new(2700, -500),
                Vect2::new(2700, 2900),
                Vect2::new(2900, 2900),
                Vect2::new(2900, -500),
            ]
        );
        // The near strip is not.
        assert_eq!(group.paths[2].points[1], Vect2::new(-500, 2700));
    }

    #[test]
    fn divider_axis_follows_rotation() {
        let rotated = path_generate(Vect2::ZERO, true, false);
        let d = rotated.paths[4].points;
        assert_eq!(d[0], Vect2::new(1100, -500));
        assert_eq!(d[1], Vect2::new(1100, 2700));

        let plain = path_generate(Vect2::ZERO, false, false);
        let d = plain.paths[4].points;
        assert_eq!(d[0], Vect2::new(-500, 1100));
        assert_eq!(d[1], Vect2::new(2700, 1100));
    }
}
