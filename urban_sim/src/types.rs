// Shared layout constants and the compass-side types used by rooms.
//
// Grid spacings here are in world units (roughly inches: a footpath is 200
// wide, a house lot 800). Generators keep their private tuning constants in
// their own modules; only values that more than one module reads live here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Spacing between house lots and between park tree cells.
pub const RESIDENCE_SPACE: i32 = 800;

/// Spacing of the 2 x 2 tree grid around a tree anchor.
pub const TREE_SPACE: i32 = 400;

/// Points around a tree outline.
pub const POINTS_PER_TREE: usize = 32;

/// Tree slots per anchor (corners of a 2 x 2 grid).
pub const TREES_PER_GROUP: usize = 4;

/// House lots (and park tree cells) per neighborhood cell, laid out 4 x 4.
pub const LOTS_PER_CELL: usize = 16;

/// Fences inside a two-block: 2 long plus 6 short.
pub const FENCES_PER_TWOBLOCK: usize = 8;

/// Upper bound on paths in a group.
pub const PATHS_PER_GROUP: usize = 5;

/// Rooms a building normally holds. The chain generator can exceed this
/// for the longest genomes; storage spills rather than truncating.
pub const MAX_ROOMS: usize = 8;

/// Width of the road margin around the city edge.
pub const ROAD_WIDTH: i32 = 25;

/// One wall of an axis-aligned room, before rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    North,
    South,
    East,
    West,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::South, Side::East, Side::West];

    pub fn index(self) -> usize {
        match self {
            Side::North => 0,
            Side::South => 1,
            Side::East => 2,
            Side::West => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::North => "north",
            Side::South => "south",
            Side::East => "east",
            Side::West => "west",
        }
    }

    pub fn parse(name: &str) -> Option<Side> {
        Side::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of sides, used to request windows and doors when constructing a
/// room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sides(u8);

impl Sides {
    pub const NONE: Sides = Sides(0);
    pub const NORTH: Sides = Sides(1);
    pub const SOUTH: Sides = Sides(2);
    pub const EAST: Sides = Sides(4);
    pub const WEST: Sides = Sides(8);

    pub fn contains(self, side: Side) -> bool {
        let bit = match side {
            Side::North => Self::NORTH.0,
            Side::South => Self::SOUTH.0,
            Side::East => Self::EAST.0,
            Side::West => Self::WEST.0,
        };
        self.0 & bit != 0
    }
}

impl BitOr for Sides {
    type Output = Sides;
    fn bitor(self, rhs: Self) -> Self {
        Sides(self.0 | rhs.0)
    }
}
