// House generation: genetics, room chains, and rotation into place.
//
// A house is grown from a small "genetics" array rather than placed from a
// template. The genetics encode a chain: a sequence of strictly increasing
// positions along the house's long axis, each with a signed offset saying
// how far a room sticks out and on which side (positive offsets attach to
// the east, negative to the west). `house_generate` walks the chain:
//
// 1. A first room spans from the front wall to the first chain position.
// 2. Each middle step adds a room on its offset's side, stacked on the last
//    room placed on that side (`front_east` / `front_west` track the two fronts).
// 3. The last step closes the house with a back room across the full
//    width, a room on the opposite side, and (for chains longer than one
//    step) a final room on the step's own side.
// 4. Chains longer than one step get a spine room joining front to back.
//
// Rooms are axis-aligned while the chain is built, then the whole house is
// rotated by a random angle about its bounding-box center and moved onto
// the lot center. Room geometry itself lives in `house_construct`: a
// rectangle, its 6-unit inset, and optional window slots and door notches
// on each side.
//
// The longest genomes (eight chain entries) produce ten rooms; the room
// list spills to the heap for those instead of overrunning.
//
// Draw order per house: genetics (room count, first step, then per step one
// or more offset draws and one step draw), then one rotation draw `& 255`.
// Trees for the lot are planted after the house (see `house_init`).
//
// See also: `tree.rs` for lot trees, `neighborhood.rs` which calls
// `house_init` for every two-block, `world.rs` which turns room walls into
// blocking segments.

use crate::tree::{TreeGroup, tree_init};
use crate::types::{LOTS_PER_CELL, MAX_ROOMS, RESIDENCE_SPACE, Side, Sides};
use crate::vect::{MinMax, Vect2};
use smallvec::SmallVec;
use urban_prng::Seed;

/// Length of the genetics scratch array.
pub const GENETICS_COUNT: usize = 64;

/// World units per chain step.
pub const HOUSE_SIZE: i32 = 30;

/// Inset between the structural rectangle and the inner wall line.
const WALL_INSET: i32 = 6;

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// One rectangular room. Window and door slots are indexed by
/// `Side::index()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    /// Structural corners, in order (top, top), (top, bottom),
    /// (bottom, bottom), (bottom, top).
    pub inner_walls: [Vect2; 4],
    /// The structural rectangle inset by 6 on every side.
    pub outer_walls: [Vect2; 4],
    pub windows: [Option<[Vect2; 2]>; 4],
    pub doors: [Option<[Vect2; 4]>; 4],
}

impl Room {
    pub fn window(&self, side: Side) -> Option<&[Vect2; 2]> {
        self.windows[side.index()].as_ref()
    }

    pub fn door(&self, side: Side) -> Option<&[Vect2; 4]> {
        self.doors[side.index()].as_ref()
    }

    /// The eight structural points: inner walls then outer walls.
    pub fn structure_points(&self) -> impl Iterator<Item = Vect2> + '_ {
        self.inner_walls.iter().chain(self.outer_walls.iter()).copied()
    }

    /// Apply `f` to every present point: walls, windows, doors.
    fn map_points(&mut self, f: impl Fn(Vect2) -> Vect2) {
        for p in self.inner_walls.iter_mut().chain(self.outer_walls.iter_mut()) {
            *p = f(*p);
        }
        for window in self.windows.iter_mut().flatten() {
            for p in window.iter_mut() {
                *p = f(*p);
            }
        }
        for door in self.doors.iter_mut().flatten() {
            for p in door.iter_mut() {
                *p = f(*p);
            }
        }
    }
}

/// Build an axis-aligned room between two opposite corners.
///
/// Corners may be given in any order. Windows sit 3 units inside a wall and
/// stop 10 short of each end; doors are 4 x 10 notches straddling the wall
/// at its midpoint.
pub fn house_construct(a: Vect2, b: Vect2, windows: Sides, doors: Sides) -> Room {
    let (tx, bx) = (a.x.min(b.x), a.x.max(b.x));
    let (ty, by) = (a.y.min(b.y), a.y.max(b.y));
    let v = Vect2::new;
    let i = WALL_INSET;

    let mut room = Room {
        inner_walls: [v(tx, ty), v(tx, by), v(bx, by), v(bx, ty)],
        outer_walls: [
            v(tx + i, ty + i),
            v(tx + i, by - i),
            v(bx - i, by - i),
            v(bx - i, ty + i),
        ],
        windows: [None; 4],
        doors: [None; 4],
    };

    for side in Side::ALL {
        if windows.contains(side) {
            room.windows[side.index()] = Some(match side {
                Side::North => [v(tx + 3, ty + 10), v(tx + 3, by - 10)],
                Side::South => [v(bx - 3, ty + 10), v(bx - 3, by - 10)],
                Side::East => [v(tx + 10, by - 3), v(bx - 10, by - 3)],
                Side::West => [v(tx + 10, ty + 3), v(bx - 10, ty + 3)],
            });
        }
    }

    let mx = (tx + bx) / 2;
    let my = (ty + by) / 2;
    for side in Side::ALL {
        if doors.contains(side) {
            room.doors[side.index()] = Some(match side {
                Side::North => [v(tx + 2, my + 5), v(tx + 2, my - 5), v(tx - 2, my - 5), v(tx - 2, my + 5)],
                Side::South => [v(bx - 2, my + 5), v(bx - 2, my - 5), v(bx + 2, my - 5), v(bx + 2, my + 5)],
                Side::East => [v(mx + 5, by - 2), v(mx - 5, by - 2), v(mx - 5, by + 2), v(mx + 5, by + 2)],
                Side::West => [v(mx + 5, ty + 2), v(mx - 5, ty + 2), v(mx - 5, ty - 2), v(mx + 5, ty - 2)],
            });
        }
    }
    room
}

// ---------------------------------------------------------------------------
// Genetics
// ---------------------------------------------------------------------------

/// The chain encoding a house layout.
///
/// `values[0]` is the chain end (one past the last usable position); step
/// `k` (1-based) stores its position at `values[3k]` and its signed offset
/// at `values[3k + 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Genetics {
    values: [i32; GENETICS_COUNT],
    chain: usize,
}

impl Default for Genetics {
    fn default() -> Self {
        Self {
            values: [0; GENETICS_COUNT],
            chain: 0,
        }
    }
}

impl Genetics {
    pub fn values(&self) -> &[i32; GENETICS_COUNT] {
        &self.values
    }

    /// Number of chain steps plus one (the room count that drives the
    /// builder).
    pub fn chain_len(&self) -> usize {
        self.chain
    }

    pub fn end(&self) -> i32 {
        self.values[0]
    }

    pub fn position(&self, step: usize) -> i32 {
        self.values[step * 3]
    }

    pub fn offset(&self, step: usize) -> i32 {
        self.values[step * 3 + 1]
    }
}

/// A signed room offset in `[-5, -3] ∪ [3, 5]`, by rejection.
fn house_plusminus(seed: &mut Seed) -> i32 {
    loop {
        let v = seed.jitter(11);
        if v.abs() >= 3 {
            return v;
        }
    }
}

/// Draw a chain: end in `5..=15`, steps of 2 to 4 starting at 2 to 4.
pub fn house_genetics(seed: &mut Seed) -> Genetics {
    let mut genetics = Genetics::default();
    let end = 5 + seed.below(11);
    genetics.values[0] = end;
    let mut position = seed.below(3) + 2;
    let mut count = 1usize;

    while position < end {
        genetics.values[count * 3 - 1] = 0;
        genetics.values[count * 3] = position;
        genetics.values[count * 3 + 1] = house_plusminus(seed);
        count += 1;
        position += seed.below(3) + 2;
    }
    genetics.values[0] += 1;
    genetics.chain = count;
    genetics
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// A generated house.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Building {
    pub rooms: SmallVec<[Room; MAX_ROOMS]>,
    /// Generation scratch; kept for inspection, not exported.
    pub genetics: Genetics,
    pub trees: TreeGroup,
}

/// Rotate every room by `angle` about the bounding-box center of the
/// structural points, then move that center onto `center`.
fn house_transform(rooms: &mut [Room], center: Vect2, angle: i32) {
    let mut bounds = MinMax::new();
    for room in rooms.iter() {
        for p in room.structure_points() {
            bounds.include(p);
        }
    }
    let pivot = bounds.center();
    let direction = Vect2::direction(angle, 1);
    for room in rooms.iter_mut() {
        room.map_points(|p| (p - pivot).rotation(direction) + center);
    }
}

/// Grow one house from `seed` and place it at `center`. Lot trees are
/// left empty; `house_init` plants them.
pub fn house_generate(seed: &mut Seed, center: Vect2) -> Building {
    let genetics = house_genetics(seed);
    let rooms_len = genetics.chain_len();
    let last = rooms_len - 1;
    let v = Vect2::new;
    let at = |step: usize| genetics.position(step) * HOUSE_SIZE - 4;
    let reach = |step: usize| genetics.offset(step) * HOUSE_SIZE;
    let back = genetics.end() * HOUSE_SIZE + 4;

    let mut rooms: SmallVec<[Room; MAX_ROOMS]> = SmallVec::new();
    let mut front_east = -4;
    let mut front_west = -4;

    if genetics.offset(1) > 1 {
        rooms.push(house_construct(v(-8, -4), v(8 + reach(1), at(1)), Sides::SOUTH, Sides::WEST));
        front_east = at(1);
    } else {
        rooms.push(house_construct(v(-8 + reach(1), -4), v(8, at(1)), Sides::NORTH, Sides::WEST));
        front_west = at(1);
    }

    for step in 2..last {
        if genetics.offset(step) > 1 {
            rooms.push(house_construct(
                v(8, at(step)),
                v(8 + reach(step), front_east),
                Sides::SOUTH,
                Sides::EAST,
            ));
            front_east = at(step);
        } else {
            rooms.push(house_construct(
                v(-8 + reach(step), at(step)),
                v(-8, front_west),
                Sides::NORTH,
                Sides::EAST,
            ));
            front_west = at(step);
        }
    }

    // A one-step chain has already used its only step for the first room.
    let closes_own_side = rooms_len > 2;
    if genetics.offset(last) > 1 {
        rooms.push(house_construct(v(-8, back), v(8 + reach(last), at(last)), Sides::EAST, Sides::WEST));
        rooms.push(house_construct(v(-8, front_west), v(-8 - reach(last), back), Sides::NORTH, Sides::SOUTH));
        if closes_own_side {
            rooms.push(house_construct(
                v(8, at(last)),
                v(8 + reach(last), front_east),
                Sides::SOUTH,
                Sides::NORTH,
            ));
        }
    } else {
        rooms.push(house_construct(v(8, back), v(8 + reach(last), at(last)), Sides::EAST, Sides::WEST));
        rooms.push(house_construct(v(8, front_east), v(8 - reach(last), back), Sides::SOUTH, Sides::NORTH));
        if closes_own_side {
            rooms.push(house_construct(
                v(-8, at(last)),
                v(-8 + reach(last), front_west),
                Sides::NORTH,
                Sides::SOUTH,
            ));
        }
    }

    if rooms_len > 2 {
        rooms.push(house_construct(v(8, at(1)), v(-8, at(last)), Sides::NONE, Sides::EAST | Sides::WEST));
    }

    let angle = seed.masked(255);
    house_transform(&mut rooms, center, angle);

    Building {
        rooms,
        genetics,
        trees: TreeGroup::default(),
    }
}

/// Build the 4 x 4 grid of houses (each with its lot trees) whose first lot
/// is centered on `location`. Lots are visited x-major.
pub fn house_init(seed: &mut Seed, location: Vect2) -> Vec<Building> {
    let mut buildings = Vec::with_capacity(LOTS_PER_CELL);
    for px in 0..4 {
        for py in 0..4 {
            let center = location.offset(px * RESIDENCE_SPACE, py * RESIDENCE_SPACE);
            let mut building = house_generate(seed, center);
            building.trees = tree_init(seed, center);
            buildings.push(building);
        }
    }
    buildings
}
