// City-wide hooks for simulated beings.
//
// Beings live in "city space": a torus `[0, dimension)` on each axis whose
// origin is the city's bottom-left corner. These helpers translate between
// city space and world space and route movement and sight checks through
// the occlusion index.
//
// `can_move` works in world coordinates (the caller passes the being's
// world position); `line_of_sight` takes city-space points and translates
// both before querying.

use crate::config::NeighborhoodConfig;
use crate::error::Result;
use crate::occlusion::OcclusionIndex;
use crate::vect::Vect2;
use serde::{Deserialize, Serialize};
use urban_prng::Seed;

/// Corners of the city and the size of city space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityBounds {
    pub top_right: Vect2,
    pub bottom_left: Vect2,
}

impl CityBounds {
    pub fn new(config: &NeighborhoodConfig) -> Self {
        Self {
            top_right: config.top_right(),
            bottom_left: config.bottom_left(),
        }
    }

    pub fn dimension(&self) -> Vect2 {
        self.top_right - self.bottom_left
    }

    /// Fold a city-space location back onto the torus.
    pub fn wrap(&self, location: Vect2) -> Vect2 {
        let d = self.dimension();
        Vect2::new(location.x.rem_euclid(d.x), location.y.rem_euclid(d.y))
    }

    /// A random city-space location: x draw, then y draw.
    pub fn initial_location(&self, seed: &mut Seed) -> Vect2 {
        let d = self.dimension();
        let x = i32::from(seed.next_u16()) % d.x;
        let y = i32::from(seed.next_u16()) % d.y;
        Vect2::new(x, y)
    }

    /// City space to world space.
    pub fn translate(&self, point: Vect2) -> Vect2 {
        point + self.bottom_left
    }

    /// World space to city space.
    pub fn untranslate(&self, point: Vect2) -> Vect2 {
        point - self.bottom_left
    }

    pub fn contains(&self, world: Vect2) -> bool {
        world.x >= self.bottom_left.x
            && world.x <= self.top_right.x
            && world.y >= self.bottom_left.y
            && world.y <= self.top_right.y
    }
}

/// Can a being at world `location` step by `delta`?
pub fn can_move(occlusion: &mut OcclusionIndex, location: Vect2, delta: Vect2) -> Result<bool> {
    occlusion.is_path_open(location, location + delta)
}

/// Is the city-space segment `from`..`to` unobstructed?
pub fn line_of_sight(
    occlusion: &mut OcclusionIndex,
    bounds: &CityBounds,
    from: Vect2,
    to: Vect2,
) -> Result<bool> {
    occlusion.is_path_open(bounds.translate(from), bounds.translate(to))
}
