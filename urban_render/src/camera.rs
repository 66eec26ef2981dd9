// World-to-screen transform.
//
// The camera follows a fixed-point chain per point:
//
//   p - location + center, * scale, >> 7, rotate by direction(255 - turn)
//   with a 15-bit shift, - center, + screen_offset
//
// `scale` is `100 + zoom`, so zoom 28 is unit scale. The rotation matrix is
// `[[rx, ry], [ry, -rx]]`: a reflection composed with a rotation. At turn 0
// world -y, the agent's forward, lands toward larger screen y. The 15-bit shift
// contracts by 26880 / 32768, so the transform is never an exact identity;
// with zero location, center and offset the origin is a fixed point for
// every turn.
//
// `screen_offset` is applied last and defaults to zero. Callers that want
// the followed point in the middle of the viewport set it to half the
// viewport and leave `center` at zero.

use serde::{Deserialize, Serialize};
use urban_sim::vect::Vect2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub center: Vect2,
    pub location: Vect2,
    pub turn: i32,
    pub scale: i32,
    pub screen_offset: Vect2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: Vect2::ZERO,
            location: Vect2::ZERO,
            turn: 0,
            scale: 100,
            screen_offset: Vect2::ZERO,
        }
    }
}

impl Camera {
    /// Point the camera: `scale_delta` is the agent's zoom.
    pub fn delta_move(&mut self, center: Vect2, location: Vect2, turn: i32, scale_delta: i32) {
        self.center = center;
        self.location = location;
        self.turn = turn;
        self.scale = 100 + scale_delta;
    }

    pub fn direction_vector(&self) -> Vect2 {
        Vect2::direction(255 - self.turn, 1)
    }

    /// Transform with a precomputed `direction_vector()`, for batches.
    pub fn transform(&self, point: Vect2, direction: Vect2) -> Vect2 {
        let p = point - self.location + self.center;
        let p = p.scalar_multiply(self.scale).scalar_bitshift_down(7);
        p.rotation_bitshift(direction) - self.center + self.screen_offset
    }

    pub fn world_to_screen(&self, point: Vect2) -> Vect2 {
        self.transform(point, self.direction_vector())
    }

    /// Pen width in pixels, never below one.
    pub fn pixel_width(&self, units: i32) -> i32 {
        ((units * self.scale) >> 7).max(1)
    }
}
