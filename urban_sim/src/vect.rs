// Integer vector math, the fixed-point sine wheel, and segment intersection.
//
// Everything geometric in the city runs on `i32` coordinates. Angles live on
// a 256-step wheel (`0..=255`, one full turn), and sine/cosine come from a
// precomputed table scaled to `SINE_MAXIMUM` = 26880, so rotations are exact
// integer operations with truncating division. Products are widened to
// `i64` before division so camera-scale coordinates cannot overflow.
//
// Rotation note: `rotation` and `rotation_bitshift` apply the matrix
// `[[rx, ry], [ry, -rx]]`, which is a rotation composed with a reflection.
// Generated houses and the camera both rely on this exact form; callers
// that need handedness should not assume a pure rotation.
//
// `segments_intersect` is the only intersection primitive in the crate. It
// uses exact orientation tests on `i64` cross products and handles collinear
// overlap, so the occlusion index (see `occlusion.rs`) never needs floats.
//
// **Critical constraint: determinism.** No floating point anywhere in this
// module. Division truncates toward zero (Rust `/`), shifts are arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Peak value of the sine table (sine of a quarter turn).
pub const SINE_MAXIMUM: i32 = 26880;

/// Initial minimum for bounds accumulation.
pub const BIG_INTEGER: i32 = 2_147_483_647;

/// Initial maximum for bounds accumulation.
pub const BIG_NEGATIVE_INTEGER: i32 = -2_147_483_648;

/// First quarter of the wheel, `sin(i * 2π / 256) * 26880` rounded.
const SINE_QUARTER: [i32; 65] = [
    0, 659, 1318, 1977, 2634, 3290, 3944, 4595, 5244, 5889, 6531, 7169, 7802, 8431, 9055, 9673,
    10286, 10892, 11492, 12085, 12671, 13249, 13819, 14380, 14933, 15477, 16012, 16537, 17052,
    17557, 18051, 18534, 19007, 19467, 19916, 20353, 20778, 21190, 21590, 21976, 22349, 22709,
    23055, 23387, 23706, 24009, 24299, 24573, 24833, 25078, 25308, 25523, 25722, 25906, 26074,
    26226, 26363, 26484, 26589, 26677, 26750, 26807, 26847, 26871, 26880,
];

const fn build_sine_table() -> [i32; 256] {
    let mut table = [0i32; 256];
    let mut i = 0;
    while i < 256 {
        let quadrant = i / 64;
        let step = i % 64;
        table[i] = match quadrant {
            0 => SINE_QUARTER[step],
            1 => SINE_QUARTER[64 - step],
            2 => -SINE_QUARTER[step],
            _ => -SINE_QUARTER[64 - step],
        };
        i += 1;
    }
    table
}

/// Full sine wheel, 256 entries, symmetric about the quarter turns.
pub static SINE_TABLE: [i32; 256] = build_sine_table();

/// Sine of `angle` (mod 256) divided by `divisor`. Cosine is
/// `sine(angle + 64, divisor)`.
pub fn sine(angle: i32, divisor: i32) -> i32 {
    assert!(divisor != 0, "sine: divisor must be nonzero");
    SINE_TABLE[(angle & 255) as usize] / divisor
}

// ---------------------------------------------------------------------------
// Vect2
// ---------------------------------------------------------------------------

/// A 2D integer coordinate. Serializes as a `[x, y]` pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Vect2 {
    pub x: i32,
    pub y: i32,
}

impl From<[i32; 2]> for Vect2 {
    fn from(v: [i32; 2]) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

impl From<Vect2> for [i32; 2] {
    fn from(v: Vect2) -> Self {
        [v.x, v.y]
    }
}

impl fmt::Display for Vect2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

fn narrow(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl Vect2 {
    pub const ZERO: Vect2 = Vect2 { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Unit heading for `angle` on the 256-step wheel, scaled by
    /// `SINE_MAXIMUM / divisor`: `(cos, sin)`.
    pub fn direction(angle: i32, divisor: i32) -> Self {
        Self::new(sine(angle + 64, divisor), sine(angle, divisor))
    }

    /// Midpoint of two points, truncating.
    pub fn center(a: Self, b: Self) -> Self {
        Self::new((a.x + b.x) / 2, (a.y + b.y) / 2)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn scalar_multiply(self, multiplier: i32) -> Self {
        Self::new(
            narrow(i64::from(self.x) * i64::from(multiplier)),
            narrow(i64::from(self.y) * i64::from(multiplier)),
        )
    }

    pub fn scalar_divide(self, divisor: i32) -> Self {
        assert!(divisor != 0, "scalar_divide: divisor must be nonzero");
        Self::new(self.x / divisor, self.y / divisor)
    }

    /// Arithmetic shift right on both components.
    pub fn scalar_bitshift_down(self, bits: u32) -> Self {
        Self::new(self.x >> bits, self.y >> bits)
    }

    /// `(second - initial) / divisor`. Note the argument order: the result
    /// points from `initial` toward `second`.
    pub fn divide(initial: Self, second: Self, divisor: i32) -> Self {
        assert!(divisor != 0, "divide: divisor must be nonzero");
        (second - initial).scalar_divide(divisor)
    }

    /// Component-wise `multiplier * a * b / divisor`.
    pub fn multiplier(a: Self, b: Self, multiplier: i32, divisor: i32) -> Self {
        assert!(divisor != 0, "multiplier: divisor must be nonzero");
        let m = i64::from(multiplier);
        let d = i64::from(divisor);
        Self::new(
            narrow(m * i64::from(a.x) * i64::from(b.x) / d),
            narrow(m * i64::from(a.y) * i64::from(b.y) / d),
        )
    }

    /// Scaled accumulate: `self += multiplier * step / divisor`.
    pub fn add_scaled(&mut self, step: Self, multiplier: i32, divisor: i32) {
        assert!(divisor != 0, "add_scaled: divisor must be nonzero");
        let m = i64::from(multiplier);
        let d = i64::from(divisor);
        self.x = narrow(i64::from(self.x) + m * i64::from(step.x) / d);
        self.y = narrow(i64::from(self.y) + m * i64::from(step.y) / d);
    }

    /// `multiplier * (a · b) / divisor`.
    pub fn dot(a: Self, b: Self, multiplier: i32, divisor: i32) -> i64 {
        assert!(divisor != 0, "dot: divisor must be nonzero");
        let raw = i64::from(a.x) * i64::from(b.x) + i64::from(a.y) * i64::from(b.y);
        i64::from(multiplier) * raw / i64::from(divisor)
    }

    /// True when the two points are strictly closer than `distance`.
    pub fn distance_under(a: Self, b: Self, distance: i32) -> bool {
        let dx = i64::from(a.x) - i64::from(b.x);
        let dy = i64::from(a.y) - i64::from(b.y);
        let d = i64::from(distance);
        d * d > dx * dx + dy * dy
    }

    /// Quarter turn: `(x, y) -> (y, -x)`.
    pub fn rotate90(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Apply a direction vector from `direction(angle, 1)`, dividing by
    /// `SINE_MAXIMUM`.
    pub fn rotation(self, rotation: Self) -> Self {
        let (x, y) = self.rotated_raw(rotation);
        let max = i64::from(SINE_MAXIMUM);
        Self::new(narrow(x / max), narrow(y / max))
    }

    /// Same matrix as `rotation`, but shifts down by 15 bits. Slightly
    /// contracting (26880 / 32768), and cheaper in the renderer.
    pub fn rotation_bitshift(self, rotation: Self) -> Self {
        let (x, y) = self.rotated_raw(rotation);
        Self::new(narrow(x >> 15), narrow(y >> 15))
    }

    fn rotated_raw(self, rotation: Self) -> (i64, i64) {
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        let (rx, ry) = (i64::from(rotation.x), i64::from(rotation.y));
        (x * rx + y * ry, x * ry - y * rx)
    }

    pub fn is_nonzero(self) -> bool {
        self.x != 0 || self.y != 0
    }

    /// Clamp both components into `u16` range.
    pub fn to_byte2(self) -> [u16; 2] {
        [
            self.x.clamp(0, 65535) as u16,
            self.y.clamp(0, 65535) as u16,
        ]
    }

    pub fn from_byte2(words: [u16; 2]) -> Self {
        Self::new(i32::from(words[0]), i32::from(words[1]))
    }
}

// Add, Sub and Neg use plain i32 arithmetic: overflow is the caller's
// responsibility (a panic in debug builds). Geometry built from a validated
// `CityConfig` stays within `config::COORDINATE_LIMIT`, so sums and
// differences of world points cannot overflow. The scaling helpers above
// widen to i64 and clamp because their factors are unbounded.
impl Add for Vect2 {
    type Output = Vect2;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vect2 {
    type Output = Vect2;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Vect2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vect2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vect2 {
    type Output = Vect2;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

// ---------------------------------------------------------------------------
// Bounds accumulators
// ---------------------------------------------------------------------------

/// Running min/max over a set of points. Starts inverted so the first
/// point sets both corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinMax {
    pub min: Vect2,
    pub max: Vect2,
}

impl Default for MinMax {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMax {
    pub fn new() -> Self {
        Self {
            min: Vect2::new(BIG_INTEGER, BIG_INTEGER),
            max: Vect2::new(BIG_NEGATIVE_INTEGER, BIG_NEGATIVE_INTEGER),
        }
    }

    pub fn include(&mut self, p: Vect2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn include_all(&mut self, points: &[Vect2]) {
        for &p in points {
            self.include(p);
        }
    }

    /// True until at least one point has been included.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn center(&self) -> Vect2 {
        Vect2::center(self.max, self.min)
    }
}

/// Axis-aligned area grown point by point; the first point seeds both
/// corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area2 {
    pub top_left: Vect2,
    pub bottom_right: Vect2,
}

impl Area2 {
    pub fn from_point(p: Vect2) -> Self {
        Self {
            top_left: p,
            bottom_right: p,
        }
    }

    pub fn add(&mut self, p: Vect2) {
        self.top_left.x = self.top_left.x.min(p.x);
        self.top_left.y = self.top_left.y.min(p.y);
        self.bottom_right.x = self.bottom_right.x.max(p.x);
        self.bottom_right.y = self.bottom_right.y.max(p.y);
    }

    pub fn contains(&self, p: Vect2) -> bool {
        p.x >= self.top_left.x
            && p.x <= self.bottom_right.x
            && p.y >= self.top_left.y
            && p.y <= self.bottom_right.y
    }
}

// ---------------------------------------------------------------------------
// Vect3
// ---------------------------------------------------------------------------

/// A 3D integer coordinate. Serializes as `[x, y, z]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct Vect3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl From<[i32; 3]> for Vect3 {
    fn from(v: [i32; 3]) -> Self {
        Self {
            x: v[0],
            y: v[1],
            z: v[2],
        }
    }
}

impl From<Vect3> for [i32; 3] {
    fn from(v: Vect3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl Vect3 {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn center(a: Self, b: Self) -> Self {
        Self::new((a.x + b.x) / 2, (a.y + b.y) / 2, (a.z + b.z) / 2)
    }

    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// `(second - initial) / divisor`, same argument order as
    /// `Vect2::divide`.
    pub fn divide(initial: Self, second: Self, divisor: i32) -> Self {
        assert!(divisor != 0, "divide: divisor must be nonzero");
        let d = second - initial;
        Self::new(d.x / divisor, d.y / divisor, d.z / divisor)
    }

    pub fn multiplier(a: Self, b: Self, multiplier: i32, divisor: i32) -> Self {
        assert!(divisor != 0, "multiplier: divisor must be nonzero");
        let m = i64::from(multiplier);
        let d = i64::from(divisor);
        let mul = |p: i32, q: i32| narrow(m * i64::from(p) * i64::from(q) / d);
        Self::new(mul(a.x, b.x), mul(a.y, b.y), mul(a.z, b.z))
    }

    pub fn add_scaled(&mut self, step: Self, multiplier: i32, divisor: i32) {
        assert!(divisor != 0, "add_scaled: divisor must be nonzero");
        let m = i64::from(multiplier);
        let d = i64::from(divisor);
        let acc = |v: i32, s: i32| narrow(i64::from(v) + m * i64::from(s) / d);
        self.x = acc(self.x, step.x);
        self.y = acc(self.y, step.y);
        self.z = acc(self.z, step.z);
    }

    pub fn dot(a: Self, b: Self, multiplier: i32, divisor: i32) -> i64 {
        assert!(divisor != 0, "dot: divisor must be nonzero");
        let raw = i64::from(a.x) * i64::from(b.x)
            + i64::from(a.y) * i64::from(b.y)
            + i64::from(a.z) * i64::from(b.z);
        i64::from(multiplier) * raw / i64::from(divisor)
    }

    pub fn is_nonzero(self) -> bool {
        self.x != 0 || self.y != 0 || self.z != 0
    }
}

impl Add for Vect3 {
    type Output = Vect3;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vect3 {
    type Output = Vect3;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl AddAssign for Vect3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

// ---------------------------------------------------------------------------
// Segment intersection
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

fn orientation(p: Vect2, q: Vect2, r: Vect2) -> Orientation {
    let val = (i64::from(q.y) - i64::from(p.y)) * (i64::from(r.x) - i64::from(q.x))
        - (i64::from(q.x) - i64::from(p.x)) * (i64::from(r.y) - i64::from(q.y));
    match val.signum() {
        0 => Orientation::Collinear,
        1 => Orientation::Clockwise,
        _ => Orientation::CounterClockwise,
    }
}

/// Whether `q` lies within the bounding box of `p`..`r`. Only meaningful
/// when the three points are collinear.
fn on_segment(p: Vect2, q: Vect2, r: Vect2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// True if segment `a0`-`a1` touches segment `b0`-`b1`, including shared
/// endpoints and collinear overlap.
pub fn segments_intersect(a0: Vect2, a1: Vect2, b0: Vect2, b1: Vect2) -> bool {
    let o1 = orientation(a0, a1, b0);
    let o2 = orientation(a0, a1, b1);
    let o3 = orientation(b0, b1, a0);
    let o4 = orientation(b0, b1, a1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(a0, b0, a1))
        || (o2 == Orientation::Collinear && on_segment(a0, b1, a1))
        || (o3 == Orientation::Collinear && on_segment(b0, a0, b1))
        || (o4 == Orientation::Collinear && on_segment(b0, a1, b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_table_symmetry() {
        assert_eq!(SINE_TABLE[0], 0);
        assert_eq!(SINE_TABLE[64], SINE_MAXIMUM);
        assert_eq!(SINE_TABLE[128], 0);
        assert_eq!(SINE_TABLE[192], -SINE_MAXIMUM);
        for i in 0..64 {
            assert_eq!(SINE_TABLE[i], SINE_TABLE[128 - i]);
            assert_eq!(SINE_TABLE[i], -SINE_TABLE[128 + i]);
        }
        assert_eq!(SINE_TABLE[65], 26871);
        assert_eq!(SINE_TABLE[255], -659);
    }

    #[test]
    fn sine_wraps_angle() {
        assert_eq!(sine(256 + 64, 1), SINE_MAXIMUM);
        assert_eq!(sine(-64, 1), -SINE_MAXIMUM);
        assert_eq!(sine(64, 2), SINE_MAXIMUM / 2);
    }

    #[test]
    fn direction_is_cos_sin() {
        assert_eq!(Vect2::direction(0, 1), Vect2::new(SINE_MAXIMUM, 0));
        assert_eq!(Vect2::direction(64, 1), Vect2::new(0, SINE_MAXIMUM));
        assert_eq!(Vect2::direction(128, 1), Vect2::new(-SINE_MAXIMUM, 0));
        assert_eq!(Vect2::direction(192, 1), Vect2::new(0, -SINE_MAXIMUM));
    }

    #[test]
    #[should_panic(expected = "divisor must be nonzero")]
    fn zero_divisor_fails_fast() {
        Vect2::new(1, 1).scalar_divide(0);
    }

    #[test]
    fn divide_points_from_initial_to_second() {
        let r = Vect2::divide(Vect2::new(10, 10), Vect2::new(30, 50), 2);
        assert_eq!(r, Vect2::new(10, 20));
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(Vect2::new(-7, 7).scalar_divide(2), Vect2::new(-3, 3));
        // Shifts are arithmetic, so they floor instead.
        assert_eq!(Vect2::new(-7, 7).scalar_bitshift_down(1), Vect2::new(-4, 3));
    }

    #[test]
    fn add_scaled_accumulates() {
        let mut p = Vect2::new(100, 100);
        p.add_scaled(Vect2::new(26880, 0), 10, 1344);
        assert_eq!(p, Vect2::new(300, 100));
    }

    #[test]
    fn dot_and_distance() {
        assert_eq!(Vect2::dot(Vect2::new(2, 3), Vect2::new(4, 5), 1, 1), 23);
        assert_eq!(Vect2::dot(Vect2::new(2, 3), Vect2::new(4, 5), 2, 3), 15);
        assert!(Vect2::distance_under(Vect2::new(0, 0), Vect2::new(3, 4), 6));
        assert!(!Vect2::distance_under(Vect2::new(0, 0), Vect2::new(3, 4), 5));
    }

    #[test]
    fn multiplier_is_componentwise() {
        let r = Vect2::multiplier(Vect2::new(2, 3), Vect2::new(5, 7), 4, 2);
        assert_eq!(r, Vect2::new(20, 42));
    }

    #[test]
    fn rotate90_quarter_turn() {
        assert_eq!(Vect2::new(3, 5).rotate90(), Vect2::new(5, -3));
    }

    #[test]
    fn rotation_by_zero_angle_reflects_y() {
        let p = Vect2::new(120, -45);
        assert_eq!(p.rotation(Vect2::direction(0, 1)), Vect2::new(120, 45));
    }

    #[test]
    fn rotation_preserves_length_approximately() {
        let p = Vect2::new(1000, 0);
        for angle in 0..256 {
            let r = p.rotation(Vect2::direction(angle, 1));
            let len_sq = i64::from(r.x) * i64::from(r.x) + i64::from(r.y) * i64::from(r.y);
            assert!((990_000..=1_010_000).contains(&len_sq), "angle {angle}: {r}");
        }
    }

    #[test]
    fn rotation_bitshift_contracts() {
        let p = Vect2::new(32768, 0);
        let r = p.rotation_bitshift(Vect2::direction(0, 1));
        assert_eq!(r, Vect2::new(SINE_MAXIMUM, 0));
    }

    #[test]
    fn byte2_clamps() {
        assert_eq!(Vect2::new(-5, 70000).to_byte2(), [0, 65535]);
        assert_eq!(Vect2::from_byte2([12, 34]), Vect2::new(12, 34));
    }

    #[test]
    fn min_max_accumulates() {
        let mut mm = MinMax::new();
        assert!(mm.is_empty());
        mm.include_all(&[Vect2::new(3, -2), Vect2::new(-1, 8), Vect2::new(5, 0)]);
        assert_eq!(mm.min, Vect2::new(-1, -2));
        assert_eq!(mm.max, Vect2::new(5, 8));
        assert_eq!(mm.center(), Vect2::new(2, 3));
    }

    #[test]
    fn area_grows() {
        let mut area = Area2::from_point(Vect2::new(4, 4));
        area.add(Vect2::new(-2, 9));
        assert_eq!(area.top_left, Vect2::new(-2, 4));
        assert_eq!(area.bottom_right, Vect2::new(4, 9));
        assert!(area.contains(Vect2::new(0, 5)));
        assert!(!area.contains(Vect2::new(5, 5)));
    }

    #[test]
    fn vect3_ops() {
        let a = Vect3::new(1, 2, 3);
        let b = Vect3::new(4, 6, 9);
        assert_eq!(a + b, Vect3::new(5, 8, 12));
        assert_eq!(Vect3::divide(a, b, 3), Vect3::new(1, 1, 2));
        assert_eq!(Vect3::dot(a, b, 1, 1), 4 + 12 + 27);
        let mut c = a;
        c.add_scaled(b, 2, 4);
        assert_eq!(c, Vect3::new(3, 5, 7));
        assert!(!Vect3::default().is_nonzero());
    }

    #[test]
    fn serializes_as_pair() {
        let json = serde_json::to_string(&Vect2::new(-3, 7)).unwrap();
        assert_eq!(json, "[-3,7]");
        let back: Vect2 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Vect2::new(-3, 7));
    }

    #[test]
    fn crossing_segments_intersect() {
        let a0 = Vect2::new(0, 0);
        let a1 = Vect2::new(10, 10);
        let b0 = Vect2::new(0, 10);
        let b1 = Vect2::new(10, 0);
        assert!(segments_intersect(a0, a1, b0, b1));
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let a0 = Vect2::new(0, 0);
        let a1 = Vect2::new(10, 0);
        let b0 = Vect2::new(0, 1);
        let b1 = Vect2::new(10, 1);
        assert!(!segments_intersect(a0, a1, b0, b1));
    }

    #[test]
    fn collinear_overlap_intersects() {
        let a0 = Vect2::new(0, 0);
        let a1 = Vect2::new(10, 0);
        assert!(segments_intersect(a0, a1, Vect2::new(5, 0), Vect2::new(15, 0)));
        assert!(!segments_intersect(a0, a1, Vect2::new(11, 0), Vect2::new(15, 0)));
    }

    #[test]
    fn touching_endpoint_intersects() {
        let a0 = Vect2::new(0, 0);
        let a1 = Vect2::new(10, 0);
        assert!(segments_intersect(a0, a1, Vect2::new(10, 0), Vect2::new(10, 10)));
    }

    #[test]
    fn near_miss_does_not_intersect() {
        let a0 = Vect2::new(0, 0);
        let a1 = Vect2::new(10, 0);
        assert!(!segments_intersect(a0, a1, Vect2::new(11, -5), Vect2::new(11, 5)));
    }
}
