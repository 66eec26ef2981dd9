// The eight-color palette and the two pen thicknesses.
//
// Draw lists store a `Color` index, not an RGB value, so replacing the
// palette recolors a scene without rebuilding it.

use serde::{Deserialize, Serialize};

/// Palette slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Green = 0,
    LightGreen = 1,
    Red = 2,
    Orange = 3,
    LightGrey = 4,
    Grey = 5,
    DarkGrey = 6,
    Black = 7,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Green,
        Color::LightGreen,
        Color::Red,
        Color::Orange,
        Color::LightGrey,
        Color::Grey,
        Color::DarkGrey,
        Color::Black,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Pen width in world-scaled units. Converted to pixels by the camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Thickness {
    Thin = 6,
    Wide = 12,
}

impl Thickness {
    pub fn units(self) -> i32 {
        self as i32
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: [Rgb; 8],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: [
                Rgb::new(51, 127, 51),
                Rgb::new(102, 204, 102),
                Rgb::new(255, 0, 0),
                Rgb::new(127, 51, 0),
                Rgb::new(229, 229, 229),
                Rgb::new(178, 178, 178),
                Rgb::new(153, 153, 153),
                Rgb::new(0, 0, 0),
            ],
        }
    }
}

impl Palette {
    pub fn get(&self, color: Color) -> Rgb {
        self.colors[color.index()]
    }

    /// Swap in a whole new set of colors, slot for slot.
    pub fn replace(&mut self, colors: [Rgb; 8]) {
        self.colors = colors;
    }

    pub fn colors(&self) -> &[Rgb; 8] {
        &self.colors
    }
}
