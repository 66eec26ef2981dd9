// Draw lists: lines and quads waiting to be rasterized, split by lifetime.
//
// - Display: the static town. Built once per world, kept across frames.
// - Active:  per-frame overlays (agent marker, visibility debug trail).
// - Text:    per-frame labels.
//
// Every append names its bucket explicitly. The pen (color and thickness)
// is mode state: it persists across calls until changed, and `quad`
// switches it to wide before drawing the outline. Filled quads are only
// kept in the display bucket; a filled quad sent to a transient bucket
// draws its outline alone.
//
// All buckets are `BoundedVec`s: a full bucket fails the draw call.

use crate::config::RenderConfig;
use crate::palette::{Color, Thickness};
use serde::{Deserialize, Serialize};
use urban_sim::bounded::BoundedVec;
use urban_sim::error::Result;
use urban_sim::vect::Vect2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Active,
    Display,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub start: Vect2,
    pub end: Vect2,
    pub color: Color,
    pub thickness: Thickness,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quad {
    pub points: [Vect2; 4],
    pub color: Color,
}

#[derive(Clone, Debug)]
pub struct DrawLists {
    display_lines: BoundedVec<Line>,
    display_quads: BoundedVec<Quad>,
    active_lines: BoundedVec<Line>,
    text_lines: BoundedVec<Line>,
    color: Color,
    thickness: Thickness,
}

impl DrawLists {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            display_lines: BoundedVec::new("display lines", config.display_line_capacity),
            display_quads: BoundedVec::new("display quads", config.display_quad_capacity),
            active_lines: BoundedVec::new("active lines", config.active_line_capacity),
            text_lines: BoundedVec::new("text lines", config.text_line_capacity),
            color: Color::Green,
            thickness: Thickness::Thin,
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn thin_line(&mut self) {
        self.thickness = Thickness::Thin;
    }

    pub fn wide_line(&mut self) {
        self.thickness = Thickness::Wide;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn thickness(&self) -> Thickness {
        self.thickness
    }

    fn lines_mut(&mut self, bucket: Bucket) -> &mut BoundedVec<Line> {
        match bucket {
            Bucket::Active => &mut self.active_lines,
            Bucket::Display => &mut self.display_lines,
            Bucket::Text => &mut self.text_lines,
        }
    }

    /// Start rebuilding a bucket. Transient buckets are emptied; the
    /// display bucket is left as it is.
    pub fn begin(&mut self, bucket: Bucket) {
        match bucket {
            Bucket::Active => self.active_lines.clear(),
            Bucket::Text => self.text_lines.clear(),
            Bucket::Display => {}
        }
    }

    /// Empty every bucket, display included.
    pub fn reset(&mut self) {
        self.display_lines.clear();
        self.display_quads.clear();
        self.active_lines.clear();
        self.text_lines.clear();
    }

    /// Append one line in the current pen.
    pub fn line(&mut self, bucket: Bucket, start: Vect2, end: Vect2) -> Result<()> {
        let line = Line {
            start,
            end,
            color: self.color,
            thickness: self.thickness,
        };
        self.lines_mut(bucket).push(line)
    }

    /// Closed polyline through `points`.
    pub fn polygon(&mut self, bucket: Bucket, points: &[Vect2]) -> Result<()> {
        for (i, &start) in points.iter().enumerate() {
            self.line(bucket, start, points[(i + 1) % points.len()])?;
        }
        Ok(())
    }

    /// Store the quad (when filled and in the display bucket), then outline
    /// it with a wide pen. The pen stays wide afterwards.
    pub fn quad(&mut self, bucket: Bucket, points: [Vect2; 4], filled: bool) -> Result<()> {
        if filled && bucket == Bucket::Display {
            self.display_quads.push(Quad {
                points,
                color: self.color,
            })?;
        }
        self.wide_line();
        self.polygon(bucket, &points)
    }

    pub fn lines(&self, bucket: Bucket) -> &[Line] {
        match bucket {
            Bucket::Active => self.active_lines.as_slice(),
            Bucket::Display => self.display_lines.as_slice(),
            Bucket::Text => self.text_lines.as_slice(),
        }
    }

    pub fn quads(&self) -> &[Quad] {
        self.display_quads.as_slice()
    }
}
