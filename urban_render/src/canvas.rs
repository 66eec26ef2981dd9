// Rasterization target.
//
// `Canvas` is the seam between the renderer and whatever holds pixels.
// `PixelCanvas` is the software implementation over a caller-provided
// byte buffer: tightly packed rows, RGB or RGBA. Lines are integer
// Bresenham with a square brush; polygons are filled with an even-odd
// scanline pass. Everything clips to the buffer, and lines are clipped
// against the viewport (plus brush margin) before stepping, so a segment
// that runs far off screen costs no more than its visible part.

use crate::error::{RenderError, Result};
use crate::palette::Rgb;
use smallvec::SmallVec;
use urban_sim::vect::Vect2;

/// Anything the renderer can draw into.
pub trait Canvas {
    /// Width and height in pixels.
    fn size(&self) -> (i32, i32);

    /// Fill the whole surface.
    fn erase(&mut self, color: Rgb);

    /// Line from `start` to `end` with a `width`-pixel square brush.
    fn line(&mut self, start: Vect2, end: Vect2, color: Rgb, width: i32);

    /// Even-odd fill of the closed polygon through `points`.
    fn fill_polygon(&mut self, points: &[Vect2], color: Rgb);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

pub struct PixelCanvas<'a> {
    buffer: &'a mut [u8],
    width: usize,
    height: usize,
    format: PixelFormat,
}

impl<'a> PixelCanvas<'a> {
    /// Wrap `buffer`, which must hold exactly `width * height` pixels.
    pub fn new(buffer: &'a mut [u8], width: usize, height: usize, format: PixelFormat) -> Result<Self> {
        let channels = format.channels();
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .unwrap_or(usize::MAX);
        if buffer.len() != expected || width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(RenderError::BufferSize {
                width,
                height,
                channels,
                expected,
                found: buffer.len(),
            });
        }
        Ok(Self {
            buffer,
            width,
            height,
            format,
        })
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Color at `(x, y)`, or `None` off the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        let i = self.offset(x, y)?;
        Some(Rgb::new(self.buffer[i], self.buffer[i + 1], self.buffer[i + 2]))
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize * self.width + x as usize) * self.format.channels())
    }

    fn plot(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.offset(x, y) {
            self.buffer[i] = color.r;
            self.buffer[i + 1] = color.g;
            self.buffer[i + 2] = color.b;
            if self.format == PixelFormat::Rgba {
                self.buffer[i + 3] = 255;
            }
        }
    }

    fn span(&mut self, x0: i32, x1: i32, y: i32, color: Rgb) {
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as i32 - 1);
        for x in x0..=x1 {
            self.plot(x, y, color);
        }
    }

    fn brush(&mut self, x: i32, y: i32, width: i32, color: Rgb) {
        let half = (width - 1) / 2;
        for yy in y - half..y - half + width {
            self.span(x - half, x - half + width - 1, yy, color);
        }
    }
}

// ---------------------------------------------------------------------------
// Line clipping (Cohen-Sutherland, wide integers)
// ---------------------------------------------------------------------------

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BELOW: u8 = 4;
const ABOVE: u8 = 8;

#[derive(Clone, Copy)]
struct ClipRect {
    min: i128,
    max_x: i128,
    max_y: i128,
}

impl ClipRect {
    fn outcode(&self, x: i128, y: i128) -> u8 {
        let mut code = 0;
        if x < self.min {
            code |= LEFT;
        } else if x > self.max_x {
            code |= RIGHT;
        }
        if y < self.min {
            code |= BELOW;
        } else if y > self.max_y {
            code |= ABOVE;
        }
        code
    }
}

fn clip_segment(start: Vect2, end: Vect2, rect: ClipRect) -> Option<(Vect2, Vect2)> {
    let (mut x0, mut y0) = (i128::from(start.x), i128::from(start.y));
    let (mut x1, mut y1) = (i128::from(end.x), i128::from(end.y));
    let mut c0 = rect.outcode(x0, y0);
    let mut c1 = rect.outcode(x1, y1);
    loop {
        if c0 | c1 == 0 {
            let v = |x: i128, y: i128| Vect2::new(x as i32, y as i32);
            return Some((v(x0, y0), v(x1, y1)));
        }
        if c0 & c1 != 0 {
            return None;
        }
        let out = if c0 != 0 { c0 } else { c1 };
        let (x, y) = if out & ABOVE != 0 {
            (x0 + (x1 - x0) * (rect.max_y - y0) / (y1 - y0), rect.max_y)
        } else if out & BELOW != 0 {
            (x0 + (x1 - x0) * (rect.min - y0) / (y1 - y0), rect.min)
        } else if out & RIGHT != 0 {
            (rect.max_x, y0 + (y1 - y0) * (rect.max_x - x0) / (x1 - x0))
        } else {
            (rect.min, y0 + (y1 - y0) * (rect.min - x0) / (x1 - x0))
        };
        if out == c0 {
            x0 = x;
            y0 = y;
            c0 = rect.outcode(x0, y0);
        } else {
            x1 = x;
            y1 = y;
            c1 = rect.outcode(x1, y1);
        }
    }
}

impl Canvas for PixelCanvas<'_> {
    fn size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }

    fn erase(&mut self, color: Rgb) {
        let channels = self.format.channels();
        for pixel in self.buffer.chunks_exact_mut(channels) {
            pixel[0] = color.r;
            pixel[1] = color.g;
            pixel[2] = color.b;
            if channels == 4 {
                pixel[3] = 255;
            }
        }
    }

    fn line(&mut self, start: Vect2, end: Vect2, color: Rgb, width: i32) {
        let width = width.max(1);
        let margin = i128::from(width);
        let rect = ClipRect {
            min: -margin,
            max_x: self.width as i128 + margin,
            max_y: self.height as i128 + margin,
        };
        let Some((start, end)) = clip_segment(start, end, rect) else {
            return;
        };

        let (mut x0, mut y0) = (start.x, start.y);
        let (x1, y1) = (end.x, end.y);
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.brush(x0, y0, width, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Vect2], color: Rgb) {
        if points.len() < 3 {
            return;
        }
        let (mut top, mut bottom) = (i32::MAX, i32::MIN);
        for p in points {
            top = top.min(p.y);
            bottom = bottom.max(p.y);
        }
        let top = top.max(0);
        let bottom = bottom.min(self.height as i32 - 1);

        let mut crossings: SmallVec<[i32; 8]> = SmallVec::new();
        for y in top..=bottom {
            crossings.clear();
            for (i, &a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= y && b.y > y) || (b.y <= y && a.y > y) {
                    let (ax, ay) = (i128::from(a.x), i128::from(a.y));
                    let (bx, by) = (i128::from(b.x), i128::from(b.y));
                    let x = ax + (i128::from(y) - ay) * (bx - ax) / (by - ay);
                    crossings.push(x.clamp(i128::from(i32::MIN), i128::from(i32::MAX)) as i32);
                }
            }
            crossings.sort_unstable();
            for pair in crossings.chunks_exact(2) {
                self.span(pair[0], pair[1], y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = Rgb::new(255, 255, 255);
    const BLACK: Rgb = Rgb::new(0, 0, 0);

    fn v(x: i32, y: i32) -> Vect2 {
        Vect2::new(x, y)
    }

    fn count(canvas: &PixelCanvas<'_>, color: Rgb) -> usize {
        let (w, h) = canvas.size();
        (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y) == Some(color))
            .count()
    }

    #[test]
    fn buffer_size_is_checked() {
        let mut buf = vec![0u8; 10];
        assert!(matches!(
            PixelCanvas::new(&mut buf, 2, 2, PixelFormat::Rgb),
            Err(RenderError::BufferSize { expected: 12, found: 10, .. })
        ));
    }

    #[test]
    fn erase_sets_alpha() {
        let mut buf = vec![0u8; 2 * 2 * 4];
        let mut canvas = PixelCanvas::new(&mut buf, 2, 2, PixelFormat::Rgba).unwrap();
        canvas.erase(Rgb::new(1, 2, 3));
        assert_eq!(&buf[..4], &[1, 2, 3, 255]);
    }

    #[test]
    fn thin_horizontal_line() {
        let mut buf = vec![0u8; 10 * 10 * 3];
        let mut canvas = PixelCanvas::new(&mut buf, 10, 10, PixelFormat::Rgb).unwrap();
        canvas.line(v(2, 5), v(7, 5), WHITE, 1);
        assert_eq!(count(&canvas, WHITE), 6);
        assert_eq!(canvas.pixel(2, 5), Some(WHITE));
        assert_eq!(canvas.pixel(7, 5), Some(WHITE));
        assert_eq!(canvas.pixel(8, 5), Some(BLACK));
    }

    #[test]
    fn diagonal_line_touches_both_ends() {
        let mut buf = vec![0u8; 10 * 10 * 3];
        let mut canvas = PixelCanvas::new(&mut buf, 10, 10, PixelFormat::Rgb).unwrap();
        canvas.line(v(0, 0), v(9, 9), WHITE, 1);
        assert_eq!(count(&canvas, WHITE), 10);
        assert_eq!(canvas.pixel(9, 9), Some(WHITE));
    }

    #[test]
    fn wide_brush_is_square() {
        let mut buf = vec![0u8; 10 * 10 * 3];
        let mut canvas = PixelCanvas::new(&mut buf, 10, 10, PixelFormat::Rgb).unwrap();
        canvas.line(v(5, 5), v(5, 5), WHITE, 3);
        assert_eq!(count(&canvas, WHITE), 9);
        assert_eq!(canvas.pixel(4, 4), Some(WHITE));
        assert_eq!(canvas.pixel(6, 6), Some(WHITE));
    }

    #[test]
    fn far_off_line_is_clipped_not_walked() {
        let mut buf = vec![0u8; 10 * 10 * 3];
        let mut canvas = PixelCanvas::new(&mut buf, 10, 10, PixelFormat::Rgb).unwrap();
        canvas.line(v(i32::MIN + 1, 5), v(i32::MAX, 5), WHITE, 1);
        assert_eq!(count(&canvas, WHITE), 10);
        canvas.line(v(-1_000_000, -1_000_000), v(-1_000_000, 1_000_000), WHITE, 1);
        assert_eq!(count(&canvas, WHITE), 10);
    }

    #[test]
    fn fill_square() {
        let mut buf = vec![0u8; 10 * 10 * 3];
        let mut canvas = PixelCanvas::new(&mut buf, 10, 10, PixelFormat::Rgb).unwrap();
        canvas.fill_polygon(&[v(2, 2), v(6, 2), v(6, 6), v(2, 6)], WHITE);
        // Rows 2..6 (half-open in y), columns 2..=6.
        assert_eq!(count(&canvas, WHITE), 4 * 5);
        assert_eq!(canvas.pixel(2, 2), Some(WHITE));
        assert_eq!(canvas.pixel(6, 6), Some(BLACK));
    }

    #[test]
    fn fill_clips_to_buffer() {
        let mut buf = vec![0u8; 10 * 10 * 3];
        let mut canvas = PixelCanvas::new(&mut buf, 10, 10, PixelFormat::Rgb).unwrap();
        canvas.fill_polygon(&[v(-50, -50), v(50, -50), v(50, 50), v(-50, 50)], WHITE);
        assert_eq!(count(&canvas, WHITE), 100);
    }

    #[test]
    fn degenerate_polygon_draws_nothing() {
        let mut buf = vec![0u8; 4 * 4 * 3];
        let mut canvas = PixelCanvas::new(&mut buf, 4, 4, PixelFormat::Rgb).unwrap();
        canvas.fill_polygon(&[v(0, 0), v(3, 3)], WHITE);
        assert_eq!(count(&canvas, WHITE), 0);
    }

    #[test]
    fn fill_handles_extreme_coordinates() {
        let mut buf = vec![0u8; 10 * 10 * 3];
        let mut canvas = PixelCanvas::new(&mut buf, 10, 10, PixelFormat::Rgb).unwrap();
        let huge = 2_000_000_000;
        canvas.fill_polygon(&[v(-huge, -huge), v(huge, -huge), v(0, huge)], WHITE);
        assert_eq!(count(&canvas, WHITE), 100);
    }
}
