// Frame passes: draw lists through the camera onto a canvas.
//
// `RenderState` owns everything a frame needs besides the target: the
// camera, the palette and the draw lists. A frame is three passes:
//
// 1. `render_display`: erase to green, display lines, then display quads
//    (fill, then a 3-pixel outline in the quad's own color). Quads are
//    drawn last, so they cover display lines beneath them.
// 2. `render_active`: per-frame overlay lines.
// 3. `render_text`: label lines, in screen space (no camera).
//
// Lines whose two transformed endpoints lie beyond the same viewport edge
// are skipped before reaching the canvas.

use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::draw_list::{Bucket, DrawLists, Line};
use crate::error::Result;
use crate::palette::{Color, Palette};
use urban_sim::agent::AgentState;
use urban_sim::vect::Vect2;

/// Outline width for filled quads, in pixels.
const QUAD_OUTLINE: i32 = 3;

#[derive(Clone, Debug)]
pub struct RenderState {
    config: RenderConfig,
    pub camera: Camera,
    pub palette: Palette,
    pub lists: DrawLists,
}

fn culled(a: Vect2, b: Vect2, width: i32, height: i32) -> bool {
    (a.x < 0 && b.x < 0)
        || (a.y < 0 && b.y < 0)
        || (a.x > width - 1 && b.x > width - 1)
        || (a.y > height - 1 && b.y > height - 1)
}

impl RenderState {
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        let lists = DrawLists::new(&config);
        Ok(Self {
            config,
            camera: Camera::default(),
            palette: Palette::default(),
            lists,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn delta_move(&mut self, center: Vect2, location: Vect2, turn: i32, scale_delta: i32) {
        self.camera.delta_move(center, location, turn, scale_delta);
    }

    /// Put `agent` in the middle of the viewport, turned and zoomed as the
    /// agent is.
    pub fn follow(&mut self, agent: &AgentState) {
        self.camera
            .delta_move(Vect2::ZERO, agent.location(), agent.facing(), agent.zooming());
        self.camera.screen_offset = Vect2::new(
            (self.config.width / 2) as i32,
            (self.config.height / 2) as i32,
        );
    }

    fn render_lines(&self, canvas: &mut impl Canvas, lines: &[Line], through_camera: bool) {
        let (width, height) = canvas.size();
        let direction = self.camera.direction_vector();
        for line in lines {
            let (start, end) = if through_camera {
                (
                    self.camera.transform(line.start, direction),
                    self.camera.transform(line.end, direction),
                )
            } else {
                (line.start, line.end)
            };
            if culled(start, end, width, height) {
                continue;
            }
            let pixels = self.camera.pixel_width(line.thickness.units());
            canvas.line(start, end, self.palette.get(line.color), pixels);
        }
    }

    fn render_quads(&self, canvas: &mut impl Canvas) {
        let direction = self.camera.direction_vector();
        for quad in self.lists.quads() {
            let color = self.palette.get(quad.color);
            let points = quad.points.map(|p| self.camera.transform(p, direction));
            canvas.fill_polygon(&points, color);
            for i in 0..4 {
                canvas.line(points[i], points[(i + 1) % 4], color, QUAD_OUTLINE);
            }
        }
    }

    pub fn render_display(&self, canvas: &mut impl Canvas) {
        canvas.erase(self.palette.get(Color::Green));
        self.render_lines(canvas, self.lists.lines(Bucket::Display), true);
        self.render_quads(canvas);
    }

    pub fn render_active(&self, canvas: &mut impl Canvas) {
        self.render_lines(canvas, self.lists.lines(Bucket::Active), true);
    }

    pub fn render_text(&self, canvas: &mut impl Canvas) {
        self.render_lines(canvas, self.lists.lines(Bucket::Text), false);
    }

    /// All three passes.
    pub fn render_frame(&self, canvas: &mut impl Canvas) {
        self.render_display(canvas);
        self.render_active(canvas);
        self.render_text(canvas);
        tracing::trace!(
            display_lines = self.lists.lines(Bucket::Display).len(),
            quads = self.lists.quads().len(),
            active_lines = self.lists.lines(Bucket::Active).len(),
            "frame rendered"
        );
    }
}
