// urban_render: software rendering of a generated town.
//
// Turns `urban_sim` geometry into colored lines and filled quads, then
// rasterizes them into a caller-provided pixel buffer. There is no window
// and no GPU here: the command-line tools hand the finished buffer to the
// `image` crate, and an interactive front end would hand it to whatever
// presents frames.
//
// Module overview:
// - `palette.rs`:   The eight-color palette and line thicknesses.
// - `camera.rs`:    World-to-screen transform (translate, scale, rotate).
// - `draw_list.rs`: Display / active / text buckets of lines and quads, pen state.
// - `canvas.rs`:    `Canvas` trait and `PixelCanvas` (Bresenham lines, scanline fill).
// - `render.rs`:    `RenderState`: camera + palette + draw lists, frame passes.
// - `scene.rs`:     Builders that fill draw lists from a neighborhood, agent, debug trail, label.
// - `config.rs`:    `RenderConfig`: viewport size and list capacities.
// - `error.rs`:     `RenderError`.
//
// Rendering is a pure function of the draw lists, the camera and the
// palette. The display bucket is built once per world; active and text
// buckets are rebuilt every frame.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod draw_list;
pub mod error;
pub mod palette;
pub mod render;
pub mod scene;

pub use camera::Camera;
pub use canvas::{Canvas, PixelCanvas, PixelFormat};
pub use config::RenderConfig;
pub use draw_list::{Bucket, DrawLists};
pub use error::RenderError;
pub use palette::{Color, Palette, Rgb, Thickness};
pub use render::RenderState;
