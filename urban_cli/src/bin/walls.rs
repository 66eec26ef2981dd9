//! Rasterize the room walls of a neighborhood dump to a PNG.
//!
//! Every room contributes its structural and inset rectangles. The image
//! is sized to the walls' bounding box at half resolution; walls are drawn
//! one pixel wide in white on black.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use urban_cli::{init_logging, save_rgb_png};
use urban_render::{Canvas, PixelCanvas, PixelFormat, Rgb};
use urban_sim::export::read_export;
use urban_sim::vect::{MinMax, Vect2};

/// World units per output pixel.
const FRACTION_MAP: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "walls")]
#[command(about = "Draw the room walls of a neighborhood dump")]
struct Args {
    /// Neighborhood dump written by `generate`.
    input: PathBuf,

    #[arg(long, short, value_name = "FILE", default_value = "group_output.png")]
    out: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let record = read_export(&args.input).with_context(|| format!("reading {}", args.input.display()))?;

    let mut quads: Vec<[Vect2; 4]> = Vec::new();
    for twoblock in &record.twoblocks {
        for house in &twoblock.houses {
            for room in &house.rooms {
                quads.push(room.inner_walls);
                quads.push(room.outer_walls);
            }
        }
    }
    tracing::info!(twoblocks = record.twoblocks.len(), quads = quads.len(), "walls gathered");
    if quads.is_empty() {
        bail!("{} has no rooms", args.input.display());
    }

    let mut bounds = MinMax::new();
    for quad in &quads {
        bounds.include_all(quad);
    }
    let span = bounds.max - bounds.min;
    let width = (span.x / FRACTION_MAP + 1) as usize;
    let height = (span.y / FRACTION_MAP + 1) as usize;

    let mut buffer = vec![0u8; width * height * 3];
    let mut canvas = PixelCanvas::new(&mut buffer, width, height, PixelFormat::Rgb)?;
    let white = Rgb::new(255, 255, 255);
    let to_pixel = |p: Vect2| (p - bounds.min).scalar_divide(FRACTION_MAP);
    for quad in &quads {
        for i in 0..4 {
            canvas.line(to_pixel(quad[i]), to_pixel(quad[(i + 1) % 4]), white, 1);
        }
    }

    save_rgb_png(&args.out, &buffer, width, height)?;
    println!("{} rooms -> {} ({width}x{height})", quads.len() / 2, args.out.display());
    Ok(())
}
