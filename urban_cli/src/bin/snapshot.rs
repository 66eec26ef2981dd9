//! Headless walk through a generated town, saved as a PNG frame.
//!
//! The agent starts at a random city location and wanders for `--ticks`
//! ticks: a small random turn each tick, then a collision-checked step,
//! turning a quarter when blocked. Every tick rebuilds the active bucket
//! (agent marker plus visibility trail) the way an interactive front end
//! would; the last frame is written out.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use urban_cli::{format_seed, init_logging, load_city_config, load_render_config, parse_seed, save_rgb_png, seed_or_clock};
use urban_render::scene::{draw_agent, draw_label, draw_neighborhood, draw_occlusion_debug};
use urban_render::{Bucket, PixelCanvas, PixelFormat, RenderState};
use urban_sim::agent::AgentState;
use urban_sim::city::CityBounds;
use urban_sim::vect::Vect2;
use urban_sim::world::WorldState;

/// Distance units per step.
const STEP: i32 = 8;

#[derive(Parser, Debug)]
#[command(name = "snapshot")]
#[command(about = "Walk the agent through a town and save the final frame")]
struct Args {
    /// Four hex words, e.g. 1234,5678,9abc,def0. Derived from the clock if absent.
    #[arg(long, value_parser = parse_seed)]
    seed: Option<urban_sim::Seed>,

    /// City configuration (JSON).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render configuration (JSON): viewport and list capacities.
    #[arg(long, value_name = "FILE")]
    render_config: Option<PathBuf>,

    /// Ticks to simulate before the snapshot.
    #[arg(long, default_value_t = 2048)]
    ticks: u32,

    /// Agent zoom, inside (-99, 120).
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    zoom: i32,

    #[arg(long, short, value_name = "FILE", default_value = "snapshot.png")]
    out: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = load_city_config(args.config.as_deref())?;
    let render_config = load_render_config(args.render_config.as_deref())?;
    let seed = seed_or_clock(args.seed);
    tracing::info!(seed = %format_seed(&seed), ticks = args.ticks, "snapshot");

    let mut world = WorldState::new(seed, config).context("building world")?;
    let bounds = CityBounds::new(&world.config.neighborhood);
    let start = bounds.translate(bounds.initial_location(&mut world.seed));
    let mut agent = AgentState::at(start, world.config.agent.clone());
    agent.zoom(args.zoom);

    let mut state = RenderState::new(render_config)?;
    draw_neighborhood(&mut state.lists, &world.neighborhood)?;

    let mut blocked = 0u32;
    for tick in 0..args.ticks {
        agent.turn(world.seed.jitter(9));
        if !agent.try_move(STEP, &mut world.occlusion)? {
            blocked += 1;
            agent.turn(64);
        }

        state.follow(&agent);
        state.lists.begin(Bucket::Active);
        draw_occlusion_debug(&mut state.lists, &world.occlusion)?;
        draw_agent(&mut state.lists, &agent)?;
        state.lists.begin(Bucket::Text);
        draw_label(&mut state.lists, Vect2::new(10, 10), &tick.to_string(), 8)?;

        world.occlusion.account_reset();
        agent.cycle();
    }
    tracing::info!(blocked, location = %agent.location(), facing = agent.facing(), "walk finished");

    let (width, height) = (state.config().width, state.config().height);
    let mut buffer = vec![0u8; width * height * 3];
    let mut canvas = PixelCanvas::new(&mut buffer, width, height, PixelFormat::Rgb)?;
    state.render_frame(&mut canvas);
    save_rgb_png(&args.out, &buffer, width, height)?;

    println!(
        "seed {}: {} ticks, blocked {} times, agent at {} facing {}",
        format_seed(&world.initial_seed),
        args.ticks,
        blocked,
        agent.location(),
        agent.facing()
    );
    Ok(())
}
