//! Generate a town and write its JSON dump.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use urban_cli::{format_seed, init_logging, load_city_config, parse_seed, seed_or_clock};
use urban_sim::export;
use urban_sim::world::WorldState;

#[derive(Parser, Debug)]
#[command(name = "generate")]
#[command(about = "Generate a town from a seed and dump it as JSON")]
struct Args {
    /// Four hex words, e.g. 1234,5678,9abc,def0. Derived from the clock if absent.
    #[arg(long, value_parser = parse_seed)]
    seed: Option<urban_sim::Seed>,

    /// City configuration (JSON). Defaults apply if absent.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the dump.
    #[arg(long, short, value_name = "FILE", default_value = "neighborhood.json")]
    out: PathBuf,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = load_city_config(args.config.as_deref())?;
    let seed = seed_or_clock(args.seed);
    tracing::info!(seed = %format_seed(&seed), "generating");

    let world = WorldState::new(seed, config).context("building world")?;
    export::write_file(&world.neighborhood, &args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;

    println!(
        "seed {}: {} two-blocks, {} parks, {} houses, {} blocking segments -> {}",
        format_seed(&world.initial_seed),
        world.neighborhood.twoblocks().len(),
        world.neighborhood.parks().len(),
        world.neighborhood.house_count(),
        world.occlusion.len(),
        args.out.display()
    );
    Ok(())
}
