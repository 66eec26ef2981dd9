// Shared plumbing for the urban command-line tools.
//
// Each binary in `src/bin/` parses its own arguments with clap and then
// leans on these helpers for the parts they have in common: logging
// setup, seed parsing (or deriving one from the clock), config loading and
// PNG output.
//
// - `generate`: build a town and write its JSON dump.
// - `walls`:    rasterize the room walls of a dump to a PNG.
// - `snapshot`: walk the agent for a number of ticks and save the frame.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;
use urban_render::RenderConfig;
use urban_sim::Seed;
use urban_sim::config::CityConfig;

/// Install the fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("urban=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Parse four comma-separated hex words, e.g. `1234,5678,9abc,def0`.
/// A `0x` prefix on each word is accepted.
pub fn parse_seed(text: &str) -> std::result::Result<Seed, String> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        return Err(format!("expected four hex words, got {}", parts.len()));
    }
    let mut words = [0u16; 4];
    for (word, part) in words.iter_mut().zip(&parts) {
        let digits = part.trim_start_matches("0x").trim_start_matches("0X");
        *word = u16::from_str_radix(digits, 16).map_err(|e| format!("bad seed word `{part}`: {e}"))?;
    }
    Ok(Seed::new(words))
}

/// Format a seed the way `parse_seed` reads it.
pub fn format_seed(seed: &Seed) -> String {
    let [a, b, c, d] = seed.words();
    format!("{a:04x},{b:04x},{c:04x},{d:04x}")
}

/// The given seed, or one derived from the wall clock.
pub fn seed_or_clock(seed: Option<Seed>) -> Seed {
    seed.unwrap_or_else(|| {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Seed::from_entropy(nanos)
    })
}

pub fn load_city_config(path: Option<&Path>) -> Result<CityConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            CityConfig::from_json(&json).with_context(|| format!("parsing config {}", path.display()))
        }
        None => Ok(CityConfig::default()),
    }
}

pub fn load_render_config(path: Option<&Path>) -> Result<RenderConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading render config {}", path.display()))?;
            RenderConfig::from_json(&json)
                .with_context(|| format!("parsing render config {}", path.display()))
        }
        None => Ok(RenderConfig::default()),
    }
}

/// Write a tightly packed RGB buffer as PNG.
pub fn save_rgb_png(path: &Path, buffer: &[u8], width: usize, height: usize) -> Result<()> {
    image::save_buffer_with_format(
        path,
        buffer,
        u32::try_from(width).context("image too wide")?,
        u32::try_from(height).context("image too tall")?,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), width, height, "png written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_round_trip() {
        let seed = parse_seed("1234,5678,9abc,def0").unwrap();
        assert_eq!(seed.words(), [0x1234, 0x5678, 0x9abc, 0xdef0]);
        assert_eq!(format_seed(&seed), "1234,5678,9abc,def0");
    }

    #[test]
    fn seed_accepts_prefix_and_spaces() {
        let seed = parse_seed("0x1, 0X2 ,3,ffff").unwrap();
        assert_eq!(seed.words(), [1, 2, 3, 0xffff]);
    }

    #[test]
    fn seed_rejects_bad_input() {
        assert!(parse_seed("1,2,3").is_err());
        assert!(parse_seed("1,2,3,4,5").is_err());
        assert!(parse_seed("1,2,3,10000").is_err());
        assert!(parse_seed("1,2,3,zz").is_err());
    }

    #[test]
    fn explicit_seed_wins() {
        let seed = Seed::new([1, 2, 3, 4]);
        assert_eq!(seed_or_clock(Some(seed)), seed);
    }

    #[test]
    fn missing_config_is_default() {
        assert_eq!(load_city_config(None).unwrap(), CityConfig::default());
    }
}
