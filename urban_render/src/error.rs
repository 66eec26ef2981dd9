// Error type for the render crate.

use thiserror::Error;
use urban_sim::error::UrbanError;

#[derive(Error, Debug)]
pub enum RenderError {
    /// A draw list filled up, or another city-side failure.
    #[error(transparent)]
    City(#[from] UrbanError),

    #[error("pixel buffer holds {found} bytes, {width}x{height} at {channels} channels needs {expected}")]
    BufferSize {
        width: usize,
        height: usize,
        channels: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
