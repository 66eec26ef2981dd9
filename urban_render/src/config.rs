// Render configuration: viewport size and draw list capacities.
//
// Capacities bound memory per bucket; overflowing one is an error from the
// draw call that overflowed, never a silently dropped line. The defaults
// comfortably hold the default 8 x 8 town in the display bucket.

use crate::error::{RenderError, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub display_line_capacity: usize,
    pub display_quad_capacity: usize,
    pub active_line_capacity: usize,
    pub text_line_capacity: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            display_line_capacity: 2_000_000,
            display_quad_capacity: 500_000,
            active_line_capacity: 64_000,
            text_line_capacity: 64_000,
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RenderConfig = serde_json::from_str(json).map_err(urban_sim::error::UrbanError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "viewport {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.width > i32::MAX as usize || self.height > i32::MAX as usize {
            return Err(RenderError::InvalidConfig("viewport too large".into()));
        }
        Ok(())
    }
}
