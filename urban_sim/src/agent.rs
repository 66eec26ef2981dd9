// The viewer agent: a position, a facing on the 256-step wheel, and zoom.
//
// Input handlers accumulate per-tick deltas (`turn`, `zoom`); `move_forward`
// commits the pending turn and steps along the new heading; `cycle` clears
// the deltas at the end of a tick. Facing is always kept in `0..=255`.
//
// Heading convention: facing 0 walks toward -y (north on screen). The step
// direction is `direction(192 - facing)`, scaled by `distance /
// step_divisor`, so with the default divisor one distance unit is 20 world
// units.
//
// `try_move` is the collision-aware variant: it asks the occlusion index
// whether the step crosses a wall or fence and undoes it if so.

use crate::config::AgentConfig;
use crate::error::Result;
use crate::occlusion::OcclusionIndex;
use crate::vect::Vect2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentState {
    location: Vect2,
    location_delta: Vect2,
    facing: i32,
    facing_delta: i32,
    zooming: i32,
    config: AgentConfig,
}

impl Default for AgentState {
    fn default() -> Self {
        Self::new(AgentConfig::default())
    }
}

impl AgentState {
    /// At the origin, facing 0, no zoom.
    pub fn new(config: AgentConfig) -> Self {
        Self {
            location: Vect2::ZERO,
            location_delta: Vect2::ZERO,
            facing: 0,
            facing_delta: 0,
            zooming: 0,
            config,
        }
    }

    pub fn at(location: Vect2, config: AgentConfig) -> Self {
        Self {
            location,
            ..Self::new(config)
        }
    }

    pub fn location(&self) -> Vect2 {
        self.location
    }

    pub fn location_delta(&self) -> Vect2 {
        self.location_delta
    }

    pub fn facing(&self) -> i32 {
        self.facing
    }

    pub fn facing_delta(&self) -> i32 {
        self.facing_delta
    }

    pub fn zooming(&self) -> i32 {
        self.zooming
    }

    /// Queue a turn; it takes effect on the next move.
    pub fn turn(&mut self, delta: i32) {
        self.facing_delta += delta;
    }

    /// Change zoom unless the result would leave the open zoom range.
    pub fn zoom(&mut self, delta: i32) {
        let total = self.zooming + delta;
        if total > self.config.zoom_min && total < self.config.zoom_max {
            self.zooming = total;
        }
    }

    /// Commit the pending turn, then step `distance` along the heading.
    pub fn move_forward(&mut self, distance: i32) {
        self.facing = (self.facing + self.facing_delta).rem_euclid(256);
        let heading = Vect2::direction((192 - self.facing).rem_euclid(256), 1);
        let previous = self.location;
        self.location
            .add_scaled(heading, distance, self.config.step_divisor);
        self.location_delta = self.location - previous;
    }

    /// Like `move_forward`, but the step is undone if it crosses a blocking
    /// segment. The turn is committed either way. Returns whether the agent
    /// moved.
    pub fn try_move(&mut self, distance: i32, occlusion: &mut OcclusionIndex) -> Result<bool> {
        let previous = self.location;
        self.move_forward(distance);
        if occlusion.is_path_open(previous, self.location)? {
            Ok(true)
        } else {
            self.location = previous;
            self.location_delta = Vect2::ZERO;
            Ok(false)
        }
    }

    /// End of tick: clear the per-tick deltas.
    pub fn cycle(&mut self) {
        self.facing_delta = 0;
        self.location_delta = Vect2::ZERO;
    }
}
