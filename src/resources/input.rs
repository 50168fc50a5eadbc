//! Per-step input snapshot resource.
//!
//! The simulation never polls devices. An external input-capture layer fills
//! an [`InputState`] and hands it to each step, so steps stay deterministic
//! and independently testable.
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Resource holding the input relevant to gameplay for the current step.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

impl InputState {
    pub fn new(move_left: bool, move_right: bool, jump: bool) -> Self {
        Self {
            move_left,
            move_right,
            jump,
        }
    }

    /// Horizontal intent: -1.0, 0.0 or 1.0.
    ///
    /// Holding both directions cancels out and reads as no intent.
    pub fn horizontal_intent(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
