//! Shared run-speed envelope.
//!
//! While a direction is held the envelope grows towards the body's top speed
//! and caps horizontal velocity, giving a ramp-up run instead of a constant
//! walk. There is exactly one envelope per world, shared by every controlled
//! body: two bodies accelerating in the same step both advance it.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct MomentumEnvelope {
    /// Current speed ceiling, in `[0, top_speed]`.
    pub current_max_speed: f32,
}

impl MomentumEnvelope {
    /// Grow the envelope by `rate * dt`, never beyond `top_speed`.
    pub fn grow(&mut self, rate: f32, dt: f32, top_speed: f32) -> f32 {
        self.current_max_speed = (self.current_max_speed + rate * dt).min(top_speed);
        self.current_max_speed
    }

    pub fn reset(&mut self) {
        self.current_max_speed = 0.0;
    }
}
