//! Kinematic body state and movement tuning.
//!
//! [`RigidBody`] carries the per-step mutable state (velocity and the grounded
//! flag). [`BodyTuning`] holds the construction-time movement parameters and
//! is never changed by the simulation. [`BodySize`] is the visual extent used
//! for world-bounds clamping and camera framing.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::Serialize;

use crate::error::SimError;

/// Velocity and grounding state of a moving body.
///
/// Velocities are in world units per frame: `MapPosition` advances by the
/// velocity once per step, while accelerations are scaled by the frame delta.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RigidBody {
    /// Current velocity; positive y points down.
    pub velocity: Vec2,
    /// Resting on a collider or the world floor. Re-derived every step.
    pub grounded: bool,
    /// `grounded` as it stood when gravity cleared it this step.
    pub was_grounded: bool,
}

impl RigidBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::default()
        }
    }

    /// Start a jump if the body is grounded. Airborne calls are ignored.
    ///
    /// Returns true when the jump was applied.
    pub fn jump(&mut self, jump_power: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.velocity.y = -jump_power;
        self.grounded = false;
        true
    }
}

/// Visual bounds of a body.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BodySize {
    pub size: Vec2,
}

impl BodySize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }
}

/// Movement tunables for a body.
///
/// # Fields
/// - `top_speed` - ceiling for the shared run envelope
/// - `acceleration` - horizontal acceleration while a direction is held
/// - `deceleration` - horizontal slowdown when no direction is held
/// - `gravity` - downward acceleration, positive
/// - `jump_power` - upward speed given by a jump
/// - `speed_unit` - scale applied to `acceleration`
/// - `run_acceleration_factor` - growth rate of the run envelope
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BodyTuning {
    pub top_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub gravity: f32,
    pub jump_power: f32,
    pub speed_unit: f32,
    pub run_acceleration_factor: f32,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            top_speed: 2.0,
            acceleration: 2.0,
            deceleration: 0.2,
            gravity: 0.4,
            jump_power: 5.3,
            speed_unit: 1.0,
            run_acceleration_factor: 0.1,
        }
    }
}

impl BodyTuning {
    /// Reject tunables that would make the integrator misbehave.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.gravity >= 0.0) {
            return Err(SimError::config(format!(
                "gravity must be non-negative, got {}",
                self.gravity
            )));
        }
        if !(self.top_speed >= 0.0) {
            return Err(SimError::config(format!(
                "top_speed must be non-negative, got {}",
                self.top_speed
            )));
        }
        for (name, value) in [
            ("acceleration", self.acceleration),
            ("deceleration", self.deceleration),
            ("jump_power", self.jump_power),
            ("speed_unit", self.speed_unit),
            ("run_acceleration_factor", self.run_acceleration_factor),
        ] {
            if !(value >= 0.0) {
                return Err(SimError::config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
