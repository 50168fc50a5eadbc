//! Physics integrator.
//!
//! Velocities are per-frame displacements: positions advance by the velocity
//! once per step, and only accelerations (gravity, run acceleration,
//! deceleration) are scaled by the frame delta. Fall speed is not capped.
//!
//! The free functions hold the arithmetic; the systems below wire them to
//! the ECS for every [`PlayerControlled`] body.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::inputcontrolled::PlayerControlled;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::{BodyTuning, RigidBody};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::momentum::MomentumEnvelope;
use crate::resources::worldtime::WorldTime;

/// Below this horizontal speed a body with no intent stops outright.
pub const STOP_EPSILON: f32 = 0.05;

/// `vy += gravity * dt; y += vy`.
pub fn apply_gravity(position: &mut MapPosition, body: &mut RigidBody, gravity: f32, dt: f32) {
    body.velocity.y += gravity * dt;
    position.pos.y += body.velocity.y;
}

/// Update horizontal velocity from a held direction (`intent` in -1, 0, 1).
///
/// With a direction held, velocity accelerates and the shared envelope grows;
/// speed above the envelope is cut back to it. Without one, velocity decays
/// towards zero and never reverses sign.
pub fn apply_horizontal_acceleration(
    body: &mut RigidBody,
    tuning: &BodyTuning,
    envelope: &mut MomentumEnvelope,
    intent: f32,
    dt: f32,
) {
    let vx = &mut body.velocity.x;
    if intent != 0.0 {
        *vx += intent * tuning.speed_unit * tuning.acceleration * dt;
        let max = envelope.grow(tuning.run_acceleration_factor, dt, tuning.top_speed);
        if vx.abs() > max {
            *vx = intent * max;
        }
        return;
    }

    if vx.abs() > STOP_EPSILON {
        let slowed = *vx - vx.signum() * tuning.deceleration * dt;
        // overshooting zero snaps to a stop
        *vx = if slowed.signum() != vx.signum() { 0.0 } else { slowed };
    } else {
        *vx = 0.0;
    }
    if *vx == 0.0 {
        envelope.reset();
    }
}

/// `x += vx`.
pub fn integrate_horizontal(position: &mut MapPosition, body: &RigidBody) {
    position.pos.x += body.velocity.x;
}

/// Accelerate and move every controlled body horizontally.
pub fn horizontal_movement(
    mut query: Query<(&mut MapPosition, &mut RigidBody, &BodyTuning), With<PlayerControlled>>,
    input: Res<InputState>,
    time: Res<WorldTime>,
    mut envelope: ResMut<MomentumEnvelope>,
) {
    let intent = input.horizontal_intent();
    for (mut position, mut body, tuning) in query.iter_mut() {
        apply_horizontal_acceleration(&mut body, tuning, &mut envelope, intent, time.delta);
        integrate_horizontal(&mut position, &body);
        trace!(
            "horizontal: intent={} vx={} envelope={}",
            intent, body.velocity.x, envelope.current_max_speed
        );
    }
}

/// Drop horizontal velocity once collision has consumed it, so the next step
/// rebuilds it from input. Skipped when the config carries momentum.
pub fn reset_horizontal_velocity(
    mut query: Query<&mut RigidBody, With<PlayerControlled>>,
    config: Res<GameConfig>,
) {
    if config.body.carry_momentum {
        return;
    }
    for mut body in query.iter_mut() {
        body.velocity.x = 0.0;
    }
}

/// Clear grounding and apply gravity. Grounding is re-derived by vertical
/// collision resolution and world-bounds clamping later in the same step.
pub fn gravity(
    mut query: Query<(&mut MapPosition, &mut RigidBody, &BodyTuning), With<PlayerControlled>>,
    time: Res<WorldTime>,
) {
    for (mut position, mut body, tuning) in query.iter_mut() {
        body.was_grounded = body.grounded;
        body.grounded = false;
        apply_gravity(&mut position, &mut body, tuning.gravity, time.delta);
    }
}
