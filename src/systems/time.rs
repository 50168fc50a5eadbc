//! Simulation clock advance.
//!
//! Called by [`crate::game::Simulation::step`] before the step schedule runs,
//! so every system of the step reads the same scaled delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Advance the [`WorldTime`] clock by one step of `dt` display frames.
///
/// The stored delta is `dt * time_scale`; a time scale of zero freezes
/// accelerations while the frame counter still advances.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut clock = world.resource_mut::<WorldTime>();
    clock.delta = dt * clock.time_scale;
    clock.elapsed += clock.delta;
    clock.frame_count += 1;
}
