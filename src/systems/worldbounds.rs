//! World-bounds enforcement.
//!
//! Runs after collision resolution. The body's visual bounds are clamped into
//! the playable area; reaching the bottom edge counts as landing on a floor.

use bevy_ecs::prelude::*;

use crate::components::inputcontrolled::PlayerControlled;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::{BodySize, RigidBody};
use crate::events::landing::{LandingEvent, LandingSurface};
use crate::resources::worldbounds::WorldBounds;

/// Clamp `position` so the body lies inside `bounds`.
///
/// Returns true when the body was stopped by the world floor.
pub fn enforce_world_bounds(
    position: &mut MapPosition,
    body: &mut RigidBody,
    size: &BodySize,
    bounds: &WorldBounds,
) -> bool {
    let max = bounds.max_position(size.size);
    position.pos.x = position.pos.x.clamp(0.0, max.x);

    if position.pos.y >= max.y {
        position.pos.y = max.y;
        body.grounded = true;
        body.velocity.y = 0.0;
        return true;
    }
    position.pos.y = position.pos.y.max(0.0);
    false
}

pub fn world_bounds(
    mut query: Query<(Entity, &mut MapPosition, &mut RigidBody, &BodySize), With<PlayerControlled>>,
    bounds: Res<WorldBounds>,
    mut commands: Commands,
) {
    for (entity, mut position, mut body, size) in query.iter_mut() {
        let falling_speed = body.velocity.y;
        let already_grounded = body.grounded || body.was_grounded;
        if enforce_world_bounds(&mut position, &mut body, size, &bounds) && !already_grounded {
            commands.trigger(LandingEvent {
                entity,
                surface: LandingSurface::WorldFloor,
                impact_speed: falling_speed.max(0.0),
            });
        }
    }
}
