//! Camera follow system.
//!
//! Last simulation system of a step: hands the [`CameraTarget`] body's
//! resolved bounds to the [`FollowCamera`]. The camera only reads the body.

use bevy_ecs::prelude::*;

use crate::components::inputcontrolled::{CameraTarget, Facing};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::BodySize;
use crate::geometry::Rect;
use crate::resources::camera2d::{FollowCamera, LookDirection};
use crate::resources::input::InputState;

/// Look-ahead direction: the facing while a direction is held, none at rest.
pub fn look_direction(facing: Facing, intent: f32) -> LookDirection {
    if intent == 0.0 {
        return LookDirection::None;
    }
    match facing {
        Facing::Left => LookDirection::Left,
        Facing::Right => LookDirection::Right,
    }
}

pub fn camera_follow(
    query: Query<(&MapPosition, &BodySize, &Facing), With<CameraTarget>>,
    input: Res<InputState>,
    mut camera: ResMut<FollowCamera>,
) {
    let Ok((position, size, facing)) = query.single() else {
        return;
    };
    let target = Rect::from_pos_size(position.pos, size.size);
    camera.follow(target, look_direction(*facing, input.horizontal_intent()));
}
