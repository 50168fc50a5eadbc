use bevy_ecs::prelude::*;

use crate::components::animation::AnimationState;
use crate::components::boxcollider::BoxCollider;
use crate::components::inputcontrolled::{CameraTarget, Facing};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::{BodySize, RigidBody};
use crate::geometry::{Rect, aabb};
use crate::resources::camera2d::FollowCamera;
use crate::resources::renderframe::{BodyView, RenderFrame};
use crate::resources::tilemap::LevelColliders;
use crate::resources::worldtime::WorldTime;

/// Collect what a renderer would draw this step.
///
/// Colliders are culled against the camera's world rectangle with the same
/// AABB test the resolver uses.
pub fn collect_render_frame(
    query: Query<
        (
            &MapPosition,
            &BodySize,
            &BoxCollider,
            &RigidBody,
            &Facing,
            &AnimationState,
        ),
        With<CameraTarget>,
    >,
    camera: Res<FollowCamera>,
    level: Res<LevelColliders>,
    time: Res<WorldTime>,
    mut frame: ResMut<RenderFrame>,
) {
    let view = camera.get_bounds();

    frame.frame = time.frame_count;
    frame.camera_offset = camera.apply_transform();
    frame.view = view;
    frame.body = query
        .single()
        .ok()
        .map(|(position, size, hitbox, body, facing, state)| BodyView {
            rect: Rect::from_pos_size(position.pos, size.size),
            hitbox: hitbox.world_rect(position.pos),
            velocity: body.velocity,
            grounded: body.grounded,
            facing: *facing,
            clip: state.clip_name(),
        });

    frame.visible_colliders.clear();
    frame.visible_colliders.extend(
        level
            .iter()
            .enumerate()
            .filter(|(_, collider)| aabb(&view, &collider.rect))
            .map(|(index, _)| index),
    );
}
