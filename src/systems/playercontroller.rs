//! Input-driven player controller.
//!
//! First system of a step: turns the [`InputState`] snapshot into facing and
//! jump actions. Horizontal velocity itself is handled by
//! [`crate::systems::physics::horizontal_movement`].

use bevy_ecs::prelude::*;

use crate::components::inputcontrolled::{Facing, PlayerControlled};
use crate::components::rigidbody::{BodyTuning, RigidBody};
use crate::events::jump::JumpEvent;
use crate::resources::input::InputState;

pub fn player_controller(
    mut query: Query<(Entity, &mut RigidBody, &mut Facing, &BodyTuning), With<PlayerControlled>>,
    input: Res<InputState>,
    mut commands: Commands,
) {
    let intent = input.horizontal_intent();
    for (entity, mut body, mut facing, tuning) in query.iter_mut() {
        let next = facing.turned_toward(intent);
        if next != *facing {
            *facing = next;
        }

        // Airborne jump requests are dropped silently.
        if input.jump && body.jump(tuning.jump_power) {
            commands.trigger(JumpEvent {
                entity,
                power: tuning.jump_power,
            });
        }
    }
}
