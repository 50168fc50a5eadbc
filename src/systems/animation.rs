//! Animation state system.
//!
//! Runs right after horizontal movement, before collision: it sees this
//! step's horizontal velocity together with the grounding and vertical
//! velocity left by the previous step.

use bevy_ecs::prelude::*;

use crate::components::animation::AnimationState;
use crate::components::inputcontrolled::Facing;
use crate::components::rigidbody::RigidBody;

pub fn animation_state(mut query: Query<(&RigidBody, &Facing, &mut AnimationState)>) {
    for (body, facing, mut state) in query.iter_mut() {
        let next = state.next(body.velocity, body.grounded, *facing);
        // avoid tripping change detection when nothing changed
        if next != *state {
            *state = next;
        }
    }
}
