//! Input-controlled body markers.
//!
//! Systems in [`crate::systems::playercontroller`] read the shared
//! [`InputState`](crate::resources::input::InputState) and apply it to every
//! entity carrying [`PlayerControlled`]. The single [`CameraTarget`] body is
//! the one the camera follows.

use bevy_ecs::prelude::Component;
use serde::Serialize;

/// Marks a body driven by the input snapshot.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PlayerControlled;

/// Marks the body the camera follows and the render frame reports.
///
/// At most one entity may carry it; with none or several the camera holds
/// still and the render frame has no body.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct CameraTarget;

/// Horizontal direction the body is facing.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal intent sign. Zero keeps `self`.
    pub fn turned_toward(self, intent: f32) -> Facing {
        if intent > 0.0 {
            Facing::Right
        } else if intent < 0.0 {
            Facing::Left
        } else {
            self
        }
    }
}
