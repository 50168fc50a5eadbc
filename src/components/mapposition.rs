use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::Serialize;

/// World-space position of a body's top-left corner.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}
