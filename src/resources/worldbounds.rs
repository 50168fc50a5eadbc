use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::error::SimError;

/// Size of the playable area. Bodies are clamped into it every step.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub size: Vec2,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(SimError::config(format!(
                "world bounds must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            size: Vec2::new(width, height),
        })
    }

    /// Largest top-left position a body of `body_size` may occupy.
    pub fn max_position(&self, body_size: Vec2) -> Vec2 {
        (self.size - body_size).max(Vec2::ZERO)
    }
}
