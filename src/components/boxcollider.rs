use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::Serialize;

use crate::error::SimError;
use crate::geometry::Rect;

/// Hitbox of a moving body: a sub-rectangle of its visual bounds, expressed
/// relative to the body's top-left corner. All collision tests use this
/// rectangle instead of the full bounds.
#[derive(Debug, Clone, Copy, PartialEq, Component, Serialize)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a hitbox covering `width x height` at the body origin.
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(SimError::DegenerateGeometry { width, height });
        }
        Ok(Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
        })
    }

    /// Modify the hitbox with the given offset from the body origin.
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Check that the hitbox lies inside visual bounds of `body_size`.
    pub fn fit_within(self, body_size: Vec2) -> Result<Self, SimError> {
        let bounds = Rect::from_pos_size(Vec2::ZERO, body_size);
        let local = self.local_rect();
        if !bounds.contains_rect(&local) {
            return Err(SimError::HitboxOutOfBounds {
                hitbox: local,
                bounds,
            });
        }
        Ok(self)
    }

    pub fn local_rect(&self) -> Rect {
        Rect::from_pos_size(self.offset, self.size)
    }

    /// Hitbox in world space for a body whose top-left corner is `position`.
    pub fn world_rect(&self, position: Vec2) -> Rect {
        Rect::from_pos_size(position + self.offset, self.size)
    }

    /// Distance from the body origin to the hitbox's right edge.
    pub fn right_extent(&self) -> f32 {
        self.offset.x + self.size.x
    }

    /// Distance from the body origin to the hitbox's bottom edge.
    pub fn bottom_extent(&self) -> f32 {
        self.offset.y + self.size.y
    }
}
