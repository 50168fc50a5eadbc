//! Per-step snapshot handed to a renderer.
//!
//! The simulation never draws. After the camera update, the render-frame
//! system fills a [`RenderFrame`] with everything a presentation layer needs:
//! the world-layer offset, the followed body, and the colliders visible
//! through the camera.

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use serde::Serialize;

use crate::components::inputcontrolled::Facing;
use crate::geometry::Rect;

/// Drawable view of a body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyView {
    pub rect: Rect,
    pub hitbox: Rect,
    pub velocity: Vec2,
    pub grounded: bool,
    pub facing: Facing,
    pub clip: &'static str,
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderFrame {
    pub frame: u64,
    /// Translation to apply to the world layer, `(-x, -y)` of the camera.
    pub camera_offset: Vec2,
    /// Visible world rectangle.
    pub view: Rect,
    pub body: Option<BodyView>,
    /// Load-order indices of the colliders overlapping `view`.
    pub visible_colliders: Vec<usize>,
}
