//! Axis-aligned rectangle helpers shared by the collision and camera code.
//!
//! Rectangles use a top-left origin: `right = x + width`, `bottom = y + height`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from a top-left corner and a size.
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Boundary-inclusive AABB test: rectangles that only share an edge
    /// count as overlapping.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.bottom() >= other.top()
            && self.top() <= other.bottom()
            && self.left() <= other.right()
            && self.right() >= other.left()
    }

    /// True when `other` lies completely inside `self` (edges included).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.top() >= self.top()
            && other.bottom() <= self.bottom()
    }
}

/// Free-function form of [`Rect::overlaps`].
pub fn aabb(a: &Rect, b: &Rect) -> bool {
    a.overlaps(b)
}

/// Linear interpolation from `start` towards `end` by factor `t`.
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}
