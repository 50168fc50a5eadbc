//! Shared 2D follow camera resource.
//!
//! [`FollowCamera`] tracks a target rectangle with three layered behaviours:
//!
//! 1. **Look-ahead** – a horizontal bias towards the direction of travel that
//!    eases in quickly (rate 0.05) and settles back slowly (rate 0.02).
//! 2. **Deadzone** – the stored target only moves when the tracked centre
//!    leaves a box centred on the *stored target*, so small movements do not
//!    shift the view.
//! 3. **Smoothing** – the live position approaches the stored target by a
//!    fixed fraction every update. The fraction is per call, not per second,
//!    so the smoothing speed depends on the frame rate.
//!
//! The camera never touches rendering state; [`FollowCamera::apply_transform`]
//! returns the offset a renderer should apply to the world layer.

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::geometry::{Rect, lerp};

pub const DEFAULT_SMOOTHING: f32 = 0.1;
pub const DEADZONE_WIDTH_RATIO: f32 = 0.3;
pub const DEADZONE_HEIGHT_RATIO: f32 = 0.4;
pub const DEFAULT_LOOK_AHEAD: f32 = 80.0;
/// Easing rate towards an active look-ahead direction.
pub const LOOK_AHEAD_RATE: f32 = 0.05;
/// Easing rate back to neutral when no direction is given.
pub const LOOK_AHEAD_DECAY_RATE: f32 = 0.02;

/// Direction signal used for look-ahead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookDirection {
    Left,
    Right,
    #[default]
    None,
}

/// Construction options. Unset optional fields take their defaults:
/// smoothing 0.1, deadzone 0.3 x 0.4 of the viewport, look-ahead 80.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraOptions {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub world_width: f32,
    pub world_height: f32,
    pub smoothing: Option<f32>,
    pub deadzone_width: Option<f32>,
    pub deadzone_height: Option<f32>,
    pub look_ahead_distance: Option<f32>,
}

impl CameraOptions {
    pub fn new(viewport_width: f32, viewport_height: f32, world_width: f32, world_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            world_width,
            world_height,
            smoothing: None,
            deadzone_width: None,
            deadzone_height: None,
            look_ahead_distance: None,
        }
    }
}

/// ECS resource holding the camera state.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FollowCamera {
    pos: Vec2,
    target: Vec2,
    viewport: Vec2,
    world: Vec2,
    smoothing: f32,
    deadzone: Vec2,
    look_ahead_distance: f32,
    current_look_ahead: f32,
}

fn check_viewport(viewport: Vec2, world: Vec2) -> Result<(), SimError> {
    if !(viewport.x > 0.0 && viewport.y > 0.0) {
        return Err(SimError::config(format!(
            "viewport must be positive, got {}x{}",
            viewport.x, viewport.y
        )));
    }
    if !(world.x >= viewport.x && world.y >= viewport.y) {
        return Err(SimError::config(format!(
            "world {}x{} is smaller than viewport {}x{}",
            world.x, world.y, viewport.x, viewport.y
        )));
    }
    Ok(())
}

impl FollowCamera {
    pub fn new(options: CameraOptions) -> Result<Self, SimError> {
        let viewport = Vec2::new(options.viewport_width, options.viewport_height);
        let world = Vec2::new(options.world_width, options.world_height);
        check_viewport(viewport, world)?;

        let smoothing = options.smoothing.unwrap_or(DEFAULT_SMOOTHING);
        if !(smoothing > 0.0 && smoothing < 1.0) {
            return Err(SimError::config(format!(
                "camera smoothing must be in (0, 1), got {smoothing}"
            )));
        }

        let deadzone = Vec2::new(
            options
                .deadzone_width
                .unwrap_or(viewport.x * DEADZONE_WIDTH_RATIO),
            options
                .deadzone_height
                .unwrap_or(viewport.y * DEADZONE_HEIGHT_RATIO),
        );
        if !(deadzone.x >= 0.0 && deadzone.y >= 0.0) {
            return Err(SimError::config("camera deadzone must be non-negative"));
        }
        if deadzone.x > viewport.x || deadzone.y > viewport.y {
            return Err(SimError::config(format!(
                "deadzone {}x{} exceeds viewport {}x{}",
                deadzone.x, deadzone.y, viewport.x, viewport.y
            )));
        }

        let look_ahead_distance = options.look_ahead_distance.unwrap_or(DEFAULT_LOOK_AHEAD);
        if !(look_ahead_distance >= 0.0) {
            return Err(SimError::config(format!(
                "look-ahead distance must be non-negative, got {look_ahead_distance}"
            )));
        }

        Ok(Self {
            pos: Vec2::ZERO,
            target: Vec2::ZERO,
            viewport,
            world,
            smoothing,
            deadzone,
            look_ahead_distance,
            current_look_ahead: 0.0,
        })
    }

    /// Update the camera to follow `target`.
    pub fn follow(&mut self, target: Rect, direction: LookDirection) {
        let center = target.center();

        let (goal, rate) = match direction {
            LookDirection::Right => (self.look_ahead_distance, LOOK_AHEAD_RATE),
            LookDirection::Left => (-self.look_ahead_distance, LOOK_AHEAD_RATE),
            LookDirection::None => (0.0, LOOK_AHEAD_DECAY_RATE),
        };
        self.current_look_ahead = lerp(self.current_look_ahead, goal, rate);

        let focal = Vec2::new(
            center.x - self.viewport.x / 2.0 + self.current_look_ahead,
            center.y - self.viewport.y / 2.0,
        );

        // Deadzone is centred on the stored target, not the live position.
        let dz_min = self.target + (self.viewport - self.deadzone) / 2.0;
        let dz_max = dz_min + self.deadzone;
        if center.x < dz_min.x || center.x > dz_max.x {
            self.target.x = focal.x;
        }
        if center.y < dz_min.y || center.y > dz_max.y {
            self.target.y = focal.y;
        }

        self.target = self.clamp_to_world(self.target);

        self.pos.x = lerp(self.pos.x, self.target.x, self.smoothing);
        self.pos.y = lerp(self.pos.y, self.target.y, self.smoothing);
    }

    /// Centre on `target` immediately, without smoothing or look-ahead.
    pub fn snap_to(&mut self, target: Rect) {
        let center = target.center();
        self.target = self.clamp_to_world(center - self.viewport / 2.0);
        self.pos = self.target;
    }

    /// Offset to apply to the world layer: the negated camera position.
    pub fn apply_transform(&self) -> Vec2 {
        -self.pos
    }

    /// Resize the viewport. The deadzone is reset to its default proportion
    /// of the new size and the camera is re-clamped into the world.
    pub fn update_viewport(&mut self, width: f32, height: f32) -> Result<(), SimError> {
        let viewport = Vec2::new(width, height);
        check_viewport(viewport, self.world)?;
        self.viewport = viewport;
        self.deadzone = Vec2::new(width * DEADZONE_WIDTH_RATIO, height * DEADZONE_HEIGHT_RATIO);
        self.target = self.clamp_to_world(self.target);
        self.pos = self.clamp_to_world(self.pos);
        Ok(())
    }

    /// Visible world rectangle, for culling.
    pub fn get_bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.viewport)
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn deadzone(&self) -> Vec2 {
        self.deadzone
    }

    pub fn current_look_ahead(&self) -> f32 {
        self.current_look_ahead
    }

    fn clamp_to_world(&self, p: Vec2) -> Vec2 {
        p.clamp(Vec2::ZERO, self.world - self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn camera() -> FollowCamera {
        FollowCamera::new(CameraOptions::new(320.0, 180.0, 2000.0, 1000.0)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cam = camera();
        assert!(approx_eq(cam.deadzone().x, 96.0));
        assert!(approx_eq(cam.deadzone().y, 72.0));
        assert_eq!(cam.position(), Vec2::ZERO);
        assert_eq!(cam.current_look_ahead(), 0.0);
    }

    #[test]
    fn test_deadzone_larger_than_viewport_rejected() {
        let mut opts = CameraOptions::new(320.0, 180.0, 2000.0, 1000.0);
        opts.deadzone_width = Some(400.0);
        assert!(matches!(
            FollowCamera::new(opts),
            Err(SimError::Configuration(_))
        ));
    }

    #[test]
    fn test_smoothing_out_of_range_rejected() {
        for s in [0.0, 1.0, -0.5, 1.5] {
            let mut opts = CameraOptions::new(320.0, 180.0, 2000.0, 1000.0);
            opts.smoothing = Some(s);
            assert!(FollowCamera::new(opts).is_err(), "smoothing {s}");
        }
    }

    #[test]
    fn test_world_smaller_than_viewport_rejected() {
        assert!(FollowCamera::new(CameraOptions::new(320.0, 180.0, 100.0, 1000.0)).is_err());
    }

    #[test]
    fn test_snap_to_centres_and_clamps() {
        let mut cam = camera();
        cam.snap_to(Rect::new(600.0, 500.0, 40.0, 40.0));
        assert_eq!(cam.position(), Vec2::new(620.0 - 160.0, 520.0 - 90.0));
        assert_eq!(cam.target(), cam.position());

        cam.snap_to(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(cam.position(), Vec2::ZERO);

        cam.snap_to(Rect::new(1990.0, 990.0, 10.0, 10.0));
        assert_eq!(cam.position(), Vec2::new(1680.0, 820.0));
    }

    #[test]
    fn test_apply_transform_negates_position() {
        let mut cam = camera();
        cam.snap_to(Rect::new(600.0, 500.0, 40.0, 40.0));
        assert_eq!(cam.apply_transform(), -cam.position());
    }

    #[test]
    fn test_get_bounds() {
        let mut cam = camera();
        cam.snap_to(Rect::new(600.0, 500.0, 40.0, 40.0));
        let b = cam.get_bounds();
        assert_eq!(b.left(), 460.0);
        assert_eq!(b.right(), 780.0);
        assert_eq!(b.top(), 430.0);
        assert_eq!(b.bottom(), 610.0);
    }

    #[test]
    fn test_smoothing_decays_geometrically_without_overshoot() {
        let mut cam = camera();
        let body = Rect::new(800.0, 600.0, 30.0, 50.0);
        cam.follow(body, LookDirection::None);
        let target = cam.target();
        let mut err = (target - cam.position()).length();
        assert!(err > 0.0);
        for _ in 0..50 {
            cam.follow(body, LookDirection::None);
            assert_eq!(cam.target(), target);
            let next = (target - cam.position()).length();
            assert!((next / err - 0.9).abs() < 1e-3, "{next} vs {}", err * 0.9);
            assert!(next < err);
            err = next;
        }
        // never passes the target
        assert!(cam.position().x <= target.x && cam.position().y <= target.y);
    }

    #[test]
    fn test_stored_target_still_inside_deadzone() {
        let mut cam = camera();
        cam.snap_to(Rect::new(600.0, 500.0, 20.0, 20.0));
        let stored = cam.target();
        // centre starts at (610, 510); deadzone spans +-48 x +-36 around it
        for dx in [0.0, 10.0, 30.0, -40.0, 45.0, -45.0] {
            cam.follow(Rect::new(600.0 + dx, 500.0 + dx / 2.0, 20.0, 20.0), LookDirection::None);
            assert_eq!(cam.target(), stored);
        }
    }

    #[test]
    fn test_leaving_deadzone_moves_target() {
        let mut cam = camera();
        cam.snap_to(Rect::new(600.0, 500.0, 20.0, 20.0));
        let stored = cam.target();
        cam.follow(Rect::new(700.0, 500.0, 20.0, 20.0), LookDirection::None);
        assert_eq!(cam.target().x, 710.0 - 160.0);
        assert_eq!(cam.target().y, stored.y);
    }

    #[test]
    fn test_look_ahead_leans_in_and_decays() {
        let mut cam = camera();
        let body = Rect::new(600.0, 500.0, 20.0, 20.0);
        cam.follow(body, LookDirection::Right);
        assert!(approx_eq(cam.current_look_ahead(), 4.0));
        for _ in 0..400 {
            cam.follow(body, LookDirection::Right);
        }
        assert!(approx_eq(cam.current_look_ahead(), 80.0));

        cam.follow(body, LookDirection::None);
        assert!(approx_eq(cam.current_look_ahead(), 80.0 * 0.98));
        for _ in 0..1000 {
            cam.follow(body, LookDirection::None);
        }
        assert!(cam.current_look_ahead().abs() < 1e-3);
    }

    #[test]
    fn test_look_ahead_left_is_negative() {
        let mut cam = camera();
        let body = Rect::new(600.0, 500.0, 20.0, 20.0);
        for _ in 0..10 {
            cam.follow(body, LookDirection::Left);
        }
        assert!(cam.current_look_ahead() < 0.0);
    }

    #[test]
    fn test_follow_keeps_camera_in_world() {
        let mut cam = camera();
        for (x, y) in [(-500.0, -500.0), (5000.0, 5000.0), (1000.0, 400.0)] {
            for _ in 0..20 {
                cam.follow(Rect::new(x, y, 30.0, 50.0), LookDirection::Right);
                let p = cam.position();
                assert!(p.x >= 0.0 && p.x <= 1680.0);
                assert!(p.y >= 0.0 && p.y <= 820.0);
            }
        }
    }

    #[test]
    fn test_update_viewport_resets_deadzone() {
        let mut cam = camera();
        cam.update_viewport(640.0, 360.0).unwrap();
        assert_eq!(cam.viewport(), Vec2::new(640.0, 360.0));
        assert!(approx_eq(cam.deadzone().x, 192.0));
        assert!(approx_eq(cam.deadzone().y, 144.0));
    }

    #[test]
    fn test_update_viewport_reclamps_position() {
        let mut cam = camera();
        cam.snap_to(Rect::new(1990.0, 990.0, 10.0, 10.0));
        cam.update_viewport(640.0, 360.0).unwrap();
        assert_eq!(cam.position(), Vec2::new(1360.0, 640.0));
    }

    #[test]
    fn test_update_viewport_rejects_oversized() {
        let mut cam = camera();
        assert!(cam.update_viewport(4000.0, 100.0).is_err());
        assert_eq!(cam.viewport(), Vec2::new(320.0, 180.0));
    }
}
