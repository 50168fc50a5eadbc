//! Animation state derived from body motion.
//!
//! The simulation never plays animations; it only publishes which clip a
//! renderer should show. [`AnimationState`] is a closed enum and
//! [`AnimationState::next`] is the whole transition table, a pure function of
//! velocity, grounding and facing.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::Serialize;

use crate::components::inputcontrolled::Facing;

/// Downward speed above which a body is shown as falling.
pub const FALL_THRESHOLD: f32 = 0.5;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum AnimationState {
    #[default]
    Idle,
    IdleLeft,
    Run,
    RunLeft,
    Jump,
    JumpLeft,
    Fall,
    FallLeft,
}

/// Facing-independent pose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    Idle,
    Run,
    Jump,
    Fall,
}

impl AnimationState {
    pub fn from_pose(pose: Pose, facing: Facing) -> Self {
        match (pose, facing) {
            (Pose::Idle, Facing::Right) => AnimationState::Idle,
            (Pose::Idle, Facing::Left) => AnimationState::IdleLeft,
            (Pose::Run, Facing::Right) => AnimationState::Run,
            (Pose::Run, Facing::Left) => AnimationState::RunLeft,
            (Pose::Jump, Facing::Right) => AnimationState::Jump,
            (Pose::Jump, Facing::Left) => AnimationState::JumpLeft,
            (Pose::Fall, Facing::Right) => AnimationState::Fall,
            (Pose::Fall, Facing::Left) => AnimationState::FallLeft,
        }
    }

    pub fn pose(self) -> Pose {
        match self {
            AnimationState::Idle | AnimationState::IdleLeft => Pose::Idle,
            AnimationState::Run | AnimationState::RunLeft => Pose::Run,
            AnimationState::Jump | AnimationState::JumpLeft => Pose::Jump,
            AnimationState::Fall | AnimationState::FallLeft => Pose::Fall,
        }
    }

    /// Transition from `self` given the current motion.
    ///
    /// Rules, first match wins:
    /// 1. falling faster than [`FALL_THRESHOLD`] -> Fall
    /// 2. airborne and rising -> Jump
    /// 3. grounded with horizontal motion -> Run
    /// 4. fully at rest -> Idle
    /// 5. otherwise keep the current pose, re-oriented to `facing`
    pub fn next(self, velocity: Vec2, grounded: bool, facing: Facing) -> Self {
        let pose = if velocity.y > FALL_THRESHOLD {
            Pose::Fall
        } else if !grounded && velocity.y < 0.0 {
            Pose::Jump
        } else if grounded && velocity.x != 0.0 {
            Pose::Run
        } else if velocity == Vec2::ZERO {
            Pose::Idle
        } else {
            self.pose()
        };
        Self::from_pose(pose, facing)
    }

    /// Clip key a renderer can use to look up frames.
    pub fn clip_name(self) -> &'static str {
        match self {
            AnimationState::Idle => "IDLE",
            AnimationState::IdleLeft => "IDLE_LEFT",
            AnimationState::Run => "RUN",
            AnimationState::RunLeft => "RUN_LEFT",
            AnimationState::Jump => "JUMP",
            AnimationState::JumpLeft => "JUMP_LEFT",
            AnimationState::Fall => "FALL",
            AnimationState::FallLeft => "FALL_LEFT",
        }
    }
}
