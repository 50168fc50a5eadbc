//! Simulation systems.
//!
//! Each submodule exposes plain functions with the actual math plus thin
//! `bevy_ecs` systems around them. [`crate::game::build_step_schedule`] chains
//! the systems in their fixed per-step order.
//!
//! Submodules overview
//! - [`animation`] – re-derive the animation state after horizontal movement
//! - [`camera`] – hand the body bounds and look direction to the camera
//! - [`collision`] – first-match resolution against static colliders, per axis
//! - [`physics`] – horizontal acceleration, momentum envelope and gravity
//! - [`playercontroller`] – facing and jump from the input snapshot
//! - [`render`] – collect the per-step render frame
//! - [`time`] – advance simulation time
//! - [`worldbounds`] – clamp bodies into the world rectangle

pub mod animation;
pub mod camera;
pub mod collision;
pub mod physics;
pub mod playercontroller;
pub mod render;
pub mod time;
pub mod worldbounds;
