//! Sidescroller simulation core.
//!
//! Deterministic, headless step simulation for a 2D side-scrolling
//! platformer: AABB collision against static tiles, a frame-unit physics
//! integrator and a smoothed follow camera. Exposed as a library for the
//! binary and the integration tests.

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod geometry;
pub mod resources;
pub mod script;
pub mod systems;
