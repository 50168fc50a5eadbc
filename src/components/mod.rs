//! ECS components for the simulated bodies.
//!
//! Components hold plain data; the behaviour lives in [`crate::systems`].
//!
//! Submodules overview:
//! - [`animation`] – closed set of animation states and their transition rule
//! - [`boxcollider`] – hitbox rectangle relative to the body position
//! - [`inputcontrolled`] – marker for the input-driven body and its facing
//! - [`mapposition`] – world-space top-left position of a body
//! - [`rigidbody`] – velocity, grounding, size and movement tuning

pub mod animation;
pub mod boxcollider;
pub mod inputcontrolled;
pub mod mapposition;
pub mod rigidbody;
