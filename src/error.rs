//! Error types for simulation setup.
//!
//! Every variant is raised while building the world (configuration, level
//! loading, body construction). A running step never fails: missed
//! collisions, airborne jumps and conflicting input are ordinary control flow.

use thiserror::Error;

use crate::geometry::Rect;

/// Errors raised before the first simulation step.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid construction parameter (deadzone larger than viewport,
    /// non-positive block size, negative gravity, ...).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A hitbox with zero or negative extent.
    #[error("degenerate hitbox geometry: {width}x{height}")]
    DegenerateGeometry { width: f32, height: f32 },

    /// A hitbox that pokes out of the body's visual bounds.
    #[error("hitbox {hitbox:?} does not fit inside body bounds {bounds:?}")]
    HitboxOutOfBounds { hitbox: Rect, bounds: Rect },

    #[error("failed to read level file: {0}")]
    LevelRead(#[from] std::io::Error),

    #[error("failed to parse level file: {0}")]
    LevelParse(#[from] serde_json::Error),

    /// Malformed input timeline, e.g. `R:60,X:3`.
    #[error("invalid input script: {0}")]
    Script(String),
}

impl SimError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SimError::Configuration(msg.into())
    }
}
