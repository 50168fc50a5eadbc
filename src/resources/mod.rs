//! ECS resources shared by the simulation systems.
//!
//! Overview
//! - `camera2d` – deadzone/look-ahead/smoothing follow camera
//! - `gameconfig` – INI-backed configuration of world, body and camera
//! - `input` – per-step movement and jump snapshot
//! - `momentum` – shared horizontal speed envelope
//! - `renderframe` – per-step snapshot for a renderer
//! - `tilemap` – level data and the static colliders built from it
//! - `worldbounds` – playable world rectangle
//! - `worldtime` – simulation time and delta
pub mod camera2d;
pub mod gameconfig;
pub mod input;
pub mod momentum;
pub mod renderframe;
pub mod tilemap;
pub mod worldbounds;
pub mod worldtime;
