//! Event types and observers.
//!
//! Systems trigger these events through `Commands`; observers registered by
//! [`crate::game`] only log them, and embedders may add their own.
//!
//! Submodules:
//! - [`collision`] – a body was pushed out of a static collider
//! - [`jump`] – a grounded body started a jump
//! - [`landing`] – an airborne body became grounded
pub mod collision;
pub mod jump;
pub mod landing;
