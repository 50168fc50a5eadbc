//! Collision event types and a logging observer.
//!
//! The collision systems trigger a [`CollisionEvent`] whenever a body's
//! position is corrected against a static collider. Observers can react in a
//! decoupled manner (sound, particles, screen shake) without touching the
//! resolver.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

/// Which side of the body hit the collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionSide {
    Left,
    Right,
    Top,
    Bottom,
}

/// Event fired when a body is pushed out of a static collider.
///
/// `collider` is the collider's index in load order within
/// [`LevelColliders`](crate::resources::tilemap::LevelColliders).
/// `impact_speed` is the absolute velocity component that was zeroed.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub entity: Entity,
    pub collider: usize,
    pub side: CollisionSide,
    pub impact_speed: f32,
}

/// Global observer that logs every resolved collision at debug level.
pub fn collision_observer(trigger: On<CollisionEvent>) {
    let event = trigger.event();
    debug!(
        "{:?} hit collider #{} on its {:?} side at speed {}",
        event.entity, event.collider, event.side, event.impact_speed
    );
}
