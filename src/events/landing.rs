//! Landing event.
//!
//! Fired when a body that was airborne at the start of the gravity pass ends
//! the step grounded. A body resting on a collider keeps a small gap above it
//! and re-lands every few steps, so observers see repeated landings there.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

/// What the body landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingSurface {
    /// Static collider, by load-order index.
    Collider(usize),
    /// Bottom edge of the world.
    WorldFloor,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct LandingEvent {
    pub entity: Entity,
    pub surface: LandingSurface,
    /// Downward speed at touchdown.
    pub impact_speed: f32,
}

pub fn landing_observer(trigger: On<LandingEvent>) {
    let event = trigger.event();
    debug!(
        "{:?} landed on {:?} at speed {}",
        event.entity, event.surface, event.impact_speed
    );
}
