//! Jump event, fired when a grounded body leaves the floor by jumping.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

#[derive(Event, Debug, Clone, Copy)]
pub struct JumpEvent {
    pub entity: Entity,
    /// Upward speed given to the body.
    pub power: f32,
}

pub fn jump_observer(trigger: On<JumpEvent>) {
    let event = trigger.event();
    debug!("{:?} jumped with power {}", event.entity, event.power);
}
