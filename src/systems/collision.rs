//! Collision resolution against the static level colliders.
//!
//! Each axis is resolved separately, horizontal first. For a moving body the
//! colliders are scanned in load order and the **first** one overlapping the
//! hitbox wins: the body is pushed out against that collider and the velocity
//! on that axis is zeroed. Deeper overlaps with later colliders are left for
//! following steps. The pushed-out hitbox keeps a `collision_offset` gap to
//! the collider so the next step does not start inside it.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::inputcontrolled::PlayerControlled;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::events::collision::{CollisionEvent, CollisionSide};
use crate::events::landing::{LandingEvent, LandingSurface};
use crate::geometry::aabb;
use crate::resources::gameconfig::GameConfig;
use crate::resources::tilemap::{LevelColliders, StaticCollider};

/// Outcome of a resolved collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index of the collider in load order.
    pub collider: usize,
    pub side: CollisionSide,
    /// Absolute speed on the resolved axis before it was zeroed.
    pub impact_speed: f32,
}

fn first_overlap<'a>(
    position: &MapPosition,
    hitbox: &BoxCollider,
    colliders: &'a [StaticCollider],
) -> Option<(usize, &'a StaticCollider)> {
    let hb = hitbox.world_rect(position.pos);
    colliders
        .iter()
        .enumerate()
        .find(|(_, collider)| aabb(&hb, &collider.rect))
}

/// Push the body out of the first collider its hitbox overlaps, along x.
///
/// Does nothing when the body is not moving horizontally.
pub fn resolve_horizontal(
    position: &mut MapPosition,
    body: &mut RigidBody,
    hitbox: &BoxCollider,
    colliders: &[StaticCollider],
    collision_offset: f32,
) -> Option<Contact> {
    let vx = body.velocity.x;
    if vx == 0.0 {
        return None;
    }
    let (index, collider) = first_overlap(position, hitbox, colliders)?;

    let side = if vx > 0.0 {
        position.pos.x = collider.rect.left() - hitbox.right_extent() - collision_offset;
        CollisionSide::Right
    } else {
        position.pos.x = collider.rect.right() - hitbox.offset.x + collision_offset;
        CollisionSide::Left
    };
    body.velocity.x = 0.0;

    Some(Contact {
        collider: index,
        side,
        impact_speed: vx.abs(),
    })
}

/// Push the body out of the first collider its hitbox overlaps, along y.
///
/// Falling onto a collider grounds the body; rising into one only stops it.
pub fn resolve_vertical(
    position: &mut MapPosition,
    body: &mut RigidBody,
    hitbox: &BoxCollider,
    colliders: &[StaticCollider],
    collision_offset: f32,
) -> Option<Contact> {
    let vy = body.velocity.y;
    if vy == 0.0 {
        return None;
    }
    let (index, collider) = first_overlap(position, hitbox, colliders)?;

    let side = if vy > 0.0 {
        body.grounded = true;
        position.pos.y = collider.rect.top() - hitbox.bottom_extent() - collision_offset;
        CollisionSide::Bottom
    } else {
        position.pos.y = collider.rect.bottom() - hitbox.offset.y + collision_offset;
        CollisionSide::Top
    };
    body.velocity.y = 0.0;

    Some(Contact {
        collider: index,
        side,
        impact_speed: vy.abs(),
    })
}

pub fn horizontal_collision(
    mut query: Query<
        (Entity, &mut MapPosition, &mut RigidBody, &BoxCollider),
        With<PlayerControlled>,
    >,
    level: Res<LevelColliders>,
    config: Res<GameConfig>,
    mut commands: Commands,
) {
    for (entity, mut position, mut body, hitbox) in query.iter_mut() {
        if let Some(contact) = resolve_horizontal(
            &mut position,
            &mut body,
            hitbox,
            level.as_slice(),
            config.collision_offset,
        ) {
            trigger_contact(&mut commands, entity, contact);
        }
    }
}

pub fn vertical_collision(
    mut query: Query<
        (Entity, &mut MapPosition, &mut RigidBody, &BoxCollider),
        With<PlayerControlled>,
    >,
    level: Res<LevelColliders>,
    config: Res<GameConfig>,
    mut commands: Commands,
) {
    for (entity, mut position, mut body, hitbox) in query.iter_mut() {
        if let Some(contact) = resolve_vertical(
            &mut position,
            &mut body,
            hitbox,
            level.as_slice(),
            config.collision_offset,
        ) {
            if contact.side == CollisionSide::Bottom && !body.was_grounded {
                commands.trigger(LandingEvent {
                    entity,
                    surface: LandingSurface::Collider(contact.collider),
                    impact_speed: contact.impact_speed,
                });
            }
            trigger_contact(&mut commands, entity, contact);
        }
    }
}

fn trigger_contact(commands: &mut Commands, entity: Entity, contact: Contact) {
    commands.trigger(CollisionEvent {
        entity,
        collider: contact.collider,
        side: contact.side,
        impact_speed: contact.impact_speed,
    });
}
