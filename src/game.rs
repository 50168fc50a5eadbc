//! World construction and the per-step schedule.
//!
//! [`Simulation`] owns a `bevy_ecs` [`World`] holding one controlled body, the
//! static level colliders and the follow camera, plus the chained step
//! schedule. Callers hand it one [`InputState`] and a frame delta per step.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use glam::Vec2;
use log::{info, warn};
use serde::Serialize;

use crate::components::animation::AnimationState;
use crate::components::inputcontrolled::{CameraTarget, Facing, PlayerControlled};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::{BodySize, RigidBody};
use crate::error::SimError;
use crate::events::collision::collision_observer;
use crate::events::jump::jump_observer;
use crate::events::landing::landing_observer;
use crate::geometry::Rect;
use crate::resources::camera2d::FollowCamera;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::momentum::MomentumEnvelope;
use crate::resources::renderframe::RenderFrame;
use crate::resources::tilemap::{FLOOR_TILE, LevelColliders, LevelData, SolidRule, TileLayer};
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation_state;
use crate::systems::camera::camera_follow;
use crate::systems::collision::{horizontal_collision, vertical_collision};
use crate::systems::physics::{gravity, horizontal_movement, reset_horizontal_velocity};
use crate::systems::playercontroller::player_controller;
use crate::systems::render::collect_render_frame;
use crate::systems::time::update_world_time;
use crate::systems::worldbounds::world_bounds;

/// Tile id used for the platforms of [`default_level`].
const PLATFORM_TILE: u32 = 7;

/// Build the step schedule.
///
/// The order is fixed: input, horizontal movement, animation, horizontal
/// collision, velocity re-zero, gravity, vertical collision, world bounds,
/// camera, render frame. Commands (event triggers) are applied between the
/// chained systems.
pub fn build_step_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            player_controller,
            horizontal_movement,
            animation_state,
            horizontal_collision,
            reset_horizontal_velocity,
            gravity,
            vertical_collision,
            world_bounds,
            camera_follow,
            collect_render_frame,
        )
            .chain(),
    );
    schedule
}

/// A small test level sized to the configured world: a two-row floor, one
/// floating platform and a low wall.
///
/// The configuration is validated first, since the grid size is derived
/// from the world size and block size.
pub fn default_level(config: &GameConfig) -> Result<LevelData, SimError> {
    config.validate()?;
    let columns = (config.world_width / config.block_size).ceil().max(1.0) as usize;
    let rows = (config.world_height / config.block_size).ceil().max(1.0) as usize;

    let mut floor = vec![0; columns * rows];
    for row in rows.saturating_sub(2)..rows {
        floor[row * columns..(row + 1) * columns].fill(FLOOR_TILE);
    }

    let mut platforms = vec![0; columns * rows];
    let mut put = |column: usize, row: usize| {
        if column < columns && row < rows {
            platforms[row * columns + column] = PLATFORM_TILE;
        }
    };
    let platform_row = rows.saturating_sub(8);
    for column in columns / 3..columns / 3 + 8 {
        put(column, platform_row);
    }
    let wall_column = columns.saturating_sub(10);
    for row in rows.saturating_sub(4)..rows.saturating_sub(2) {
        put(wall_column, row);
        put(wall_column + 1, row);
    }

    Ok(LevelData {
        block_size: config.block_size,
        row_length: columns,
        layers: vec![
            TileLayer {
                name: "floor".to_string(),
                solid: SolidRule::Sentinel(FLOOR_TILE),
                tiles: floor,
            },
            TileLayer {
                name: "platforms".to_string(),
                solid: SolidRule::AnyNonZero,
                tiles: platforms,
            },
        ],
    })
}

/// Populate `world` with the configuration, level and controlled body.
///
/// Every parameter is validated before anything is inserted; on error the
/// world is left untouched. Returns the controlled body's entity.
pub fn setup_world(
    world: &mut World,
    config: GameConfig,
    level: &LevelData,
) -> Result<Entity, SimError> {
    config.validate()?;
    let bounds = config.world_bounds()?;
    let colliders: LevelColliders = level.build_colliders()?;
    if level.block_size != config.block_size {
        warn!(
            "Level block size {} differs from configured {}; using the level's",
            level.block_size, config.block_size
        );
    }

    let mut camera = FollowCamera::new(config.camera_options())?;
    let body = config.body;
    let hitbox = body.hitbox()?;
    let spawn = MapPosition {
        pos: body.spawn.clamp(Vec2::ZERO, bounds.max_position(body.size)),
    };
    if spawn.pos != body.spawn {
        warn!("Spawn point {:?} clamped into world to {:?}", body.spawn, spawn.pos);
    }
    camera.snap_to(Rect::from_pos_size(spawn.pos, body.size));

    info!(
        "World {}x{} with {} colliders, body spawned at ({}, {})",
        bounds.size.x,
        bounds.size.y,
        colliders.len(),
        spawn.pos.x,
        spawn.pos.y
    );

    world.insert_resource(bounds);
    world.insert_resource(colliders);
    world.insert_resource(camera);
    world.insert_resource(InputState::default());
    world.insert_resource(WorldTime::default());
    world.insert_resource(MomentumEnvelope::default());
    world.insert_resource(RenderFrame::default());
    world.insert_resource(config);

    let player = world
        .spawn((
            spawn,
            BodySize { size: body.size },
            RigidBody::new(),
            body.tuning,
            hitbox,
            Facing::default(),
            AnimationState::default(),
            PlayerControlled,
            CameraTarget,
        ))
        .id();

    world.spawn(Observer::new(collision_observer));
    world.spawn(Observer::new(jump_observer));
    world.spawn(Observer::new(landing_observer));
    world.flush();

    Ok(player)
}

/// Observable state of the controlled body after a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub grounded: bool,
    pub facing: Facing,
    pub animation: AnimationState,
}

/// Full output of a step, as dumped by the binary.
#[derive(Debug, Clone, Serialize)]
pub struct StepSnapshot {
    pub frame: u64,
    pub body: Option<BodySnapshot>,
    pub camera_position: Vec2,
    pub camera_offset: Vec2,
    pub look_ahead: f32,
    pub render: RenderFrame,
}

/// Headless simulation: a world plus its step schedule.
pub struct Simulation {
    world: World,
    schedule: Schedule,
    player: Entity,
}

impl Simulation {
    pub fn new(config: GameConfig, level: &LevelData) -> Result<Self, SimError> {
        let mut world = World::new();
        let player = setup_world(&mut world, config, level)?;
        Ok(Self {
            world,
            schedule: build_step_schedule(),
            player,
        })
    }

    /// Advance one step with `input`, `dt` display frames long.
    ///
    /// A negative or non-finite `dt` is treated as zero.
    pub fn step(&mut self, input: InputState, dt: f32) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!("Ignoring invalid frame delta {dt}");
            0.0
        };
        update_world_time(&mut self.world, dt);
        *self.world.resource_mut::<InputState>() = input;
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn body(&self) -> Option<BodySnapshot> {
        let entity = self.world.get_entity(self.player).ok()?;
        Some(BodySnapshot {
            position: entity.get::<MapPosition>()?.pos,
            velocity: entity.get::<RigidBody>()?.velocity,
            grounded: entity.get::<RigidBody>()?.grounded,
            facing: *entity.get::<Facing>()?,
            animation: *entity.get::<AnimationState>()?,
        })
    }

    pub fn camera(&self) -> &FollowCamera {
        self.world.resource::<FollowCamera>()
    }

    /// Resize the camera viewport between steps.
    pub fn resize_viewport(&mut self, width: f32, height: f32) -> Result<(), SimError> {
        self.world
            .resource_mut::<FollowCamera>()
            .update_viewport(width, height)
    }

    pub fn render_frame(&self) -> &RenderFrame {
        self.world.resource::<RenderFrame>()
    }

    pub fn colliders(&self) -> &LevelColliders {
        self.world.resource::<LevelColliders>()
    }

    pub fn frame_count(&self) -> u64 {
        self.world.resource::<WorldTime>().frame_count
    }

    pub fn snapshot(&self) -> StepSnapshot {
        let camera = self.camera();
        StepSnapshot {
            frame: self.frame_count(),
            body: self.body(),
            camera_position: camera.position(),
            camera_offset: camera.apply_transform(),
            look_ahead: camera.current_look_ahead(),
            render: self.render_frame().clone(),
        }
    }
}
