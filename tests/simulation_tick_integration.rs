//! Step integration tests for movement, collision, world bounds and camera.

use bevy_ecs::observer::{Observer, On};
use bevy_ecs::prelude::*;
use glam::Vec2;

use sidescroller::components::animation::AnimationState;
use sidescroller::components::boxcollider::BoxCollider;
use sidescroller::components::inputcontrolled::{Facing, PlayerControlled};
use sidescroller::components::mapposition::MapPosition;
use sidescroller::components::rigidbody::{BodySize, BodyTuning, RigidBody};
use sidescroller::events::collision::{CollisionEvent, CollisionSide};
use sidescroller::events::jump::JumpEvent;
use sidescroller::events::landing::{LandingEvent, LandingSurface};
use sidescroller::game::{Simulation, default_level};
use sidescroller::geometry::Rect;
use sidescroller::resources::camera2d::{CameraOptions, FollowCamera};
use sidescroller::resources::gameconfig::GameConfig;
use sidescroller::resources::input::InputState;
use sidescroller::resources::momentum::MomentumEnvelope;
use sidescroller::resources::tilemap::{LevelColliders, StaticCollider};
use sidescroller::resources::worldbounds::WorldBounds;
use sidescroller::resources::worldtime::WorldTime;
use sidescroller::systems::collision::{horizontal_collision, vertical_collision};
use sidescroller::systems::physics::{gravity, horizontal_movement};
use sidescroller::systems::time::update_world_time;
use sidescroller::systems::worldbounds::world_bounds;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Resource, Default)]
struct EventLog {
    collisions: Vec<CollisionEvent>,
    jumps: Vec<JumpEvent>,
    landings: Vec<LandingEvent>,
}

fn record_collision(trigger: On<CollisionEvent>, mut log: ResMut<EventLog>) {
    log.collisions.push(*trigger.event());
}

fn record_jump(trigger: On<JumpEvent>, mut log: ResMut<EventLog>) {
    log.jumps.push(*trigger.event());
}

fn record_landing(trigger: On<LandingEvent>, mut log: ResMut<EventLog>) {
    log.landings.push(*trigger.event());
}

fn install_event_log(world: &mut World) {
    world.insert_resource(EventLog::default());
    world.spawn(Observer::new(record_collision));
    world.spawn(Observer::new(record_jump));
    world.spawn(Observer::new(record_landing));
    world.flush();
}

/// World with a 20x20 body whose hitbox covers its whole sprite.
fn make_world(colliders: Vec<StaticCollider>) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(GameConfig::new());
    world.insert_resource(LevelColliders::new(colliders));
    world.insert_resource(WorldBounds::new(400.0, 300.0).unwrap());
    world.insert_resource(InputState::default());
    world.insert_resource(MomentumEnvelope::default());
    install_event_log(&mut world);
    world
}

fn spawn_body(world: &mut World, x: f32, y: f32, velocity: Vec2) -> Entity {
    world
        .spawn((
            MapPosition::new(x, y),
            BodySize::new(20.0, 20.0),
            RigidBody::with_velocity(velocity),
            BodyTuning::default(),
            BoxCollider::new(20.0, 20.0).unwrap(),
            Facing::default(),
            AnimationState::default(),
            PlayerControlled,
        ))
        .id()
}

fn tick_vertical(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((gravity, vertical_collision, world_bounds).chain());
    schedule.run(world);
}

fn tick_horizontal_collision(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(horizontal_collision);
    schedule.run(world);
}

fn sim() -> Simulation {
    let config = GameConfig::new();
    let level = default_level(&config).unwrap();
    let mut sim = Simulation::new(config, &level).unwrap();
    install_event_log(sim.world_mut());
    sim
}

fn settle(sim: &mut Simulation) {
    for _ in 0..120 {
        sim.step(InputState::default(), 1.0);
        if sim.body().unwrap().grounded {
            return;
        }
    }
    panic!("body never landed");
}

fn right() -> InputState {
    InputState::new(false, true, false)
}

fn left() -> InputState {
    InputState::new(true, false, false)
}

fn jump() -> InputState {
    InputState::new(false, false, true)
}

#[test]
fn falling_body_lands_on_collider_top() {
    let mut world = make_world(vec![StaticCollider::new(0.0, 100.0, 200.0, 20.0)]);
    let body = spawn_body(&mut world, 10.0, 0.0, Vec2::new(0.0, 5.0));
    update_world_time(&mut world, 1.0);

    let mut landed = false;
    for _ in 0..30 {
        tick_vertical(&mut world);
        if world.get::<RigidBody>(body).unwrap().grounded {
            landed = true;
            break;
        }
    }

    assert!(landed);
    let pos = world.get::<MapPosition>(body).unwrap();
    let rb = world.get::<RigidBody>(body).unwrap();
    // hitbox bottom sits collision_offset above the collider top
    assert!(approx_eq(pos.pos.y + 20.0, 98.0));
    assert_eq!(rb.velocity.y, 0.0);

    let log = world.resource::<EventLog>();
    assert_eq!(log.collisions.len(), 1);
    assert_eq!(log.collisions[0].side, CollisionSide::Bottom);
    assert_eq!(log.collisions[0].collider, 0);
    assert_eq!(log.landings.len(), 1);
    assert_eq!(log.landings[0].surface, LandingSurface::Collider(0));
}

#[test]
fn body_moving_right_stops_at_wall() {
    let mut world = make_world(vec![StaticCollider::new(69.0, 0.0, 20.0, 200.0)]);
    let body = spawn_body(&mut world, 50.0, 10.0, Vec2::new(3.0, 0.0));

    tick_horizontal_collision(&mut world);

    let pos = world.get::<MapPosition>(body).unwrap();
    let rb = world.get::<RigidBody>(body).unwrap();
    assert!(approx_eq(pos.pos.x, 69.0 - 20.0 - 2.0));
    assert_eq!(rb.velocity.x, 0.0);
    let log = world.resource::<EventLog>();
    assert_eq!(log.collisions.len(), 1);
    assert_eq!(log.collisions[0].side, CollisionSide::Right);
    assert!(approx_eq(log.collisions[0].impact_speed, 3.0));
}

#[test]
fn world_floor_grounds_and_fires_single_landing() {
    let mut world = make_world(Vec::new());
    let body = spawn_body(&mut world, 10.0, 250.0, Vec2::new(0.0, 4.0));
    update_world_time(&mut world, 1.0);

    for _ in 0..10 {
        tick_vertical(&mut world);
    }

    let pos = world.get::<MapPosition>(body).unwrap();
    let rb = world.get::<RigidBody>(body).unwrap();
    assert_eq!(pos.pos.y, 280.0);
    assert!(rb.grounded);
    let log = world.resource::<EventLog>();
    assert_eq!(log.landings.len(), 1);
    assert_eq!(log.landings[0].surface, LandingSurface::WorldFloor);
}

#[test]
fn horizontal_movement_uses_shared_envelope() {
    let mut world = make_world(Vec::new());
    let a = spawn_body(&mut world, 10.0, 10.0, Vec2::ZERO);
    let b = spawn_body(&mut world, 100.0, 10.0, Vec2::ZERO);
    world.insert_resource(right());
    update_world_time(&mut world, 1.0);

    let mut schedule = Schedule::default();
    schedule.add_systems(horizontal_movement);
    schedule.run(&mut world);

    // both bodies grew the one envelope in the same step
    let envelope = world.resource::<MomentumEnvelope>();
    assert!(approx_eq(envelope.current_max_speed, 0.2));
    let va = world.get::<RigidBody>(a).unwrap().velocity.x;
    let vb = world.get::<RigidBody>(b).unwrap().velocity.x;
    assert!(approx_eq(va, 0.1));
    assert!(approx_eq(vb, 0.2));
}

#[test]
fn body_stays_inside_world_for_any_input() {
    let mut sim = sim();
    let pattern = [
        right(),
        InputState::new(false, true, true),
        left(),
        InputState::new(true, true, true),
        jump(),
        InputState::default(),
    ];
    let bounds = Rect::new(0.0, 0.0, 576.0 - 64.0, 432.0 - 64.0);
    for step in 0..3_000usize {
        let input = pattern[(step / 37 + step % 5) % pattern.len()];
        sim.step(input, 1.0);
        let p = sim.body().unwrap().position;
        assert!(
            p.x >= bounds.left() && p.x <= bounds.right() && p.y >= bounds.top() && p.y <= bounds.bottom(),
            "step {step}: body escaped to {p:?}"
        );
    }
}

#[test]
fn idle_body_settles_on_default_floor() {
    let mut sim = sim();
    settle(&mut sim);
    let body = sim.body().unwrap();
    // hitbox bottom (offset 9 + height 50) rests 2 above the floor at 400
    assert!(approx_eq(body.position.y + 59.0, 398.0));
    assert_eq!(body.velocity.y, 0.0);
    let log = sim.world().resource::<EventLog>();
    assert!(!log.landings.is_empty());
}

#[test]
fn jump_only_from_the_ground() {
    let mut sim = sim();
    settle(&mut sim);

    sim.step(jump(), 1.0);
    let body = sim.body().unwrap();
    assert!(!body.grounded);
    // jumped with 5.3 then gravity 0.4 was applied in the same step
    assert!(approx_eq(body.velocity.y, -4.9));
    assert_eq!(body.animation, AnimationState::Jump);

    sim.step(jump(), 1.0);
    assert!(approx_eq(sim.body().unwrap().velocity.y, -4.5));
    assert_eq!(sim.world().resource::<EventLog>().jumps.len(), 1);
}

#[test]
fn running_left_faces_left_and_hits_world_edge() {
    let mut sim = sim();
    settle(&mut sim);
    for _ in 0..200 {
        sim.step(left(), 1.0);
    }
    let body = sim.body().unwrap();
    assert_eq!(body.facing, Facing::Left);
    assert_eq!(body.position.x, 0.0);
    // re-zeroed after every step
    assert_eq!(body.velocity.x, 0.0);
}

#[test]
fn running_right_is_stopped_by_the_wall() {
    let mut sim = sim();
    settle(&mut sim);
    for _ in 0..400 {
        sim.step(right(), 1.0);
    }
    let body = sim.body().unwrap();
    // wall starts at column 26; hitbox right extent is 17 + 30
    assert!(approx_eq(body.position.x, 26.0 * 16.0 - 47.0 - 2.0));
    let log = sim.world().resource::<EventLog>();
    assert!(log.collisions.iter().any(|c| c.side == CollisionSide::Right));
}

#[test]
fn camera_target_holds_while_body_rests() {
    let mut sim = sim();
    settle(&mut sim);
    let target = sim.camera().target();
    for _ in 0..60 {
        sim.step(InputState::default(), 1.0);
        assert_eq!(sim.camera().target(), target);
    }
}

#[test]
fn look_ahead_decays_after_stopping() {
    let mut sim = sim();
    settle(&mut sim);
    for _ in 0..60 {
        sim.step(right(), 1.0);
    }
    let leaning = sim.camera().current_look_ahead();
    assert!(leaning > 10.0);

    for _ in 0..600 {
        sim.step(InputState::default(), 1.0);
    }
    assert!(sim.camera().current_look_ahead().abs() < 0.01);
}

#[test]
fn camera_follows_only_the_marked_body() {
    let mut sim = sim();
    settle(&mut sim);
    // a second input-driven body without the camera marker
    spawn_body(sim.world_mut(), 400.0, 100.0, Vec2::ZERO);
    for _ in 0..60 {
        sim.step(right(), 1.0);
    }
    assert!(sim.camera().current_look_ahead() > 10.0);

    let player = sim.body().unwrap();
    let view = sim.render_frame().body.as_ref().unwrap();
    assert_eq!(view.rect.x, player.position.x);
    assert_eq!(view.rect.y, player.position.y);
}

#[test]
fn camera_stays_inside_world() {
    let mut sim = sim();
    for step in 0..1_000usize {
        let input = if step % 400 < 200 { right() } else { left() };
        sim.step(input, 1.0);
        let view = sim.camera().get_bounds();
        assert!(view.left() >= 0.0 && view.right() <= 576.0 + EPSILON);
        assert!(view.top() >= 0.0 && view.bottom() <= 432.0 + EPSILON);
    }
}

#[test]
fn render_frame_culls_colliders_outside_view() {
    let mut sim = sim();
    settle(&mut sim);
    let frame = sim.render_frame().clone();
    let view = sim.camera().get_bounds();
    assert_eq!(frame.view, view);
    assert_eq!(frame.camera_offset, Vec2::new(-view.x, -view.y));
    assert!(frame.visible_colliders.len() < sim.colliders().len());
    for index in &frame.visible_colliders {
        assert!(view.overlaps(&sim.colliders().as_slice()[*index].rect));
    }
    let body = frame.body.unwrap();
    assert_eq!((body.rect.width, body.rect.height), (64.0, 64.0));
}

#[test]
fn carry_momentum_lets_the_body_coast() {
    let mut config = GameConfig::new();
    config
        .load_from_str("[body]\ncarry_momentum = true\n")
        .unwrap();
    let level = default_level(&config).unwrap();
    let mut sim = Simulation::new(config, &level).unwrap();
    settle(&mut sim);

    for _ in 0..30 {
        sim.step(right(), 1.0);
    }
    let vx = sim.body().unwrap().velocity.x;
    assert!(vx > 0.0);

    sim.step(InputState::default(), 1.0);
    let coasting = sim.body().unwrap().velocity.x;
    assert!(coasting > 0.0 && coasting < vx);

    for _ in 0..100 {
        sim.step(InputState::default(), 1.0);
    }
    assert_eq!(sim.body().unwrap().velocity.x, 0.0);
    assert_eq!(sim.world().resource::<MomentumEnvelope>().current_max_speed, 0.0);
}

#[test]
fn viewport_resize_reclamps_camera() {
    let mut sim = sim();
    for _ in 0..300 {
        sim.step(right(), 1.0);
    }
    sim.resize_viewport(480.0, 400.0).unwrap();
    let view = sim.camera().get_bounds();
    assert!(view.right() <= 576.0 + EPSILON);
    assert!(view.bottom() <= 432.0 + EPSILON);
    assert!(sim.resize_viewport(800.0, 100.0).is_err());
}

#[test]
fn invalid_camera_options_fail_before_any_step() {
    let mut config = GameConfig::new();
    config.camera = CameraOptions {
        deadzone_width: Some(500.0),
        ..config.camera
    };
    let level = default_level(&GameConfig::new()).unwrap();
    assert!(default_level(&config).is_err());
    assert!(Simulation::new(config, &level).is_err());
    assert!(FollowCamera::new(CameraOptions::new(320.0, 180.0, 200.0, 432.0)).is_err());
}

#[test]
fn world_size_fields_drive_camera_validation() {
    let mut config = GameConfig::new();
    config.world_width = 1000.0;
    config.camera.viewport_width = 700.0;
    let level = default_level(&config).unwrap();
    let sim = Simulation::new(config, &level).unwrap();
    assert_eq!(sim.camera().viewport(), Vec2::new(700.0, 180.0));
    assert!(sim.camera().get_bounds().right() <= 1000.0);
}
