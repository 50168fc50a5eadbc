//! Simulation configuration resource.
//!
//! Holds every construction-time parameter: world bounds, block size,
//! collision offset, body geometry and tunables, and camera options. Values
//! start from safe defaults and can be overridden from an INI file. Nothing
//! here changes once the world is built, except through an explicit camera
//! viewport resize.
//!
//! # Configuration File Format
//!
//! ```ini
//! [world]
//! width = 576
//! height = 432
//! block_size = 16
//! collision_offset = 2
//!
//! [body]
//! width = 64
//! height = 64
//! hitbox_x = 17
//! hitbox_y = 9
//! hitbox_width = 30
//! hitbox_height = 50
//! spawn_x = 48
//! spawn_y = 270
//! top_speed = 2
//! acceleration = 2
//! deceleration = 0.2
//! gravity = 0.4
//! jump_power = 5.3
//! speed_unit = 1
//! run_acceleration_factor = 0.1
//! carry_momentum = false
//!
//! [camera]
//! viewport_width = 320
//! viewport_height = 180
//! smoothing = 0.1
//! deadzone_width = 96
//! deadzone_height = 72
//! look_ahead = 80
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::Vec2;
use log::info;
use std::path::PathBuf;

use crate::components::boxcollider::BoxCollider;
use crate::components::rigidbody::BodyTuning;
use crate::error::SimError;
use crate::resources::camera2d::{CameraOptions, FollowCamera};
use crate::resources::worldbounds::WorldBounds;

/// Default safe values for startup
const DEFAULT_WORLD_WIDTH: f32 = 576.0;
const DEFAULT_WORLD_HEIGHT: f32 = 432.0;
const DEFAULT_BLOCK_SIZE: f32 = 16.0;
const DEFAULT_COLLISION_OFFSET: f32 = 2.0;
const DEFAULT_BODY_WIDTH: f32 = 64.0;
const DEFAULT_BODY_HEIGHT: f32 = 64.0;
const DEFAULT_HITBOX_WIDTH: f32 = 30.0;
const DEFAULT_HITBOX_HEIGHT: f32 = 50.0;
/// Gap kept between the hitbox bottom and the sprite bottom.
const DEFAULT_HITBOX_FOOT_GAP: f32 = 5.0;
const DEFAULT_VIEWPORT_WIDTH: f32 = 320.0;
const DEFAULT_VIEWPORT_HEIGHT: f32 = 180.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Geometry and tunables of the controlled body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyConfig {
    pub size: Vec2,
    pub hitbox_offset: Vec2,
    pub hitbox_size: Vec2,
    pub spawn: Vec2,
    pub tuning: BodyTuning,
    /// Keep horizontal velocity across steps and let deceleration stop the
    /// body, instead of re-zeroing it after collision resolution.
    pub carry_momentum: bool,
}

impl Default for BodyConfig {
    fn default() -> Self {
        let size = Vec2::new(DEFAULT_BODY_WIDTH, DEFAULT_BODY_HEIGHT);
        let hitbox_size = Vec2::new(DEFAULT_HITBOX_WIDTH, DEFAULT_HITBOX_HEIGHT);
        Self {
            size,
            hitbox_offset: Self::centered_hitbox_offset(size, hitbox_size),
            hitbox_size,
            spawn: Vec2::new(
                3.0 * DEFAULT_BLOCK_SIZE,
                DEFAULT_WORLD_HEIGHT - 6.0 * DEFAULT_BLOCK_SIZE - DEFAULT_COLLISION_OFFSET,
            ),
            tuning: BodyTuning::default(),
            carry_momentum: false,
        }
    }
}

impl BodyConfig {
    /// Hitbox offset centred horizontally, resting just above the sprite's
    /// feet.
    pub fn centered_hitbox_offset(size: Vec2, hitbox_size: Vec2) -> Vec2 {
        Vec2::new(
            size.x * 0.5 - hitbox_size.x * 0.5,
            size.y - hitbox_size.y - DEFAULT_HITBOX_FOOT_GAP,
        )
    }

    /// Build the validated hitbox for this body.
    pub fn hitbox(&self) -> Result<BoxCollider, SimError> {
        BoxCollider::new(self.hitbox_size.x, self.hitbox_size.y)?
            .with_offset(self.hitbox_offset)
            .fit_within(self.size)
    }
}

/// Simulation configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    pub world_width: f32,
    pub world_height: f32,
    /// Edge length of one level tile.
    pub block_size: f32,
    /// Gap left between a resolved hitbox and the collider it hit.
    pub collision_offset: f32,
    pub body: BodyConfig,
    /// Viewport and camera tuning. Read through [`GameConfig::camera_options`].
    pub camera: CameraOptions,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            block_size: DEFAULT_BLOCK_SIZE,
            collision_offset: DEFAULT_COLLISION_OFFSET,
            body: BodyConfig::default(),
            camera: CameraOptions::new(
                DEFAULT_VIEWPORT_WIDTH,
                DEFAULT_VIEWPORT_HEIGHT,
                DEFAULT_WORLD_WIDTH,
                DEFAULT_WORLD_HEIGHT,
            ),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: world {}x{}, block {}, body {}x{}, viewport {}x{}",
            self.world_width,
            self.world_height,
            self.block_size,
            self.body.size.x,
            self.body.size.y,
            self.camera.viewport_width,
            self.camera.viewport_height
        );

        Ok(())
    }

    /// Parse configuration from an INI string, e.g. embedded test fixtures.
    pub fn load_from_str(&mut self, contents: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(contents.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let float = |section: &str, key: &str| -> Option<f32> {
            config.getfloat(section, key).ok().flatten().map(|v| v as f32)
        };
        let set = |target: &mut f32, section: &str, key: &str| {
            if let Some(v) = float(section, key) {
                *target = v;
            }
        };

        // [world] section
        set(&mut self.world_width, "world", "width");
        set(&mut self.world_height, "world", "height");
        set(&mut self.block_size, "world", "block_size");
        set(&mut self.collision_offset, "world", "collision_offset");

        // [body] section
        let body = &mut self.body;
        set(&mut body.size.x, "body", "width");
        set(&mut body.size.y, "body", "height");
        set(&mut body.hitbox_size.x, "body", "hitbox_width");
        set(&mut body.hitbox_size.y, "body", "hitbox_height");
        // resized without hitbox_x/hitbox_y: the offset follows the new sizes
        let resized = ["width", "height", "hitbox_width", "hitbox_height"]
            .iter()
            .any(|key| float("body", key).is_some());
        if resized {
            let centered = BodyConfig::centered_hitbox_offset(body.size, body.hitbox_size);
            body.hitbox_offset.x = float("body", "hitbox_x").unwrap_or(centered.x);
            body.hitbox_offset.y = float("body", "hitbox_y").unwrap_or(centered.y);
        } else {
            set(&mut body.hitbox_offset.x, "body", "hitbox_x");
            set(&mut body.hitbox_offset.y, "body", "hitbox_y");
        }
        set(&mut body.spawn.x, "body", "spawn_x");
        set(&mut body.spawn.y, "body", "spawn_y");
        let tuning = &mut body.tuning;
        set(&mut tuning.top_speed, "body", "top_speed");
        set(&mut tuning.acceleration, "body", "acceleration");
        set(&mut tuning.deceleration, "body", "deceleration");
        set(&mut tuning.gravity, "body", "gravity");
        set(&mut tuning.jump_power, "body", "jump_power");
        set(&mut tuning.speed_unit, "body", "speed_unit");
        set(&mut tuning.run_acceleration_factor, "body", "run_acceleration_factor");
        if let Some(carry) = config.getbool("body", "carry_momentum").ok().flatten() {
            body.carry_momentum = carry;
        }

        // [camera] section
        set(&mut self.camera.viewport_width, "camera", "viewport_width");
        set(&mut self.camera.viewport_height, "camera", "viewport_height");
        if let Some(v) = float("camera", "smoothing") {
            self.camera.smoothing = Some(v);
        }
        if let Some(v) = float("camera", "deadzone_width") {
            self.camera.deadzone_width = Some(v);
        }
        if let Some(v) = float("camera", "deadzone_height") {
            self.camera.deadzone_height = Some(v);
        }
        if let Some(v) = float("camera", "look_ahead") {
            self.camera.look_ahead_distance = Some(v);
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [world] section
        config.set("world", "width", Some(self.world_width.to_string()));
        config.set("world", "height", Some(self.world_height.to_string()));
        config.set("world", "block_size", Some(self.block_size.to_string()));
        config.set("world", "collision_offset", Some(self.collision_offset.to_string()));

        // [body] section
        let body = &self.body;
        let tuning = &body.tuning;
        for (key, value) in [
            ("width", body.size.x),
            ("height", body.size.y),
            ("hitbox_x", body.hitbox_offset.x),
            ("hitbox_y", body.hitbox_offset.y),
            ("hitbox_width", body.hitbox_size.x),
            ("hitbox_height", body.hitbox_size.y),
            ("spawn_x", body.spawn.x),
            ("spawn_y", body.spawn.y),
            ("top_speed", tuning.top_speed),
            ("acceleration", tuning.acceleration),
            ("deceleration", tuning.deceleration),
            ("gravity", tuning.gravity),
            ("jump_power", tuning.jump_power),
            ("speed_unit", tuning.speed_unit),
            ("run_acceleration_factor", tuning.run_acceleration_factor),
        ] {
            config.set("body", key, Some(value.to_string()));
        }
        config.set("body", "carry_momentum", Some(body.carry_momentum.to_string()));

        // [camera] section
        let cam = &self.camera;
        config.set("camera", "viewport_width", Some(cam.viewport_width.to_string()));
        config.set("camera", "viewport_height", Some(cam.viewport_height.to_string()));
        for (key, value) in [
            ("smoothing", cam.smoothing),
            ("deadzone_width", cam.deadzone_width),
            ("deadzone_height", cam.deadzone_height),
            ("look_ahead", cam.look_ahead_distance),
        ] {
            if let Some(v) = value {
                config.set("camera", key, Some(v.to_string()));
            }
        }

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Check every construction parameter. Called before the world is built
    /// so no step ever runs with an invalid configuration.
    pub fn validate(&self) -> Result<(), SimError> {
        let bounds = self.world_bounds()?;
        if !(self.block_size > 0.0) {
            return Err(SimError::config(format!(
                "block_size must be positive, got {}",
                self.block_size
            )));
        }
        if !(self.collision_offset >= 0.0) {
            return Err(SimError::config(format!(
                "collision_offset must be non-negative, got {}",
                self.collision_offset
            )));
        }
        self.body.tuning.validate()?;
        self.body.hitbox()?;
        if self.body.size.x > bounds.size.x || self.body.size.y > bounds.size.y {
            return Err(SimError::config(format!(
                "body {}x{} does not fit in world {}x{}",
                self.body.size.x, self.body.size.y, bounds.size.x, bounds.size.y
            )));
        }
        FollowCamera::new(self.camera_options())?;
        Ok(())
    }

    /// Camera options with the world size taken from `world_width` and
    /// `world_height`; the world fields stored in `camera` are ignored.
    pub fn camera_options(&self) -> CameraOptions {
        CameraOptions {
            world_width: self.world_width,
            world_height: self.world_height,
            ..self.camera
        }
    }

    pub fn world_bounds(&self) -> Result<WorldBounds, SimError> {
        WorldBounds::new(self.world_width, self.world_height)
    }
}
