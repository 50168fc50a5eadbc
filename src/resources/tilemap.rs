//! Level tile data and the static collider set built from it.
//!
//! A level is a list of tile layers, each a flat array of tile indices plus a
//! shared row length. Loading folds the layers into one ordered
//! [`LevelColliders`] resource: layers in file order, each layer row-major and
//! left-to-right. Collision resolution is first-match over that order, so the
//! order is part of the level's behaviour.
//!
//! # File format
//!
//! ```json
//! {
//!   "block_size": 16,
//!   "row_length": 36,
//!   "layers": [
//!     { "name": "floor", "solid": { "sentinel": 202 }, "tiles": [0, 202, 202] },
//!     { "name": "platforms", "solid": "any_non_zero", "tiles": [0, 0, 7] }
//!   ]
//! }
//! ```

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::geometry::Rect;

/// Tile id conventionally used for solid floor tiles.
pub const FLOOR_TILE: u32 = 202;

/// Which tile indices of a layer produce colliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolidRule {
    /// Every nonzero tile is solid.
    AnyNonZero,
    /// Only tiles equal to the given id are solid.
    Sentinel(u32),
}

impl SolidRule {
    pub fn is_solid(&self, tile: u32) -> bool {
        match *self {
            SolidRule::AnyNonZero => tile != 0,
            SolidRule::Sentinel(id) => tile == id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TileLayer {
    pub name: String,
    pub solid: SolidRule,
    pub tiles: Vec<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LevelData {
    pub block_size: f32,
    pub row_length: usize,
    pub layers: Vec<TileLayer>,
}

/// Split a flat tile array into rows of `row_length`. A trailing partial row
/// is kept as a shorter row.
pub fn transform_2d(tiles: &[u32], row_length: usize) -> Vec<Vec<u32>> {
    if row_length == 0 {
        return Vec::new();
    }
    tiles.chunks(row_length).map(|row| row.to_vec()).collect()
}

impl LevelData {
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let level: LevelData = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let level = Self::from_json_str(&json)?;
        info!(
            "Loaded level {:?}: {} layers, block size {}",
            path.as_ref(),
            level.layers.len(),
            level.block_size
        );
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.block_size > 0.0) {
            return Err(SimError::config(format!(
                "block_size must be positive, got {}",
                self.block_size
            )));
        }
        if self.row_length == 0 {
            return Err(SimError::config("row_length must be positive"));
        }
        Ok(())
    }

    /// Number of rows of the tallest layer.
    pub fn row_count(&self) -> usize {
        self.layers
            .iter()
            .map(|l| l.tiles.len().div_ceil(self.row_length))
            .max()
            .unwrap_or(0)
    }

    /// Instantiate the ordered collider set.
    pub fn build_colliders(&self) -> Result<LevelColliders, SimError> {
        self.validate()?;
        let mut colliders = Vec::new();
        for (layer_index, layer) in self.layers.iter().enumerate() {
            let before = colliders.len();
            for (y, row) in transform_2d(&layer.tiles, self.row_length)
                .iter()
                .enumerate()
            {
                for (x, &tile) in row.iter().enumerate() {
                    if layer.solid.is_solid(tile) {
                        colliders.push(StaticCollider {
                            rect: Rect::new(
                                x as f32 * self.block_size,
                                y as f32 * self.block_size,
                                self.block_size,
                                self.block_size,
                            ),
                            layer: layer_index,
                        });
                    }
                }
            }
            info!(
                "Layer '{}' produced {} colliders",
                layer.name,
                colliders.len() - before
            );
        }
        Ok(LevelColliders { colliders })
    }
}

/// Immutable static obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StaticCollider {
    pub rect: Rect,
    /// Index of the layer that produced this collider.
    pub layer: usize,
}

impl StaticCollider {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            layer: 0,
        }
    }
}

/// The level's static colliders in load order. Never mutated after
/// construction.
#[derive(Resource, Debug, Clone, Default)]
pub struct LevelColliders {
    colliders: Vec<StaticCollider>,
}

impl LevelColliders {
    pub fn new(colliders: Vec<StaticCollider>) -> Self {
        Self { colliders }
    }

    pub fn as_slice(&self) -> &[StaticCollider] {
        &self.colliders
    }

    pub fn iter(&self) -> impl Iterator<Item = &StaticCollider> {
        self.colliders.iter()
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}
