//! Landmark components: identity, obstacle footprint, scenery marker

use bevy::prelude::*;
use serde::Deserialize;
use std::fmt;

/// Stable landmark identifier (from the world data, e.g. `"university-main"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Reflect)]
#[serde(transparent)]
pub struct LandmarkId(pub String);

impl LandmarkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LandmarkId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Landmark the avatar can walk to and select
///
/// Registered in `SpatialRegistry` by id. Position = entity `Transform`.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Landmark {
    pub id: LandmarkId,
}

impl Landmark {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: LandmarkId::new(id) }
    }
}

/// Collision footprint of a non-avatar entity
///
/// Radius is uniform across the world (the world builder fills it from
/// `CollisionConfig::obstacle_radius`). Disabled obstacles never block.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Obstacle {
    pub radius: f32,
    pub collision_enabled: bool,
}

impl Obstacle {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            collision_enabled: true,
        }
    }
}

/// Scenery that pointer picks must ignore (ground plane, axis guides)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct NonInteractive;
