//! Controller configuration (Resource)
//!
//! Every tunable of the controller lives here. `Default` carries the values the
//! walk-through world was designed around (1.5m cubes, 3.2m interaction range).
//!
//! # TOML
//! ```toml
//! log_level = "info"
//!
//! [grid]
//! size = 1.5
//! step = 1.5
//!
//! [input]
//! step_on_press = true
//! repeat_initial_delay = 0.25
//! repeat_step_delay = 0.2
//!
//! [animation]
//! walk_clip = "Armature|Walk"
//! ```
//!
//! Missing sections/fields fall back to defaults (`#[serde(default)]`).

use bevy::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::logger::LogLevel;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Root config resource
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ControllerConfig {
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    pub grid: GridConfig,
    pub collision: CollisionConfig,
    pub input: InputConfig,
    pub navigation: NavigationConfig,
    pub animation: AnimationConfig,
    pub interaction: InteractionConfig,
    pub camera: CameraConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            grid: GridConfig::default(),
            collision: CollisionConfig::default(),
            input: InputConfig::default(),
            navigation: NavigationConfig::default(),
            animation: AnimationConfig::default(),
            interaction: InteractionConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

/// Grid quantization
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Quantization unit on X/Z (avatar and landmark placement)
    pub size: f32,
    /// Displacement of one step (equals cube size)
    pub step: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { size: 1.5, step: 1.5 }
    }
}

/// Uniform collision radii (no per-entity footprint)
///
/// Combined radius (1.45) stays below one grid step: adjacent cells are free,
/// the landmark's own cell is blocked.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CollisionConfig {
    pub avatar_radius: f32,
    /// Radius assigned to every landmark obstacle by the world builder
    pub obstacle_radius: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            avatar_radius: 0.7,
            obstacle_radius: 0.75,
        }
    }
}

/// Keyboard cadence
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Key-down edge produces one immediate step
    pub step_on_press: bool,
    /// Seconds a key must be held before repeat starts
    pub repeat_initial_delay: f32,
    /// Seconds between repeated steps once repeat started
    pub repeat_step_delay: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            step_on_press: true,
            repeat_initial_delay: 0.25,
            repeat_step_delay: 0.2,
        }
    }
}

/// Auto-navigation pacing
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    /// Seconds between autonomous steps (~9 frames @ 60 FPS)
    pub step_interval: f32,
    /// Below this per-axis delta the final alignment only snaps in place
    pub alignment_epsilon: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            step_interval: 0.15,
            alignment_epsilon: 0.1,
        }
    }
}

/// Animation timings and explicit clip names
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Delay before Idle re-entry after the last key release
    pub idle_debounce: f32,
    /// Walk lock release when the clip has no end notification
    pub walk_fallback_timeout: f32,
    /// Exact idle clip name (overrides the "idle" substring heuristic)
    pub idle_clip: Option<String>,
    /// Exact motion clip name (overrides the "walk"/"run" heuristic)
    pub walk_clip: Option<String>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            idle_debounce: 0.12,
            walk_fallback_timeout: 0.6,
            idle_clip: None,
            walk_clip: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    /// Distance at which the avatar counts as "arrived"/"interacting"
    /// (1.5 + 1.5 + margin)
    pub proximity_threshold: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            proximity_threshold: 3.2,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Height above the avatar
    pub vertical_offset: f32,
    /// Distance behind the avatar (+Z)
    pub depth_offset: f32,
    /// Look-at point lift above the avatar origin
    pub look_lift: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            vertical_offset: 14.0,
            depth_offset: 8.0,
            look_lift: 0.5,
        }
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    LogLevel::parse(&name)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown log level `{}`", name)))
}

impl ControllerConfig {
    /// Parse + validate
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: ControllerConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path`, parse + validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Like `load`, but a missing file means defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("grid.size", self.grid.size)?;
        positive("grid.step", self.grid.step)?;
        // A step that is not a whole number of cells snaps back onto the same cell
        let cells = self.grid.step / self.grid.size;
        if cells.round() < 1.0 || (cells - cells.round()).abs() > 1e-4 {
            return Err(ConfigError::Invalid {
                field: "grid.step",
                reason: format!(
                    "{} is not a whole multiple of grid.size {}",
                    self.grid.step, self.grid.size
                ),
            });
        }
        positive("collision.avatar_radius", self.collision.avatar_radius)?;
        non_negative("collision.obstacle_radius", self.collision.obstacle_radius)?;
        non_negative("input.repeat_initial_delay", self.input.repeat_initial_delay)?;
        positive("input.repeat_step_delay", self.input.repeat_step_delay)?;
        positive("navigation.step_interval", self.navigation.step_interval)?;
        non_negative("navigation.alignment_epsilon", self.navigation.alignment_epsilon)?;
        non_negative("animation.idle_debounce", self.animation.idle_debounce)?;
        positive("animation.walk_fallback_timeout", self.animation.walk_fallback_timeout)?;

        // Approach point sits one step from the landmark: a smaller range
        // would never announce the landmark after arrival.
        if self.interaction.proximity_threshold < self.grid.step {
            return Err(ConfigError::Invalid {
                field: "interaction.proximity_threshold",
                reason: format!(
                    "{} is smaller than grid.step {}",
                    self.interaction.proximity_threshold, self.grid.step
                ),
            });
        }

        Ok(())
    }

    /// Sum of avatar and obstacle radii
    pub fn combined_collision_radius(&self) -> f32 {
        self.collision.avatar_radius + self.collision.obstacle_radius
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a positive number, got {}", value),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a non-negative number, got {}", value),
        })
    }
}
