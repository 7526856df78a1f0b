//! Spatial domain: registry, collision predicate, world-builder helpers
//!
//! # Architecture
//!
//! ```text
//! World builder (client / tests)
//!     ↓ spawn(landmark_bundle / avatar_bundle)
//! Landmark entities (Transform + Obstacle)
//!     ↓ register_landmarks (RegistrySet, first every frame)
//! SpatialRegistry (LandmarkId → Entity, read-only for the controller)
//!     ↓
//! ObstacleField / Landmarks SystemParams
//! ```

pub mod builder;
pub mod collision;
pub mod registry;

pub use builder::*;
pub use collision::*;
pub use registry::*;
