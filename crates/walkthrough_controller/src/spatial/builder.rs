//! World-builder helpers
//!
//! Placement is grid-snapped on X/Z here, so the controller can assume
//! grid-aligned landmarks and a grid-aligned avatar start.

use bevy::prelude::*;

use crate::components::{Avatar, Landmark, NonInteractive, Obstacle};
use crate::config::ControllerConfig;
use crate::movement::snap_xz;

/// Landmark entity: id + snapped Transform + uniform obstacle footprint
pub fn landmark_bundle(
    id: impl Into<String>,
    position: Vec3,
    config: &ControllerConfig,
) -> (Landmark, Transform, Obstacle) {
    (
        Landmark::new(id),
        Transform::from_translation(snap_xz(position, config.grid.size)),
        Obstacle::new(config.collision.obstacle_radius),
    )
}

/// Avatar entity at the snapped `position` (Facing/Navigator via Required Components)
pub fn avatar_bundle(position: Vec3, config: &ControllerConfig) -> (Avatar, Transform) {
    (
        Avatar,
        Transform::from_translation(snap_xz(position, config.grid.size)),
    )
}

/// Scenery the pointer pick must ignore (ground, guides); never blocks
pub fn scenery_bundle(transform: Transform) -> (NonInteractive, Transform) {
    (NonInteractive, transform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_bundle_snaps_and_uses_uniform_radius() {
        let config = ControllerConfig::default();
        let (landmark, transform, obstacle) =
            landmark_bundle("geotales", Vec3::new(3.0, 0.0, 8.0), &config);

        assert_eq!(landmark.id.as_str(), "geotales");
        assert_eq!(transform.translation, Vec3::new(3.0, 0.0, 7.5));
        assert_eq!(obstacle.radius, config.collision.obstacle_radius);
        assert!(obstacle.collision_enabled);
    }

    #[test]
    fn test_avatar_bundle_snaps() {
        let config = ControllerConfig::default();
        let (_, transform) = avatar_bundle(Vec3::new(0.4, 1.0, -0.8), &config);
        assert_eq!(transform.translation, Vec3::new(0.0, 1.0, -1.5));
    }
}
