//! Avatar components: Avatar marker, Facing

use bevy::prelude::*;

use crate::navigation::Navigator;

/// The user-controlled entity
///
/// Pulls in Transform, Facing and Navigator via Required Components.
/// `AnimationRig` is optional: without it the avatar moves without animation.
///
/// # Ownership
/// Position and facing are written only by the grid movement planner and the
/// auto-navigator. Everything else (dispatcher, camera) reads.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, Facing, Navigator)]
pub struct Avatar;

/// Yaw derived from the last movement direction
///
/// Convention: yaw = atan2(x, z), so +Z → 0, +X → π/2, −Z → π.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Facing {
    pub yaw: f32,
}

impl Facing {
    /// Turn toward a horizontal direction (Y ignored, zero vector keeps yaw)
    pub fn face(&mut self, direction: Vec3) {
        if direction.x == 0.0 && direction.z == 0.0 {
            return;
        }
        self.yaw = direction.x.atan2(direction.z);
    }

    /// Unit direction the avatar looks at (XZ plane)
    pub fn direction(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_forward_is_negative_z() {
        let mut facing = Facing::default();
        facing.face(Vec3::new(0.0, 0.0, -1.5));

        assert!((facing.yaw - std::f32::consts::PI).abs() < 1e-6);
        assert!(facing.direction().abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn test_face_zero_keeps_yaw() {
        let mut facing = Facing::default();
        facing.face(Vec3::X);
        facing.face(Vec3::ZERO);

        assert!((facing.yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
