//! Grid helpers: quantization and the four movement directions

use bevy::prelude::*;

/// Round a coordinate to the nearest multiple of `grid_size`
pub fn snap_to_grid(value: f32, grid_size: f32) -> f32 {
    (value / grid_size).round() * grid_size
}

/// Snap X/Z, keep Y (height is not quantized)
pub fn snap_xz(position: Vec3, grid_size: f32) -> Vec3 {
    Vec3::new(
        snap_to_grid(position.x, grid_size),
        position.y,
        snap_to_grid(position.z, grid_size),
    )
}

/// True when X and Z are multiples of `grid_size` (within float noise)
pub fn is_on_grid(position: Vec3, grid_size: f32) -> bool {
    const EPSILON: f32 = 1e-4;
    (position.x - snap_to_grid(position.x, grid_size)).abs() < EPSILON
        && (position.z - snap_to_grid(position.z, grid_size)).abs() < EPSILON
}

/// Axis-aligned movement direction
///
/// # Coordinate System
/// Right-handed, Y up, camera behind the avatar on +Z:
/// - Forward → −Z
/// - Back → +Z
/// - Left → −X
/// - Right → +X
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub enum MoveDirection {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveDirection {
    /// Priority order (ties between simultaneously held keys)
    pub const ALL: [MoveDirection; 4] = [
        MoveDirection::Forward,
        MoveDirection::Back,
        MoveDirection::Left,
        MoveDirection::Right,
    ];

    /// Unit vector on the XZ plane
    pub fn unit(self) -> Vec3 {
        match self {
            MoveDirection::Forward => Vec3::NEG_Z,
            MoveDirection::Back => Vec3::Z,
            MoveDirection::Left => Vec3::NEG_X,
            MoveDirection::Right => Vec3::X,
        }
    }

    pub fn priority(self) -> usize {
        self as usize
    }
}
