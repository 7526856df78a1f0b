//! Camera follow: pure pose from the avatar position
//!
//! Runs last every frame (CameraSet). No state: the pose is recomputed from
//! the settled avatar position.

use bevy::prelude::*;

use crate::components::{Avatar, FollowCamera};
use crate::config::{CameraConfig, ControllerConfig};

/// Camera position + look-at point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.target, Vec3::Y)
    }
}

/// Above and behind (+Z) the avatar, looking slightly above its origin
pub fn follow_pose(avatar: Vec3, config: &CameraConfig) -> CameraPose {
    CameraPose {
        position: avatar + Vec3::new(0.0, config.vertical_offset, config.depth_offset),
        target: avatar + Vec3::new(0.0, config.look_lift, 0.0),
    }
}

/// System: place every `FollowCamera` at the follow pose
pub fn camera_follow(
    config: Res<ControllerConfig>,
    avatars: Query<&Transform, (With<Avatar>, Without<FollowCamera>)>,
    mut cameras: Query<&mut Transform, (With<FollowCamera>, Without<Avatar>)>,
) {
    let Ok(avatar) = avatars.single() else {
        return;
    };
    let pose = follow_pose(avatar.translation, &config.camera);

    for mut camera in cameras.iter_mut() {
        *camera = pose.transform();
    }
}
