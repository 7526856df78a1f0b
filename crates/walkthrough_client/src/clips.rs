//! Procedural clip visuals
//!
//! The avatar's clips are `TimedClip`s: the controller starts/stops them and
//! receives their cycle ends, this module only turns the playing clip's phase
//! into a pose on the rendered body (walk: hop + squash, idle: breathing).

use bevy::prelude::*;
use std::f32::consts::{PI, TAU};
use walkthrough_controller::{AnimationRig, Avatar, ClipHandle, ControllerSet, TimedClips};

pub struct ClipVisualsPlugin;

impl Plugin for ClipVisualsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, animate_avatar_body.after(ControllerSet::Animation));
    }
}

/// Rendered avatar body (child of the Avatar entity)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AvatarBody;

impl AvatarBody {
    /// Body centre above the avatar origin when standing still
    pub const REST_HEIGHT: f32 = 0.1;
}

const HOP_HEIGHT: f32 = 0.35;
const SQUASH: f32 = 0.15;
const BREATH: f32 = 0.03;

/// Local offset + scale of the body for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    pub lift: f32,
    pub scale: Vec3,
}

impl Default for BodyPose {
    fn default() -> Self {
        Self {
            lift: 0.0,
            scale: Vec3::ONE,
        }
    }
}

/// Walk wins over idle; nothing playing → rest pose
pub fn body_pose(idle_phase: Option<f32>, walk_phase: Option<f32>) -> BodyPose {
    if let Some(phase) = walk_phase {
        let hop = (phase * PI).sin();
        // Squash at take-off and landing, stretch at the top
        let squash = SQUASH * (1.0 - 2.0 * hop);
        return BodyPose {
            lift: hop * HOP_HEIGHT,
            scale: Vec3::new(1.0 + squash * 0.5, 1.0 - squash, 1.0 + squash * 0.5),
        };
    }

    if let Some(phase) = idle_phase {
        let breath = BREATH * (phase * TAU).sin();
        return BodyPose {
            lift: 0.0,
            scale: Vec3::new(1.0 + breath, 1.0 - breath, 1.0 + breath),
        };
    }

    BodyPose::default()
}

fn animate_avatar_body(
    avatars: Query<(&AnimationRig, &TimedClips), With<Avatar>>,
    mut bodies: Query<(&ChildOf, &mut Transform), With<AvatarBody>>,
) {
    for (child_of, mut transform) in bodies.iter_mut() {
        let Ok((rig, clips)) = avatars.get(child_of.parent()) else {
            continue;
        };
        let Some(set) = rig.set() else {
            continue;
        };

        let playing_phase = |index: usize| {
            clips
                .0
                .get(index)
                .filter(|clip| clip.is_playing())
                .map(|clip| clip.phase())
        };
        let pose = body_pose(playing_phase(set.idle), playing_phase(set.motion));

        transform.translation.y = AvatarBody::REST_HEIGHT + pose.lift;
        transform.scale = pose.scale;
    }
}
