//! Auto-navigation system (NavigationSet)

use bevy::prelude::*;

use super::navigator::{NavigationProgress, Navigator};
use crate::animation::AnimationRig;
use crate::components::{Avatar, Facing};
use crate::config::ControllerConfig;
use crate::logger;
use crate::spatial::ObstacleField;

/// System: advance the live navigation target by one frame
///
/// Autonomous steps never start a Walking cycle; arrival requests Idle
/// (deferred by the rig while a manual walk cycle is still locked).
pub fn advance_auto_navigation(
    time: Res<Time>,
    config: Res<ControllerConfig>,
    mut avatars: Query<
        (
            &mut Transform,
            &mut Facing,
            &mut Navigator,
            Option<&mut AnimationRig>,
        ),
        With<Avatar>,
    >,
    obstacles: ObstacleField,
) {
    let Ok((mut transform, mut facing, mut navigator, rig)) = avatars.single_mut() else {
        return;
    };
    if !navigator.is_navigating() {
        return;
    }

    let avatar_radius = config.collision.avatar_radius;
    let progress = navigator.advance(
        transform.translation,
        time.delta_secs(),
        &config,
        |candidate| obstacles.is_blocked(candidate, avatar_radius),
    );

    match progress {
        NavigationProgress::Idle | NavigationProgress::Waiting => {}
        NavigationProgress::Stepped { to, direction } => {
            facing.face(direction);
            transform.rotation = facing.rotation();
            transform.translation = to;
        }
        NavigationProgress::Blocked { direction } => {
            facing.face(direction);
            transform.rotation = facing.rotation();
            logger::log(&format!("🧱 auto-step blocked toward {:?}", direction));
        }
        NavigationProgress::Arrived {
            landmark,
            position,
            direction,
        } => {
            if let Some(direction) = direction {
                facing.face(direction);
                transform.rotation = facing.rotation();
            }
            transform.translation = position;
            if let Some(mut rig) = rig {
                rig.request_idle();
            }
            logger::log_info(&format!("🏁 arrived near '{}' at {:?}", landmark, position));
        }
    }
}
