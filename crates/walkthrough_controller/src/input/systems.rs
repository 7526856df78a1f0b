//! Keyboard movement systems
//!
//! Two cadences, both routed through `manual_step`:
//! - `handle_movement_keys` (IntakeSet): key edges, optional immediate step
//! - `continuous_keyboard_movement` (MovementSet): held-key repeat

use bevy::prelude::*;

use super::events::{ControlKey, ControllerInput};
use super::state::InputState;
use crate::animation::AnimationRig;
use crate::components::{Avatar, Facing};
use crate::config::ControllerConfig;
use crate::logger;
use crate::movement::manual_step;
use crate::navigation::Navigator;
use crate::spatial::ObstacleField;

/// System: movement key edges
///
/// Key-down edge: cancels auto-navigation and a pending Idle debounce, then
/// steps once if `input.step_on_press`. Last key-up (no navigation live):
/// arms the Idle debounce. Key state is tracked even without an avatar.
pub fn handle_movement_keys(
    mut events: EventReader<ControllerInput>,
    time: Res<Time>,
    config: Res<ControllerConfig>,
    mut input: ResMut<InputState>,
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
    let now = time.elapsed_secs_f64();
    let mut avatar = avatars.single_mut().ok();

    for event in events.read() {
        match *event {
            ControllerInput::KeyDown(ControlKey::Move(direction)) => {
                if !input.press(direction, now) {
                    continue;
                }
                let Some((transform, facing, navigator, rig)) = avatar.as_mut() else {
                    continue;
                };

                if navigator.is_navigating() {
                    logger::log("🎮 manual input preempts auto-navigation");
                    navigator.cancel();
                }
                if let Some(rig) = rig.as_deref_mut() {
                    rig.cancel_idle_debounce();
                }
                if config.input.step_on_press {
                    manual_step(
                        direction,
                        transform,
                        facing,
                        navigator,
                        rig.as_deref_mut(),
                        &obstacles,
                        &config,
                    );
                }
            }
            ControllerInput::KeyUp(ControlKey::Move(direction)) => {
                if !input.release(direction) || input.any_held() {
                    continue;
                }
                let Some((_, _, navigator, Some(rig))) = avatar.as_mut() else {
                    continue;
                };
                if !navigator.is_navigating() {
                    rig.on_movement_released(&config.animation);
                }
            }
            _ => {}
        }
    }
}

/// System: continuous repeat for the priority held key
pub fn continuous_keyboard_movement(
    time: Res<Time>,
    config: Res<ControllerConfig>,
    mut input: ResMut<InputState>,
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
    let Some(direction) = input.advance(time.delta_secs(), &config.input) else {
        return;
    };
    let Ok((mut transform, mut facing, mut navigator, mut rig)) = avatars.single_mut() else {
        return;
    };

    manual_step(
        direction,
        &mut transform,
        &mut facing,
        &mut navigator,
        rig.as_deref_mut(),
        &obstacles,
        &config,
    );
}
