//! Interaction dispatcher systems
//!
//! IntakeSet: `handle_pointer_picks`, `handle_interact_requests`,
//! `handle_panel_close`. DispatchSet: `dispatch_proximity_selection`.

use bevy::prelude::*;

use super::selection::{SelectionEvent, SelectionState};
use crate::components::Avatar;
use crate::config::ControllerConfig;
use crate::input::ControllerInput;
use crate::logger;
use crate::navigation::{approach_point, NavigationTarget, Navigator};
use crate::spatial::Landmarks;

/// System: pointer pick → pending landmark + auto-navigation
///
/// Never emits `Selected`. Picks of the avatar, scenery or nothing are
/// ignored.
pub fn handle_pointer_picks(
    mut events: EventReader<ControllerInput>,
    config: Res<ControllerConfig>,
    mut selection: ResMut<SelectionState>,
    landmarks: Landmarks,
    mut avatars: Query<(&Transform, &mut Navigator), With<Avatar>>,
) {
    for event in events.read() {
        let ControllerInput::Pick(Some(entity)) = *event else {
            continue;
        };
        let Some((id, target)) = landmarks.pickable(entity) else {
            logger::log(&format!("🖱️ pick {:?} is not an interactive landmark", entity));
            continue;
        };
        let Ok((transform, mut navigator)) = avatars.single_mut() else {
            continue;
        };

        let approach = approach_point(
            transform.translation,
            target,
            config.grid.step,
            config.grid.size,
        );
        selection.arm(id.clone());
        navigator.start(NavigationTarget {
            landmark: id.clone(),
            approach,
        });
    }
}

/// System: explicit interact → nearest landmark in range, selected now
pub fn handle_interact_requests(
    mut events: EventReader<ControllerInput>,
    config: Res<ControllerConfig>,
    mut selection: ResMut<SelectionState>,
    landmarks: Landmarks,
    avatars: Query<&Transform, With<Avatar>>,
    mut selection_events: EventWriter<SelectionEvent>,
) {
    for event in events.read() {
        if !event.is_interact() {
            continue;
        }
        let Ok(avatar) = avatars.single() else {
            continue;
        };

        let nearest = landmarks.nearest(avatar.translation);
        match selection.interact(nearest, config.interaction.proximity_threshold) {
            Some(id) => {
                logger::log_info(&format!("✨ Selected '{}' (interact)", id));
                selection_events.write(SelectionEvent::Selected(id));
            }
            None => logger::log("✨ interact: no landmark in range"),
        }
    }
}

/// System: panel closed → Deselected, pending pick dropped
pub fn handle_panel_close(
    mut events: EventReader<ControllerInput>,
    mut selection: ResMut<SelectionState>,
    mut selection_events: EventWriter<SelectionEvent>,
) {
    for event in events.read() {
        if !event.is_close_panel() {
            continue;
        }
        selection.close();
        logger::log_info("✨ Deselected (panel closed)");
        selection_events.write(SelectionEvent::Deselected);
    }
}

/// System: announce the pending landmark once the avatar is in range
pub fn dispatch_proximity_selection(
    config: Res<ControllerConfig>,
    mut selection: ResMut<SelectionState>,
    landmarks: Landmarks,
    avatars: Query<&Transform, With<Avatar>>,
    mut selection_events: EventWriter<SelectionEvent>,
) {
    let Some(pending) = selection.pending().cloned() else {
        return;
    };
    let Ok(avatar) = avatars.single() else {
        return;
    };

    let distance = landmarks
        .position(&pending)
        .map(|position| avatar.translation.distance(position));
    if let Some(id) = selection.check_arrival(distance, config.interaction.proximity_threshold) {
        logger::log_info(&format!("✨ Selected '{}' (arrival)", id));
        selection_events.write(SelectionEvent::Selected(id));
    }
}
