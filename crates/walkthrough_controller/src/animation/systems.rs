//! Animation systems (AnimationSet, after movement and navigation)

use bevy::prelude::*;

use super::clip::ClipCycleEnded;
use super::state::AnimationRig;
use crate::input::InputState;
use crate::navigation::Navigator;

/// System: route engine cycle-end notifications to the owning rig
///
/// "Pending" = a movement key is held or auto-navigation is live; the walk
/// then stays armed instead of returning to Idle.
pub fn process_cycle_end_events(
    mut cycle_ended: EventReader<ClipCycleEnded>,
    input: Res<InputState>,
    mut rigs: Query<(&mut AnimationRig, &Navigator)>,
) {
    for event in cycle_ended.read() {
        let Ok((mut rig, navigator)) = rigs.get_mut(event.avatar) else {
            continue;
        };
        let pending = input.any_held() || navigator.is_navigating();
        rig.on_cycle_end(event.subscription, pending);
    }
}

/// System: fallback walk timer, idle debounce, idle self-heal
pub fn tick_animation_timers(
    time: Res<Time>,
    input: Res<InputState>,
    mut rigs: Query<(&mut AnimationRig, &Navigator)>,
) {
    for (mut rig, navigator) in rigs.iter_mut() {
        let pending = input.any_held() || navigator.is_navigating();
        rig.tick(time.delta(), pending);
        rig.heal_idle(pending);
    }
}
