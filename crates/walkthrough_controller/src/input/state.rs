//! InputState: held movement keys and their repeat accumulators

use bevy::prelude::*;
use std::collections::HashMap;

use crate::config::InputConfig;
use crate::movement::MoveDirection;

/// One held movement key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeldKey {
    /// `Time::elapsed_secs_f64` at key-down (earliest press = priority)
    pub pressed_at: f64,
    /// Total time held so far
    pub held_for: f32,
    /// Time held past the initial delay since the last repeat step
    pub repeat_accumulator: f32,
}

/// Set of currently held movement keys (Resource)
///
/// Mutated only by key edges (intake) and `advance` (continuous movement).
#[derive(Resource, Default, Debug, Clone)]
pub struct InputState {
    held: HashMap<MoveDirection, HeldKey>,
}

impl InputState {
    /// Key-down; returns true on a real edge (false for OS key-repeat)
    pub fn press(&mut self, direction: MoveDirection, now: f64) -> bool {
        if self.held.contains_key(&direction) {
            return false;
        }
        self.held.insert(
            direction,
            HeldKey {
                pressed_at: now,
                held_for: 0.0,
                repeat_accumulator: 0.0,
            },
        );
        true
    }

    /// Key-up; drops the key together with its accumulator
    pub fn release(&mut self, direction: MoveDirection) -> bool {
        self.held.remove(&direction).is_some()
    }

    pub fn is_held(&self, direction: MoveDirection) -> bool {
        self.held.contains_key(&direction)
    }

    pub fn any_held(&self) -> bool {
        !self.held.is_empty()
    }

    pub fn held(&self, direction: MoveDirection) -> Option<&HeldKey> {
        self.held.get(&direction)
    }

    /// Earliest pressed key; simultaneous presses → Forward, Back, Left, Right
    pub fn priority_key(&self) -> Option<MoveDirection> {
        self.held
            .iter()
            .min_by(|(a_dir, a), (b_dir, b)| {
                a.pressed_at
                    .total_cmp(&b.pressed_at)
                    .then(a_dir.priority().cmp(&b_dir.priority()))
            })
            .map(|(direction, _)| *direction)
    }

    /// Advance held time by one frame
    ///
    /// Only the priority key accumulates repeat time. Returns the direction
    /// of a repeat step when its accumulator crossed `repeat_step_delay`.
    pub fn advance(&mut self, delta: f32, config: &InputConfig) -> Option<MoveDirection> {
        let priority = self.priority_key()?;

        let mut step = None;
        for (direction, key) in self.held.iter_mut() {
            let before = key.held_for;
            key.held_for += delta;

            if *direction != priority || key.held_for <= config.repeat_initial_delay {
                continue;
            }

            key.repeat_accumulator += key.held_for - before.max(config.repeat_initial_delay);
            if key.repeat_accumulator >= config.repeat_step_delay {
                key.repeat_accumulator = 0.0;
                step = Some(*direction);
            }
        }
        step
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}
