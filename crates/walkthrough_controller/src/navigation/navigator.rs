//! Navigator component + approach/step geometry
//!
//! # Algorithm
//! ```text
//! pick landmark L
//!     ↓ approach_point: one step short of L on the dominant axis
//! every frame while a target is live:
//!     distance(avatar, approach) ≤ proximity → final_alignment, clear target
//!     otherwise accumulate dt; every step_interval → one axis-priority step
//! ```
//! Axis priority: larger absolute delta first, ties → Z. A blocked dominant
//! step falls back to the other axis; both blocked → turn in place and retry
//! on the next interval.

use bevy::prelude::*;

use crate::components::LandmarkId;
use crate::config::ControllerConfig;
use crate::logger;
use crate::movement::{plan_step, snap_to_grid, snap_xz, StepOutcome};

/// Live walk-to-landmark request
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationTarget {
    pub landmark: LandmarkId,
    pub approach: Vec3,
}

/// Per-frame result of `Navigator::advance`
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationProgress {
    /// No target
    Idle,
    /// Accumulating time toward the next step
    Waiting,
    Stepped { to: Vec3, direction: Vec3 },
    /// Every candidate step was blocked; the avatar only turns
    Blocked { direction: Vec3 },
    /// Final alignment done, target cleared
    Arrived {
        landmark: LandmarkId,
        position: Vec3,
        direction: Option<Vec3>,
    },
}

/// Auto-navigation state of the avatar (at most one live target)
#[derive(Component, Debug, Clone, Default)]
pub struct Navigator {
    target: Option<NavigationTarget>,
    accumulator: f32,
}

impl Navigator {
    /// Start (or supersede) navigation
    pub fn start(&mut self, target: NavigationTarget) {
        logger::log_info(&format!(
            "🧭 navigating to '{}' via {:?}",
            target.landmark, target.approach
        ));
        self.target = Some(target);
        self.accumulator = 0.0;
    }

    pub fn cancel(&mut self) {
        if let Some(target) = self.target.take() {
            logger::log(&format!("🧭 navigation to '{}' cancelled", target.landmark));
        }
        self.accumulator = 0.0;
    }

    pub fn target(&self) -> Option<&NavigationTarget> {
        self.target.as_ref()
    }

    pub fn is_navigating(&self) -> bool {
        self.target.is_some()
    }

    /// One frame of navigation from `position`
    ///
    /// Pure with respect to the world: the caller commits the returned
    /// position/facing.
    pub fn advance(
        &mut self,
        position: Vec3,
        delta: f32,
        config: &ControllerConfig,
        is_blocked: impl Fn(Vec3) -> bool,
    ) -> NavigationProgress {
        let Some(target) = self.target.as_ref() else {
            return NavigationProgress::Idle;
        };
        let approach = target.approach;

        if position.distance(approach) <= config.interaction.proximity_threshold {
            let Some(landmark) = self.target.take().map(|target| target.landmark) else {
                return NavigationProgress::Idle;
            };
            self.accumulator = 0.0;

            let (position, direction) = match final_alignment(
                position,
                approach,
                config.navigation.alignment_epsilon,
                config.grid.size,
            ) {
                Some(aligned) if !is_blocked(aligned) => (aligned, Some(aligned - position)),
                Some(aligned) => (position, Some(aligned - position)),
                None => (snap_xz(position, config.grid.size), None),
            };

            return NavigationProgress::Arrived {
                landmark,
                position,
                direction,
            };
        }

        self.accumulator += delta;
        if self.accumulator < config.navigation.step_interval {
            return NavigationProgress::Waiting;
        }
        self.accumulator = 0.0;

        let displacements = step_displacements(position, approach, config.grid.step);
        let Some(first) = displacements.first().copied() else {
            return NavigationProgress::Waiting;
        };

        for displacement in displacements {
            if let StepOutcome::Moved { to, .. } =
                plan_step(position, displacement, config.grid.size, &is_blocked)
            {
                return NavigationProgress::Stepped {
                    to,
                    direction: displacement,
                };
            }
        }

        NavigationProgress::Blocked { direction: first }
    }
}

fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Grid cell one `step` short of `target` along the dominant axis
///
/// Dominant axis = larger |delta| (ties → Z). The other axis takes the
/// target's own coordinate. X/Z are grid-snapped; Y is the avatar's.
pub fn approach_point(avatar: Vec3, target: Vec3, step: f32, grid_size: f32) -> Vec3 {
    let dx = target.x - avatar.x;
    let dz = target.z - avatar.z;

    let approach = if dx.abs() > dz.abs() {
        Vec3::new(target.x - sign(dx) * step, avatar.y, target.z)
    } else {
        Vec3::new(target.x, avatar.y, target.z - sign(dz) * step)
    };
    snap_xz(approach, grid_size)
}

/// Candidate displacements for the next autonomous step, in priority order
///
/// Each is clamped to the remaining delta so the last step never overshoots.
pub fn step_displacements(position: Vec3, approach: Vec3, step: f32) -> Vec<Vec3> {
    let dx = approach.x - position.x;
    let dz = approach.z - position.z;

    let along_x = (dx != 0.0).then(|| Vec3::new(clamp_step(dx, step), 0.0, 0.0));
    let along_z = (dz != 0.0).then(|| Vec3::new(0.0, 0.0, clamp_step(dz, step)));

    let ordered = if dx.abs() > dz.abs() {
        [along_x, along_z]
    } else {
        [along_z, along_x]
    };
    ordered.into_iter().flatten().collect()
}

fn clamp_step(delta: f32, step: f32) -> f32 {
    if delta.abs() < step {
        delta
    } else {
        sign(delta) * step
    }
}

/// Single non-accumulated correction on arrival
///
/// None when both remaining deltas are within `epsilon` (snap in place).
pub fn final_alignment(position: Vec3, approach: Vec3, epsilon: f32, grid_size: f32) -> Option<Vec3> {
    let dx = approach.x - position.x;
    let dz = approach.z - position.z;
    if dx.abs() <= epsilon && dz.abs() <= epsilon {
        return None;
    }

    let aligned = if dx.abs() > dz.abs() {
        Vec3::new(snap_to_grid(position.x + dx, grid_size), position.y, position.z)
    } else {
        Vec3::new(position.x, position.y, snap_to_grid(position.z + dz, grid_size))
    };
    Some(aligned)
}
