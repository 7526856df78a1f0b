//! Grid movement planner
//!
//! `candidate = position + direction * step`, X/Z snapped, validated through
//! the collision predicate. Rejected → the avatar turns in place.

use bevy::prelude::*;

use super::grid::{snap_xz, MoveDirection};
use crate::animation::AnimationRig;
use crate::components::Facing;
use crate::config::ControllerConfig;
use crate::logger;
use crate::navigation::Navigator;
use crate::spatial::ObstacleField;

/// Result of one planned step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Moved { from: Vec3, to: Vec3 },
    Blocked { attempted: Vec3 },
}

impl StepOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, StepOutcome::Moved { .. })
    }
}

/// Snapped candidate for an arbitrary displacement
pub fn plan_displacement(from: Vec3, displacement: Vec3, grid_size: f32) -> Vec3 {
    snap_xz(from + displacement, grid_size)
}

/// Plan a displacement against a blocking predicate (no mutation)
pub fn plan_step(
    from: Vec3,
    displacement: Vec3,
    grid_size: f32,
    is_blocked: impl Fn(Vec3) -> bool,
) -> StepOutcome {
    let candidate = plan_displacement(from, displacement, grid_size);
    if is_blocked(candidate) {
        StepOutcome::Blocked { attempted: candidate }
    } else {
        StepOutcome::Moved { from, to: candidate }
    }
}

/// Manual directional step (initial key-down step or continuous repeat)
///
/// # Effects
/// - live NavigationTarget cleared (manual input preempts navigation)
/// - facing turned to `direction`, accepted or not
/// - accepted: position committed, Walking cycle requested
pub fn manual_step(
    direction: MoveDirection,
    transform: &mut Transform,
    facing: &mut Facing,
    navigator: &mut Navigator,
    rig: Option<&mut AnimationRig>,
    obstacles: &ObstacleField,
    config: &ControllerConfig,
) -> StepOutcome {
    navigator.cancel();

    let displacement = direction.unit() * config.grid.step;
    facing.face(displacement);
    transform.rotation = facing.rotation();

    let outcome = plan_step(
        transform.translation,
        displacement,
        config.grid.size,
        |candidate| obstacles.is_blocked(candidate, config.collision.avatar_radius),
    );

    match outcome {
        StepOutcome::Moved { to, .. } => {
            transform.translation = to;
            if let Some(rig) = rig {
                rig.begin_walk(&config.animation);
            }
            logger::log(&format!("👣 step {:?} → {:?}", direction, to));
        }
        StepOutcome::Blocked { attempted } => {
            logger::log(&format!("🧱 step {:?} blocked at {:?}", direction, attempted));
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Obstacle;
    use crate::spatial::is_blocked;

    const GRID: f32 = 1.5;

    fn blocked_by(obstacles: Vec<(Vec3, Obstacle)>) -> impl Fn(Vec3) -> bool {
        move |candidate| is_blocked(candidate, 0.7, obstacles.iter().copied())
    }

    #[test]
    fn test_step_forward_from_origin() {
        let outcome = plan_step(
            Vec3::ZERO,
            MoveDirection::Forward.unit() * GRID,
            GRID,
            blocked_by(vec![]),
        );
        assert_eq!(
            outcome,
            StepOutcome::Moved { from: Vec3::ZERO, to: Vec3::new(0.0, 0.0, -1.5) }
        );
    }

    #[test]
    fn test_step_into_obstacle_is_rejected() {
        let from = Vec3::new(4.5, 0.0, 12.0);
        let outcome = plan_step(
            from,
            MoveDirection::Right.unit() * GRID,
            GRID,
            blocked_by(vec![(Vec3::new(6.0, 0.0, 12.0), Obstacle::new(0.75))]),
        );
        assert!(!outcome.is_moved());
        assert_eq!(outcome, StepOutcome::Blocked { attempted: Vec3::new(6.0, 0.0, 12.0) });
    }

    #[test]
    fn test_candidate_is_snapped() {
        // Off-grid start (e.g. after an external teleport) lands back on the grid
        let to = plan_displacement(Vec3::new(0.2, 0.0, -0.1), Vec3::new(1.5, 0.0, 0.0), GRID);
        assert_eq!(to, Vec3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn test_accepted_steps_stay_on_grid() {
        let mut position = Vec3::ZERO;
        let walk = [
            MoveDirection::Forward,
            MoveDirection::Forward,
            MoveDirection::Right,
            MoveDirection::Back,
            MoveDirection::Left,
            MoveDirection::Left,
            MoveDirection::Left,
        ];
        for direction in walk {
            if let StepOutcome::Moved { to, .. } =
                plan_step(position, direction.unit() * GRID, GRID, blocked_by(vec![]))
            {
                position = to;
            }
            assert!(crate::movement::is_on_grid(position, GRID));
        }
        assert_eq!(position, Vec3::new(-3.0, 0.0, -1.5));
    }
}
