//! Tests for approach/step geometry and Navigator::advance.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::components::{LandmarkId, Obstacle};
    use crate::config::ControllerConfig;
    use crate::movement::is_on_grid;
    use crate::navigation::*;
    use crate::spatial::is_blocked;

    const STEP: f32 = 1.5;

    fn target(landmark: &str, approach: Vec3) -> NavigationTarget {
        NavigationTarget {
            landmark: LandmarkId::from(landmark),
            approach,
        }
    }

    /// Run `advance` at step_interval until arrival (or give up)
    fn walk(
        navigator: &mut Navigator,
        mut position: Vec3,
        config: &ControllerConfig,
        obstacles: &[(Vec3, Obstacle)],
    ) -> (Vec3, Vec<Vec3>, NavigationProgress) {
        let blocked =
            |candidate: Vec3| is_blocked(candidate, config.collision.avatar_radius, obstacles.iter().copied());
        let mut path = Vec::new();

        for _ in 0..100 {
            match navigator.advance(position, config.navigation.step_interval, config, blocked) {
                NavigationProgress::Stepped { to, .. } => {
                    position = to;
                    path.push(to);
                }
                arrived @ NavigationProgress::Arrived { .. } => {
                    if let NavigationProgress::Arrived { position: settled, .. } = &arrived {
                        position = *settled;
                    }
                    return (position, path, arrived);
                }
                NavigationProgress::Idle => break,
                NavigationProgress::Waiting | NavigationProgress::Blocked { .. } => {}
            }
        }
        (position, path, NavigationProgress::Idle)
    }

    #[test]
    fn test_approach_point_dominant_z() {
        let approach = approach_point(Vec3::ZERO, Vec3::new(6.0, 0.0, 12.0), STEP, STEP);
        assert_eq!(approach, Vec3::new(6.0, 0.0, 10.5));
    }

    #[test]
    fn test_approach_point_dominant_negative_x() {
        let approach = approach_point(Vec3::new(3.0, 1.0, 0.0), Vec3::new(-9.0, 0.0, 1.5), STEP, STEP);
        assert_eq!(approach, Vec3::new(-7.5, 1.0, 1.5));
    }

    #[test]
    fn test_approach_point_tie_uses_z() {
        let approach = approach_point(Vec3::ZERO, Vec3::new(4.5, 0.0, -4.5), STEP, STEP);
        assert_eq!(approach, Vec3::new(4.5, 0.0, -3.0));
    }

    #[test]
    fn test_step_displacements_are_clamped_and_ordered() {
        let steps = step_displacements(Vec3::ZERO, Vec3::new(1.0, 0.0, 4.5), STEP);
        assert_eq!(steps, vec![Vec3::new(0.0, 0.0, 1.5), Vec3::new(1.0, 0.0, 0.0)]);

        let last = step_displacements(Vec3::new(0.0, 0.0, 9.0), Vec3::new(0.0, 0.0, 10.5), STEP);
        assert_eq!(last, vec![Vec3::new(0.0, 0.0, 1.5)]);
    }

    #[test]
    fn test_final_alignment() {
        let aligned = final_alignment(Vec3::new(4.5, 0.0, 9.0), Vec3::new(6.0, 0.0, 10.5), 0.1, STEP);
        assert_eq!(aligned, Some(Vec3::new(4.5, 0.0, 10.5)));

        assert_eq!(final_alignment(Vec3::new(6.05, 0.0, 10.5), Vec3::new(6.0, 0.0, 10.5), 0.1, STEP), None);
    }

    #[test]
    fn test_waits_for_step_interval() {
        let config = ControllerConfig::default();
        let mut navigator = Navigator::default();
        navigator.start(target("far", Vec3::new(0.0, 0.0, 15.0)));

        let progress = navigator.advance(Vec3::ZERO, 0.05, &config, |_| false);
        assert_eq!(progress, NavigationProgress::Waiting);
        let progress = navigator.advance(Vec3::ZERO, 0.15, &config, |_| false);
        assert_eq!(
            progress,
            NavigationProgress::Stepped {
                to: Vec3::new(0.0, 0.0, 1.5),
                direction: Vec3::new(0.0, 0.0, 1.5),
            }
        );
    }

    #[test]
    fn test_walks_to_landmark_and_arrives_in_range() {
        let config = ControllerConfig::default();
        let landmark = Vec3::new(6.0, 0.0, 12.0);
        let obstacles = [(landmark, Obstacle::new(0.75))];

        let mut navigator = Navigator::default();
        navigator.start(target(
            "geotales",
            approach_point(Vec3::ZERO, landmark, STEP, STEP),
        ));

        let (position, path, progress) = walk(&mut navigator, Vec3::ZERO, &config, &obstacles);

        assert!(matches!(
            progress,
            NavigationProgress::Arrived { ref landmark, .. } if landmark.as_str() == "geotales"
        ));
        assert!(!navigator.is_navigating());
        assert_eq!(position, Vec3::new(4.5, 0.0, 10.5));
        assert!(position.distance(landmark) <= config.interaction.proximity_threshold);
        for step in path {
            assert!(is_on_grid(step, STEP));
            assert!(step.distance(landmark) >= config.combined_collision_radius());
        }
    }

    #[test]
    fn test_blocked_dominant_axis_falls_back_to_other_axis() {
        let config = ControllerConfig::default();
        let mut navigator = Navigator::default();
        navigator.start(target("far", Vec3::new(3.0, 0.0, 15.0)));

        // Wall right in front on Z
        let wall = [(Vec3::new(0.0, 0.0, 1.5), Obstacle::new(0.75))];
        let blocked = |candidate: Vec3| is_blocked(candidate, 0.7, wall.iter().copied());

        let progress = navigator.advance(Vec3::ZERO, 0.15, &config, blocked);
        assert_eq!(
            progress,
            NavigationProgress::Stepped {
                to: Vec3::new(1.5, 0.0, 0.0),
                direction: Vec3::new(1.5, 0.0, 0.0),
            }
        );
    }

    #[test]
    fn test_fully_blocked_turns_in_place_and_keeps_target() {
        let config = ControllerConfig::default();
        let mut navigator = Navigator::default();
        navigator.start(target("far", Vec3::new(0.0, 0.0, 15.0)));

        let progress = navigator.advance(Vec3::ZERO, 0.15, &config, |_| true);
        assert_eq!(
            progress,
            NavigationProgress::Blocked { direction: Vec3::new(0.0, 0.0, 1.5) }
        );
        assert!(navigator.is_navigating());
    }

    #[test]
    fn test_start_supersedes_and_cancel_clears() {
        let mut navigator = Navigator::default();
        navigator.start(target("a", Vec3::new(0.0, 0.0, 9.0)));
        navigator.start(target("b", Vec3::new(9.0, 0.0, 0.0)));
        assert_eq!(navigator.target().map(|t| t.landmark.as_str()), Some("b"));

        navigator.cancel();
        assert!(!navigator.is_navigating());
        assert_eq!(
            navigator.advance(Vec3::ZERO, 1.0, &ControllerConfig::default(), |_| false),
            NavigationProgress::Idle
        );
    }
}
