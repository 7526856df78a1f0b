//! Collision predicate
//!
//! Candidate position vs every collision-enabled non-avatar obstacle.
//! Pure, O(n) in obstacle count (a few dozen landmarks).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::components::{Avatar, Obstacle};

/// True if `candidate` lies closer than `avatar_radius + obstacle.radius` to
/// any enabled obstacle.
pub fn is_blocked<I>(candidate: Vec3, avatar_radius: f32, obstacles: I) -> bool
where
    I: IntoIterator<Item = (Vec3, Obstacle)>,
{
    obstacles.into_iter().any(|(position, obstacle)| {
        obstacle.collision_enabled && candidate.distance(position) < avatar_radius + obstacle.radius
    })
}

/// SystemParam: all obstacles except the avatar
///
/// `Without<Avatar>` keeps it disjoint from the avatar's `&mut Transform`.
#[derive(SystemParam)]
pub struct ObstacleField<'w, 's> {
    obstacles: Query<'w, 's, (&'static Transform, &'static Obstacle), Without<Avatar>>,
}

impl ObstacleField<'_, '_> {
    pub fn is_blocked(&self, candidate: Vec3, avatar_radius: f32) -> bool {
        is_blocked(
            candidate,
            avatar_radius,
            self.obstacles
                .iter()
                .map(|(transform, obstacle)| (transform.translation, *obstacle)),
        )
    }
}
