//! Spatial registry: LandmarkId → entity handle
//!
//! The world builder spawns `Landmark` entities; `register_landmarks` mirrors
//! them into the registry before any controller system runs. Controller
//! systems only read it.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use std::collections::HashMap;

use crate::components::{Avatar, Landmark, LandmarkId, NonInteractive};
use crate::logger;

/// Registry: LandmarkId → Entity (position/radius live on the entity)
#[derive(Resource, Default, Debug)]
pub struct SpatialRegistry {
    landmarks: HashMap<LandmarkId, Entity>,
}

impl SpatialRegistry {
    pub fn get(&self, id: &LandmarkId) -> Option<Entity> {
        self.landmarks.get(id).copied()
    }

    pub fn contains(&self, id: &LandmarkId) -> bool {
        self.landmarks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// First registration wins; returns false on a duplicate id
    fn register(&mut self, id: LandmarkId, entity: Entity) -> bool {
        if self.landmarks.contains_key(&id) {
            return false;
        }
        self.landmarks.insert(id, entity);
        true
    }

    fn forget(&mut self, entity: Entity) {
        self.landmarks.retain(|_, registered| *registered != entity);
    }
}

/// System: sync registry with spawned/despawned `Landmark` entities
pub fn register_landmarks(
    added: Query<(Entity, &Landmark), Added<Landmark>>,
    mut removed: RemovedComponents<Landmark>,
    mut registry: ResMut<SpatialRegistry>,
) {
    for entity in removed.read() {
        registry.forget(entity);
    }

    for (entity, landmark) in added.iter() {
        if !registry.register(landmark.id.clone(), entity) {
            logger::log_warning(&format!(
                "Duplicate landmark id '{}' on {:?} ignored",
                landmark.id, entity
            ));
        }
    }
}

/// SystemParam: read-only landmark lookups for dispatcher/navigator
///
/// Skips the avatar (world data may register it as a landmark too). Only the
/// entity the registry holds for an id counts: a duplicate-id landmark is
/// neither pickable nor a candidate for interact.
#[derive(SystemParam)]
pub struct Landmarks<'w, 's> {
    registry: Res<'w, SpatialRegistry>,
    landmarks: Query<
        'w,
        's,
        (Entity, &'static Transform, &'static Landmark, Has<NonInteractive>),
        Without<Avatar>,
    >,
}

impl Landmarks<'_, '_> {
    pub fn position(&self, id: &LandmarkId) -> Option<Vec3> {
        let entity = self.registry.get(id)?;
        self.landmarks
            .get(entity)
            .ok()
            .map(|(_, transform, _, _)| transform.translation)
    }

    /// Landmark behind a picked entity, unless it is scenery or unregistered
    pub fn pickable(&self, entity: Entity) -> Option<(&LandmarkId, Vec3)> {
        let (_, transform, landmark, non_interactive) = self.landmarks.get(entity).ok()?;
        if non_interactive || self.registry.get(&landmark.id) != Some(entity) {
            return None;
        }
        Some((&landmark.id, transform.translation))
    }

    /// Closest registered, interactive landmark to `from`
    pub fn nearest(&self, from: Vec3) -> Option<(LandmarkId, f32)> {
        self.landmarks
            .iter()
            .filter(|(entity, _, landmark, non_interactive)| {
                !non_interactive && self.registry.get(&landmark.id) == Some(*entity)
            })
            .map(|(_, transform, landmark, _)| (&landmark.id, from.distance(transform.translation)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, distance)| (id.clone(), distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_first_wins() {
        let mut registry = SpatialRegistry::default();
        let first = Entity::from_raw(1);
        let second = Entity::from_raw(2);

        assert!(registry.register(LandmarkId::from("a"), first));
        assert!(!registry.register(LandmarkId::from("a"), second));
        assert_eq!(registry.get(&LandmarkId::from("a")), Some(first));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_forget_entity() {
        let mut registry = SpatialRegistry::default();
        let entity = Entity::from_raw(7);
        registry.register(LandmarkId::from("b"), entity);

        registry.forget(entity);
        assert!(registry.is_empty());
        assert!(!registry.contains(&LandmarkId::from("b")));
    }

    #[test]
    fn test_register_system_tracks_spawn_and_despawn() {
        let mut app = App::new();
        app.init_resource::<SpatialRegistry>()
            .add_systems(Update, register_landmarks);

        let a = app.world_mut().spawn(Landmark::new("a")).id();
        app.world_mut().spawn(Landmark::new("a"));
        app.world_mut().spawn(Landmark::new("b"));
        app.update();

        {
            let registry = app.world().resource::<SpatialRegistry>();
            assert_eq!(registry.len(), 2);
            assert_eq!(registry.get(&LandmarkId::from("a")), Some(a));
        }

        app.world_mut().despawn(a);
        app.update();

        let registry = app.world().resource::<SpatialRegistry>();
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains(&LandmarkId::from("a")));
    }
}
