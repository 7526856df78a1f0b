//! Shared headless harness for integration tests
#![allow(dead_code)]

use bevy::ecs::world::EntityWorldMut;
use bevy::prelude::*;
use std::time::Duration;
use walkthrough_controller::*;

pub const FRAME: Duration = Duration::from_millis(50);

/// Every SelectionEvent published so far (recorded in `Last`)
#[derive(Resource, Default)]
pub struct Published(pub Vec<SelectionEvent>);

pub fn record_selection_events(mut events: EventReader<SelectionEvent>, mut published: ResMut<Published>) {
    published.0.extend(events.read().cloned());
}

pub struct Harness {
    pub app: App,
    pub avatar: Entity,
}

impl Harness {
    /// Avatar at the origin, clock primed
    pub fn new(config: ControllerConfig) -> Self {
        Self::with_avatar(config, Vec3::ZERO, |_| {})
    }

    /// `decorate` adds extra components to the avatar (animation rig, ...)
    pub fn with_avatar(
        config: ControllerConfig,
        position: Vec3,
        decorate: impl FnOnce(&mut EntityWorldMut),
    ) -> Self {
        let mut app = create_headless_app(config.clone(), FRAME);
        app.init_resource::<Published>()
            .add_systems(Last, record_selection_events);

        let mut avatar = app.world_mut().spawn(avatar_bundle(position, &config));
        decorate(&mut avatar);
        let avatar = avatar.id();

        let mut harness = Self { app, avatar };
        // First update has zero delta (primes Time)
        harness.app.update();
        harness
    }

    pub fn config(&self) -> ControllerConfig {
        self.app.world().resource::<ControllerConfig>().clone()
    }

    pub fn landmark(&mut self, id: &str, position: Vec3) -> Entity {
        let config = self.config();
        self.app
            .world_mut()
            .spawn(landmark_bundle(id, position, &config))
            .id()
    }

    pub fn scenery(&mut self, position: Vec3) -> Entity {
        self.app
            .world_mut()
            .spawn(scenery_bundle(Transform::from_translation(position)))
            .id()
    }

    pub fn send(&mut self, input: ControllerInput) {
        self.app.world_mut().send_event(input);
    }

    pub fn run(&mut self, frames: usize) {
        for _ in 0..frames {
            self.app.update();
        }
    }

    pub fn position(&self) -> Vec3 {
        self.app
            .world()
            .get::<Transform>(self.avatar)
            .map(|transform| transform.translation)
            .unwrap_or(Vec3::NAN)
    }

    pub fn facing(&self) -> Facing {
        *self.app.world().get::<Facing>(self.avatar).expect("avatar facing")
    }

    pub fn navigator(&self) -> Navigator {
        self.app
            .world()
            .get::<Navigator>(self.avatar)
            .cloned()
            .expect("avatar navigator")
    }

    pub fn rig(&self) -> &AnimationRig {
        self.app.world().get::<AnimationRig>(self.avatar).expect("avatar rig")
    }

    pub fn published(&self) -> Vec<SelectionEvent> {
        self.app.world().resource::<Published>().0.clone()
    }

    pub fn selected_count(&self, id: &str) -> usize {
        self.published()
            .iter()
            .filter(|event| matches!(event, SelectionEvent::Selected(selected) if selected.as_str() == id))
            .count()
    }
}
