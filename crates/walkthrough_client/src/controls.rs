//! Host controls: keyboard + mouse → ControllerInput
//!
//! - Arrows / WASD: movement keys (down/up edges)
//! - Space / Enter: interact with the nearest landmark
//! - Escape: close the info panel
//! - Left click: ray pick against `PickBounds`

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use walkthrough_controller::{ControlKey, ControllerInput, ControllerSet, MoveDirection};

use crate::scene::PickBounds;

pub struct HostControlsPlugin;

impl Plugin for HostControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (keyboard_to_controller, pointer_pick).before(ControllerSet::Intake),
        );
    }
}

/// Keyboard layout → controller key
pub fn control_key(key: KeyCode) -> Option<ControlKey> {
    let key = match key {
        KeyCode::ArrowUp | KeyCode::KeyW => ControlKey::Move(MoveDirection::Forward),
        KeyCode::ArrowDown | KeyCode::KeyS => ControlKey::Move(MoveDirection::Back),
        KeyCode::ArrowLeft | KeyCode::KeyA => ControlKey::Move(MoveDirection::Left),
        KeyCode::ArrowRight | KeyCode::KeyD => ControlKey::Move(MoveDirection::Right),
        KeyCode::Space | KeyCode::Enter => ControlKey::Interact,
        KeyCode::Escape => ControlKey::ClosePanel,
        _ => return None,
    };
    Some(key)
}

fn keyboard_to_controller(keys: Res<ButtonInput<KeyCode>>, mut input: EventWriter<ControllerInput>) {
    for key in keys.get_just_pressed() {
        if let Some(control) = control_key(*key) {
            input.write(ControllerInput::KeyDown(control));
        }
    }
    for key in keys.get_just_released() {
        if let Some(control) = control_key(*key) {
            input.write(ControllerInput::KeyUp(control));
        }
    }
}

/// Ray / box slab test; distance along the ray to the entry point
pub fn ray_box_distance(origin: Vec3, direction: Vec3, center: Vec3, half_extents: Vec3) -> Option<f32> {
    let min = center - half_extents;
    let max = center + half_extents;

    let mut near = f32::NEG_INFINITY;
    let mut far = f32::INFINITY;
    for axis in 0..3 {
        let (o, d) = (origin[axis], direction[axis]);
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let t1 = (min[axis] - o) / d;
        let t2 = (max[axis] - o) / d;
        near = near.max(t1.min(t2));
        far = far.min(t1.max(t2));
    }

    if near > far || far < 0.0 {
        return None;
    }
    Some(near.max(0.0))
}

/// Left click: nearest PickBounds hit (None when the ray hits nothing pickable)
fn pointer_pick(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    targets: Query<(Entity, &GlobalTransform, &PickBounds)>,
    mut input: EventWriter<ControllerInput>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };

    let hit = targets
        .iter()
        .filter_map(|(entity, transform, bounds)| {
            ray_box_distance(ray.origin, *ray.direction, transform.translation(), bounds.half_extents)
                .map(|distance| (entity, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(entity, _)| entity);

    input.write(ControllerInput::Pick(hit));
}
