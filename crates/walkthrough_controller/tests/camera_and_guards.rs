//! Follow camera on a live App + frames without an avatar

mod common;

use bevy::prelude::*;
use common::{record_selection_events, Harness, Published, FRAME};
use walkthrough_controller::*;

fn camera_transform(app: &App, camera: Entity) -> Transform {
    *app.world().get::<Transform>(camera).expect("camera transform")
}

fn assert_follows(camera: Transform, avatar: Vec3) {
    assert!(camera
        .translation
        .abs_diff_eq(avatar + Vec3::new(0.0, 14.0, 8.0), 1e-5));
    let look = (avatar + Vec3::new(0.0, 0.5, 0.0) - camera.translation).normalize();
    assert!(camera.forward().as_vec3().abs_diff_eq(look, 1e-5));
}

#[test]
fn test_camera_tracks_avatar_every_frame() {
    let mut harness = Harness::new(ControllerConfig::default());
    let camera = harness
        .app
        .world_mut()
        .spawn((FollowCamera, Transform::default()))
        .id();

    harness.run(1);
    assert_follows(camera_transform(&harness.app, camera), Vec3::ZERO);

    harness.send(ControllerInput::press(MoveDirection::Right));
    harness.run(1);
    harness.send(ControllerInput::release(MoveDirection::Right));

    let avatar = harness.position();
    assert_eq!(avatar, Vec3::new(1.5, 0.0, 0.0));
    assert_follows(camera_transform(&harness.app, camera), avatar);

    harness.send(ControllerInput::press(MoveDirection::Back));
    harness.run(1);
    harness.send(ControllerInput::release(MoveDirection::Back));
    harness.run(1);

    assert_follows(camera_transform(&harness.app, camera), Vec3::new(1.5, 0.0, 1.5));
}

#[test]
fn test_frames_without_avatar_are_no_ops() {
    let config = ControllerConfig::default();
    let mut app = create_headless_app(config.clone(), FRAME);
    app.init_resource::<Published>()
        .add_systems(Last, record_selection_events);
    let landmark = app
        .world_mut()
        .spawn(landmark_bundle("geotales", Vec3::new(1.5, 0.0, 0.0), &config))
        .id();
    let parked = Transform::from_xyz(3.0, 2.0, 1.0);
    let camera = app.world_mut().spawn((FollowCamera, parked)).id();
    app.update();

    for input in [
        ControllerInput::press(MoveDirection::Forward),
        ControllerInput::Pick(Some(landmark)),
        ControllerInput::Interact,
    ] {
        app.world_mut().send_event(input);
    }
    for _ in 0..20 {
        app.update();
    }

    // Key state is still tracked for when an avatar shows up
    assert!(app.world().resource::<InputState>().is_held(MoveDirection::Forward));
    assert!(app.world().resource::<SelectionState>().pending().is_none());
    assert_eq!(camera_transform(&app, camera), parked);
    assert!(app.world().resource::<Published>().0.is_empty());
}
