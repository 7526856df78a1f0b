//! Headless walk-through session
//!
//! Runs the controller without a renderer: a small scripted session (walk,
//! click a landmark, interact, close the panel) for smoke testing.
//!
//! Usage: `walkthrough_controller [path/to/walkthrough.toml]`

use bevy::prelude::*;
use std::time::Duration;
use walkthrough_controller::*;

const FRAME: Duration = Duration::from_millis(16);

/// Scripted host input: (frame, input)
fn script(landmark: Entity) -> Vec<(u32, ControllerInput)> {
    vec![
        (10, ControllerInput::press(MoveDirection::Forward)),
        (60, ControllerInput::release(MoveDirection::Forward)),
        (80, ControllerInput::press(MoveDirection::Right)),
        (82, ControllerInput::release(MoveDirection::Right)),
        (120, ControllerInput::Pick(Some(landmark))),
        (600, ControllerInput::Interact),
        (620, ControllerInput::ClosePanel),
    ]
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "walkthrough.toml".to_string());

    let config = match ControllerConfig::load_or_default(&path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("walkthrough_controller: {}", err);
            std::process::exit(1);
        }
    };

    println!("Starting headless walk-through session (config: {})", path);
    let mut app = create_headless_app(config.clone(), FRAME);

    let world = app.world_mut();
    let landmark = world
        .spawn(landmark_bundle("university-main", Vec3::new(6.0, 0.0, 12.0), &config))
        .id();
    world.spawn(landmark_bundle("geotales", Vec3::new(-7.5, 0.0, -6.0), &config));
    world.spawn(scenery_bundle(Transform::from_xyz(0.0, -0.5, 0.0)));
    world.spawn((FollowCamera, Transform::default()));
    world.spawn(avatar_bundle(Vec3::ZERO, &config)).insert(timed_rig(
        vec![TimedClip::new("Idle", 2.0), TimedClip::new("Walk", 0.5)],
        &config.animation,
    ));

    let mut pending = script(landmark);
    pending.reverse();

    for frame in 0..700u32 {
        while pending.last().is_some_and(|(at, _)| *at == frame) {
            if let Some((_, input)) = pending.pop() {
                app.world_mut().send_event(input);
            }
        }
        app.update();

        let selection_events: Vec<SelectionEvent> = app
            .world_mut()
            .resource_mut::<Events<SelectionEvent>>()
            .drain()
            .collect();
        for event in selection_events {
            println!("Frame {}: {:?}", frame, event);
        }

        if frame % 100 == 0 {
            let mut avatars = app
                .world_mut()
                .query_filtered::<(&Transform, &AnimationRig), With<Avatar>>();
            for (transform, rig) in avatars.iter(app.world()) {
                println!(
                    "Frame {}: avatar at {:?}, animation {:?}",
                    frame,
                    transform.translation,
                    rig.state()
                );
            }
        }
    }

    println!("Session complete!");
}
