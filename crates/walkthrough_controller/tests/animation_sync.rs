//! Animation ↔ movement synchronization on a headless App
//!
//! The avatar carries a `timed_rig` (TimedClip backend), so cycle ends are
//! reported through `ClipCycleEnded` exactly like an engine would.

mod common;

use bevy::prelude::*;
use common::Harness;
use walkthrough_controller::*;

struct Clips {
    idle: TimedClip,
    walk: TimedClip,
}

fn harness_with_clips(walk: TimedClip) -> (Harness, Clips) {
    let config = ControllerConfig::default();
    let idle = TimedClip::new("Idle", 1.0);
    let clips = Clips {
        idle: idle.clone(),
        walk: walk.clone(),
    };

    let animation = config.animation.clone();
    let harness = Harness::with_avatar(config, Vec3::ZERO, move |avatar| {
        avatar.insert(timed_rig(vec![idle, walk], &animation));
    });
    (harness, clips)
}

#[test]
fn test_step_plays_one_walk_cycle_then_idle() {
    let (mut harness, clips) = harness_with_clips(TimedClip::new("Walk", 0.5));
    assert_eq!(harness.rig().state(), AnimationState::Idle);
    assert!(clips.idle.is_playing());

    harness.send(ControllerInput::press(MoveDirection::Forward));
    harness.run(1);
    harness.send(ControllerInput::release(MoveDirection::Forward));

    assert!(harness.rig().is_walk_locked());
    assert!(clips.walk.is_playing());
    assert!(!clips.walk.is_looping());
    assert!(!clips.idle.is_playing());

    harness.run(5);
    assert!(harness.rig().is_walk_locked());

    harness.run(10);
    assert_eq!(harness.rig().state(), AnimationState::Idle);
    assert!(clips.idle.is_playing());
    assert_eq!(clips.walk.subscription_count(), 0);
}

#[test]
fn test_key_down_during_idle_debounce_keeps_walking() {
    // Short cycle: it ends while the key is still held
    let (mut harness, _clips) = harness_with_clips(TimedClip::new("Walk", 0.1));

    harness.send(ControllerInput::press(MoveDirection::Forward));
    harness.run(3);
    assert_eq!(
        harness.rig().state(),
        AnimationState::Walking { locked: false }
    );

    harness.send(ControllerInput::release(MoveDirection::Forward));
    harness.run(1);
    assert!(harness.rig().has_pending_idle());

    harness.send(ControllerInput::press(MoveDirection::Forward));
    harness.run(1);

    assert!(!harness.rig().has_pending_idle());
    assert!(harness.rig().is_walk_locked());
    assert_eq!(harness.position(), Vec3::new(0.0, 0.0, -3.0));
}

#[test]
fn test_idle_debounce_elapses_after_release() {
    let (mut harness, _clips) = harness_with_clips(TimedClip::new("Walk", 0.1));

    harness.send(ControllerInput::press(MoveDirection::Forward));
    harness.run(3);
    harness.send(ControllerInput::release(MoveDirection::Forward));
    harness.run(1);
    assert!(harness.rig().is_walking());

    harness.run(3);
    assert_eq!(harness.rig().state(), AnimationState::Idle);
}

#[test]
fn test_fallback_timeout_releases_walk_lock() {
    let (mut harness, clips) = harness_with_clips(TimedClip::new("Walk", 0.3).without_cycle_end());

    harness.send(ControllerInput::press(MoveDirection::Back));
    harness.run(1);
    harness.send(ControllerInput::release(MoveDirection::Back));
    assert_eq!(clips.walk.subscription_count(), 0);

    // Clip finished after 0.3 s but the lock holds until the 0.6 s fallback
    harness.run(8);
    assert!(harness.rig().is_walk_locked());

    harness.run(6);
    assert_eq!(harness.rig().state(), AnimationState::Idle);
}

#[test]
fn test_auto_navigation_never_starts_walk() {
    let (mut harness, clips) = harness_with_clips(TimedClip::new("Walk", 0.5));
    let landmark = harness.landmark("geotales", Vec3::new(6.0, 0.0, 12.0));
    harness.run(1);

    harness.send(ControllerInput::Pick(Some(landmark)));
    for _ in 0..80 {
        harness.run(1);
        assert_eq!(harness.rig().state(), AnimationState::Idle);
        assert!(!clips.walk.is_playing());
    }
    assert_eq!(harness.position(), Vec3::new(4.5, 0.0, 10.5));
}

#[test]
fn test_clips_never_play_together_and_one_subscription_at_most() {
    let (mut harness, clips) = harness_with_clips(TimedClip::new("Walk", 0.35));

    let script = [
        (MoveDirection::Forward, 9),
        (MoveDirection::Left, 2),
        (MoveDirection::Right, 14),
        (MoveDirection::Back, 1),
        (MoveDirection::Forward, 6),
    ];
    for (direction, frames) in script {
        harness.send(ControllerInput::press(direction));
        for _ in 0..frames {
            harness.run(1);
            assert!(!(clips.idle.is_playing() && clips.walk.is_playing()));
            assert!(clips.walk.subscription_count() <= 1);
        }
        harness.send(ControllerInput::release(direction));
        for _ in 0..3 {
            harness.run(1);
            assert!(!(clips.idle.is_playing() && clips.walk.is_playing()));
            assert!(clips.walk.subscription_count() <= 1);
        }
    }
}

#[test]
fn test_despawn_detaches_cycle_end_subscription() {
    let (mut harness, clips) = harness_with_clips(TimedClip::new("Walk", 0.5));

    harness.send(ControllerInput::press(MoveDirection::Forward));
    harness.run(1);
    assert_eq!(clips.walk.subscription_count(), 1);

    let avatar = harness.avatar;
    harness.app.world_mut().despawn(avatar);
    assert_eq!(clips.walk.subscription_count(), 0);
}
