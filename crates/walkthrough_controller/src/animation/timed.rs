//! TimedClip: engine-agnostic clip backend driven by frame time
//!
//! Used by the headless app, the demo client (procedural bob/squash) and tests.
//! A `TimedClip` is a cheap handle over shared playback state: one clone lives
//! inside the `AnimationRig`, another in `TimedClips` so `drive_timed_clips`
//! can advance it and report cycle ends.

use bevy::prelude::*;
use std::sync::{Arc, Mutex};

use super::clip::{ClipCycleEnded, ClipError, ClipHandle, CycleEndSubscription};
use super::state::AnimationRig;
use crate::config::AnimationConfig;

#[derive(Debug, Default)]
struct Playback {
    playing: bool,
    looping: bool,
    elapsed: f32,
    disposed: bool,
    subscriptions: Vec<CycleEndSubscription>,
    next_subscription: u64,
}

#[derive(Debug, Clone)]
pub struct TimedClip {
    name: String,
    duration: f32,
    /// false → behaves like an engine clip without end notification
    notifies: bool,
    playback: Arc<Mutex<Playback>>,
}

impl TimedClip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(f32::EPSILON),
            notifies: true,
            playback: Arc::new(Mutex::new(Playback::default())),
        }
    }

    pub fn without_cycle_end(mut self) -> Self {
        self.notifies = false;
        self
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_looping(&self) -> bool {
        self.playback.lock().map(|p| p.looping).unwrap_or(false)
    }

    /// Normalized position in the current cycle (0..=1), 0 when stopped
    pub fn phase(&self) -> f32 {
        self.playback
            .lock()
            .map(|p| if p.playing { p.elapsed / self.duration } else { 0.0 })
            .unwrap_or(0.0)
    }

    pub fn subscription_count(&self) -> usize {
        self.playback.lock().map(|p| p.subscriptions.len()).unwrap_or(0)
    }

    /// Simulate the engine tearing the clip down (every call fails afterwards)
    pub fn dispose(&self) {
        if let Ok(mut playback) = self.playback.lock() {
            playback.disposed = true;
            playback.playing = false;
            playback.subscriptions.clear();
        }
    }

    /// Advance playback; returns the subscriptions to notify when a one-shot
    /// cycle ended during this frame
    pub fn advance(&self, delta: f32) -> Vec<CycleEndSubscription> {
        let Ok(mut playback) = self.playback.lock() else {
            return Vec::new();
        };
        if !playback.playing || playback.disposed {
            return Vec::new();
        }

        playback.elapsed += delta;
        if playback.elapsed < self.duration {
            return Vec::new();
        }

        if playback.looping {
            playback.elapsed %= self.duration;
            return Vec::new();
        }

        playback.playing = false;
        playback.elapsed = self.duration;
        if self.notifies {
            playback.subscriptions.clone()
        } else {
            Vec::new()
        }
    }

    fn with_playback<T>(
        &self,
        f: impl FnOnce(&mut Playback) -> Result<T, ClipError>,
    ) -> Result<T, ClipError> {
        let mut playback = self
            .playback
            .lock()
            .map_err(|_| ClipError::Disposed(self.name.clone()))?;
        if playback.disposed {
            return Err(ClipError::Disposed(self.name.clone()));
        }
        f(&mut playback)
    }
}

impl ClipHandle for TimedClip {
    fn name(&self) -> &str {
        &self.name
    }

    fn start(&mut self, looping: bool) -> Result<(), ClipError> {
        self.with_playback(|playback| {
            playback.playing = true;
            playback.looping = looping;
            playback.elapsed = 0.0;
            Ok(())
        })
    }

    fn stop(&mut self) -> Result<(), ClipError> {
        self.with_playback(|playback| {
            playback.playing = false;
            playback.elapsed = 0.0;
            Ok(())
        })
    }

    fn is_playing(&self) -> bool {
        self.playback
            .lock()
            .map(|p| p.playing && !p.disposed)
            .unwrap_or(false)
    }

    fn supports_cycle_end(&self) -> bool {
        self.notifies
    }

    fn subscribe_cycle_end(&mut self) -> Result<CycleEndSubscription, ClipError> {
        if !self.notifies {
            return Err(ClipError::Unsupported {
                clip: self.name.clone(),
                operation: "cycle-end notification",
            });
        }
        self.with_playback(|playback| {
            playback.next_subscription += 1;
            let subscription = CycleEndSubscription(playback.next_subscription);
            playback.subscriptions.push(subscription);
            Ok(subscription)
        })
    }

    fn unsubscribe_cycle_end(&mut self, subscription: CycleEndSubscription) -> Result<(), ClipError> {
        let name = self.name.clone();
        self.with_playback(|playback| {
            let before = playback.subscriptions.len();
            playback.subscriptions.retain(|live| *live != subscription);
            if playback.subscriptions.len() == before {
                return Err(ClipError::UnknownSubscription { clip: name, subscription });
            }
            Ok(())
        })
    }
}

/// Engine-side handles of the avatar's `TimedClip`s
#[derive(Component, Debug, Clone, Default)]
pub struct TimedClips(pub Vec<TimedClip>);

/// Rig + driver component over the same clips
pub fn timed_rig(clips: Vec<TimedClip>, config: &AnimationConfig) -> (AnimationRig, TimedClips) {
    let handles: Vec<Box<dyn ClipHandle>> = clips
        .iter()
        .cloned()
        .map(|clip| Box::new(clip) as Box<dyn ClipHandle>)
        .collect();
    (AnimationRig::new(handles, config), TimedClips(clips))
}

/// System: advance timed clips and report finished cycles
pub fn drive_timed_clips(
    time: Res<Time>,
    clips: Query<(Entity, &TimedClips)>,
    mut cycle_ended: EventWriter<ClipCycleEnded>,
) {
    let delta = time.delta_secs();
    for (avatar, TimedClips(clips)) in clips.iter() {
        for clip in clips {
            for subscription in clip.advance(delta) {
                cycle_ended.write(ClipCycleEnded { avatar, subscription });
            }
        }
    }
}
