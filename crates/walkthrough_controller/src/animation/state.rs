//! Animation state machine (Idle ↔ Walking) owned by the avatar
//!
//! # States
//! - `Idle`: idle clip looping
//! - `Walking { locked: true }`: motion clip playing one cycle, cannot be
//!   interrupted by an Idle request
//! - `Walking { locked: false }`: cycle finished while movement was still
//!   pending; the next committed step restarts the cycle
//!
//! # Transitions
//! ```text
//! Idle / Walking{unlocked} ──begin_walk──▶ Walking{locked}
//! Walking{locked} ──cycle end / fallback timeout──▶ Idle              (nothing pending)
//!                                               └─▶ Walking{unlocked} (key held / nav live)
//! Walking{unlocked} ──last key released──▶ (idle debounce) ──▶ Idle
//!                   ──key down during debounce──▶ debounce cancelled
//! ```
//!
//! Exactly one cycle-end subscription is live: every `begin_walk` detaches the
//! previous one first, and `Drop` detaches whatever is left.

use bevy::prelude::*;
use std::fmt;
use std::time::Duration;

use super::clip::{ClipHandle, CycleEndSubscription};
use super::set::AnimationSet;
use crate::config::AnimationConfig;
use crate::logger;

/// Logical animation state (exactly one at any time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum AnimationState {
    #[default]
    Idle,
    Walking {
        locked: bool,
    },
}

/// Avatar animation rig: engine clips + resolved set + state machine
///
/// Optional on the avatar. Without clips (or without the component) movement
/// works and the state stays `Idle`.
#[derive(Component)]
pub struct AnimationRig {
    clips: Vec<Box<dyn ClipHandle>>,
    set: Option<AnimationSet>,
    state: AnimationState,
    /// Subscription on `clips[set.motion]`
    live_subscription: Option<CycleEndSubscription>,
    /// Walk lock release for clips without cycle-end notification
    fallback: Option<Timer>,
    idle_debounce: Option<Timer>,
}

impl AnimationRig {
    /// Resolve the set and start idle (if there is anything to play)
    pub fn new(clips: Vec<Box<dyn ClipHandle>>, config: &AnimationConfig) -> Self {
        let names: Vec<&str> = clips.iter().map(|clip| clip.name()).collect();
        let set = AnimationSet::resolve(&names, config);

        let mut rig = Self {
            clips,
            set,
            state: AnimationState::Idle,
            live_subscription: None,
            fallback: None,
            idle_debounce: None,
        };

        match rig.set {
            Some(set) => {
                logger::log(&format!(
                    "🎞️ AnimationRig: idle='{}' motion='{}'",
                    rig.clips[set.idle].name(),
                    rig.clips[set.motion].name()
                ));
                rig.enter_idle();
            }
            None => logger::log("🎞️ AnimationRig: no clips, animation disabled"),
        }

        rig
    }

    /// Rig without clips (movement only)
    pub fn disabled() -> Self {
        Self::new(Vec::new(), &AnimationConfig::default())
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn set(&self) -> Option<AnimationSet> {
        self.set
    }

    pub fn is_enabled(&self) -> bool {
        self.set.is_some()
    }

    pub fn is_idle(&self) -> bool {
        self.state == AnimationState::Idle
    }

    pub fn is_walking(&self) -> bool {
        matches!(self.state, AnimationState::Walking { .. })
    }

    pub fn is_walk_locked(&self) -> bool {
        self.state == AnimationState::Walking { locked: true }
    }

    pub fn live_subscription(&self) -> Option<CycleEndSubscription> {
        self.live_subscription
    }

    pub fn has_pending_idle(&self) -> bool {
        self.idle_debounce.is_some()
    }

    /// Start one walk cycle (a committed step happened)
    ///
    /// Returns false when animation is disabled or the current cycle is still
    /// locked (the running cycle is not restarted).
    pub fn begin_walk(&mut self, config: &AnimationConfig) -> bool {
        let Some(set) = self.set else {
            return false;
        };
        if self.is_walk_locked() {
            return false;
        }

        self.idle_debounce = None;
        self.stop_all();

        let motion = &mut self.clips[set.motion];
        let mut looped = false;
        if let Err(err) = motion.start(false) {
            logger::log(&format!("⚠️ walk start(loop=false) failed: {}, retrying looped", err));
            looped = true;
            if let Err(err) = motion.start(true) {
                logger::log(&format!("⚠️ walk start(loop=true) failed: {}", err));
            }
        }

        // A looping clip never ends a cycle: only the fallback timer can unlock
        let subscription = if motion.supports_cycle_end() && !looped {
            motion
                .subscribe_cycle_end()
                .map_err(|err| logger::log(&format!("⚠️ cycle-end subscribe failed: {}", err)))
                .ok()
        } else {
            None
        };

        match subscription {
            Some(subscription) => self.live_subscription = Some(subscription),
            None => {
                self.fallback = Some(Timer::from_seconds(
                    config.walk_fallback_timeout,
                    TimerMode::Once,
                ));
            }
        }

        self.state = AnimationState::Walking { locked: true };
        logger::log("🚶 walk cycle started");
        true
    }

    /// Idle request from the controller (auto-nav arrival)
    ///
    /// Deferred while the walk is locked: the cycle end settles it.
    pub fn request_idle(&mut self) -> bool {
        match self.state {
            AnimationState::Walking { locked: true } => false,
            AnimationState::Walking { locked: false } => {
                self.enter_idle();
                true
            }
            AnimationState::Idle => true,
        }
    }

    /// Last movement key released and no navigation live
    pub fn on_movement_released(&mut self, config: &AnimationConfig) {
        // Locked cycles go idle at their own end; Idle has nothing to do
        if self.state != (AnimationState::Walking { locked: false }) {
            return;
        }
        self.idle_debounce = Some(Timer::from_seconds(config.idle_debounce, TimerMode::Once));
    }

    /// New key-down: cancel a pending Idle re-entry
    pub fn cancel_idle_debounce(&mut self) {
        if self.idle_debounce.take().is_some() {
            logger::log("⏱️ idle debounce cancelled by key-down");
        }
    }

    /// Engine reported a cycle end
    ///
    /// `movement_pending`: a movement key is held or navigation is live.
    /// Returns false for stale/foreign subscriptions (ignored).
    pub fn on_cycle_end(
        &mut self,
        subscription: CycleEndSubscription,
        movement_pending: bool,
    ) -> bool {
        if self.live_subscription != Some(subscription) {
            logger::log(&format!("🎞️ stale cycle-end {:?} ignored", subscription));
            return false;
        }
        self.finish_cycle(movement_pending);
        true
    }

    /// Per-frame timers (fallback walk lock, idle debounce)
    pub fn tick(&mut self, delta: Duration, movement_pending: bool) {
        let fallback_fired = self
            .fallback
            .as_mut()
            .map(|timer| timer.tick(delta).finished())
            .unwrap_or(false);
        if fallback_fired {
            self.fallback = None;
            logger::log("⏱️ walk fallback timeout");
            self.finish_cycle(movement_pending);
        }

        let debounce_fired = self
            .idle_debounce
            .as_mut()
            .map(|timer| timer.tick(delta).finished())
            .unwrap_or(false);
        if debounce_fired {
            self.idle_debounce = None;
            if !movement_pending && !self.is_walk_locked() {
                self.enter_idle();
            }
        }
    }

    /// Self-heal when nothing is moving
    ///
    /// - unlocked Walking with nothing pending and no debounce → Idle
    /// - Idle whose clip stopped playing → restart it
    pub fn heal_idle(&mut self, movement_pending: bool) {
        if movement_pending {
            return;
        }

        match self.state {
            AnimationState::Walking { locked: false } if self.idle_debounce.is_none() => {
                self.enter_idle();
            }
            AnimationState::Idle => {
                let Some(set) = self.set else {
                    return;
                };
                let idle = &mut self.clips[set.idle];
                if !idle.is_playing() {
                    if let Err(err) = idle.start(true) {
                        logger::log(&format!("⚠️ idle restart failed: {}", err));
                    }
                }
            }
            AnimationState::Walking { .. } => {}
        }
    }

    fn finish_cycle(&mut self, movement_pending: bool) {
        self.detach();
        if let Some(set) = self.set {
            if let Err(err) = self.clips[set.motion].stop() {
                logger::log(&format!("⚠️ walk stop failed: {}", err));
            }
        }

        if movement_pending {
            // Stay armed: the next committed step restarts the cycle
            self.state = AnimationState::Walking { locked: false };
        } else {
            self.enter_idle();
        }
    }

    fn enter_idle(&mut self) {
        self.idle_debounce = None;
        self.stop_all();
        self.state = AnimationState::Idle;

        let Some(set) = self.set else {
            return;
        };
        if let Err(err) = self.clips[set.idle].start(true) {
            logger::log(&format!("⚠️ idle start failed: {}", err));
        }
        logger::log("🧍 idle");
    }

    fn stop_all(&mut self) {
        self.detach();
        for clip in self.clips.iter_mut() {
            if let Err(err) = clip.stop() {
                logger::log(&format!("⚠️ stop '{}' failed: {}", clip.name(), err));
            }
        }
    }

    /// Drop the live subscription (and the fallback timer standing in for it)
    fn detach(&mut self) {
        self.fallback = None;
        let (Some(subscription), Some(set)) = (self.live_subscription.take(), self.set) else {
            return;
        };
        if let Err(err) = self.clips[set.motion].unsubscribe_cycle_end(subscription) {
            logger::log(&format!("⚠️ cycle-end unsubscribe failed: {}", err));
        }
    }
}

impl Drop for AnimationRig {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for AnimationRig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.clips.iter().map(|clip| clip.name()).collect();
        f.debug_struct("AnimationRig")
            .field("clips", &names)
            .field("set", &self.set)
            .field("state", &self.state)
            .field("live_subscription", &self.live_subscription)
            .field("fallback", &self.fallback.is_some())
            .field("idle_debounce", &self.idle_debounce.is_some())
            .finish()
    }
}
