//! Engine-facing clip interface
//!
//! The controller never touches engine animation types. The engine hands the
//! avatar a list of `ClipHandle`s and reports cycle completion through
//! `ClipCycleEnded`.
//!
//! # Subscription protocol
//! ```text
//! AnimationRig::begin_walk
//!     ↓ motion.subscribe_cycle_end() → CycleEndSubscription (stored on the rig)
//! engine: clip reached its end
//!     ↓ ClipCycleEnded { avatar, subscription }
//! AnimationRig::on_cycle_end(subscription)
//!     ↓ ignored unless it matches the stored subscription
//! ```

use bevy::prelude::*;

/// Opaque id of one "cycle ended" subscription (issued by the clip)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CycleEndSubscription(pub u64);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClipError {
    #[error("clip '{0}' has been disposed")]
    Disposed(String),

    #[error("clip '{clip}' does not support {operation}")]
    Unsupported { clip: String, operation: &'static str },

    #[error("clip '{clip}' has no subscription {subscription:?}")]
    UnknownSubscription {
        clip: String,
        subscription: CycleEndSubscription,
    },
}

/// One animation clip exposed by the engine for the avatar
///
/// Every call may fail on disposed engine resources; the rig treats all
/// failures as best-effort and keeps going.
pub trait ClipHandle: Send + Sync {
    fn name(&self) -> &str;

    fn start(&mut self, looping: bool) -> Result<(), ClipError>;

    fn stop(&mut self) -> Result<(), ClipError>;

    fn is_playing(&self) -> bool;

    /// False → the rig falls back to a fixed timeout instead of subscribing
    fn supports_cycle_end(&self) -> bool {
        true
    }

    fn subscribe_cycle_end(&mut self) -> Result<CycleEndSubscription, ClipError>;

    fn unsubscribe_cycle_end(&mut self, subscription: CycleEndSubscription) -> Result<(), ClipError>;
}

/// Event: a subscribed clip finished its (non-looping) cycle
///
/// Emitted by the engine side. Stale subscriptions are ignored by the rig.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipCycleEnded {
    pub avatar: Entity,
    pub subscription: CycleEndSubscription,
}
