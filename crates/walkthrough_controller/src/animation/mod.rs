//! Animation domain: two-state machine synchronized with grid movement
//!
//! # Architecture
//!
//! ```text
//! Engine clips (ClipHandle)
//!     ↓ AnimationSet::resolve (config names → substring heuristic → positions)
//! AnimationRig (Component on the avatar)
//!     ↑ begin_walk        ← movement planner (manual steps only)
//!     ↑ request_idle      ← auto-navigator arrival
//!     ↑ on_movement_released / cancel_idle_debounce ← key intake
//!     ↑ on_cycle_end      ← ClipCycleEnded (engine) → process_cycle_end_events
//!     ↑ tick / heal_idle  ← tick_animation_timers
//! ```
//!
//! `TimedClip` is the built-in backend: frame-time playback that reports cycle
//! ends through `drive_timed_clips`.

pub mod clip;
pub mod set;
pub mod state;
pub mod systems;
pub mod timed;


pub use clip::*;
pub use set::*;
pub use state::*;
pub use systems::*;
pub use timed::*;
