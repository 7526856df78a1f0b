//! Auto-navigation domain: walk-to-landmark after a pointer pick
//!
//! # Architecture
//!
//! ```text
//! Pointer pick (interaction::handle_pointer_picks)
//!     ↓ approach_point(avatar, landmark)
//! Navigator::start(NavigationTarget)          (Component on the avatar)
//!     ↓ advance_auto_navigation (NavigationSet, every frame)
//! Stepped / Blocked / Arrived
//!     ↓ Arrived → AnimationRig::request_idle
//! Interaction dispatcher sees the avatar in range → Selected
//! ```
//!
//! Manual input (`manual_step`, movement key-down) cancels the live target.

pub mod navigator;
pub mod systems;

#[cfg(test)]
mod navigator_tests;

pub use navigator::*;
pub use systems::*;
