//! Input module
//!
//! Turns raw host input into controller state and steps.
//!
//! # Architecture
//!
//! ```text
//! Host (Bevy keyboard / ray pick, headless script, tests)
//!     ↓
//! ControllerInput (ECS event) - events.rs
//!     ↓
//! handle_movement_keys → InputState (held keys) - state.rs
//!     ↓
//! continuous_keyboard_movement → manual_step (movement)
//! ```
//!
//! Picks, interact and panel-close events are consumed by the interaction
//! module from the same event stream.

pub mod events;
pub mod state;
pub mod systems;

pub use events::*;
pub use state::*;
pub use systems::*;
