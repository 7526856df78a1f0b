//! Controller input events
//!
//! Emitted by the engine/host (Bevy client keyboard + ray pick, headless
//! script, tests) and consumed by the intake systems. Key identity only: the
//! host decides which physical keys map to which `ControlKey`.

use bevy::prelude::{Entity, Event};

use crate::movement::MoveDirection;

/// Logical controller key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKey {
    /// Arrow keys / WASD
    Move(MoveDirection),
    /// "Activate" key (Space / Enter)
    Interact,
    /// Close the info panel (Escape)
    ClosePanel,
}

/// Raw input delivered to the controller
///
/// # Fields
/// - `KeyDown` / `KeyUp`: key edges. OS key-repeat may send repeated `KeyDown`
///   for a held key; intake ignores them (edge detection on `InputState`).
/// - `Pick`: pointer pick result (None → clicked empty space / nothing pickable)
/// - `Interact`, `ClosePanel`: same as the matching `KeyDown`, for hosts with
///   buttons instead of keys
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerInput {
    KeyDown(ControlKey),
    KeyUp(ControlKey),
    Pick(Option<Entity>),
    Interact,
    ClosePanel,
}

impl ControllerInput {
    /// Shorthand for movement key-down
    pub fn press(direction: MoveDirection) -> Self {
        ControllerInput::KeyDown(ControlKey::Move(direction))
    }

    pub fn release(direction: MoveDirection) -> Self {
        ControllerInput::KeyUp(ControlKey::Move(direction))
    }

    /// True for interact requests in either form
    pub fn is_interact(&self) -> bool {
        matches!(
            self,
            ControllerInput::Interact | ControllerInput::KeyDown(ControlKey::Interact)
        )
    }

    pub fn is_close_panel(&self) -> bool {
        matches!(
            self,
            ControllerInput::ClosePanel | ControllerInput::KeyDown(ControlKey::ClosePanel)
        )
    }
}
