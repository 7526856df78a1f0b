//! Interaction dispatcher: when does a landmark become "selected"
//!
//! # Architecture
//!
//! ```text
//! ControllerInput::Pick(entity)
//!     ↓ handle_pointer_picks: SelectionState::arm + Navigator::start
//!     ↓ (no event yet)
//! dispatch_proximity_selection (every frame)
//!     ↓ avatar within proximity of the pending landmark
//! SelectionEvent::Selected(id)   (once per arrival)
//!
//! ControllerInput::Interact → nearest landmark in range → Selected(id)
//! ControllerInput::ClosePanel → SelectionEvent::Deselected, pending cleared
//! ```

pub mod selection;
pub mod systems;

pub use selection::*;
pub use systems::*;
