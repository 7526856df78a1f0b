//! Selection state + events published to the info panel

use bevy::prelude::*;

use crate::components::LandmarkId;

/// Stream consumed by the UI (info panel)
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    Selected(LandmarkId),
    Deselected,
}

/// Pending pick + current selection (Resource)
///
/// # Lifecycle
/// ```text
/// pick L          → pending = L, latch open
/// avatar in range → Selected(L) once, latch closed
/// avatar leaves   → latch re-opens (next arrival announces again)
/// panel closed    → pending/selected cleared (no Selected until a new pick)
/// ```
#[derive(Resource, Default, Debug, Clone)]
pub struct SelectionState {
    pending: Option<LandmarkId>,
    selected: Option<LandmarkId>,
    /// Selected already emitted for the current arrival at `pending`
    announced: bool,
}

impl SelectionState {
    pub fn pending(&self) -> Option<&LandmarkId> {
        self.pending.as_ref()
    }

    pub fn selected(&self) -> Option<&LandmarkId> {
        self.selected.as_ref()
    }

    /// Pointer pick: remember the landmark, select nothing yet
    pub fn arm(&mut self, id: LandmarkId) {
        self.pending = Some(id);
        self.announced = false;
    }

    /// Per-frame proximity check for the pending landmark
    ///
    /// `distance`: avatar → pending landmark (None if it no longer exists).
    /// Returns the id to announce, at most once per arrival.
    pub fn check_arrival(&mut self, distance: Option<f32>, threshold: f32) -> Option<LandmarkId> {
        let id = self.pending.as_ref()?;
        let distance = distance?;

        if distance > threshold {
            self.announced = false;
            return None;
        }
        if self.announced {
            return None;
        }

        self.announced = true;
        self.selected = Some(id.clone());
        Some(id.clone())
    }

    /// Explicit interact: nearest landmark, if within `threshold`
    pub fn interact(
        &mut self,
        nearest: Option<(LandmarkId, f32)>,
        threshold: f32,
    ) -> Option<LandmarkId> {
        let (id, distance) = nearest?;
        if distance > threshold {
            return None;
        }

        if self.pending.as_ref() == Some(&id) {
            self.announced = true;
        }
        self.selected = Some(id.clone());
        Some(id)
    }

    /// Panel closed externally
    pub fn close(&mut self) {
        self.pending = None;
        self.selected = None;
        self.announced = false;
    }
}
