//! Movement domain: grid quantization and the step planner
//!
//! # Architecture
//!
//! ```text
//! Key-down edge / held-key repeat (input)
//!     ↓ MoveDirection
//! manual_step (planner.rs)
//!     ↓ candidate = position + dir * step, snapped
//! ObstacleField::is_blocked
//!     ├─ free    → commit Transform, AnimationRig::begin_walk
//!     └─ blocked → turn in place
//! ```
//!
//! Auto-navigation reuses `plan_step` with its own displacements.

pub mod grid;
pub mod planner;

pub use grid::*;
pub use planner::*;
