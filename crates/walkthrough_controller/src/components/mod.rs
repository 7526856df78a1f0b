//! ECS Components shared by the controller domains
//!
//! Organised by role:
//! - avatar: the user-controlled entity (Avatar, Facing)
//! - landmark: world entities the avatar walks to (Landmark, Obstacle, NonInteractive)
//! - camera: follow camera marker (FollowCamera)

pub mod avatar;
pub mod camera;
pub mod landmark;

pub use avatar::*;
pub use camera::*;
pub use landmark::*;
