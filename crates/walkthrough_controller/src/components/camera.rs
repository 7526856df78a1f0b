//! Follow camera marker

use bevy::prelude::Component;

/// Marker for the camera entity that tracks the avatar
///
/// The controller only writes its `Transform`; projection and rendering stay
/// with the engine.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FollowCamera;
