//! Walk-through Avatar Controller
//!
//! ECS controller on Bevy 0.16 for a grid-aligned 3D walk-through world:
//! keyboard steps, click-to-walk auto-navigation, walk/idle animation lock,
//! collision avoidance and proximity-based landmark selection.
//!
//! # Architecture
//! - Engine side (Bevy client / headless host) owns rendering, meshes, clips
//! - Controller (this crate) owns avatar position, facing, animation state,
//!   navigation target and selection; talks to the engine through
//!   `ControllerInput`, `ClipHandle`/`ClipCycleEnded` and `SelectionEvent`
//!
//! # Frame order (Update, chained sets)
//! ```text
//! Registry → Intake → Movement → Navigation → Animation → Dispatch → Camera
//! ```

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

pub mod animation;
pub mod camera;
pub mod components;
pub mod config;
pub mod input;
pub mod interaction;
pub mod logger;
pub mod movement;
pub mod navigation;
pub mod spatial;

pub use animation::{
    timed_rig, AnimationRig, AnimationSet, AnimationState, ClipCycleEnded, ClipError, ClipHandle,
    CycleEndSubscription, TimedClip, TimedClips,
};
pub use camera::{follow_pose, CameraPose};
pub use components::*;
pub use config::{ConfigError, ControllerConfig};
pub use input::{ControlKey, ControllerInput, InputState};
pub use interaction::{SelectionEvent, SelectionState};
pub use logger::{log, log_error, log_info, log_warning, LogLevel};
pub use movement::{MoveDirection, StepOutcome};
pub use navigation::{NavigationTarget, Navigator};
pub use spatial::{avatar_bundle, landmark_bundle, scenery_bundle, SpatialRegistry};

/// Per-frame controller phases, run in this order
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerSet {
    /// Landmark entities → SpatialRegistry
    Registry,
    /// Key edges, picks, interact, panel close
    Intake,
    /// Held-key repeat
    Movement,
    /// Auto-navigation step / arrival
    Navigation,
    /// Clip cycle ends, walk fallback, idle debounce
    Animation,
    /// Proximity selection
    Dispatch,
    /// Follow camera
    Camera,
}

/// Main controller plugin (config + resources + events + systems)
#[derive(Default)]
pub struct ControllerPlugin {
    config: ControllerConfig,
}

impl ControllerPlugin {
    pub fn with_config(config: ControllerConfig) -> Self {
        Self { config }
    }
}

impl Plugin for ControllerPlugin {
    fn build(&self, app: &mut App) {
        logger::set_log_level(self.config.log_level);

        app.insert_resource(self.config.clone())
            .init_resource::<spatial::SpatialRegistry>()
            .init_resource::<input::InputState>()
            .init_resource::<interaction::SelectionState>()
            .add_event::<input::ControllerInput>()
            .add_event::<interaction::SelectionEvent>()
            .add_event::<animation::ClipCycleEnded>()
            .register_type::<Avatar>()
            .register_type::<Facing>()
            .register_type::<Landmark>()
            .register_type::<Obstacle>()
            .register_type::<NonInteractive>()
            .configure_sets(
                Update,
                (
                    ControllerSet::Registry,
                    ControllerSet::Intake,
                    ControllerSet::Movement,
                    ControllerSet::Navigation,
                    ControllerSet::Animation,
                    ControllerSet::Dispatch,
                    ControllerSet::Camera,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                spatial::register_landmarks.in_set(ControllerSet::Registry),
            )
            .add_systems(
                Update,
                (
                    input::handle_movement_keys,
                    interaction::handle_pointer_picks,
                    interaction::handle_interact_requests,
                    interaction::handle_panel_close,
                )
                    .chain()
                    .in_set(ControllerSet::Intake),
            )
            .add_systems(
                Update,
                input::continuous_keyboard_movement.in_set(ControllerSet::Movement),
            )
            .add_systems(
                Update,
                navigation::advance_auto_navigation.in_set(ControllerSet::Navigation),
            )
            .add_systems(
                Update,
                (
                    animation::drive_timed_clips,
                    animation::process_cycle_end_events,
                    animation::tick_animation_timers,
                )
                    .chain()
                    .in_set(ControllerSet::Animation),
            )
            .add_systems(
                Update,
                interaction::dispatch_proximity_selection.in_set(ControllerSet::Dispatch),
            )
            .add_systems(Update, camera::camera_follow.in_set(ControllerSet::Camera));

        logger::log_info("🎮 ControllerPlugin ready");
    }
}

/// Minimal headless App with a fixed frame duration
///
/// Every `app.update()` advances time by exactly `frame`, so tests and the
/// scripted binary are deterministic. The first update only primes the clock
/// (zero delta).
pub fn create_headless_app(config: ControllerConfig, frame: Duration) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame))
        .add_plugins(ControllerPlugin::with_config(config));

    app
}
