use bevy::prelude::*;
use walkthrough_controller::{logger, ControllerConfig, ControllerPlugin};

mod clips;
mod controls;
mod panel;
mod scene;

use clips::ClipVisualsPlugin;
use controls::HostControlsPlugin;
use panel::PanelPlugin;
use scene::{ScenePlugin, WorldData};

const CONFIG_PATH: &str = "walkthrough.toml";
const WORLD_PATH: &str = "crates/walkthrough_client/assets/landmarks.toml";

fn main() {
    logger::init_logger();

    let config = match ControllerConfig::load_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(err) => {
            logger::log_error(&format!("walkthrough_client: {}", err));
            std::process::exit(1);
        }
    };

    let world_path = std::env::args().nth(1).unwrap_or_else(|| WORLD_PATH.to_string());
    let world = match WorldData::load(&world_path) {
        Ok(world) => world,
        Err(err) => {
            logger::log_error(&format!("walkthrough_client: {}", err));
            std::process::exit(1);
        }
    };

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Walk-through Resume".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Controller (headless ECS logic)
        .add_plugins(ControllerPlugin::with_config(config))
        // World data → landmarks, decorations, avatar, camera
        .add_plugins(ScenePlugin::new(world))
        // Keyboard + mouse → ControllerInput
        .add_plugins(HostControlsPlugin)
        // Clip phase → avatar body bob/squash
        .add_plugins(ClipVisualsPlugin)
        // SelectionEvent → info panel
        .add_plugins(PanelPlugin)
        .run();
}
