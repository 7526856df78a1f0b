//! World data (TOML) → rendered scene
//!
//! Landmarks become coloured cubes registered with the controller, decorations
//! become cylinders that block movement but never get selected. The ground and
//! axis guides are scenery (pointer picks ignore them).

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use walkthrough_controller::{
    avatar_bundle, landmark_bundle, scenery_bundle, timed_rig, ConfigError, ControllerConfig,
    FollowCamera, LandmarkId, Obstacle, TimedClip,
};

use crate::clips::AvatarBody;

const CUBE_SIZE: f32 = 1.5;
const GROUND_SIZE: f32 = 150.0;
const GROUND_HEIGHT: f32 = -0.75;
const GUIDE_LENGTH: f32 = 3.0;

pub struct ScenePlugin {
    world: WorldData,
}

impl ScenePlugin {
    pub fn new(world: WorldData) -> Self {
        Self { world }
    }
}

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.world.clone())
            .insert_resource(LandmarkCatalog::from_world(&self.world))
            .add_systems(Startup, setup_scene)
            .add_systems(Update, toggle_axis_guides);
    }
}

/// One selectable landmark as authored in `landmarks.toml`
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LandmarkData {
    pub id: LandmarkId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub position: [f32; 3],
    #[serde(default = "default_color")]
    pub color: [f32; 3],
}

/// Scenery that blocks movement (trees, rocks)
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DecorationData {
    pub position: [f32; 3],
    #[serde(default = "default_color")]
    pub color: [f32; 3],
}

fn default_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Resource, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WorldData {
    #[serde(default)]
    pub landmark: Vec<LandmarkData>,
    #[serde(default)]
    pub decoration: Vec<DecorationData>,
}

impl WorldData {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let world: WorldData = toml::from_str(text)?;

        let mut seen = std::collections::HashSet::new();
        for landmark in &world.landmark {
            if !seen.insert(landmark.id.clone()) {
                return Err(ConfigError::Invalid {
                    field: "landmark.id",
                    reason: format!("duplicate id `{}`", landmark.id),
                });
            }
        }
        Ok(world)
    }
}

/// Panel content by landmark id
#[derive(Resource, Debug, Default)]
pub struct LandmarkCatalog(HashMap<LandmarkId, LandmarkData>);

impl LandmarkCatalog {
    pub fn from_world(world: &WorldData) -> Self {
        Self(
            world
                .landmark
                .iter()
                .map(|landmark| (landmark.id.clone(), landmark.clone()))
                .collect(),
        )
    }

    pub fn get(&self, id: &LandmarkId) -> Option<&LandmarkData> {
        self.0.get(id)
    }
}

/// Axis-aligned box the pointer ray is tested against (centred on Transform)
#[derive(Component, Debug, Clone, Copy)]
pub struct PickBounds {
    pub half_extents: Vec3,
}

/// Origin axis guide (toggled with G)
#[derive(Component)]
pub struct AxisGuide;

fn rgb(color: [f32; 3]) -> Color {
    Color::srgb(color[0], color[1], color[2])
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    world: Res<WorldData>,
    config: Res<ControllerConfig>,
) {
    // Ground plane (scenery)
    commands.spawn((
        scenery_bundle(Transform::from_xyz(0.0, GROUND_HEIGHT, 0.0)),
        Mesh3d(meshes.add(Plane3d::new(Vec3::Y, Vec2::splat(GROUND_SIZE * 0.5)))),
        MeshMaterial3d(materials.add(Color::srgb(0.25, 0.3, 0.25))),
    ));

    // Axis guides: X red, Y green, Z blue
    let guides = [
        (Vec3::new(GUIDE_LENGTH, 0.05, 0.05), Vec3::X, Color::srgb(1.0, 0.0, 0.0)),
        (Vec3::new(0.05, GUIDE_LENGTH, 0.05), Vec3::Y, Color::srgb(0.0, 1.0, 0.0)),
        (Vec3::new(0.05, 0.05, GUIDE_LENGTH), Vec3::Z, Color::srgb(0.0, 0.0, 1.0)),
    ];
    for (size, axis, color) in guides {
        commands.spawn((
            scenery_bundle(Transform::from_translation(axis * GUIDE_LENGTH * 0.5)),
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..default()
            })),
            AxisGuide,
        ));
    }

    // Landmarks
    let cube = meshes.add(Cuboid::from_length(CUBE_SIZE));
    for landmark in &world.landmark {
        let color = rgb(landmark.color);
        commands.spawn((
            landmark_bundle(landmark.id.as_str(), Vec3::from_array(landmark.position), &config),
            Mesh3d(cube.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                emissive: LinearRgba::from(color) * 0.6,
                ..default()
            })),
            PickBounds {
                half_extents: Vec3::splat(CUBE_SIZE * 0.5),
            },
        ));
    }

    // Decorations: block movement, not pickable
    let trunk = meshes.add(Cylinder::new(0.5, 2.0));
    for decoration in &world.decoration {
        let position = walkthrough_controller::movement::snap_xz(
            Vec3::from_array(decoration.position),
            config.grid.size,
        );
        commands.spawn((
            scenery_bundle(Transform::from_translation(position + Vec3::Y * 0.25)),
            Obstacle::new(config.collision.obstacle_radius),
            Mesh3d(trunk.clone()),
            MeshMaterial3d(materials.add(rgb(decoration.color))),
        ));
    }

    // Avatar: logical entity + rendered body child (bob/squash lives on the body)
    let avatar = commands
        .spawn((
            avatar_bundle(Vec3::ZERO, &config),
            timed_rig(
                vec![TimedClip::new("Idle", 2.0), TimedClip::new("Walk", 0.45)],
                &config.animation,
            ),
            Visibility::default(),
            PickBounds {
                half_extents: Vec3::new(0.4, 0.9, 0.4),
            },
        ))
        .id();
    commands.spawn((
        AvatarBody::default(),
        Mesh3d(meshes.add(Capsule3d::new(0.35, 1.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.95, 0.95, 0.95))),
        Transform::from_xyz(0.0, AvatarBody::REST_HEIGHT, 0.0),
        ChildOf(avatar),
    ));

    // Camera (placed by the controller's follow system from the first frame)
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 8.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
        FollowCamera,
    ));

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        affects_lightmapped_meshes: false,
    });
}

fn toggle_axis_guides(
    keys: Res<ButtonInput<KeyCode>>,
    mut guides: Query<&mut Visibility, With<AxisGuide>>,
) {
    if !keys.just_pressed(KeyCode::KeyG) {
        return;
    }
    for mut visibility in guides.iter_mut() {
        visibility.toggle_visible_hidden();
    }
}
