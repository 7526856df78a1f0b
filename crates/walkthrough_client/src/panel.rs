//! Info panel: SelectionEvent → on-screen landmark card

use bevy::prelude::*;
use walkthrough_controller::{logger, ControllerSet, SelectionEvent};

use crate::scene::{LandmarkCatalog, LandmarkData};

pub struct PanelPlugin;

impl Plugin for PanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_panel)
            .add_systems(Update, show_selection.after(ControllerSet::Dispatch));
    }
}

#[derive(Component)]
struct InfoPanel;

#[derive(Component)]
struct PanelText;

/// Card body for one landmark
pub fn panel_text(landmark: &LandmarkData) -> String {
    let mut text = landmark.title.clone();
    if let Some(date) = &landmark.date {
        text.push_str(&format!("\n{}", date));
    }
    text.push_str(&format!("\n\n{}", landmark.description));
    if !landmark.skills.is_empty() {
        text.push_str(&format!("\n\n{}", landmark.skills.join(" · ")));
    }
    text.push_str("\n\n[Esc] close");
    text
}

fn spawn_panel(mut commands: Commands) {
    commands
        .spawn((
            InfoPanel,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(16.0),
                right: Val::Px(16.0),
                width: Val::Px(360.0),
                padding: UiRect::all(Val::Px(12.0)),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.1, 0.85)),
            Visibility::Hidden,
        ))
        .with_children(|panel| {
            panel.spawn((
                PanelText,
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn show_selection(
    mut events: EventReader<SelectionEvent>,
    catalog: Res<LandmarkCatalog>,
    mut panels: Query<&mut Visibility, With<InfoPanel>>,
    mut texts: Query<&mut Text, With<PanelText>>,
) {
    for event in events.read() {
        let Ok(mut visibility) = panels.single_mut() else {
            return;
        };

        match event {
            SelectionEvent::Selected(id) => {
                let Some(landmark) = catalog.get(id) else {
                    logger::log_warning(&format!("Panel: no content for landmark {}", id));
                    continue;
                };
                logger::log_info(&format!("Panel: {} ({})", landmark.title, id));
                if let Ok(mut text) = texts.single_mut() {
                    text.0 = panel_text(landmark);
                }
                *visibility = Visibility::Visible;
            }
            SelectionEvent::Deselected => {
                logger::log("Panel: closed");
                *visibility = Visibility::Hidden;
            }
        }
    }
}
