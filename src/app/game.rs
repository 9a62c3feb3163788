use bevy::prelude::*;
use bevy::ui::{FlexDirection, Node, PositionType};

use super::game_over::GameOverPlugin;
use super::inventory_screen::InventoryScreenPlugin;
use super::select_tank::SelectTankPlugin;
use super::state::AppState;
use super::ui::{apply_button_action, despawn_with, label, text_button, ButtonAction, SceneUiPlugin};
use crate::core::components::GameEntity;
use crate::core::resources::RunStats;
use crate::core::CorePlugin;
use crate::debug::DebugPlugin;
use crate::gameplay::GameplayPlugin;
use crate::interaction::inputmap::plugin::InputActionsPlugin;
use crate::interaction::inputmap::types::InputMap;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::interaction::session::config_hot_reload::ConfigHotReloadPlugin;
use crate::rendering::RenderingPlugin;

/// Everything the game adds on top of Bevy's own plugins.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            CorePlugin,
            InputActionsPlugin,
            GameplayPlugin,
            RenderingPlugin,
            SceneUiPlugin,
            SelectTankPlugin,
            GameScenePlugin,
            InventoryScreenPlugin,
            GameOverPlugin,
            DebugPlugin,
            ConfigHotReloadPlugin,
            AutoClosePlugin,
        ));
    }
}

#[derive(Component)]
struct HudText;

/// HUD and keyboard shortcuts of the combat scene. Tanks themselves are spawned by the
/// gameplay plugins; leaving the scene clears everything tagged [`GameEntity`].
pub struct GameScenePlugin;

impl Plugin for GameScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Game), spawn_hud)
            .add_systems(
                Update,
                (game_shortcuts, update_hud).run_if(in_state(AppState::Game)),
            )
            .add_systems(OnExit(AppState::Game), despawn_with::<GameEntity>);
    }
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        GameEntity,
        HudText,
        label("", 18.0),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(10.0),
            ..default()
        },
    ));
    commands
        .spawn((
            GameEntity,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(24.0),
                left: Val::Px(24.0),
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(16.0),
                ..default()
            },
        ))
        .with_children(|bar| {
            bar.spawn(text_button("Back", ButtonAction::ToSelectTank));
            bar.spawn(text_button("Inventory", ButtonAction::OpenInventory));
        });
}

fn game_shortcuts(
    input: Option<Res<InputMap>>,
    mut next: ResMut<NextState<AppState>>,
    mut stats: ResMut<RunStats>,
) {
    let Some(input) = input else {
        return;
    };
    if input.just_pressed("Back") {
        apply_button_action(ButtonAction::ToSelectTank, &mut next, &mut stats);
    } else if input.just_pressed("OpenInventory") {
        apply_button_action(ButtonAction::OpenInventory, &mut next, &mut stats);
    }
}

fn update_hud(stats: Res<RunStats>, mut q: Query<&mut Text, With<HudText>>) {
    if !stats.is_changed() {
        return;
    }
    for mut text in &mut q {
        text.0 = format!("Kills {}   Parts {}", stats.kills, stats.items_collected);
    }
}
