use bevy::prelude::*;

use super::state::AppState;
use super::ui::{apply_button_action, despawn_with, label, screen_root, text_button, ButtonAction};
use crate::core::inventory::Inventory;
use crate::core::resources::RunStats;
use crate::core::tank_code::CurrentTank;
use crate::interaction::inputmap::types::InputMap;

/// Highlighted row in the inventory list.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InventoryCursor(pub usize);

#[derive(Component)]
struct InventoryUi;

#[derive(Component)]
struct InventoryListText;

pub struct InventoryScreenPlugin;

impl Plugin for InventoryScreenPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InventoryCursor>()
            .add_systems(OnEnter(AppState::Inventory), spawn_inventory_ui)
            .add_systems(
                Update,
                (inventory_input, equip_buttons, refresh_list)
                    .chain()
                    .run_if(in_state(AppState::Inventory)),
            )
            .add_systems(OnExit(AppState::Inventory), despawn_with::<InventoryUi>);
    }
}

fn spawn_inventory_ui(mut commands: Commands, inventory: Res<Inventory>, mut cursor: ResMut<InventoryCursor>) {
    cursor.0 = cursor.0.min(inventory.len().saturating_sub(1));
    info!(target: "scene", "=== INVENTORY === ({} parts)", inventory.len());
    commands.spawn(screen_root(InventoryUi)).with_children(|root| {
        root.spawn(label("Inventory", 36.0));
        root.spawn((label("", 20.0), InventoryListText));
        root.spawn(text_button("Equip", ButtonAction::Equip));
        root.spawn(text_button("Back", ButtonAction::ReturnToGame));
    });
}

/// Fit the highlighted part. Returns a log-friendly description of the swap.
pub fn equip_selected(inventory: &mut Inventory, cursor: usize, tank: &mut CurrentTank) -> Option<String> {
    let before = tank.0;
    let item = inventory.equip(cursor, &mut tank.0)?;
    Some(format!("equipped {} ({before} -> {})", item, tank.0))
}

pub fn inventory_input(
    input: Option<Res<InputMap>>,
    mut inventory: ResMut<Inventory>,
    mut cursor: ResMut<InventoryCursor>,
    mut tank: ResMut<CurrentTank>,
    mut next: ResMut<NextState<AppState>>,
    mut stats: ResMut<RunStats>,
) {
    let Some(input) = input else {
        return;
    };
    let len = inventory.len();
    if len > 0 {
        if input.just_pressed("MenuUp") {
            cursor.0 = (cursor.0 + len - 1) % len;
        }
        if input.just_pressed("MenuDown") {
            cursor.0 = (cursor.0 + 1) % len;
        }
    }
    if input.just_pressed("Confirm") {
        if let Some(msg) = equip_selected(&mut inventory, cursor.0, &mut tank) {
            info!(target: "inventory", "{msg}");
        }
    }
    if input.just_pressed("Back") || input.just_pressed("OpenInventory") {
        apply_button_action(ButtonAction::ReturnToGame, &mut next, &mut stats);
    }
}

fn equip_buttons(
    q: Query<(&Interaction, &ButtonAction), Changed<Interaction>>,
    mut inventory: ResMut<Inventory>,
    cursor: Res<InventoryCursor>,
    mut tank: ResMut<CurrentTank>,
) {
    for (interaction, action) in &q {
        if *interaction == Interaction::Pressed && *action == ButtonAction::Equip {
            if let Some(msg) = equip_selected(&mut inventory, cursor.0, &mut tank) {
                info!(target: "inventory", "{msg}");
            }
        }
    }
}

/// Inventory listing with the cursor row marked.
pub fn describe_inventory(inventory: &Inventory, cursor: usize, tank: &CurrentTank) -> String {
    let mut out = format!("Current tank {}\n\n", tank.0);
    if inventory.is_empty() {
        out.push_str("No parts collected yet");
        return out;
    }
    for (i, item) in inventory.items.iter().enumerate() {
        let marker = if i == cursor { ">" } else { " " };
        out.push_str(&format!("{marker} {item}\n"));
    }
    out.push_str("\nW/S select, Enter to fit, Esc to return");
    out
}

fn refresh_list(
    inventory: Res<Inventory>,
    cursor: Res<InventoryCursor>,
    tank: Res<CurrentTank>,
    mut q: Query<&mut Text, With<InventoryListText>>,
) {
    let Ok(mut text) = q.single_mut() else {
        return;
    };
    let body = describe_inventory(&inventory, cursor.0, &tank);
    if text.0 != body {
        text.0 = body;
    }
}
