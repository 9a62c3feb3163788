//! Tank assembly screen: pick a part slot, cycle its variant, start the run.

use bevy::prelude::*;

use super::state::AppState;
use super::ui::{apply_button_action, despawn_with, label, screen_root, text_button, ButtonAction};
use crate::core::config::GameConfig;
use crate::core::resources::RunStats;
use crate::core::tank_code::{CurrentTank, PartSlot};
use crate::gameplay::tank::spawn_tank_visual;
use crate::interaction::inputmap::types::InputMap;

/// Slot the left/right keys currently edit.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedSlot(pub PartSlot);

impl Default for SelectedSlot {
    fn default() -> Self {
        Self(PartSlot::Turret)
    }
}

#[derive(Component)]
struct SelectTankUi;

#[derive(Component)]
struct SelectTankText;

#[derive(Component)]
pub struct TankPreview;

pub struct SelectTankPlugin;

impl Plugin for SelectTankPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectedSlot>()
            .add_systems(OnEnter(AppState::SelectTank), spawn_select_ui)
            .add_systems(
                Update,
                (select_tank_input, refresh_preview, refresh_text)
                    .chain()
                    .run_if(in_state(AppState::SelectTank)),
            )
            .add_systems(
                OnExit(AppState::SelectTank),
                (despawn_with::<SelectTankUi>, despawn_with::<TankPreview>),
            );
    }
}

fn spawn_select_ui(mut commands: Commands) {
    info!(target: "scene", "=== SELECT TANK ===");
    commands.spawn(screen_root(SelectTankUi)).with_children(|root| {
        root.spawn(label("Select your tank", 36.0));
        // Leave room for the preview sprite, which lives in world space at the centre.
        root.spawn(Node { height: Val::Px(160.0), ..default() });
        root.spawn((label("", 20.0), SelectTankText));
        root.spawn(text_button("Start", ButtonAction::StartRun));
    });
}

/// Up/down pick the slot, left/right cycle its variant, confirm starts the run.
pub fn select_tank_input(
    input: Option<Res<InputMap>>,
    mut slot: ResMut<SelectedSlot>,
    mut current: ResMut<CurrentTank>,
    mut next: ResMut<NextState<AppState>>,
    mut stats: ResMut<RunStats>,
) {
    let Some(input) = input else {
        return;
    };
    if input.just_pressed("MenuUp") {
        slot.0 = slot.0.prev();
    }
    if input.just_pressed("MenuDown") {
        slot.0 = slot.0.next();
    }
    if input.just_pressed("MenuLeft") {
        current.0.cycle(slot.0, -1);
    }
    if input.just_pressed("MenuRight") {
        current.0.cycle(slot.0, 1);
    }
    if input.just_pressed("Confirm") {
        apply_button_action(ButtonAction::StartRun, &mut next, &mut stats);
    }
}

fn refresh_preview(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    current: Res<CurrentTank>,
    previews: Query<Entity, With<TankPreview>>,
) {
    if !current.is_changed() && !previews.is_empty() {
        return;
    }
    for entity in &previews {
        commands.entity(entity).despawn();
    }
    spawn_tank_visual(
        &mut commands,
        current.0,
        cfg.tank.size * 1.4,
        Vec2::new(0.0, 40.0),
        0.0,
        (TankPreview, Name::new("TankPreview")),
    );
}

fn refresh_text(
    slot: Res<SelectedSlot>,
    current: Res<CurrentTank>,
    mut q: Query<&mut Text, With<SelectTankText>>,
) {
    let Ok(mut text) = q.single_mut() else {
        return;
    };
    let body = describe_selection(current.0, slot.0);
    if text.0 != body {
        text.0 = body;
    }
}

/// One line per slot, the edited one marked with `>`.
pub fn describe_selection(code: crate::core::tank_code::TankCode, selected: PartSlot) -> String {
    let mut out = format!("Tank {code}\n");
    for slot in PartSlot::ALL {
        let marker = if slot == selected { ">" } else { " " };
        out.push_str(&format!(
            "{marker} {:<8} {} / {}\n",
            slot.label(),
            code.part(slot),
            slot.variants() - 1
        ));
    }
    out.push_str("W/S choose part, A/D change it, Enter to start");
    out
}
