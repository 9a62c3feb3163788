//! Scene UI helpers: text buttons with hover tint and the actions they trigger.

use bevy::prelude::*;
use bevy::ui::{AlignItems, FlexDirection, JustifyContent, Node};

use super::state::AppState;
use crate::core::resources::RunStats;
use crate::rendering::palette;

/// What a scene button does when clicked. Keyboard shortcuts in each scene map onto the
/// same actions through [`apply_button_action`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Leave tank selection and start a fresh run.
    StartRun,
    /// Restart after a loss.
    Retry,
    ToSelectTank,
    OpenInventory,
    ReturnToGame,
    /// Fit the inventory entry under the cursor.
    Equip,
}

pub struct SceneUiPlugin;

impl Plugin for SceneUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (tint_buttons, press_buttons));
    }
}

/// Target state for an action, or `None` when the action stays in the current scene.
pub fn action_target(action: ButtonAction) -> Option<AppState> {
    match action {
        ButtonAction::StartRun | ButtonAction::Retry | ButtonAction::ReturnToGame => Some(AppState::Game),
        ButtonAction::ToSelectTank => Some(AppState::SelectTank),
        ButtonAction::OpenInventory => Some(AppState::Inventory),
        ButtonAction::Equip => None,
    }
}

/// Switch scene for `action`; a new run (start or retry) clears the tallies first.
pub fn apply_button_action(
    action: ButtonAction,
    next: &mut NextState<AppState>,
    stats: &mut RunStats,
) {
    if matches!(action, ButtonAction::StartRun | ButtonAction::Retry) {
        *stats = RunStats::default();
    }
    if let Some(target) = action_target(action) {
        info!(target: "scene", "{action:?} -> {target:?}");
        next.set(target);
    }
}

fn tint_buttons(
    mut q: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut bg) in &mut q {
        *bg = BackgroundColor(match interaction {
            Interaction::Pressed => palette::BUTTON_PRESSED,
            Interaction::Hovered => palette::BUTTON_HOVER,
            Interaction::None => palette::BUTTON_IDLE,
        });
    }
}

/// Equip buttons are handled by the inventory screen itself.
fn press_buttons(
    q: Query<(&Interaction, &ButtonAction), Changed<Interaction>>,
    mut next: ResMut<NextState<AppState>>,
    mut stats: ResMut<RunStats>,
) {
    for (interaction, action) in &q {
        if *interaction == Interaction::Pressed && *action != ButtonAction::Equip {
            apply_button_action(*action, &mut next, &mut stats);
        }
    }
}

pub fn text_button(label: impl Into<String>, action: ButtonAction) -> impl Bundle {
    (
        Button,
        action,
        Node {
            padding: UiRect::axes(Val::Px(18.0), Val::Px(8.0)),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(palette::BUTTON_IDLE),
        BorderRadius::all(Val::Px(6.0)),
        children![(
            Text::new(label),
            TextFont { font_size: 22.0, ..default() },
            TextColor(Color::WHITE),
        )],
    )
}

/// Full-screen column layout used as the root of every menu scene.
pub fn screen_root(marker: impl Component) -> impl Bundle {
    (
        marker,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(12.0),
            ..default()
        },
    )
}

pub fn label(text: impl Into<String>, size: f32) -> impl Bundle {
    (
        Text::new(text),
        TextFont { font_size: size, ..default() },
        TextColor(Color::WHITE),
    )
}

/// Despawn every entity carrying `T`. Scenes register this on exit for their marker.
pub fn despawn_with<T: Component>(mut commands: Commands, q: Query<Entity, With<T>>) {
    for entity in &q {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_runs_reset_stats_but_inventory_trips_do_not() {
        let mut next = NextState::<AppState>::default();
        let mut stats = RunStats { kills: 4, ..default() };
        apply_button_action(ButtonAction::OpenInventory, &mut next, &mut stats);
        assert_eq!(stats.kills, 4);
        assert!(matches!(next, NextState::Pending(AppState::Inventory)));
        apply_button_action(ButtonAction::Retry, &mut next, &mut stats);
        assert_eq!(stats, RunStats::default());
        assert!(matches!(next, NextState::Pending(AppState::Game)));
    }

    #[test]
    fn equip_stays_put() {
        assert_eq!(action_target(ButtonAction::Equip), None);
        assert_eq!(action_target(ButtonAction::ToSelectTank), Some(AppState::SelectTank));
    }
}
