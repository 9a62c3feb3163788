use bevy::prelude::*;

use super::state::AppState;
use super::ui::{apply_button_action, despawn_with, label, screen_root, text_button, ButtonAction};
use crate::core::config::GameConfig;
use crate::core::resources::RunStats;
use crate::interaction::inputmap::types::InputMap;

#[derive(Component)]
struct GameOverUi;

pub struct GameOverPlugin;

impl Plugin for GameOverPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::GameOver), spawn_game_over_ui)
            .add_systems(Update, game_over_input.run_if(in_state(AppState::GameOver)))
            .add_systems(OnExit(AppState::GameOver), despawn_with::<GameOverUi>);
    }
}

pub fn summarize_run(stats: &RunStats, tick_hz: f64) -> String {
    format!(
        "Survived {:.1}s\nKills {}\nShots fired {}\nParts collected {}",
        stats.seconds_survived(tick_hz),
        stats.kills,
        stats.shots_fired,
        stats.items_collected
    )
}

fn spawn_game_over_ui(mut commands: Commands, stats: Res<RunStats>, cfg: Res<GameConfig>) {
    let summary = summarize_run(&stats, cfg.sim.tick_hz);
    info!(target: "scene", "=== GAME OVER === {}", summary.replace('\n', ", "));
    commands.spawn(screen_root(GameOverUi)).with_children(|root| {
        root.spawn(label("Game Over", 48.0));
        root.spawn(label(summary, 22.0));
        root.spawn(text_button("Retry", ButtonAction::Retry));
        root.spawn(text_button("Change tank", ButtonAction::ToSelectTank));
    });
}

fn game_over_input(
    input: Option<Res<InputMap>>,
    mut next: ResMut<NextState<AppState>>,
    mut stats: ResMut<RunStats>,
) {
    let Some(input) = input else {
        return;
    };
    if input.just_pressed("Confirm") {
        apply_button_action(ButtonAction::Retry, &mut next, &mut stats);
    } else if input.just_pressed("Back") {
        apply_button_action(ButtonAction::ToSelectTank, &mut next, &mut stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_reports_time_and_tallies() {
        let stats = RunStats { kills: 2, shots_fired: 9, items_collected: 1, ticks_survived: 300 };
        let s = summarize_run(&stats, 60.0);
        assert!(s.starts_with("Survived 5.0s"));
        assert!(s.contains("Kills 2"));
        assert!(s.contains("Shots fired 9"));
    }
}
