pub mod components;
pub mod config;
pub mod events;
pub mod inventory;
pub mod resources;
pub mod system;
pub mod tank_code;

use bevy::prelude::*;

use crate::app::state::AppState;
use events::{EnemyDestroyed, ItemCollected, PlayerDestroyed, ShotFired};
use inventory::Inventory;
use resources::{player_alive, Arena, GameRng, PlayerDown, RunStats, SimTick};
use system::SimSet;
use tank_code::CurrentTank;

/// Registers the shared resources, events, app state and tick ordering every other plugin
/// builds on. Expects `GameConfig` to be inserted beforehand (falls back to defaults).
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<config::GameConfig>() {
            app.init_resource::<config::GameConfig>();
        }
        let tick_hz = app.world().resource::<config::GameConfig>().sim.tick_hz.max(1.0);
        app.init_state::<AppState>()
            .insert_resource(Time::<Fixed>::from_hz(tick_hz))
            .init_resource::<GameRng>()
            .init_resource::<Arena>()
            .init_resource::<SimTick>()
            .init_resource::<RunStats>()
            .init_resource::<PlayerDown>()
            .init_resource::<CurrentTank>()
            .init_resource::<Inventory>()
            .add_event::<EnemyDestroyed>()
            .add_event::<PlayerDestroyed>()
            .add_event::<ShotFired>()
            .add_event::<ItemCollected>()
            .configure_sets(
                FixedUpdate,
                (SimSet::Control, SimSet::Motion, SimSet::Combat, SimSet::Cleanup)
                    .chain()
                    .run_if(in_state(AppState::Game).and(player_alive)),
            )
            .add_systems(OnEnter(AppState::Game), reset_player_down)
            .add_systems(Startup, log_config_report)
            .add_systems(FixedUpdate, advance_tick.in_set(SimSet::Control));
    }
}

/// Loading happens before the log plugin is up, so the outcome is replayed here.
fn log_config_report(report: Option<Res<config::ConfigLoadReport>>) {
    let Some(report) = report else {
        return;
    };
    for e in &report.errors {
        warn!(target: "config", "CONFIG LOAD ISSUE: {e}");
    }
    info!(target: "config", used = ?report.used, "Config layers loaded");
    for w in &report.warnings {
        warn!(target: "config", "CONFIG WARNING: {w}");
    }
}

fn reset_player_down(mut down: ResMut<PlayerDown>) {
    down.0 = false;
}

fn advance_tick(mut tick: ResMut<SimTick>, mut stats: ResMut<RunStats>) {
    tick.0 += 1;
    stats.ticks_survived += 1;
}
