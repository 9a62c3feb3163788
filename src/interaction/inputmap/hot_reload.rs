use bevy::prelude::*;
use std::{path::PathBuf, time::SystemTime};

use crate::interaction::inputmap::parse::parse_input_toml;
use crate::interaction::inputmap::plugin::input_config_path;
use crate::interaction::inputmap::types::InputMap;

#[derive(Resource, Debug)]
struct InputReloadState { last_modified: Option<SystemTime>, timer: Timer, path: PathBuf }
impl FromWorld for InputReloadState { fn from_world(_: &mut World) -> Self { Self { last_modified: None, timer: Timer::from_seconds(0.5, TimerMode::Repeating), path: PathBuf::from(input_config_path()) } } }

/// Polls the input file and swaps in the new map when it parses cleanly. Action states restart
/// from idle after a swap.
pub struct InputMapHotReloadPlugin;
impl Plugin for InputMapHotReloadPlugin { fn build(&self, app: &mut App) { app.init_resource::<InputReloadState>().add_systems(Update, poll_input_map_reload); } }

fn poll_input_map_reload(time: Res<Time>, mut state: ResMut<InputReloadState>, mut input_map: ResMut<InputMap>) {
    if !state.timer.tick(time.delta()).finished() { return; }
    let Ok(mod_time) = std::fs::metadata(&state.path).and_then(|m| m.modified()) else { return; };
    let first_seen = state.last_modified.is_none();
    if state.last_modified.is_some_and(|prev| mod_time <= prev) { return; }
    state.last_modified = Some(mod_time);
    // The startup load already applied the file as it was on launch.
    if first_seen { return; }
    let Ok(raw) = std::fs::read_to_string(&state.path) else { return; };
    let parsed = parse_input_toml(&raw, true);
    if !parsed.errors.is_empty() { for e in parsed.errors { warn!(target: "input", "INPUT HOT-RELOAD parse error: {e}"); } }
    else { *input_map = parsed.input_map; info!(target: "input", "Input map hot-reloaded"); }
}
