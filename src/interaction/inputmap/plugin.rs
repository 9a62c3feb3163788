use bevy::input::InputSystem;
use bevy::prelude::*;

use super::parse::parse_input_toml;
use super::systems::system_evaluate_bindings;
use super::types::InputMap;

/// Built-in bindings, used when no input file is found on disk.
pub const DEFAULT_INPUT_TOML: &str = include_str!("../../../assets/config/input.toml");

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct InputActionUpdateSet;

pub struct InputActionsPlugin;
impl Plugin for InputActionsPlugin { fn build(&self, app: &mut App) { app
        .init_resource::<InputMap>()
        .configure_sets(PreUpdate, InputActionUpdateSet.after(InputSystem))
        .add_systems(PreStartup, load_initial_input_map)
        .add_systems(PreUpdate, system_evaluate_bindings.in_set(InputActionUpdateSet)); } }

pub fn input_config_path() -> String { std::env::var("INPUT_CONFIG_PATH").unwrap_or_else(|_| "assets/config/input.toml".into()) }

/// Read the input file, falling back to the embedded copy when it is missing or unreadable.
pub fn load_input_map(path: &str) -> InputMap {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => { warn!(target: "input", "input map '{path}' unreadable ({e}); using built-in bindings"); DEFAULT_INPUT_TOML.to_string() }
    };
    let parsed = parse_input_toml(&raw, cfg!(feature = "debug"));
    for shared in &parsed.shared_chords { debug!(target: "input", "chord {shared}"); }
    if !parsed.errors.is_empty() { for e in parsed.errors { error!(target: "input", "INPUT MAP ERROR: {e}"); } } else { info!(target: "input", "Input map loaded: {} actions, {} bindings", parsed.input_map.actions.len(), parsed.input_map.bindings.len()); }
    parsed.input_map
}

fn load_initial_input_map(mut commands: Commands) { commands.insert_resource(load_input_map(&input_config_path())); }
