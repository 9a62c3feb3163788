use bevy::prelude::*;
use std::{collections::HashMap, path::PathBuf, time::SystemTime};

use crate::core::config::GameConfig;
use crate::core::resources::Arena;

/// Layers to re-read on change, in merge order, plus command-line overrides that must survive
/// a reload.
#[derive(Resource, Debug, Clone)]
pub struct ConfigReloadSettings { pub paths: Vec<PathBuf>, pub interval_secs: f32, pub seed_override: Option<u64> }
impl Default for ConfigReloadSettings { fn default() -> Self { Self { paths: vec![ PathBuf::from("assets/config/game.ron"), PathBuf::from("assets/config/game.local.ron"), ], interval_secs: 0.5, seed_override: None } } }

/// Rebuild the config from the same layers and overrides the game started with.
pub fn reload_config(settings: &ConfigReloadSettings) -> (GameConfig, Vec<String>) {
    let (mut cfg, _used, errors) = GameConfig::load_layered(settings.paths.iter());
    if settings.seed_override.is_some() { cfg.sim.seed = settings.seed_override; }
    (cfg, errors)
}
#[derive(Resource, Debug)]
struct ConfigReloadState { last_mod: HashMap<PathBuf, SystemTime>, timer: Timer, primed: bool }
impl FromWorld for ConfigReloadState { fn from_world(_world: &mut World) -> Self { Self { last_mod: HashMap::new(), timer: Timer::from_seconds(0.5, TimerMode::Repeating), primed: false } } }

/// Polls the layered config files and re-applies them while the game runs: window title and
/// size, arena bounds and the simulation rate. Gameplay constants are read from the resource
/// every tick, so they take effect immediately.
pub struct ConfigHotReloadPlugin;
impl Plugin for ConfigHotReloadPlugin { fn build(&self, app: &mut App) { #[cfg(not(target_arch = "wasm32"))] { app.init_resource::<ConfigReloadSettings>().init_resource::<ConfigReloadState>().add_systems(Update, poll_and_reload_config); } } }

/// Push a freshly loaded config into the live resources that cache parts of it.
pub fn apply_config(new_cfg: &GameConfig, arena: &mut Arena, fixed: &mut Time<Fixed>, window: Option<&mut Window>) {
    let new_arena = Arena::from_config(new_cfg);
    if *arena != new_arena { *arena = new_arena; }
    let hz = new_cfg.sim.tick_hz.max(1.0);
    let period = std::time::Duration::from_secs_f64(1.0 / hz);
    if fixed.timestep() != period { fixed.set_timestep(period); }
    if let Some(window) = window {
        if window.width() != new_cfg.window.width || window.height() != new_cfg.window.height { window.resolution.set(new_cfg.window.width, new_cfg.window.height); }
        if window.title != new_cfg.window.title { window.title = new_cfg.window.title.clone(); }
    }
}

#[allow(clippy::too_many_arguments)]
fn poll_and_reload_config(
    time: Res<Time<Real>>,
    settings: Res<ConfigReloadSettings>,
    mut state: ResMut<ConfigReloadState>,
    mut cfg_res: ResMut<GameConfig>,
    mut arena: ResMut<Arena>,
    mut fixed: ResMut<Time<Fixed>>,
    mut windows: Query<&mut Window>,
) {
    if (state.timer.duration().as_secs_f32() - settings.interval_secs).abs() > f32::EPSILON { state.timer.set_duration(std::time::Duration::from_secs_f32(settings.interval_secs.max(0.05))); }
    if !state.timer.tick(time.delta()).finished() { return; }
    use std::fs; use std::time::UNIX_EPOCH;
    let mut dirty = false;
    for path in &settings.paths { if let Ok(mod_time) = fs::metadata(path).and_then(|m| m.modified()) { let entry = state.last_mod.entry(path.clone()).or_insert(UNIX_EPOCH); if mod_time > *entry { *entry = mod_time; dirty = true; } } }
    // First poll only records timestamps; startup already applied these files.
    if !state.primed { state.primed = true; return; }
    if !dirty { return; }
    let (new_cfg, errors) = reload_config(&settings);
    for e in errors { warn!(target: "config", "CONFIG HOT-RELOAD issue: {e}"); }
    for w in new_cfg.validate() { warn!(target: "config", "CONFIG WARNING: {w}"); }
    if *cfg_res != new_cfg {
        info!(target: "config", "Config hot-reload applied");
        apply_config(&new_cfg, &mut arena, &mut fixed, windows.single_mut().ok().as_deref_mut());
        *cfg_res = new_cfg;
    }
}
