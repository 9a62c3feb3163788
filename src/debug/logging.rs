#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::app::state::AppState;
#[cfg(feature = "debug")]
use crate::core::resources::{RunStats, SimTick};

#[cfg(feature = "debug")]
pub fn debug_logging_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    stats: Res<DebugStats>,
    run: Res<RunStats>,
    tick: Res<SimTick>,
    app_state: Res<State<AppState>>,
) {
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        info!(target: "debug", "SIM frame={} tick={} t={:.3}s fps={:.1} ft_ms={:.1} scene={:?} entities={} tanks={} bullets={} particles={} drops={} kills={} shots={}",
            state.frame_counter,
            tick.0,
            time.elapsed_secs(),
            stats.fps,
            stats.frame_time_ms,
            app_state.get(),
            stats.entity_count,
            stats.tank_count,
            stats.bullet_count,
            stats.particle_count,
            stats.drop_count,
            run.kills,
            run.shots_fired);
    }
}
