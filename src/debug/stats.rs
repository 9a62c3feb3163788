#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::core::components::{Bullet, ItemDrop, Tank};
#[cfg(feature = "debug")]
use crate::rendering::particles::Particle;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
#[allow(clippy::too_many_arguments)]
pub fn debug_stats_collect_system(
    time: Res<Time>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    q_all: Query<Entity>,
    q_tanks: Query<(), With<Tank>>,
    q_bullets: Query<(), With<Bullet>>,
    q_particles: Query<(), With<Particle>>,
    q_drops: Query<(), With<ItemDrop>>,
) {
    state.frame_counter += 1;
    let dt = time.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    if stats.fps == 0.0 {
        stats.fps = inst_fps;
    } else {
        stats.fps = stats.fps * 0.9 + inst_fps * 0.1;
    }
    let inst_ms = dt * 1000.0;
    if stats.frame_time_ms == 0.0 {
        stats.frame_time_ms = inst_ms;
    } else {
        stats.frame_time_ms = stats.frame_time_ms * 0.9 + inst_ms * 0.1;
    }
    stats.entity_count = q_all.iter().count();
    stats.tank_count = q_tanks.iter().count();
    stats.bullet_count = q_bullets.iter().count();
    stats.particle_count = q_particles.iter().count();
    stats.drop_count = q_drops.iter().count();
}
