#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
#[derive(Resource, Debug)]
pub struct DebugState {
    pub overlay_visible: bool,
    pub hitboxes_visible: bool,
    /// Seconds between `SIM` log lines.
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            overlay_visible: true,
            hitboxes_visible: false,
            log_interval: 1.0,
            time_accum: 0.0,
            frame_counter: 0,
        }
    }
}

/// Smoothed frame timing plus entity counts, refreshed every frame.
#[cfg(feature = "debug")]
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct DebugStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub entity_count: usize,
    pub tank_count: usize,
    pub bullet_count: usize,
    pub particle_count: usize,
    pub drop_count: usize,
}
