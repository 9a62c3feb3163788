#[cfg(feature = "debug")]
use super::modes::DebugState;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::types::InputMap;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub fn debug_key_input_system(input_map: Option<Res<InputMap>>, mut state: ResMut<DebugState>) {
    let Some(input_map) = input_map else {
        return;
    };
    if input_map.just_pressed("ToggleOverlay") {
        state.overlay_visible = !state.overlay_visible;
        info!(target: "debug", "overlay {}", if state.overlay_visible { "on" } else { "off" });
    }
    if input_map.just_pressed("ToggleHitboxes") {
        state.hitboxes_visible = !state.hitboxes_visible;
        info!(target: "debug", "hitboxes {}", if state.hitboxes_visible { "on" } else { "off" });
    }
}
