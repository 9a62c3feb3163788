//! Per-frame evaluation of chords into action states.
use bevy::prelude::*;
use super::types::*;

/// Resolve every binding against the current device state and fold the results into the
/// action states. Missing input resources (headless runs) read as "nothing held".
pub fn system_evaluate_bindings(
    time: Res<Time>,
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mouse_buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut input_map: ResMut<InputMap>,
) {
    let held = |token: &RawBindingToken| match token {
        RawBindingToken::Key(k) => keyboard.as_ref().is_some_and(|kb| kb.pressed(*k)),
        RawBindingToken::MouseBtn(b) => mouse_buttons.as_ref().is_some_and(|mb| mb.pressed(*b)),
    };
    evaluate(&mut input_map, time.delta_secs(), held);
}

/// Core of [`system_evaluate_bindings`], separated so it can be driven without an `App`.
pub fn evaluate(input_map: &mut InputMap, dt: f32, held: impl Fn(&RawBindingToken) -> bool) {
    let map = &mut *input_map;
    map.frame_counter += 1;
    if map.bindings_runtime.len() < map.bindings.len() { map.bindings_runtime.resize(map.bindings.len(), BindingRuntime::default()); }

    for (binding, rt) in map.bindings.iter().zip(map.bindings_runtime.iter_mut()) {
        rt.just_pressed = false;
        rt.just_released = false;
        let all_active = binding.tokens.iter().all(&held);
        if all_active {
            if !rt.active { rt.active = true; rt.just_pressed = true; rt.hold_elapsed = 0.0; } else { rt.hold_elapsed += dt; }
        } else if rt.active {
            rt.active = false;
            rt.just_released = true;
        }
    }

    // A hold binding only counts once its timer has run out.
    let mut pressed = vec![false; map.states.len()];
    for (binding, rt) in map.bindings.iter().zip(map.bindings_runtime.iter()) {
        if rt.active && rt.hold_elapsed >= binding.hold_secs {
            if let Some(p) = pressed.get_mut(binding.action.0 as usize) { *p = true; }
        }
    }
    for (state, now) in map.states.iter_mut().zip(pressed) {
        state.clear_transitions();
        if now && !state.pressed { state.just_pressed = true; }
        if !now && state.pressed { state.just_released = true; }
        state.pressed = now;
    }
}
