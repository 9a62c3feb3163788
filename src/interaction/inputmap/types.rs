use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(pub u16); // index into `actions` / `states`

#[derive(Debug, Clone)]
pub struct ActionMeta { pub id: ActionId, pub name: String, pub description: String }

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionState { pub pressed: bool, pub just_pressed: bool, pub just_released: bool }
impl ActionState { pub fn clear_transitions(&mut self) { self.just_pressed = false; self.just_released = false; } }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawBindingToken { Key(KeyCode), MouseBtn(MouseButton) }

pub type Chord = SmallVec<[RawBindingToken; 2]>;

#[derive(Debug, Clone)]
pub struct Binding { pub id: u32, pub action: ActionId, pub tokens: Chord, pub hold_secs: f32 }

#[derive(Debug, Default, Clone)]
pub struct BindingRuntime { pub active: bool, pub just_pressed: bool, pub just_released: bool, pub hold_elapsed: f32 }

/// Named binary actions and the chords bound to them. Evaluated once per frame; gameplay code
/// queries by action name.
#[derive(Resource, Debug, Default)]
pub struct InputMap {
    pub actions: Vec<ActionMeta>,
    pub name_to_id: HashMap<String, ActionId>,
    pub bindings: Vec<Binding>,
    pub bindings_runtime: Vec<BindingRuntime>,
    pub states: Vec<ActionState>,
    pub frame_counter: u64,
}

impl InputMap {
    pub fn state(&self, name: &str) -> Option<&ActionState> { self.name_to_id.get(name).and_then(|id| self.states.get(id.0 as usize)) }
    fn state_mut(&mut self, name: &str) -> Option<&mut ActionState> { let id = *self.name_to_id.get(name)?; self.states.get_mut(id.0 as usize) }
    pub fn pressed(&self, name: &str) -> bool { self.state(name).is_some_and(|s| s.pressed) }
    pub fn just_pressed(&self, name: &str) -> bool { self.state(name).is_some_and(|s| s.just_pressed) }
    pub fn just_released(&self, name: &str) -> bool { self.state(name).is_some_and(|s| s.just_released) }
    pub fn has_action(&self, name: &str) -> bool { self.name_to_id.contains_key(name) }

    /// Force an action's state for one frame, bypassing the bindings. Used by tests and
    /// scripted input.
    pub fn inject(&mut self, name: &str, pressed: bool) {
        if let Some(st) = self.state_mut(name) {
            st.just_pressed = pressed && !st.pressed;
            st.just_released = !pressed && st.pressed;
            st.pressed = pressed;
        }
    }

    /// Bindings of one action, as written in the config (`Key:W`, `Key:ControlLeft+Key:S`).
    pub fn describe_bindings(&self, name: &str) -> Vec<String> {
        let Some(id) = self.name_to_id.get(name) else { return Vec::new(); };
        self.bindings
            .iter()
            .filter(|b| b.action == *id)
            .map(|b| {
                let chord: Vec<String> = b.tokens.iter().map(|t| match t { RawBindingToken::Key(k) => format!("Key:{k:?}"), RawBindingToken::MouseBtn(m) => format!("Mouse:{m:?}") }).collect();
                let chord = chord.join("+");
                if b.hold_secs > 0.0 { format!("hold>{}:{chord}", b.hold_secs) } else { chord }
            })
            .collect()
    }
}
