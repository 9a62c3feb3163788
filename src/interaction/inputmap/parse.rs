use super::types::*;
use bevy::prelude::*;
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap, HashSet};

/// `shared_chords` lists chords bound to more than one action. Gameplay and menu actions share
/// keys on purpose, so these are informational rather than errors.
#[derive(Debug, Default)]
pub struct ParsedInputConfig { pub input_map: InputMap, pub errors: Vec<String>, pub shared_chords: Vec<String> }

#[derive(Debug, serde::Deserialize)]
struct ActionDecl { description: Option<String> }

#[derive(Debug, serde::Deserialize)]
struct DebugSection { bindings: Option<BTreeMap<String, Vec<String>>> }

#[derive(Debug, serde::Deserialize)]
struct RootToml {
    actions: Option<BTreeMap<String, ActionDecl>>,
    bindings: Option<BTreeMap<String, Vec<String>>>,
    debug: Option<DebugSection>,
}

/// Parse an input map document. Problems are collected rather than returned early so one bad
/// binding does not take the rest of the map down with it. `debug_layer` merges
/// `[debug.bindings]` on top of `[bindings]`.
pub fn parse_input_toml(raw: &str, debug_layer: bool) -> ParsedInputConfig {
    let mut result = ParsedInputConfig::default();
    let root: RootToml = match toml::from_str(raw) { Ok(r) => r, Err(e) => { result.errors.push(format!("Top-level parse: {e}")); return result; } };

    let mut actions: Vec<ActionMeta> = Vec::new();
    let mut name_to_id = HashMap::new();
    for (name, decl) in root.actions.unwrap_or_default() {
        if !validate_action_name(&name) { result.errors.push(format!("Invalid action name '{name}': must be PascalCase")); continue; }
        let id = ActionId(actions.len() as u16);
        actions.push(ActionMeta { id, name: name.clone(), description: decl.description.unwrap_or_default() });
        name_to_id.insert(name, id);
    }
    let states = vec![ActionState::default(); actions.len()];
    let mut input_map = InputMap { actions, name_to_id, states, ..Default::default() };

    // Normal layer first, then the debug overlay when allowed.
    let mut all_bindings: Vec<(String, Vec<String>)> = root.bindings.unwrap_or_default().into_iter().collect();
    if debug_layer { if let Some(db) = root.debug.and_then(|d| d.bindings) { all_bindings.extend(db); } }

    let mut seen_chords: HashMap<Chord, String> = HashMap::new();
    for (action_name, list) in all_bindings {
        let Some(aid) = input_map.name_to_id.get(&action_name).copied() else { result.errors.push(format!("Binding references unknown action '{action_name}'")); continue; };
        for spec in &list {
            match parse_binding(spec) {
                Ok((mut tokens, hold)) => {
                    canonical_sort_tokens(&mut tokens);
                    if let Some(other) = seen_chords.get(&tokens) { if *other != action_name { result.shared_chords.push(format!("'{spec}' bound to both {other} and {action_name}")); } }
                    seen_chords.insert(tokens.clone(), action_name.clone());
                    let id = input_map.bindings.len() as u32;
                    input_map.bindings.push(Binding { id, action: aid, tokens, hold_secs: hold });
                }
                Err(err) => result.errors.push(format!("[binding {action_name} '{spec}'] {err}")),
            }
        }
    }
    input_map.bindings_runtime = vec![BindingRuntime::default(); input_map.bindings.len()];
    result.input_map = input_map;
    result
}

fn validate_action_name(name: &str) -> bool { let bytes = name.as_bytes(); if bytes.is_empty() { return false; } if !bytes[0].is_ascii_uppercase() { return false; } name.chars().all(|c| c.is_ascii_alphanumeric()) }

fn canonical_sort_tokens(tokens: &mut Chord) { tokens.sort_by_key(token_sort_key); }

/// Chord order is irrelevant: keys sort before mouse buttons, then by name.
fn token_sort_key(t: &RawBindingToken) -> (u8, String) { match t { RawBindingToken::Key(k) => (0, format!("{k:?}")), RawBindingToken::MouseBtn(b) => (1, format!("{:03}", mouse_rank(*b))) } }

fn mouse_rank(b: MouseButton) -> u32 { use MouseButton::*; match b { Left=>1, Right=>2, Middle=>3, Back=>4, Forward=>5, Other(x)=> 10 + x as u32 } }

fn parse_binding(spec: &str) -> Result<(Chord, f32), String> {
    let mut tokens: Chord = SmallVec::new();
    let mut hold: f32 = 0.0;
    let mut seen: HashSet<RawBindingToken> = HashSet::new();
    for part in spec.split('+') {
        let p = part.trim();
        if p.is_empty() { continue; }
        let token = if let Some(rest) = p.strip_prefix("hold>") {
            let mut it = rest.splitn(2, ':');
            let secs_str = it.next().ok_or_else(|| format!("Malformed hold qualifier '{p}': missing seconds"))?;
            let after = it.next().ok_or_else(|| format!("Malformed hold qualifier '{p}': missing ':'"))?;
            hold = secs_str.parse::<f32>().map_err(|_| format!("Invalid hold seconds '{secs_str}'"))?;
            parse_token(after)?
        } else {
            parse_token(p)?
        };
        if !seen.insert(token) { return Err(format!("Duplicate token in chord: {token:?}")); }
        tokens.push(token);
    }
    if tokens.is_empty() { return Err("Empty binding".into()); }
    Ok((tokens, hold))
}

fn parse_token(s: &str) -> Result<RawBindingToken, String> {
    if let Some(rest) = s.strip_prefix("Key:") { return parse_keycode(rest).map(RawBindingToken::Key); }
    if let Some(rest) = s.strip_prefix("Mouse:") {
        return match rest { "Left" => Ok(RawBindingToken::MouseBtn(MouseButton::Left)), "Right" => Ok(RawBindingToken::MouseBtn(MouseButton::Right)), "Middle" => Ok(RawBindingToken::MouseBtn(MouseButton::Middle)), other => Err(format!("Unknown mouse button '{other}'")) };
    }
    Err(format!("Unrecognized token '{s}'"))
}

/// Accepts Bevy's `KeyCode` names plus bare letters and digits (`W`, `KeyW`, `1`, `Digit1`).
pub fn parse_keycode(name: &str) -> Result<KeyCode, String> {
    use KeyCode::*;
    let name = name.strip_prefix("Key").filter(|r| r.len() == 1).unwrap_or(name);
    let name = name.strip_prefix("Digit").filter(|r| r.len() == 1).unwrap_or(name);
    let kc = match name {
        "A" => KeyA, "B" => KeyB, "C" => KeyC, "D" => KeyD, "E" => KeyE, "F" => KeyF, "G" => KeyG,
        "H" => KeyH, "I" => KeyI, "J" => KeyJ, "K" => KeyK, "L" => KeyL, "M" => KeyM, "N" => KeyN,
        "O" => KeyO, "P" => KeyP, "Q" => KeyQ, "R" => KeyR, "S" => KeyS, "T" => KeyT, "U" => KeyU,
        "V" => KeyV, "W" => KeyW, "X" => KeyX, "Y" => KeyY, "Z" => KeyZ,
        "0" => Digit0, "1" => Digit1, "2" => Digit2, "3" => Digit3, "4" => Digit4,
        "5" => Digit5, "6" => Digit6, "7" => Digit7, "8" => Digit8, "9" => Digit9,
        "ArrowUp" => ArrowUp, "ArrowDown" => ArrowDown, "ArrowLeft" => ArrowLeft, "ArrowRight" => ArrowRight,
        "Space" => Space, "Enter" => Enter, "Escape" => Escape, "Tab" => Tab, "Backspace" => Backspace,
        "ShiftLeft" => ShiftLeft, "ShiftRight" => ShiftRight, "ControlLeft" => ControlLeft,
        "ControlRight" => ControlRight, "AltLeft" => AltLeft, "AltRight" => AltRight,
        "BracketLeft" => BracketLeft, "BracketRight" => BracketRight,
        "F1" => F1, "F2" => F2, "F3" => F3, "F4" => F4, "F5" => F5, "F6" => F6,
        "F7" => F7, "F8" => F8, "F9" => F9, "F10" => F10, "F11" => F11, "F12" => F12,
        other => return Err(format!("Unsupported KeyCode '{other}'")),
    };
    Ok(kc)
}
