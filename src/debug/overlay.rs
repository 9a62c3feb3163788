#[cfg(feature = "debug")]
use bevy::prelude::*;
// Bevy 0.16 text API uses components: Text, TextFont, TextColor, Node for UI text.
#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::core::components::{Faction, Hitbox};
#[cfg(feature = "debug")]
use crate::core::resources::{RunStats, SimTick};
#[cfg(feature = "debug")]
use crate::core::tank_code::CurrentTank;
#[cfg(feature = "debug")]
use crate::interaction::inputmap::types::InputMap;

#[cfg(feature = "debug")]
#[derive(Component)]
pub(crate) struct DebugOverlayText;

#[cfg(feature = "debug")]
pub fn debug_overlay_spawn(mut commands: Commands) {
    // Bottom-left so it stays clear of the scene buttons.
    commands.spawn((
        Text::new(String::new()),
        TextFont {
            font_size: 14.0,
            ..Default::default()
        },
        TextColor(Color::WHITE),
        bevy::ui::Node {
            position_type: bevy::ui::PositionType::Absolute,
            bottom: Val::Px(4.0),
            left: Val::Px(6.0),
            ..Default::default()
        },
        GlobalZIndex(100),
        DebugOverlayText,
        Name::new("DebugOverlay"),
    ));
}

/// Overlay body text; split out so it can be checked without a renderer.
#[cfg(feature = "debug")]
pub fn overlay_text(
    stats: &DebugStats,
    run: &RunStats,
    tick: u64,
    tank: &CurrentTank,
    input_map: Option<&InputMap>,
) -> String {
    let mut base = format!(
        "FPS {:.1} ft {:.1}ms entities {} tanks {} bullets {} particles {} drops {}\ntick {} kills {} shots {} items {} tank {}",
        stats.fps,
        stats.frame_time_ms,
        stats.entity_count,
        stats.tank_count,
        stats.bullet_count,
        stats.particle_count,
        stats.drop_count,
        tick,
        run.kills,
        run.shots_fired,
        run.items_collected,
        tank.0,
    );
    if let Some(im) = input_map {
        let active: Vec<&str> = im
            .actions
            .iter()
            .filter(|meta| im.pressed(&meta.name))
            .map(|meta| meta.name.as_str())
            .collect();
        if !active.is_empty() {
            base.push_str("\nactions: ");
            base.push_str(&active.join(" "));
        }
    }
    base
}

#[cfg(feature = "debug")]
pub(crate) fn debug_overlay_update(
    state: Res<DebugState>,
    stats: Res<DebugStats>,
    run: Res<RunStats>,
    tick: Res<SimTick>,
    tank: Res<CurrentTank>,
    input_map: Option<Res<InputMap>>,
    mut q_text: Query<&mut Text, With<DebugOverlayText>>,
) {
    let Ok(mut text) = q_text.single_mut() else {
        return;
    };
    if !state.overlay_visible {
        if !text.0.is_empty() {
            text.0.clear();
        }
        return;
    }
    text.0 = overlay_text(&stats, &run, tick.0, &tank, input_map.as_deref());
}

#[cfg(feature = "debug")]
pub(crate) fn debug_hitbox_gizmos(
    mut gizmos: Gizmos,
    q: Query<(&GlobalTransform, &Hitbox, Option<&Faction>)>,
) {
    for (transform, hitbox, faction) in &q {
        let color = match faction {
            Some(Faction::Player) => Color::srgb(0.3, 0.6, 1.0),
            Some(Faction::Enemy) => Color::srgb(1.0, 0.3, 0.25),
            None => Color::srgb(1.0, 1.0, 0.3),
        };
        gizmos.rect_2d(
            Isometry2d::from_translation(transform.translation().truncate()),
            hitbox.half_extents * 2.0,
            color,
        );
    }
}

#[cfg(all(test, feature = "debug"))]
mod tests {
    use super::*;

    #[test]
    fn overlay_lists_held_actions() {
        let mut im = crate::interaction::inputmap::parse::parse_input_toml(
            "[actions]\nBoost = {}\nShoot = {}\n[bindings]\nBoost = [\"Key:W\"]\n",
            false,
        )
        .input_map;
        im.inject("Boost", true);
        let run = RunStats { kills: 3, ..Default::default() };
        let text = overlay_text(&DebugStats::default(), &run, 42, &CurrentTank::default(), Some(&im));
        assert!(text.contains("kills 3"));
        assert!(text.contains("tick 42"));
        assert!(text.contains("tank 000"));
        assert!(text.ends_with("actions: Boost"));
    }
}
