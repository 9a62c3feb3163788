use bevy::prelude::*;

use crate::core::components::{GameEntity, Hitbox, ItemDrop};
use crate::core::config::GameConfig;
use crate::core::inventory::ItemKind;
use crate::core::tank_code::PartSlot;
use crate::rendering::palette;

/// Drops sit below tanks.
pub const Z_DROP: f32 = 1.0;

fn item_color(item: ItemKind) -> Color {
    match item.slot {
        PartSlot::Turret => palette::turret_color(item.variant),
        PartSlot::Body => palette::body_color(item.variant),
        PartSlot::Chassis => palette::chassis_color(item.variant),
    }
}

/// Spawn a collectable part at `position`, drawn as a diamond in the part's colour.
pub fn spawn_drop(commands: &mut Commands, cfg: &GameConfig, item: ItemKind, position: Vec2) -> Entity {
    let size = cfg.drops.size;
    commands
        .spawn((
            ItemDrop { item },
            Hitbox::square(size * 0.5),
            GameEntity,
            Name::new(item.key()),
            Transform::from_translation(position.extend(Z_DROP))
                .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_4)),
            Sprite::from_color(item_color(item), Vec2::splat(size * 0.7)),
        ))
        .id()
}
