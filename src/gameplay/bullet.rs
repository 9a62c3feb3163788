use bevy::prelude::*;

use crate::core::components::{Bullet, Faction, GameEntity, Hitbox, Spent};
use crate::core::config::GameConfig;
use crate::core::resources::Arena;
use crate::core::system::SimSet;
use crate::gameplay::motion::heading_vector;
use crate::rendering::palette;

pub const Z_BULLET: f32 = 2.5;

pub struct BulletPlugin;

impl Plugin for BulletPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, move_bullets.in_set(SimSet::Motion))
            .add_systems(FixedUpdate, despawn_spent_bullets.in_set(SimSet::Cleanup));
    }
}

/// Fire a round from `position` along `heading`.
pub fn spawn_bullet(
    commands: &mut Commands,
    cfg: &GameConfig,
    owner: Faction,
    position: Vec2,
    heading: f32,
) -> Entity {
    let velocity = heading_vector(heading) * cfg.bullet.speed;
    commands
        .spawn((
            Bullet { owner, velocity },
            Hitbox::square(cfg.bullet.size * 0.5),
            Sprite::from_color(palette::BULLET, Vec2::new(cfg.bullet.size * 0.6, cfg.bullet.size)),
            Transform::from_translation(position.extend(Z_BULLET))
                .with_rotation(Quat::from_rotation_z(heading)),
            GameEntity,
        ))
        .id()
}

/// Advance bullets one tick; any that leave the arena are spent.
pub fn move_bullets(
    mut commands: Commands,
    arena: Res<Arena>,
    mut q: Query<(Entity, &Bullet, &mut Transform), Without<Spent>>,
) {
    for (entity, bullet, mut transform) in &mut q {
        transform.translation.x += bullet.velocity.x;
        transform.translation.y += bullet.velocity.y;
        if !arena.contains(transform.translation.truncate()) {
            commands.entity(entity).insert(Spent);
        }
    }
}

pub fn despawn_spent_bullets(mut commands: Commands, q: Query<Entity, (With<Bullet>, With<Spent>)>) {
    for entity in &q {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_leave_arena_and_are_removed() {
        let mut app = App::new();
        app.insert_resource(Arena { half_extents: Vec2::new(100.0, 100.0) });
        app.add_systems(Update, (move_bullets, despawn_spent_bullets).chain());
        let cfg = GameConfig::default();
        let e = {
            let mut commands = app.world_mut().commands();
            spawn_bullet(&mut commands, &cfg, Faction::Player, Vec2::new(0.0, 85.0), 0.0)
        };
        app.world_mut().flush();
        // 85 -> 95 stays inside.
        app.update();
        assert!(app.world().get_entity(e).is_ok());
        let y = app.world().get::<Transform>(e).unwrap().translation.y;
        assert!((y - 95.0).abs() < 1e-4);
        // 95 -> 105 leaves: marked spent, then despawned by the chained cleanup.
        app.update();
        assert!(app.world().get_entity(e).is_err());
    }
}
