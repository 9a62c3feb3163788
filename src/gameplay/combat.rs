//! Per-tick hit resolution between bullets, tanks and drops.

use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::components::{
    Bullet, EnemyTank, Faction, Hitbox, ItemDrop, PlayerTank, Spent, Wrecked,
};
use crate::core::config::GameConfig;
use crate::core::events::{EnemyDestroyed, ItemCollected, PlayerDestroyed};
use crate::core::inventory::{Inventory, ItemKind};
use crate::core::resources::{player_alive, Arena, GameRng, PlayerDown, RunStats};
use crate::core::system::SimSet;
use crate::gameplay::drops::spawn_drop;
use crate::gameplay::enemy::spawn_enemy;
use crate::gameplay::motion::rects_overlap;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                player_bullets_hit_enemies,
                replace_wrecked_enemies,
                enemy_contact_kills_player,
                // Sets are only gated once per tick; a death earlier in this chain must also
                // stop the pickup.
                collect_drops.run_if(player_alive),
            )
                .chain()
                .in_set(SimSet::Combat),
        );
    }
}

fn rect_of(transform: &Transform, hitbox: &Hitbox) -> Rect {
    hitbox.rect_at(transform.translation.truncate())
}

/// Every player bullet touching an enemy is spent, wrecks the enemy and leaves a random part
/// behind at the impact point.
#[allow(clippy::too_many_arguments)]
pub fn player_bullets_hit_enemies(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    mut stats: ResMut<RunStats>,
    mut destroyed: EventWriter<EnemyDestroyed>,
    enemies: Query<(Entity, &Transform, &Hitbox), (With<EnemyTank>, Without<Wrecked>)>,
    bullets: Query<(Entity, &Bullet, &Transform, &Hitbox), Without<Spent>>,
) {
    for (enemy, enemy_tf, enemy_box) in &enemies {
        let enemy_rect = rect_of(enemy_tf, enemy_box);
        let mut hit = false;
        for (bullet_entity, bullet, bullet_tf, bullet_box) in &bullets {
            if bullet.owner != Faction::Player {
                continue;
            }
            if !rects_overlap(rect_of(bullet_tf, bullet_box), enemy_rect) {
                continue;
            }
            let position = bullet_tf.translation.truncate();
            commands.entity(bullet_entity).insert(Spent);
            destroyed.write(EnemyDestroyed { position });
            let item = ItemKind::random(&mut **rng);
            spawn_drop(&mut commands, &cfg, item, position);
            hit = true;
        }
        if hit {
            commands.entity(enemy).insert(Wrecked);
            stats.kills += 1;
            info!(target: "combat", "enemy destroyed (kills={})", stats.kills);
        }
    }
}

/// Wrecked enemies are removed and immediately replaced.
pub fn replace_wrecked_enemies(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    arena: Res<Arena>,
    mut rng: ResMut<GameRng>,
    wrecked: Query<Entity, (With<EnemyTank>, With<Wrecked>)>,
) {
    for entity in &wrecked {
        commands.entity(entity).despawn();
        spawn_enemy(&mut commands, &cfg, &arena, &mut rng);
    }
}

/// Touching an enemy hull (or, when enabled, an enemy round) ends the run.
#[allow(clippy::type_complexity)]
pub fn enemy_contact_kills_player(
    cfg: Res<GameConfig>,
    mut next: ResMut<NextState<AppState>>,
    mut down: ResMut<PlayerDown>,
    mut died: EventWriter<PlayerDestroyed>,
    players: Query<(&Transform, &Hitbox), With<PlayerTank>>,
    enemies: Query<(&Transform, &Hitbox), (With<EnemyTank>, Without<Wrecked>)>,
    bullets: Query<(&Bullet, &Transform, &Hitbox), Without<Spent>>,
) {
    for (player_tf, player_box) in &players {
        let player_rect = rect_of(player_tf, player_box);
        let rammed = enemies
            .iter()
            .any(|(tf, hb)| rects_overlap(rect_of(tf, hb), player_rect));
        let shot = cfg.enemy.bullets_hit_player
            && bullets.iter().any(|(b, tf, hb)| {
                b.owner == Faction::Enemy && rects_overlap(rect_of(tf, hb), player_rect)
            });
        if rammed || shot {
            let position = player_tf.translation.truncate();
            info!(target: "combat", "player destroyed at {position}");
            died.write(PlayerDestroyed { position });
            down.0 = true;
            next.set(AppState::GameOver);
            return;
        }
    }
}

/// Drops under the player go into the inventory.
pub fn collect_drops(
    mut commands: Commands,
    mut inventory: ResMut<Inventory>,
    mut stats: ResMut<RunStats>,
    mut collected: EventWriter<ItemCollected>,
    players: Query<(&Transform, &Hitbox), With<PlayerTank>>,
    drops: Query<(Entity, &ItemDrop, &Transform, &Hitbox)>,
) {
    for (player_tf, player_box) in &players {
        let player_rect = rect_of(player_tf, player_box);
        for (entity, drop, tf, hb) in &drops {
            if rects_overlap(rect_of(tf, hb), player_rect) {
                inventory.push(drop.item);
                stats.items_collected += 1;
                collected.write(ItemCollected(drop.item));
                info!(target: "combat", "picked up {}", drop.item.key());
                commands.entity(entity).despawn();
            }
        }
    }
}
