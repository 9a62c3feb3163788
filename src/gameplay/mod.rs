pub mod bullet;
pub mod combat;
pub mod drops;
pub mod enemy;
pub mod motion;
pub mod tank;

use bevy::prelude::*;

/// Simulation systems: tanks, enemy autopilot, bullets and hit resolution.
pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            tank::TankPlugin,
            enemy::EnemyPlugin,
            bullet::BulletPlugin,
            combat::CombatPlugin,
        ));
    }
}
