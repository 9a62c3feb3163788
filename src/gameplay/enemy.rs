use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::components::{EnemyBrain, EnemyTank, Faction, Tank, Wrecked};
use crate::core::config::GameConfig;
use crate::core::events::ShotFired;
use crate::core::resources::{Arena, GameRng};
use crate::core::system::SimSet;
use crate::core::tank_code::TankCode;
use crate::gameplay::bullet::spawn_bullet;
use crate::gameplay::motion::{heading_vector, spawn_coordinate};
use crate::gameplay::tank::spawn_tank;

pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Game), spawn_initial_enemy)
            .add_systems(FixedUpdate, enemy_brain.in_set(SimSet::Control));
    }
}

/// Random position away from the arena centre, in world coordinates.
pub fn enemy_spawn_position(rng: &mut GameRng, arena: &Arena, exclusion: f32) -> Vec2 {
    let size = arena.size();
    let x = spawn_coordinate(&mut **rng, size.x, exclusion);
    let y = spawn_coordinate(&mut **rng, size.y, exclusion);
    Vec2::new(x, y) - arena.half_extents
}

pub fn spawn_enemy(
    commands: &mut Commands,
    cfg: &GameConfig,
    arena: &Arena,
    rng: &mut GameRng,
) -> Entity {
    let code = TankCode::random(&mut **rng);
    let position = enemy_spawn_position(rng, arena, cfg.enemy.center_exclusion);
    debug!(target: "enemy", "spawning enemy {code} at {position}");
    spawn_tank(
        commands,
        cfg,
        code,
        Faction::Enemy,
        position,
        0.0,
        (EnemyTank, EnemyBrain::default(), Name::new("EnemyTank")),
    )
}

fn spawn_initial_enemy(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    arena: Res<Arena>,
    mut rng: ResMut<GameRng>,
) {
    spawn_enemy(&mut commands, &cfg, &arena, &mut rng);
}

/// Autopilot: constant thrust, slow clockwise spin, fire on a fixed cadence.
pub fn enemy_brain(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut shots: EventWriter<ShotFired>,
    mut q: Query<(&Transform, &mut Tank, &mut EnemyBrain), (With<EnemyTank>, Without<Wrecked>)>,
) {
    for (transform, mut tank, mut brain) in &mut q {
        let force = heading_vector(tank.heading) * cfg.enemy.boost;
        tank.velocity += force;
        tank.heading -= cfg.enemy.spin;

        brain.shoot_count = brain.shoot_count.wrapping_add(1);
        let interval = cfg.enemy.shoot_interval;
        if interval > 0 && brain.shoot_count % interval == 0 {
            let position = transform.translation.truncate();
            spawn_bullet(&mut commands, &cfg, Faction::Enemy, position, tank.heading);
            shots.write(ShotFired { owner: Faction::Enemy, position });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::components::Bullet;

    #[test]
    fn spawn_positions_avoid_centre_band() {
        let arena = Arena { half_extents: Vec2::new(450.0, 300.0) };
        let mut rng = GameRng::seeded(5);
        for _ in 0..500 {
            let p = enemy_spawn_position(&mut rng, &arena, 1.0 / 3.0);
            assert!(p.x.abs() <= 450.0 && p.y.abs() <= 300.0);
            assert!(!(p.x.abs() < 150.0), "x {} in centre band", p.x);
            assert!(!(p.y.abs() < 100.0), "y {} in centre band", p.y);
        }
    }

    #[test]
    fn enemy_fires_every_interval() {
        let mut app = App::new();
        app.init_resource::<GameConfig>()
            .add_event::<ShotFired>()
            .add_systems(Update, enemy_brain);
        let e = app
            .world_mut()
            .spawn((
                Transform::default(),
                Tank::new(TankCode::default(), 0.0),
                EnemyBrain::default(),
                EnemyTank,
            ))
            .id();
        for _ in 0..59 {
            app.update();
        }
        let mut bullets = app.world_mut().query::<&Bullet>();
        assert_eq!(bullets.iter(app.world()).count(), 1);
        app.update();
        assert_eq!(bullets.iter(app.world()).count(), 2);
        assert!(bullets.iter(app.world()).all(|b| b.owner == Faction::Enemy));

        let tank = app.world().get::<Tank>(e).unwrap();
        assert!((tank.heading + 60.0 * 0.01).abs() < 1e-4);
        assert!(tank.velocity.length() > 0.0);
    }
}
