//! Sprite particles: boost trails behind tanks and spark bursts on hits.

use bevy::prelude::*;
use rand::Rng;

use crate::app::state::AppState;
use crate::core::components::{BoostTrail, GameEntity, Tank, Wrecked};
use crate::core::config::{BurstConfig, GameConfig};
use crate::core::events::EnemyDestroyed;
use crate::core::resources::GameRng;
use crate::core::system::SimSet;
use crate::gameplay::motion::{heading_vector, percent};
use crate::rendering::palette;

/// Trails sit under tanks, sparks over them.
pub const Z_TRAIL: f32 = 1.5;
pub const Z_SPARK: f32 = 3.5;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Pixels per second.
    pub velocity: Vec2,
    /// Downward acceleration, pixels per second squared.
    pub gravity: f32,
    pub age: f32,
    pub lifespan: f32,
    pub scale_start: f32,
    pub scale_end: f32,
}

impl Particle {
    /// Advance by `dt` seconds. Returns false once the particle has expired.
    pub fn step(&mut self, position: &mut Vec2, dt: f32) -> bool {
        *position += self.velocity * dt;
        self.velocity.y -= self.gravity * dt;
        self.age += dt;
        self.age < self.lifespan
    }

    pub fn scale(&self) -> f32 {
        let t = if self.lifespan > 0.0 {
            (self.age / self.lifespan).clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.scale_start + (self.scale_end - self.scale_start) * t
    }
}

pub struct ParticlesPlugin;

impl Plugin for ParticlesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, emit_boost_trails.in_set(SimSet::Cleanup))
            .add_systems(
                Update,
                (spawn_sparks, age_particles).run_if(in_state(AppState::Game)),
            );
    }
}

/// One trail particle for a tank, or `None` when the tank is at rest.
///
/// Strength `s` is the tank speed against `full_speed`; it sets both the lifespan and the
/// alpha of the particle.
pub fn trail_particle(
    cfg: &GameConfig,
    tank: &Tank,
    tank_position: Vec2,
    spread: f32,
) -> Option<(Particle, Vec2, f32)> {
    let strength = percent(tank.speed(), 0.0, cfg.trail.full_speed);
    if strength <= 0.0 {
        return None;
    }
    let position = tank_position - heading_vector(tank.heading) * cfg.tank.trail_offset;
    let direction = heading_vector(tank.heading + std::f32::consts::PI + spread);
    let particle = Particle {
        velocity: direction * cfg.trail.speed,
        gravity: 0.0,
        age: 0.0,
        lifespan: strength * cfg.trail.max_lifespan,
        scale_start: cfg.trail.scale_start,
        scale_end: cfg.trail.scale_end,
    };
    Some((particle, position, strength))
}

fn emit_boost_trails(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    tanks: Query<(&Transform, &Tank, &BoostTrail), Without<Wrecked>>,
) {
    let spread = cfg.trail.spread_deg.abs().to_radians();
    for (transform, tank, trail) in &tanks {
        let jitter = if spread > 0.0 { rng.gen_range(-spread..=spread) } else { 0.0 };
        let Some((particle, position, alpha)) =
            trail_particle(&cfg, tank, transform.translation.truncate(), jitter)
        else {
            continue;
        };
        commands.spawn((
            particle,
            GameEntity,
            Sprite::from_color(trail.color.with_alpha(alpha), Vec2::splat(cfg.trail.base_size)),
            Transform::from_translation(position.extend(Z_TRAIL))
                .with_scale(Vec3::splat(particle.scale_start)),
        ));
    }
}

fn spawn_burst(
    commands: &mut Commands,
    rng: &mut impl Rng,
    burst: &BurstConfig,
    color: Color,
    base_size: f32,
    origin: Vec2,
) {
    for _ in 0..burst.count {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = if burst.speed > 0.0 {
            rng.gen_range(-burst.speed..=burst.speed)
        } else {
            0.0
        };
        let particle = Particle {
            velocity: Vec2::from_angle(angle) * speed,
            gravity: burst.gravity,
            age: 0.0,
            lifespan: burst.lifespan,
            scale_start: burst.scale_start,
            scale_end: burst.scale_end,
        };
        commands.spawn((
            particle,
            GameEntity,
            Sprite::from_color(color, Vec2::splat(base_size)),
            Transform::from_translation(origin.extend(Z_SPARK))
                .with_scale(Vec3::splat(burst.scale_start)),
        ));
    }
}

fn spawn_sparks(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut rng: ResMut<GameRng>,
    mut events: EventReader<EnemyDestroyed>,
) {
    for ev in events.read() {
        let sparks = &cfg.sparks;
        spawn_burst(&mut commands, &mut **rng, &sparks.large, palette::SPARK_LARGE, sparks.base_size, ev.position);
        spawn_burst(&mut commands, &mut **rng, &sparks.small, palette::SPARK_SMALL, sparks.base_size, ev.position);
    }
}

fn age_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Particle, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut particle, mut transform) in &mut q {
        let mut position = transform.translation.truncate();
        if !particle.step(&mut position, dt) {
            commands.entity(entity).despawn();
            continue;
        }
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        transform.scale = Vec3::splat(particle.scale());
    }
}
