use bevy::prelude::*;

use crate::app::state::AppState;
use crate::core::components::GameEntity;
use crate::core::config::GameConfig;
use crate::core::events::EnemyDestroyed;
use crate::rendering::palette;

/// Above tanks and sparks.
pub const Z_EXPLOSION: f32 = 4.0;

/// Frame-stepped blast. Each frame grows the sprite and fades it; the entity is removed after
/// the last frame.
#[derive(Component, Debug)]
pub struct Explosion {
    pub frame: u32,
    pub frames: u32,
    pub timer: Timer,
}

impl Explosion {
    pub fn new(frame_rate: f32, frames: u32) -> Self {
        let period = 1.0 / frame_rate.max(1.0);
        Self {
            frame: 0,
            frames: frames.max(1),
            timer: Timer::from_seconds(period, TimerMode::Repeating),
        }
    }

    /// 0 on the first frame, 1 on the last.
    pub fn progress(&self) -> f32 {
        if self.frames <= 1 {
            return 1.0;
        }
        self.frame as f32 / (self.frames - 1) as f32
    }

    /// Advance the animation clock. Returns false once every frame has been shown.
    pub fn tick(&mut self, delta: std::time::Duration) -> bool {
        self.timer.tick(delta);
        self.frame += self.timer.times_finished_this_tick();
        self.frame < self.frames
    }
}

pub struct ExplosionPlugin;

impl Plugin for ExplosionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (spawn_explosions, animate_explosions).run_if(in_state(AppState::Game)),
        );
    }
}

fn spawn_explosions(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut events: EventReader<EnemyDestroyed>,
) {
    for ev in events.read() {
        let explosion = Explosion::new(cfg.explosion.frame_rate, cfg.explosion.frames);
        commands.spawn((
            Sprite::from_color(palette::EXPLOSION, Vec2::splat(cfg.explosion.size)),
            Transform::from_translation(ev.position.extend(Z_EXPLOSION))
                .with_scale(Vec3::splat(0.3)),
            explosion,
            GameEntity,
        ));
    }
}

fn animate_explosions(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Explosion, &mut Sprite, &mut Transform)>,
) {
    for (entity, mut explosion, mut sprite, mut transform) in &mut q {
        if !explosion.tick(time.delta()) {
            commands.entity(entity).despawn();
            continue;
        }
        let t = explosion.progress();
        transform.scale = Vec3::splat(0.3 + 0.7 * t);
        sprite.color = palette::EXPLOSION.with_alpha(1.0 - 0.8 * t);
    }
}
