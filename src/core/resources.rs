use bevy::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use super::config::GameConfig;

/// Gameplay randomness. Seeded from config so a run can be replayed.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_config(cfg: &GameConfig) -> Self {
        match cfg.sim.seed {
            Some(seed) => Self::seeded(seed),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl FromWorld for GameRng {
    fn from_world(world: &mut World) -> Self {
        world
            .get_resource::<GameConfig>()
            .map(GameRng::from_config)
            .unwrap_or_else(|| GameRng(StdRng::from_entropy()))
    }
}

/// Play field, centred on the origin.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub half_extents: Vec2,
}

impl Arena {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            half_extents: Vec2::new(cfg.window.width, cfg.window.height) * 0.5,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x.abs() <= self.half_extents.x && p.y.abs() <= self.half_extents.y
    }
}

impl FromWorld for Arena {
    fn from_world(world: &mut World) -> Self {
        let cfg = world.get_resource::<GameConfig>().cloned().unwrap_or_default();
        Self::from_config(&cfg)
    }
}

/// Simulation ticks elapsed since startup.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SimTick(pub u64);

/// Per-run tallies shown on the game-over screen.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub kills: u32,
    pub shots_fired: u32,
    pub items_collected: u32,
    pub ticks_survived: u64,
}

impl RunStats {
    pub fn seconds_survived(&self, tick_hz: f64) -> f64 {
        if tick_hz <= 0.0 {
            return 0.0;
        }
        self.ticks_survived as f64 / tick_hz
    }
}

/// Set on the tick the player tank is destroyed. The state switch to GameOver only lands on
/// the next frame, so the simulation checks this to stop any ticks still queued in this one.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDown(pub bool);

/// Run condition: the player tank is still in play.
pub fn player_alive(down: Res<PlayerDown>) -> bool {
    !down.0
}
