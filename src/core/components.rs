use bevy::prelude::*;

use super::inventory::ItemKind;
use super::tank_code::TankCode;

/// Marker for everything spawned by the Game scene; despawned when the scene exits.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct GameEntity;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Player,
    Enemy,
}

/// Shared tank body state. Position lives in `Transform`; heading is kept here and written
/// to the transform rotation after integration.
#[derive(Component, Debug, Clone, Copy)]
pub struct Tank {
    pub code: TankCode,
    /// Pixels per tick.
    pub velocity: Vec2,
    /// Radians, counter-clockwise, 0 = facing +Y.
    pub heading: f32,
    /// Shoot input was down last tick (edge trigger).
    pub is_shooting: bool,
}

impl Tank {
    pub fn new(code: TankCode, heading: f32) -> Self {
        Self { code, velocity: Vec2::ZERO, heading, is_shooting: false }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PlayerTank;

#[derive(Component, Debug, Default, Clone, Copy)]
pub struct EnemyTank;

/// Autopilot state for enemies: counts ticks and fires every `shoot_interval`.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct EnemyBrain {
    pub shoot_count: u32,
}

/// Inserted when an enemy takes a hit; the enemy is replaced before the tick ends.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Wrecked;

/// Axis-aligned collision box centred on the entity's translation. Rotation is ignored.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub half_extents: Vec2,
}

impl Hitbox {
    pub fn square(half: f32) -> Self {
        Self { half_extents: Vec2::splat(half) }
    }

    pub fn rect_at(&self, center: Vec2) -> Rect {
        Rect::from_center_half_size(center, self.half_extents)
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Bullet {
    pub owner: Faction,
    /// Pixels per tick.
    pub velocity: Vec2,
}

/// Bullet has left the arena or hit something; removed at the end of the tick.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Spent;

/// A part lying in the arena waiting to be picked up.
#[derive(Component, Debug, Clone, Copy)]
pub struct ItemDrop {
    pub item: ItemKind,
}

/// Cosmetic per-tank animation state, applied to the part sprites each frame.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct TankRig {
    /// Pixel offset of the body plate while the engine is engaged.
    pub body_jitter: Vec2,
    /// How far (px) the rear chassis plate has slid back from firing.
    pub chassis_slide: f32,
    /// Track plate tilt in degrees, positive when steering left.
    pub track_tilt: f32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankPart {
    ChassisRear,
    Body,
    Tracks,
    Turret,
}

/// Boost-trail emitter colour; attached to every tank.
#[derive(Component, Debug, Clone, Copy)]
pub struct BoostTrail {
    pub color: Color,
}
