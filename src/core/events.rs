use bevy::prelude::*;

use super::components::Faction;
use super::inventory::ItemKind;

/// The enemy was hit by a player bullet at `position`.
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDestroyed {
    pub position: Vec2,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDestroyed {
    pub position: Vec2,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ShotFired {
    pub owner: Faction,
    pub position: Vec2,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ItemCollected(pub ItemKind);
