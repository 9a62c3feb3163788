//! Central system ordering labels to make the per-tick sequence explicit.
//! Stages (FixedUpdate, Game scene only):
//! 1. Control  (player input, enemy brain, firing)
//! 2. Motion   (velocity integration, damping, wraparound, bullets)
//! 3. Combat   (hits, enemy respawn, player death, pickups)
//! 4. Cleanup  (spent bullets)
//! Visual effects (particles, explosions, rig sync) run in Update.
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum SimSet {
    Control,
    Motion,
    Combat,
    Cleanup,
}
