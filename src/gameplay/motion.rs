//! Per-tick kinematics shared by tanks and bullets.
//!
//! All quantities are in pixels and pixels-per-tick. Headings are radians, counter-clockwise,
//! with 0 facing +Y.

use bevy::prelude::*;
use rand::Rng;

/// Unit vector a tank with `heading` drives towards.
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(-heading.sin(), heading.cos())
}

/// Move by one tick of `velocity`, then apply scalar damping.
#[inline]
pub fn integrate(position: &mut Vec2, velocity: &mut Vec2, damping: f32) {
    *position += *velocity;
    *velocity *= damping;
}

/// Toroidal wrap: once an object is fully `margin` past an arena edge it re-enters from the
/// opposite edge, equally far outside.
pub fn wrap_position(position: Vec2, half_extents: Vec2, margin: f32) -> Vec2 {
    let wrap = |v: f32, half: f32| {
        let limit = half + margin;
        if v > limit {
            -limit
        } else if v < -limit {
            limit
        } else {
            v
        }
    };
    Vec2::new(wrap(position.x, half_extents.x), wrap(position.y, half_extents.y))
}

/// Inclusive AABB test: boxes that only share an edge still overlap.
#[inline]
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.min.x <= b.max.x && a.max.x >= b.min.x && a.min.y <= b.max.y && a.max.y >= b.min.y
}

/// `value` mapped from `min..max` onto `0..1`, clamped.
#[inline]
pub fn percent(value: f32, min: f32, max: f32) -> f32 {
    if max <= min {
        return if value >= max { 1.0 } else { 0.0 };
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Pick an integer coordinate in `0..=extent`, re-drawing while it falls strictly inside the
/// centred band covering `exclusion` of the extent.
pub fn spawn_coordinate(rng: &mut impl Rng, extent: f32, exclusion: f32) -> f32 {
    let max = extent.max(0.0).floor() as i64;
    let exclusion = exclusion.clamp(0.0, 0.99);
    let lo = extent * (1.0 - exclusion) * 0.5;
    let hi = extent * (1.0 + exclusion) * 0.5;
    loop {
        let v = rng.gen_range(0..=max) as f32;
        if !(v > lo && v < hi) {
            return v;
        }
    }
}
