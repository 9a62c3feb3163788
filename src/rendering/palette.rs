//! Centralized part & effect colors.
//! Every tank part variant maps to a fixed colour so a tank code reads the same everywhere.

use bevy::prelude::*;

/// Turret barrels: metallic tints.
pub const TURRET_COLORS: [Color; 10] = [
    Color::srgb(0.55, 0.57, 0.60),
    Color::srgb(0.35, 0.37, 0.40),
    Color::srgb(0.72, 0.60, 0.35),
    Color::srgb(0.60, 0.30, 0.25),
    Color::srgb(0.30, 0.45, 0.35),
    Color::srgb(0.25, 0.35, 0.55),
    Color::srgb(0.80, 0.80, 0.82),
    Color::srgb(0.45, 0.30, 0.55),
    Color::srgb(0.20, 0.20, 0.22),
    Color::srgb(0.85, 0.70, 0.20),
];

/// Hull plates: camouflage family.
pub const BODY_COLORS: [Color; 6] = [
    Color::srgb(0.36, 0.45, 0.25),
    Color::srgb(0.62, 0.55, 0.38),
    Color::srgb(0.30, 0.35, 0.40),
    Color::srgb(0.55, 0.25, 0.20),
    Color::srgb(0.22, 0.30, 0.50),
    Color::srgb(0.75, 0.75, 0.70),
];

/// Chassis/tracks: dark neutrals.
pub const CHASSIS_COLORS: [Color; 9] = [
    Color::srgb(0.15, 0.15, 0.15),
    Color::srgb(0.22, 0.20, 0.18),
    Color::srgb(0.18, 0.22, 0.18),
    Color::srgb(0.25, 0.25, 0.28),
    Color::srgb(0.30, 0.22, 0.15),
    Color::srgb(0.12, 0.14, 0.20),
    Color::srgb(0.28, 0.28, 0.22),
    Color::srgb(0.20, 0.12, 0.12),
    Color::srgb(0.35, 0.35, 0.35),
];

pub const PLAYER_TRAIL: Color = Color::srgb(0.30, 0.60, 1.0);
pub const ENEMY_TRAIL: Color = Color::srgb(1.0, 0.25, 0.20);
pub const BULLET: Color = Color::srgb(1.0, 0.95, 0.60);
pub const SPARK_LARGE: Color = Color::srgb(1.0, 0.75, 0.25);
pub const SPARK_SMALL: Color = Color::srgb(1.0, 1.0, 0.90);
pub const EXPLOSION: Color = Color::srgb(1.0, 0.55, 0.15);
pub const BACKGROUND: Color = Color::srgb(0.16, 0.18, 0.14);
pub const GRID_LINE: Color = Color::srgba(1.0, 1.0, 1.0, 0.04);
pub const BUTTON_IDLE: Color = Color::srgba(0.08, 0.08, 0.12, 0.8);
/// Hover tint for scene buttons (#9887ff).
pub const BUTTON_HOVER: Color = Color::srgb(0.596, 0.529, 1.0);
pub const BUTTON_PRESSED: Color = Color::srgba(0.15, 0.15, 0.25, 0.9);

#[inline]
pub fn turret_color(variant: u8) -> Color {
    TURRET_COLORS[variant as usize % TURRET_COLORS.len()]
}

#[inline]
pub fn body_color(variant: u8) -> Color {
    BODY_COLORS[variant as usize % BODY_COLORS.len()]
}

#[inline]
pub fn chassis_color(variant: u8) -> Color {
    CHASSIS_COLORS[variant as usize % CHASSIS_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tank_code::{BODY_VARIANTS, CHASSIS_VARIANTS, TURRET_VARIANTS};

    #[test]
    fn one_color_per_variant() {
        assert_eq!(TURRET_COLORS.len(), TURRET_VARIANTS as usize);
        assert_eq!(BODY_COLORS.len(), BODY_VARIANTS as usize);
        assert_eq!(CHASSIS_COLORS.len(), CHASSIS_VARIANTS as usize);
    }

    #[test]
    fn all_colors_distinct_within_family() {
        for family in [&TURRET_COLORS[..], &BODY_COLORS[..], &CHASSIS_COLORS[..]] {
            for (i, c1) in family.iter().enumerate() {
                for (j, c2) in family.iter().enumerate() {
                    if i != j {
                        assert!(c1 != c2, "duplicate colors at {i} and {j}");
                    }
                }
            }
        }
    }

    #[test]
    fn wrap_behavior() {
        assert_eq!(turret_color(10), TURRET_COLORS[0]);
        assert_eq!(body_color(7), BODY_COLORS[1]);
    }
}
