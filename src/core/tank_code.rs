//! Tank loadout identifiers.
//!
//! A tank is assembled from three interchangeable parts. Its code is the three variant digits
//! written turret-first, e.g. `"352"` = turret 3, body 5, chassis 2.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;
use rand::Rng;

pub const TURRET_VARIANTS: u8 = 10;
pub const BODY_VARIANTS: u8 = 6;
pub const CHASSIS_VARIANTS: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartSlot {
    Turret,
    Body,
    Chassis,
}

impl PartSlot {
    pub const ALL: [PartSlot; 3] = [PartSlot::Turret, PartSlot::Body, PartSlot::Chassis];

    pub fn variants(self) -> u8 {
        match self {
            PartSlot::Turret => TURRET_VARIANTS,
            PartSlot::Body => BODY_VARIANTS,
            PartSlot::Chassis => CHASSIS_VARIANTS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PartSlot::Turret => "Turret",
            PartSlot::Body => "Body",
            PartSlot::Chassis => "Chassis",
        }
    }

    /// Next slot in menu order, wrapping.
    pub fn next(self) -> Self {
        match self {
            PartSlot::Turret => PartSlot::Body,
            PartSlot::Body => PartSlot::Chassis,
            PartSlot::Chassis => PartSlot::Turret,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            PartSlot::Turret => PartSlot::Chassis,
            PartSlot::Body => PartSlot::Turret,
            PartSlot::Chassis => PartSlot::Body,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TankCode {
    pub turret: u8,
    pub body: u8,
    pub chassis: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TankCodeError {
    Length(usize),
    NotADigit(char),
    OutOfRange { slot: PartSlot, value: u8 },
}

impl fmt::Display for TankCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TankCodeError::Length(n) => write!(f, "tank code must be 3 digits, got {n} characters"),
            TankCodeError::NotADigit(c) => write!(f, "tank code contains non-digit '{c}'"),
            TankCodeError::OutOfRange { slot, value } => write!(
                f,
                "{} variant {value} out of range (0..{})",
                slot.label(),
                slot.variants()
            ),
        }
    }
}

impl std::error::Error for TankCodeError {}

impl TankCode {
    pub fn new(turret: u8, body: u8, chassis: u8) -> Result<Self, TankCodeError> {
        let code = Self { turret, body, chassis };
        for slot in PartSlot::ALL {
            let value = code.part(slot);
            if value >= slot.variants() {
                return Err(TankCodeError::OutOfRange { slot, value });
            }
        }
        Ok(code)
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            turret: rng.gen_range(0..TURRET_VARIANTS),
            body: rng.gen_range(0..BODY_VARIANTS),
            chassis: rng.gen_range(0..CHASSIS_VARIANTS),
        }
    }

    pub fn part(&self, slot: PartSlot) -> u8 {
        match slot {
            PartSlot::Turret => self.turret,
            PartSlot::Body => self.body,
            PartSlot::Chassis => self.chassis,
        }
    }

    /// Replace one part, returning the variant that was fitted before.
    pub fn set_part(&mut self, slot: PartSlot, variant: u8) -> u8 {
        let variant = variant % slot.variants();
        let field = match slot {
            PartSlot::Turret => &mut self.turret,
            PartSlot::Body => &mut self.body,
            PartSlot::Chassis => &mut self.chassis,
        };
        std::mem::replace(field, variant)
    }

    /// Step one part's variant forward (`delta > 0`) or backward, wrapping.
    pub fn cycle(&mut self, slot: PartSlot, delta: i32) {
        let n = slot.variants() as i32;
        let next = (self.part(slot) as i32 + delta).rem_euclid(n);
        self.set_part(slot, next as u8);
    }
}

impl fmt::Display for TankCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.turret, self.body, self.chassis)
    }
}

impl FromStr for TankCode {
    type Err = TankCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 3 {
            return Err(TankCodeError::Length(chars.len()));
        }
        let mut digits = [0u8; 3];
        for (d, c) in digits.iter_mut().zip(&chars) {
            *d = c.to_digit(10).ok_or(TankCodeError::NotADigit(*c))? as u8;
        }
        TankCode::new(digits[0], digits[1], digits[2])
    }
}

/// The loadout the player drives into the next Game scene.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct CurrentTank(pub TankCode);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn parse_and_display() {
        let code: TankCode = "352".parse().unwrap();
        assert_eq!(code, TankCode { turret: 3, body: 5, chassis: 2 });
        assert_eq!(code.to_string(), "352");
    }

    #[test]
    fn parse_rejects_bad_codes() {
        assert_eq!("35".parse::<TankCode>(), Err(TankCodeError::Length(2)));
        assert_eq!("3x2".parse::<TankCode>(), Err(TankCodeError::NotADigit('x')));
        assert_eq!(
            "962".parse::<TankCode>(),
            Err(TankCodeError::OutOfRange { slot: PartSlot::Body, value: 6 })
        );
        assert!("009".parse::<TankCode>().is_err());
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let mut code = TankCode::default();
        code.cycle(PartSlot::Body, -1);
        assert_eq!(code.body, BODY_VARIANTS - 1);
        code.cycle(PartSlot::Body, 1);
        assert_eq!(code.body, 0);
        code.cycle(PartSlot::Turret, 11);
        assert_eq!(code.turret, 1);
    }

    #[test]
    fn random_codes_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let c = TankCode::random(&mut rng);
            assert!(TankCode::new(c.turret, c.body, c.chassis).is_ok());
        }
    }
}
