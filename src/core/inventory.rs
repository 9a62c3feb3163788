//! Collectable tank parts and the player's inventory.

use std::fmt;

use bevy::prelude::*;
use rand::Rng;

use super::tank_code::{
    PartSlot, TankCode, BODY_VARIANTS, CHASSIS_VARIANTS, TURRET_VARIANTS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemKind {
    pub slot: PartSlot,
    pub variant: u8,
}

/// Total number of distinct droppable items.
pub const ITEM_COUNT: usize = (TURRET_VARIANTS + BODY_VARIANTS + CHASSIS_VARIANTS) as usize;

impl ItemKind {
    pub fn new(slot: PartSlot, variant: u8) -> Self {
        Self { slot, variant: variant % slot.variants() }
    }

    /// Catalog index `i` in drop order: turrets, then bodies, then chassis.
    pub fn from_index(i: usize) -> Option<Self> {
        let mut i = i;
        for slot in PartSlot::ALL {
            let n = slot.variants() as usize;
            if i < n {
                return Some(Self::new(slot, i as u8));
            }
            i -= n;
        }
        None
    }

    pub fn catalog() -> impl Iterator<Item = ItemKind> {
        (0..ITEM_COUNT).filter_map(ItemKind::from_index)
    }

    /// Uniform pick over the whole catalog.
    pub fn random(rng: &mut impl Rng) -> Self {
        let i = rng.gen_range(0..ITEM_COUNT);
        // `i` is always in the catalog range.
        Self::from_index(i).unwrap_or(Self::new(PartSlot::Turret, 0))
    }

    /// Asset-style key, e.g. `itemTurret3`.
    pub fn key(&self) -> String {
        format!("item{}{}", self.slot.label(), self.variant)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.slot.label(), self.variant)
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    pub items: Vec<ItemKind>,
}

impl Inventory {
    pub fn push(&mut self, item: ItemKind) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fit the item at `index` onto `tank`. The part it replaces goes back into the inventory
    /// at the same position so the list length never changes.
    pub fn equip(&mut self, index: usize, tank: &mut TankCode) -> Option<ItemKind> {
        let item = *self.items.get(index)?;
        let previous = tank.set_part(item.slot, item.variant);
        self.items[index] = ItemKind::new(item.slot, previous);
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn catalog_covers_every_part() {
        let all: Vec<_> = ItemKind::catalog().collect();
        assert_eq!(all.len(), 25);
        assert_eq!(all[0].key(), "itemTurret0");
        assert_eq!(all[10].key(), "itemBody0");
        assert_eq!(all[24].key(), "itemChassis8");
        assert!(ItemKind::from_index(25).is_none());
    }

    #[test]
    fn random_items_are_valid() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let item = ItemKind::random(&mut rng);
            assert!(item.variant < item.slot.variants());
        }
    }

    #[test]
    fn equip_swaps_parts() {
        let mut tank = TankCode { turret: 1, body: 2, chassis: 3 };
        let mut inv = Inventory::default();
        inv.push(ItemKind::new(PartSlot::Body, 5));
        let fitted = inv.equip(0, &mut tank);
        assert_eq!(fitted, Some(ItemKind::new(PartSlot::Body, 5)));
        assert_eq!(tank.body, 5);
        assert_eq!(inv.items, vec![ItemKind::new(PartSlot::Body, 2)]);
        assert_eq!(inv.equip(3, &mut tank), None);
    }
}
