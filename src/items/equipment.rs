//! Equipment system
//!
//! Fixed equipment slots and the auto-equip rules. An occupied slot is a
//! hard failure; nothing is ever swapped out automatically.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::item::{ArmorSlot, Item, ItemId, ItemKind, ModifierMode};
use crate::combat::StatusEffect;
use crate::entities::Stat;

/// Number of ring slots
pub const RING_SLOTS: usize = 2;
/// Number of talisman slots
pub const TALISMAN_SLOTS: usize = 2;

/// Where an item ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    RightHand,
    LeftHand,
    Head,
    Chest,
    Legs,
    Arms,
    Ring(usize),
    Talisman(usize),
}

/// Why an item could not be equipped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipError {
    #[error("both hands are occupied")]
    HandsFull,
    #[error("a two-handed weapon needs both hands free")]
    NeedsBothHands,
    #[error("armor `{0}` does not declare a slot")]
    NoArmorSlot(ItemId),
    #[error("{0} slot is occupied")]
    SlotOccupied(EquipSlot),
    #[error("all ring slots are occupied")]
    RingsFull,
    #[error("all talisman slots are occupied")]
    TalismansFull,
}

/// Player equipment slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// Weapons held in the right hand
    pub right_hand: Vec<Item>,
    /// Weapons held in the left hand
    pub left_hand: Vec<Item>,
    pub head: Option<Item>,
    pub chest: Option<Item>,
    pub legs: Option<Item>,
    pub arms: Option<Item>,
    pub rings: [Option<Item>; RING_SLOTS],
    pub talismans: [Option<Item>; TALISMAN_SLOTS],
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equip a copy of `item` into the first free slot that fits it
    pub fn auto_equip(&mut self, item: &Item) -> Result<EquipSlot, EquipError> {
        match &item.kind {
            ItemKind::Weapon(weapon) => self.equip_weapon(item, weapon.two_handed),
            ItemKind::Armor(armor) => {
                let slot = armor.slot.ok_or_else(|| EquipError::NoArmorSlot(item.id.clone()))?;
                let target = self.armor_slot_mut(slot);
                if target.is_some() {
                    return Err(EquipError::SlotOccupied(slot.into()));
                }
                *target = Some(item.single());
                Ok(slot.into())
            }
            ItemKind::Ring(_) => {
                let idx = first_empty(&self.rings).ok_or(EquipError::RingsFull)?;
                self.rings[idx] = Some(item.single());
                Ok(EquipSlot::Ring(idx))
            }
            ItemKind::Talisman(_) => {
                let idx = first_empty(&self.talismans).ok_or(EquipError::TalismansFull)?;
                self.talismans[idx] = Some(item.single());
                Ok(EquipSlot::Talisman(idx))
            }
        }
    }

    fn equip_weapon(&mut self, item: &Item, two_handed: bool) -> Result<EquipSlot, EquipError> {
        if two_handed {
            if !self.right_hand.is_empty() || !self.left_hand.is_empty() {
                return Err(EquipError::NeedsBothHands);
            }
            self.right_hand.push(item.single());
            return Ok(EquipSlot::RightHand);
        }

        if self.right_hand.is_empty() {
            self.right_hand.push(item.single());
            Ok(EquipSlot::RightHand)
        } else if self.is_free(EquipSlot::LeftHand) {
            self.left_hand.push(item.single());
            Ok(EquipSlot::LeftHand)
        } else {
            Err(EquipError::HandsFull)
        }
    }

    fn armor_slot_mut(&mut self, slot: ArmorSlot) -> &mut Option<Item> {
        match slot {
            ArmorSlot::Head => &mut self.head,
            ArmorSlot::Chest => &mut self.chest,
            ArmorSlot::Legs => &mut self.legs,
            ArmorSlot::Arms => &mut self.arms,
        }
    }

    /// Whether the right hand holds a two-handed weapon
    pub fn holds_two_handed(&self) -> bool {
        self.right_hand
            .iter()
            .any(|w| w.as_weapon().map_or(false, |s| s.two_handed))
    }

    /// Check if a slot can take an item. A two-handed grip also blocks the left hand.
    pub fn is_free(&self, slot: EquipSlot) -> bool {
        match slot {
            EquipSlot::LeftHand => self.left_hand.is_empty() && !self.holds_two_handed(),
            EquipSlot::RightHand => self.right_hand.is_empty(),
            other => self.get(other).is_none(),
        }
    }

    /// Get item in a slot (first weapon for hands)
    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        match slot {
            EquipSlot::RightHand => self.right_hand.first(),
            EquipSlot::LeftHand => self.left_hand.first(),
            EquipSlot::Head => self.head.as_ref(),
            EquipSlot::Chest => self.chest.as_ref(),
            EquipSlot::Legs => self.legs.as_ref(),
            EquipSlot::Arms => self.arms.as_ref(),
            EquipSlot::Ring(i) => self.rings.get(i).and_then(Option::as_ref),
            EquipSlot::Talisman(i) => self.talismans.get(i).and_then(Option::as_ref),
        }
    }

    /// Unequip an item from a slot
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Item> {
        match slot {
            EquipSlot::RightHand => self.right_hand.pop(),
            EquipSlot::LeftHand => self.left_hand.pop(),
            EquipSlot::Head => self.head.take(),
            EquipSlot::Chest => self.chest.take(),
            EquipSlot::Legs => self.legs.take(),
            EquipSlot::Arms => self.arms.take(),
            EquipSlot::Ring(i) => self.rings.get_mut(i).and_then(Option::take),
            EquipSlot::Talisman(i) => self.talismans.get_mut(i).and_then(Option::take),
        }
    }

    /// Get all equipped items
    pub fn all_items(&self) -> impl Iterator<Item = &Item> {
        self.right_hand
            .iter()
            .chain(&self.left_hand)
            .chain(self.head.iter())
            .chain(self.chest.iter())
            .chain(self.legs.iter())
            .chain(self.arms.iter())
            .chain(self.rings.iter().flatten())
            .chain(self.talismans.iter().flatten())
    }

    /// Calculate total armor defense
    pub fn total_defense(&self) -> i32 {
        self.all_items()
            .filter_map(|i| i.as_armor())
            .map(|a| a.defense)
            .sum()
    }

    /// Calculate total stat bonus
    pub fn stat_modifier(&self, stat: Stat) -> i32 {
        self.all_items().map(|i| i.stat_modifier(stat)).sum()
    }

    /// Added trigger chance fraction for an effect from talismans
    pub fn effect_boost(&self, effect: StatusEffect) -> f32 {
        self.talisman_fraction(effect, ModifierMode::Boost)
    }

    /// Resistance against an effect from talismans, capped at 1.0
    pub fn effect_resistance(&self, effect: StatusEffect) -> f32 {
        self.talisman_fraction(effect, ModifierMode::Resist).min(1.0)
    }

    fn talisman_fraction(&self, effect: StatusEffect, mode: ModifierMode) -> f32 {
        self.talismans
            .iter()
            .flatten()
            .filter_map(|t| match &t.kind {
                ItemKind::Talisman(stats) => Some(&stats.effect_modifiers),
                _ => None,
            })
            .flatten()
            .filter(|m| m.effect == effect && m.mode == mode)
            .map(|m| m.fraction.max(0.0))
            .sum()
    }
}

fn first_empty<const N: usize>(slots: &[Option<Item>; N]) -> Option<usize> {
    slots.iter().position(Option::is_none)
}

impl From<ArmorSlot> for EquipSlot {
    fn from(slot: ArmorSlot) -> Self {
        match slot {
            ArmorSlot::Head => EquipSlot::Head,
            ArmorSlot::Chest => EquipSlot::Chest,
            ArmorSlot::Legs => EquipSlot::Legs,
            ArmorSlot::Arms => EquipSlot::Arms,
        }
    }
}

/// Equipment slot display info
impl EquipSlot {
    /// Slot name in the player/combat contract vocabulary
    pub fn key(&self) -> &'static str {
        match self {
            EquipSlot::RightHand => "rightHand",
            EquipSlot::LeftHand => "leftHand",
            EquipSlot::Head => "head",
            EquipSlot::Chest => "chest",
            EquipSlot::Legs => "legs",
            EquipSlot::Arms => "arms",
            EquipSlot::Ring(_) => "rings",
            EquipSlot::Talisman(_) => "talismans",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::RightHand => "Right Hand",
            EquipSlot::LeftHand => "Left Hand",
            EquipSlot::Head => "Head",
            EquipSlot::Chest => "Chest",
            EquipSlot::Legs => "Legs",
            EquipSlot::Arms => "Arms",
            EquipSlot::Ring(_) => "Ring",
            EquipSlot::Talisman(_) => "Talisman",
        }
    }

    /// Get all slots in display order
    pub fn all() -> Vec<EquipSlot> {
        let mut slots = vec![
            EquipSlot::RightHand,
            EquipSlot::LeftHand,
            EquipSlot::Head,
            EquipSlot::Chest,
            EquipSlot::Legs,
            EquipSlot::Arms,
        ];
        slots.extend((0..RING_SLOTS).map(EquipSlot::Ring));
        slots.extend((0..TALISMAN_SLOTS).map(EquipSlot::Talisman));
        slots
    }
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipSlot::Ring(i) | EquipSlot::Talisman(i) => write!(f, "{} {}", self.name(), i + 1),
            _ => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::catalog::templates;
    use crate::items::item::ArmorStats;

    #[test]
    fn test_weapons_fill_right_then_left() {
        let mut eq = Equipment::new();
        let dagger = templates::hunting_dagger();

        assert_eq!(eq.auto_equip(&dagger), Ok(EquipSlot::RightHand));
        assert_eq!(eq.auto_equip(&dagger), Ok(EquipSlot::LeftHand));
        assert_eq!(eq.auto_equip(&dagger), Err(EquipError::HandsFull));
        assert_eq!(eq.right_hand.len(), 1);
        assert_eq!(eq.left_hand.len(), 1);
    }

    #[test]
    fn test_full_hands_leave_equipment_unchanged() {
        let mut eq = Equipment::new();
        eq.auto_equip(&templates::hunting_dagger()).unwrap();
        eq.auto_equip(&templates::iron_mace()).unwrap();
        let before = eq.clone();

        assert!(eq.auto_equip(&templates::rusty_shortsword()).is_err());
        assert_eq!(eq, before);
    }

    #[test]
    fn test_two_handed_needs_both_hands() {
        let mut eq = Equipment::new();
        eq.auto_equip(&templates::hunting_dagger()).unwrap();
        assert_eq!(
            eq.auto_equip(&templates::war_greatsword()),
            Err(EquipError::NeedsBothHands)
        );

        let mut eq = Equipment::new();
        assert_eq!(eq.auto_equip(&templates::war_greatsword()), Ok(EquipSlot::RightHand));
        assert!(!eq.is_free(EquipSlot::LeftHand));
        assert_eq!(eq.auto_equip(&templates::hunting_dagger()), Err(EquipError::HandsFull));
    }

    #[test]
    fn test_armor_goes_to_declared_slot() {
        let mut eq = Equipment::new();
        assert_eq!(eq.auto_equip(&templates::iron_helm()), Ok(EquipSlot::Head));
        assert_eq!(
            eq.auto_equip(&templates::leather_cap()),
            Err(EquipError::SlotOccupied(EquipSlot::Head))
        );
        assert_eq!(eq.head.as_ref().unwrap().id, "iron_helm");
        assert_eq!(eq.auto_equip(&templates::padded_vest()), Ok(EquipSlot::Chest));
        assert_eq!(eq.total_defense(), 6);
    }

    #[test]
    fn test_armor_without_slot_fails() {
        let mut eq = Equipment::new();
        let mut cloak = templates::padded_vest();
        cloak.id = "tattered_cloak".to_string();
        cloak.kind = ItemKind::Armor(ArmorStats {
            slot: None,
            defense: 1,
            modifiers: Default::default(),
        });
        assert_eq!(
            eq.auto_equip(&cloak),
            Err(EquipError::NoArmorSlot("tattered_cloak".to_string()))
        );
        assert_eq!(eq, Equipment::new());
    }

    #[test]
    fn test_rings_and_talismans_fill_in_order() {
        let mut eq = Equipment::new();
        let ring = templates::copper_band();
        assert_eq!(eq.auto_equip(&ring), Ok(EquipSlot::Ring(0)));
        assert_eq!(eq.auto_equip(&ring), Ok(EquipSlot::Ring(1)));
        assert_eq!(eq.auto_equip(&ring), Err(EquipError::RingsFull));

        let charm = templates::ward_of_ash();
        assert_eq!(eq.auto_equip(&charm), Ok(EquipSlot::Talisman(0)));
        assert_eq!(eq.auto_equip(&charm), Ok(EquipSlot::Talisman(1)));
        assert_eq!(eq.auto_equip(&charm), Err(EquipError::TalismansFull));

        assert_eq!(eq.unequip(EquipSlot::Ring(0)).unwrap().id, "copper_band");
        assert_eq!(eq.auto_equip(&ring), Ok(EquipSlot::Ring(0)));
    }

    #[test]
    fn test_equipped_copy_is_single() {
        let mut eq = Equipment::new();
        let mut stack = templates::copper_band();
        stack.quantity = 3;
        eq.auto_equip(&stack).unwrap();
        assert_eq!(eq.rings[0].as_ref().unwrap().quantity, 1);
    }

    #[test]
    fn test_modifiers_and_talisman_fractions() {
        let mut eq = Equipment::new();
        eq.auto_equip(&templates::copper_band()).unwrap();
        eq.auto_equip(&templates::bone_charm()).unwrap();
        eq.auto_equip(&templates::ward_of_ash()).unwrap();

        assert_eq!(eq.stat_modifier(Stat::Strength), 2);
        assert!((eq.effect_boost(StatusEffect::Bleed) - 0.25).abs() < f32::EPSILON);
        assert!((eq.effect_resistance(StatusEffect::Burn) - 0.5).abs() < f32::EPSILON);
        assert_eq!(eq.effect_resistance(StatusEffect::Poison), 0.0);
    }

    #[test]
    fn test_slot_vocabulary() {
        let keys: Vec<&str> = EquipSlot::all().iter().map(|s| s.key()).collect();
        assert_eq!(
            keys,
            ["rightHand", "leftHand", "head", "chest", "legs", "arms", "rings", "rings", "talismans", "talismans"]
        );
        assert_eq!(EquipSlot::Ring(1).to_string(), "Ring 2");
    }
}
