//! Item definitions
//!
//! Core item types, rarities, and the per-kind payloads for weapons,
//! armor, rings and talismans.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat::StatusEffect;
use crate::entities::Stat;

/// Catalog item ID, unique across all item kinds
pub type ItemId = String;

/// Item rarity tiers, ordered from most to least common
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Get rarity name
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// The four item families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Weapon,
    Armor,
    Ring,
    Talisman,
}

/// Returned when parsing an unrecognized item type name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown item type `{0}`")]
pub struct UnknownItemType(pub String);

impl ItemType {
    pub fn all() -> &'static [ItemType] {
        &[ItemType::Weapon, ItemType::Armor, ItemType::Ring, ItemType::Talisman]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemType::Weapon => "weapon",
            ItemType::Armor => "armor",
            ItemType::Ring => "ring",
            ItemType::Talisman => "talisman",
        }
    }

    /// Heading used when grouping an inventory listing
    pub fn group_label(&self) -> &'static str {
        match self {
            ItemType::Weapon => "Weapons",
            ItemType::Armor => "Armor",
            ItemType::Ring => "Rings",
            ItemType::Talisman => "Talismans",
        }
    }
}

impl FromStr for ItemType {
    type Err = UnknownItemType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "weapon" => Ok(ItemType::Weapon),
            "armor" => Ok(ItemType::Armor),
            "ring" => Ok(ItemType::Ring),
            "talisman" => Ok(ItemType::Talisman),
            _ => Err(UnknownItemType(s.to_string())),
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a weapon deals its damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Slash,
    Pierce,
    Blunt,
    Magic,
}

impl DamageType {
    pub fn name(&self) -> &'static str {
        match self {
            DamageType::Slash => "Slash",
            DamageType::Pierce => "Pierce",
            DamageType::Blunt => "Blunt",
            DamageType::Magic => "Magic",
        }
    }
}

/// Body slot an armor piece is worn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorSlot {
    Head,
    Chest,
    Legs,
    Arms,
}

/// A status effect a weapon can inflict on hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectApplication {
    pub effect: StatusEffect,
    /// Trigger chance per hit (0.0 - 1.0)
    pub chance: f32,
    /// Scales the effect's magnitude
    pub power: f32,
}

/// Whether a talisman strengthens or wards off an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierMode {
    /// Raises the wearer's trigger chance for the effect
    Boost,
    /// Lowers the chance of the effect landing on the wearer
    Resist,
}

/// A talisman's influence on one status effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectModifier {
    pub effect: StatusEffect,
    pub mode: ModifierMode,
    /// Fraction added to (boost) or removed from (resist) the trigger chance
    pub fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage_type: DamageType,
    pub base_damage: i32,
    /// Multiplier per stat added on top of base damage
    #[serde(default)]
    pub scaling: HashMap<Stat, f32>,
    #[serde(default)]
    pub effects: Vec<EffectApplication>,
    #[serde(default)]
    pub two_handed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorStats {
    /// Armor without a slot cannot be equipped
    pub slot: Option<ArmorSlot>,
    pub defense: i32,
    #[serde(default)]
    pub modifiers: HashMap<Stat, i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingStats {
    #[serde(default)]
    pub modifiers: HashMap<Stat, i32>,
    /// Flavor for a special property, not enforced mechanically
    #[serde(default)]
    pub special: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalismanStats {
    #[serde(default)]
    pub modifiers: HashMap<Stat, i32>,
    #[serde(default)]
    pub effect_modifiers: Vec<EffectModifier>,
}

/// Kind-specific item payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon(WeaponStats),
    Armor(ArmorStats),
    Ring(RingStats),
    Talisman(TalismanStats),
}

/// The main Item struct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Catalog ID
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Description/flavor text
    pub description: String,
    /// Gold value
    pub value: u32,
    pub weight: f32,
    pub rarity: Rarity,
    /// Stack count, at least 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub kind: ItemKind,
}

fn default_quantity() -> u32 {
    1
}

impl Item {
    /// Create a common, weightless, single item with no description
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            value: 1,
            weight: 0.0,
            rarity: Rarity::Common,
            quantity: 1,
            kind,
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self.kind {
            ItemKind::Weapon(_) => ItemType::Weapon,
            ItemKind::Armor(_) => ItemType::Armor,
            ItemKind::Ring(_) => ItemType::Ring,
            ItemKind::Talisman(_) => ItemType::Talisman,
        }
    }

    pub fn as_weapon(&self) -> Option<&WeaponStats> {
        match &self.kind {
            ItemKind::Weapon(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_armor(&self) -> Option<&ArmorStats> {
        match &self.kind {
            ItemKind::Armor(a) => Some(a),
            _ => None,
        }
    }

    /// Flat stat bonus this item grants while equipped
    pub fn stat_modifier(&self, stat: Stat) -> i32 {
        let modifiers = match &self.kind {
            ItemKind::Weapon(_) => return 0,
            ItemKind::Armor(a) => &a.modifiers,
            ItemKind::Ring(r) => &r.modifiers,
            ItemKind::Talisman(t) => &t.modifiers,
        };
        modifiers.get(&stat).copied().unwrap_or(0)
    }

    /// Name with a stack suffix when more than one is held
    pub fn display_name(&self) -> String {
        if self.quantity > 1 {
            format!("{} x{}", self.name, self.quantity)
        } else {
            self.name.clone()
        }
    }

    /// Copy of this item with a single unit
    pub fn single(&self) -> Item {
        Item { quantity: 1, ..self.clone() }
    }
}
