//! Item system

pub mod item;
pub mod catalog;
pub mod equipment;
pub mod placement;
pub mod pickup;

pub use item::{
    ArmorSlot, ArmorStats, DamageType, EffectApplication, EffectModifier, Item, ItemId, ItemKind, ItemType,
    ModifierMode, Rarity, RingStats, TalismanStats, UnknownItemType, WeaponStats,
};
pub use catalog::{default_items, CatalogError, ItemCatalog};
pub use equipment::{EquipError, EquipSlot, Equipment, RING_SLOTS, TALISMAN_SLOTS};
pub use placement::{DistributionError, ItemRegistry, PlacedItem, ProjectionReport};
pub use pickup::{auto_equip_item, pickup_item, PickedUp, PickupError, PickupSource};
