//! Item catalog
//!
//! Read-only tables of every weapon, armor piece, ring and talisman that
//! can appear in the dungeon, keyed by ID and grouped by type.

use std::collections::HashMap;
use std::sync::OnceLock;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use super::item::{Item, ItemId, ItemKind, ItemType};

/// Problems found while assembling a catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate item id `{0}`")]
    DuplicateId(ItemId),
    #[error("item `{0}` has zero quantity")]
    ZeroQuantity(ItemId),
    #[error("item `{id}` has an invalid effect {field}")]
    InvalidEffect { id: ItemId, field: &'static str },
}

/// Name of the first effect number on `item` that cannot be used as a probability or scale
fn invalid_effect_field(item: &Item) -> Option<&'static str> {
    match &item.kind {
        ItemKind::Weapon(w) => w.effects.iter().find_map(|e| {
            if !(e.chance.is_finite() && (0.0..=1.0).contains(&e.chance)) {
                Some("chance")
            } else if !(e.power.is_finite() && e.power >= 0.0) {
                Some("power")
            } else {
                None
            }
        }),
        ItemKind::Talisman(t) => t
            .effect_modifiers
            .iter()
            .any(|m| !(m.fraction.is_finite() && m.fraction >= 0.0))
            .then_some("fraction"),
        ItemKind::Armor(_) | ItemKind::Ring(_) => None,
    }
}

/// All item definitions, grouped by type in definition order
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    weapons: Vec<Item>,
    armor: Vec<Item>,
    rings: Vec<Item>,
    talismans: Vec<Item>,
    /// id -> (type, index within that type's table)
    index: HashMap<ItemId, (ItemType, usize)>,
}

static BUILTIN: OnceLock<ItemCatalog> = OnceLock::new();

impl ItemCatalog {
    /// Build a catalog, rejecting duplicate IDs, empty stacks and effect
    /// numbers that are not finite or out of range
    pub fn from_items(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for item in items {
            if item.quantity == 0 {
                return Err(CatalogError::ZeroQuantity(item.id));
            }
            if let Some(field) = invalid_effect_field(&item) {
                return Err(CatalogError::InvalidEffect { id: item.id, field });
            }
            if catalog.index.contains_key(&item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
            let item_type = item.item_type();
            let table = catalog.table_mut(item_type);
            let idx = table.len();
            let id = item.id.clone();
            table.push(item);
            catalog.index.insert(id, (item_type, idx));
        }
        Ok(catalog)
    }

    /// The built-in item tables, built once on first use
    pub fn builtin() -> &'static ItemCatalog {
        BUILTIN.get_or_init(|| {
            let catalog = Self::from_items(default_items())
                .unwrap_or_else(|e| panic!("built-in item table is invalid: {}", e));
            log::debug!("Built-in catalog ready with {} items", catalog.len());
            catalog
        })
    }

    fn table_mut(&mut self, item_type: ItemType) -> &mut Vec<Item> {
        match item_type {
            ItemType::Weapon => &mut self.weapons,
            ItemType::Armor => &mut self.armor,
            ItemType::Ring => &mut self.rings,
            ItemType::Talisman => &mut self.talismans,
        }
    }

    /// Find an item definition by ID
    pub fn find_item_by_id(&self, id: &str) -> Option<&Item> {
        let (item_type, idx) = self.index.get(id)?;
        self.items_by_type(*item_type).get(*idx)
    }

    /// All definitions of one type
    pub fn items_by_type(&self, item_type: ItemType) -> &[Item] {
        match item_type {
            ItemType::Weapon => &self.weapons,
            ItemType::Armor => &self.armor,
            ItemType::Ring => &self.rings,
            ItemType::Talisman => &self.talismans,
        }
    }

    /// Lookup by type name (`weapon`, `Armor`, `RING`...). Unknown names yield nothing.
    pub fn items_by_type_name(&self, name: &str) -> &[Item] {
        match name.parse::<ItemType>() {
            Ok(item_type) => self.items_by_type(item_type),
            Err(e) => {
                log::warn!("Item lookup failed: {}", e);
                &[]
            }
        }
    }

    /// Uniformly pick a fresh single copy of an item of the given type
    pub fn random_of_type(&self, item_type: ItemType, rng: &mut impl Rng) -> Option<Item> {
        self.items_by_type(item_type).choose(rng).map(Item::single)
    }

    /// Iterate every definition, weapons first
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.weapons
            .iter()
            .chain(&self.armor)
            .chain(&self.rings)
            .chain(&self.talismans)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Built-in definitions in catalog order
pub fn default_items() -> Vec<Item> {
    use templates::*;

    vec![
        // Weapons
        rusty_shortsword(),
        hunting_dagger(),
        iron_mace(),
        frost_wand(),
        boar_spear(),
        ember_staff(),
        war_greatsword(),
        executioner_axe(),
        // Armor
        leather_cap(),
        iron_helm(),
        padded_vest(),
        chainmail_hauberk(),
        cloth_trousers(),
        plated_greaves(),
        leather_bracers(),
        iron_vambraces(),
        // Rings
        copper_band(),
        ring_of_focus(),
        serpent_ring(),
        bloodstone_ring(),
        // Talismans
        ward_of_ash(),
        bone_charm(),
        antivenom_idol(),
        butchers_token(),
    ]
}

/// Item templates for the built-in catalog
pub mod templates {
    use std::collections::HashMap;

    use crate::combat::StatusEffect;
    use crate::entities::Stat;
    use crate::items::item::*;

    fn weapon(damage_type: DamageType, base_damage: i32, scaling: &[(Stat, f32)]) -> WeaponStats {
        WeaponStats {
            damage_type,
            base_damage,
            scaling: scaling.iter().copied().collect(),
            effects: Vec::new(),
            two_handed: false,
        }
    }

    fn on_hit(effect: StatusEffect, chance: f32, power: f32) -> EffectApplication {
        EffectApplication { effect, chance, power }
    }

    fn armor(slot: ArmorSlot, defense: i32, modifiers: &[(Stat, i32)]) -> ItemKind {
        ItemKind::Armor(ArmorStats {
            slot: Some(slot),
            defense,
            modifiers: modifiers.iter().copied().collect(),
        })
    }

    fn ring(modifiers: &[(Stat, i32)], special: Option<&str>) -> ItemKind {
        ItemKind::Ring(RingStats {
            modifiers: modifiers.iter().copied().collect(),
            special: special.map(str::to_string),
        })
    }

    fn talisman(modifiers: &[(Stat, i32)], effect_modifiers: Vec<EffectModifier>) -> ItemKind {
        ItemKind::Talisman(TalismanStats {
            modifiers: modifiers.iter().copied().collect::<HashMap<_, _>>(),
            effect_modifiers,
        })
    }

    // ---- Weapons ----

    pub fn rusty_shortsword() -> Item {
        let mut stats = weapon(DamageType::Slash, 6, &[(Stat::Strength, 0.3)]);
        stats.effects.push(on_hit(StatusEffect::Bleed, 0.15, 1.0));
        let mut item = Item::new("rusty_shortsword", "Rusty Shortsword", ItemKind::Weapon(stats));
        item.description = "Pitted and notched, but it still cuts.".to_string();
        item.value = 15;
        item.weight = 2.5;
        item
    }

    pub fn hunting_dagger() -> Item {
        let mut stats = weapon(DamageType::Pierce, 4, &[(Stat::Dexterity, 0.4)]);
        stats.effects.push(on_hit(StatusEffect::Poison, 0.25, 1.0));
        let mut item = Item::new("hunting_dagger", "Hunting Dagger", ItemKind::Weapon(stats));
        item.description = "A short blade with a groove for venom.".to_string();
        item.value = 20;
        item.weight = 1.0;
        item
    }

    pub fn iron_mace() -> Item {
        let mut stats = weapon(DamageType::Blunt, 8, &[(Stat::Strength, 0.4)]);
        stats.effects.push(on_hit(StatusEffect::Weaken, 0.2, 1.0));
        let mut item = Item::new("iron_mace", "Iron Mace", ItemKind::Weapon(stats));
        item.description = "A flanged head on an iron haft.".to_string();
        item.value = 40;
        item.weight = 4.0;
        item.rarity = Rarity::Uncommon;
        item
    }

    pub fn frost_wand() -> Item {
        let mut stats = weapon(DamageType::Magic, 5, &[(Stat::Intelligence, 0.5)]);
        stats.effects.push(on_hit(StatusEffect::Slow, 0.3, 1.0));
        let mut item = Item::new("frost_wand", "Frost Wand", ItemKind::Weapon(stats));
        item.description = "Rime creeps along its length.".to_string();
        item.value = 55;
        item.weight = 0.8;
        item.rarity = Rarity::Uncommon;
        item
    }

    pub fn boar_spear() -> Item {
        let mut stats = weapon(
            DamageType::Pierce,
            10,
            &[(Stat::Strength, 0.3), (Stat::Dexterity, 0.3)],
        );
        stats.effects.push(on_hit(StatusEffect::Bleed, 0.2, 1.2));
        stats.two_handed = true;
        let mut item = Item::new("boar_spear", "Boar Spear", ItemKind::Weapon(stats));
        item.description = "Crossbar below the head stops a charge.".to_string();
        item.value = 45;
        item.weight = 5.0;
        item.rarity = Rarity::Uncommon;
        item
    }

    pub fn ember_staff() -> Item {
        let mut stats = weapon(DamageType::Magic, 7, &[(Stat::Intelligence, 0.6)]);
        stats.effects.push(on_hit(StatusEffect::Burn, 0.3, 1.0));
        stats.two_handed = true;
        let mut item = Item::new("ember_staff", "Ember Staff", ItemKind::Weapon(stats));
        item.description = "Coals glow inside the cracked wood.".to_string();
        item.value = 90;
        item.weight = 3.0;
        item.rarity = Rarity::Rare;
        item
    }

    pub fn war_greatsword() -> Item {
        let mut stats = weapon(DamageType::Slash, 14, &[(Stat::Strength, 0.6)]);
        stats.effects.push(on_hit(StatusEffect::Bleed, 0.3, 1.5));
        stats.effects.push(on_hit(StatusEffect::Dismember, 0.1, 1.0));
        stats.two_handed = true;
        let mut item = Item::new("war_greatsword", "War Greatsword", ItemKind::Weapon(stats));
        item.description = "Taller than most who try to lift it.".to_string();
        item.value = 150;
        item.weight = 9.0;
        item.rarity = Rarity::Rare;
        item
    }

    pub fn executioner_axe() -> Item {
        let mut stats = weapon(DamageType::Slash, 16, &[(Stat::Strength, 0.7)]);
        stats.effects.push(on_hit(StatusEffect::Dismember, 0.2, 1.5));
        stats.two_handed = true;
        let mut item = Item::new("executioner_axe", "Executioner's Axe", ItemKind::Weapon(stats));
        item.description = "The edge has never been allowed to dull.".to_string();
        item.value = 320;
        item.weight = 10.0;
        item.rarity = Rarity::Epic;
        item
    }

    // ---- Armor ----

    pub fn leather_cap() -> Item {
        let mut item = Item::new("leather_cap", "Leather Cap", armor(ArmorSlot::Head, 1, &[]));
        item.description = "Boiled leather, better than nothing.".to_string();
        item.value = 8;
        item.weight = 0.5;
        item
    }

    pub fn iron_helm() -> Item {
        let mut item = Item::new(
            "iron_helm",
            "Iron Helm",
            armor(ArmorSlot::Head, 3, &[(Stat::Vitality, 1)]),
        );
        item.description = "A dented pot helm.".to_string();
        item.value = 35;
        item.weight = 2.0;
        item.rarity = Rarity::Uncommon;
        item
    }

    pub fn padded_vest() -> Item {
        let mut item = Item::new("padded_vest", "Padded Vest", armor(ArmorSlot::Chest, 3, &[]));
        item.description = "Quilted linen stuffed with horsehair.".to_string();
        item.value = 20;
        item.weight = 3.0;
        item
    }

    pub fn chainmail_hauberk() -> Item {
        let mut item = Item::new(
            "chainmail_hauberk",
            "Chainmail Hauberk",
            armor(ArmorSlot::Chest, 6, &[(Stat::Dexterity, -1)]),
        );
        item.description = "Heavy rings that turn a blade.".to_string();
        item.value = 80;
        item.weight = 12.0;
        item.rarity = Rarity::Rare;
        item
    }

    pub fn cloth_trousers() -> Item {
        let mut item = Item::new("cloth_trousers", "Cloth Trousers", armor(ArmorSlot::Legs, 1, &[]));
        item.description = "Patched at both knees.".to_string();
        item.value = 5;
        item.weight = 1.0;
        item
    }

    pub fn plated_greaves() -> Item {
        let mut item = Item::new(
            "plated_greaves",
            "Plated Greaves",
            armor(ArmorSlot::Legs, 4, &[(Stat::Vitality, 1)]),
        );
        item.description = "Steel shin guards on leather straps.".to_string();
        item.value = 60;
        item.weight = 6.0;
        item.rarity = Rarity::Uncommon;
        item
    }

    pub fn leather_bracers() -> Item {
        let mut item = Item::new(
            "leather_bracers",
            "Leather Bracers",
            armor(ArmorSlot::Arms, 1, &[(Stat::Dexterity, 1)]),
        );
        item.description = "Laced tight around the forearm.".to_string();
        item.value = 12;
        item.weight = 0.6;
        item
    }

    pub fn iron_vambraces() -> Item {
        let mut item = Item::new(
            "iron_vambraces",
            "Iron Vambraces",
            armor(ArmorSlot::Arms, 3, &[(Stat::Strength, 1)]),
        );
        item.description = "Hinged iron cuffs.".to_string();
        item.value = 45;
        item.weight = 2.5;
        item.rarity = Rarity::Uncommon;
        item
    }

    // ---- Rings ----

    pub fn copper_band() -> Item {
        let mut item = Item::new("copper_band", "Copper Band", ring(&[(Stat::Strength, 1)], None));
        item.description = "Leaves a green mark on the finger.".to_string();
        item.value = 25;
        item.weight = 0.1;
        item
    }

    pub fn ring_of_focus() -> Item {
        let mut item = Item::new(
            "ring_of_focus",
            "Ring of Focus",
            ring(&[(Stat::Intelligence, 2)], None),
        );
        item.description = "A plain silver ring that hums faintly.".to_string();
        item.value = 70;
        item.weight = 0.1;
        item.rarity = Rarity::Uncommon;
        item
    }

    pub fn serpent_ring() -> Item {
        let mut item = Item::new(
            "serpent_ring",
            "Serpent Ring",
            ring(
                &[(Stat::Dexterity, 2)],
                Some("Tightens around the finger when poison is near."),
            ),
        );
        item.description = "A snake swallowing its own tail.".to_string();
        item.value = 110;
        item.weight = 0.1;
        item.rarity = Rarity::Rare;
        item
    }

    pub fn bloodstone_ring() -> Item {
        let mut item = Item::new(
            "bloodstone_ring",
            "Bloodstone Ring",
            ring(
                &[(Stat::Vitality, 3), (Stat::Strength, 1)],
                Some("The stone darkens as its wearer's wounds deepen."),
            ),
        );
        item.description = "A red-flecked stone set in black iron.".to_string();
        item.value = 260;
        item.weight = 0.2;
        item.rarity = Rarity::Epic;
        item
    }

    // ---- Talismans ----

    pub fn ward_of_ash() -> Item {
        let mut item = Item::new(
            "ward_of_ash",
            "Ward of Ash",
            talisman(
                &[],
                vec![EffectModifier {
                    effect: StatusEffect::Burn,
                    mode: ModifierMode::Resist,
                    fraction: 0.5,
                }],
            ),
        );
        item.description = "Charred wood carved with a rune against fire.".to_string();
        item.value = 40;
        item.weight = 0.3;
        item
    }

    pub fn bone_charm() -> Item {
        let mut item = Item::new(
            "bone_charm",
            "Bone Charm",
            talisman(
                &[(Stat::Strength, 1)],
                vec![EffectModifier {
                    effect: StatusEffect::Bleed,
                    mode: ModifierMode::Boost,
                    fraction: 0.25,
                }],
            ),
        );
        item.description = "Knucklebones strung on sinew.".to_string();
        item.value = 50;
        item.weight = 0.2;
        item.rarity = Rarity::Uncommon;
        item
    }

    pub fn antivenom_idol() -> Item {
        let mut item = Item::new(
            "antivenom_idol",
            "Antivenom Idol",
            talisman(
                &[(Stat::Vitality, 1)],
                vec![EffectModifier {
                    effect: StatusEffect::Poison,
                    mode: ModifierMode::Resist,
                    fraction: 0.6,
                }],
            ),
        );
        item.description = "A squat clay figure smelling of bitter herbs.".to_string();
        item.value = 90;
        item.weight = 0.4;
        item.rarity = Rarity::Rare;
        item
    }

    pub fn butchers_token() -> Item {
        let mut item = Item::new(
            "butchers_token",
            "Butcher's Token",
            talisman(
                &[(Stat::Strength, 2)],
                vec![EffectModifier {
                    effect: StatusEffect::Dismember,
                    mode: ModifierMode::Boost,
                    fraction: 0.5,
                }],
            ),
        );
        item.description = "A cleaver-shaped coin from a guild long gone.".to_string();
        item.value = 500;
        item.weight = 0.1;
        item.rarity = Rarity::Legendary;
        item
    }
}
