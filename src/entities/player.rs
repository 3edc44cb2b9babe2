//! Player entity
//!
//! Position, stats, inventory and equipment: everything pickup, equip and
//! the inventory renderer need from the player.

use serde::{Deserialize, Serialize};

use super::stats::{DebuffTickResult, Debuffs, Position, Stat, Stats};
use crate::combat::{StatusEffect, StatusTarget};
use crate::items::{EquipError, EquipSlot, Equipment, Item};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub stats: Stats,
    /// Items carried, in pickup order
    pub inventory: Vec<Item>,
    pub equipment: Equipment,
    #[serde(default)]
    pub debuffs: Debuffs,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            stats: Stats::player_base(),
            inventory: Vec::new(),
            equipment: Equipment::new(),
            debuffs: Debuffs::default(),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn move_to(&mut self, pos: Position) {
        self.x = pos.x;
        self.y = pos.y;
    }

    /// Add an item, stacking onto an existing entry with the same ID
    pub fn add_to_inventory(&mut self, item: Item) {
        if let Some(existing) = self.inventory.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity.max(1));
        } else {
            self.inventory.push(item);
        }
    }

    /// Equip a copy of an item. The inventory keeps its entry.
    pub fn auto_equip(&mut self, item: &Item) -> Result<EquipSlot, EquipError> {
        self.equipment.auto_equip(item)
    }

    /// Base stat plus equipment bonuses plus active debuffs
    pub fn effective_stat(&self, stat: Stat) -> i32 {
        self.stats.get(stat) + self.equipment.stat_modifier(stat) + self.debuffs.modifier(stat)
    }

    /// Advance debuffs one tick, applying damage over time to health
    pub fn tick_debuffs(&mut self) -> DebuffTickResult {
        let result = self.debuffs.tick();
        if result.damage_dealt != 0 {
            self.stats.health -= result.damage_dealt;
        }
        result
    }

    pub fn is_alive(&self) -> bool {
        self.stats.health > 0
    }

    /// Inventory as a JSON array, for snapshots and debugging
    pub fn inventory_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.inventory)
    }
}

impl StatusTarget for Player {
    fn apply_debuff(&mut self, stat: Stat, delta: i32, duration_ticks: u32) {
        self.debuffs.add(stat, delta, duration_ticks);
    }

    fn effect_resistance(&self, effect: StatusEffect) -> f32 {
        self.equipment.effect_resistance(effect)
    }
}
