//! Inventory text rendering

use std::collections::HashMap;

use crate::entities::{Player, Stat};
use crate::items::{Item, ItemKind, ItemType};

/// Shown when the player carries nothing
pub const INVENTORY_EMPTY: &str = "Empty";
/// Shown when an inventory entry is malformed
pub const INVENTORY_ERROR: &str = "Error";
/// Between items of one group
pub const ITEM_SEPARATOR: &str = ", ";
/// Between groups
pub const GROUP_SEPARATOR: &str = " | ";

/// Render the inventory grouped by item type, e.g.
/// `Weapons: Iron Mace, Hunting Dagger x2 | Rings: Copper Band`.
///
/// Groups appear in the order their first item was picked up.
pub fn render_inventory(player: &Player) -> String {
    render_items(&player.inventory)
}

/// Render any item list the same way as a player inventory
pub fn render_items(items: &[Item]) -> String {
    if items.is_empty() {
        return INVENTORY_EMPTY.to_string();
    }
    if let Some(bad) = items.iter().find(|i| i.quantity == 0) {
        log::warn!("Inventory entry {} has zero quantity", bad.id);
        return INVENTORY_ERROR.to_string();
    }

    let mut groups: Vec<(ItemType, Vec<String>)> = Vec::new();
    for item in items {
        let item_type = item.item_type();
        let name = item.display_name();
        match groups.iter_mut().find(|(t, _)| *t == item_type) {
            Some((_, names)) => names.push(name),
            None => groups.push((item_type, vec![name])),
        }
    }

    groups
        .into_iter()
        .map(|(item_type, names)| format!("{}: {}", item_type.group_label(), names.join(ITEM_SEPARATOR)))
        .collect::<Vec<_>>()
        .join(GROUP_SEPARATOR)
}

/// One-line summary of an item for equipment listings, e.g.
/// `Iron Mace [Uncommon] Blunt 8, +Weaken`
pub fn describe_item(item: &Item) -> String {
    let mut parts = Vec::new();
    match &item.kind {
        ItemKind::Weapon(w) => {
            parts.push(format!("{} {}", w.damage_type.name(), w.base_damage));
            if w.two_handed {
                parts.push("two-handed".to_string());
            }
            parts.extend(w.effects.iter().map(|e| format!("+{}", e.effect.name())));
        }
        ItemKind::Armor(a) => {
            parts.push(format!("defense {}", a.defense));
            parts.extend(modifier_parts(&a.modifiers));
        }
        ItemKind::Ring(r) => parts.extend(modifier_parts(&r.modifiers)),
        ItemKind::Talisman(t) => parts.extend(modifier_parts(&t.modifiers)),
    }

    let header = format!("{} [{}]", item.name, item.rarity.name());
    if parts.is_empty() {
        header
    } else {
        format!("{} {}", header, parts.join(ITEM_SEPARATOR))
    }
}

fn modifier_parts(modifiers: &HashMap<Stat, i32>) -> Vec<String> {
    let mut sorted: Vec<_> = modifiers.iter().filter(|(_, v)| **v != 0).collect();
    sorted.sort();
    sorted.into_iter().map(|(stat, v)| format!("{:+} {}", v, stat.name())).collect()
}
