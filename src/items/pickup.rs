//! Item pickup
//!
//! Moves the item under the player from the map into their inventory.

use rand::Rng;
use thiserror::Error;

use super::catalog::ItemCatalog;
use super::equipment::{EquipError, EquipSlot};
use super::item::{Item, ItemType};
use super::placement::ItemRegistry;
use crate::entities::Player;
use crate::world::tile::{TileType, FLOOR};
use crate::world::Map;

/// Invalid input to a pickup. Nothing is changed when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickupError {
    #[error("cannot pick up items on an empty map")]
    EmptyMap,
    #[error("player position ({x}, {y}) is outside the {width}x{height} map")]
    OutOfBounds { x: i32, y: i32, width: i32, height: i32 },
}

/// Where a picked-up item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupSource {
    /// The registry held an entry for the tile
    Registry,
    /// The tile showed an item symbol the registry did not know about;
    /// a matching item was drawn from the catalog instead
    Synthesized,
}

/// A successful pickup
#[derive(Debug, Clone, PartialEq)]
pub struct PickedUp {
    pub item: Item,
    pub source: PickupSource,
}

/// Pick up whatever lies under the player.
///
/// Returns `Ok(None)` when there is nothing there. When the map shows an
/// item symbol without a registry entry, a random catalog item of the
/// matching type is handed out so the tile is never a dead end.
pub fn pickup_item(
    player: &mut Player,
    map: &mut Map,
    registry: &mut ItemRegistry,
    catalog: &ItemCatalog,
    rng: &mut impl Rng,
) -> Result<Option<PickedUp>, PickupError> {
    if map.is_empty() {
        log::warn!("Pickup ignored: map has no tiles");
        return Err(PickupError::EmptyMap);
    }
    let (x, y) = (player.x, player.y);
    if !map.in_bounds(x, y) {
        log::warn!("Pickup ignored: player at ({}, {}) is off the map", x, y);
        return Err(PickupError::OutOfBounds { x, y, width: map.width, height: map.height });
    }

    let picked = if let Some(placed) = registry.take_at(x, y) {
        PickedUp { item: placed.item, source: PickupSource::Registry }
    } else if let Some(TileType::Item(glyph)) = map.tile_type(x, y) {
        let Some(item) = synthesize(glyph.item_types(), catalog, rng) else {
            log::warn!("No catalog item matches symbol '{}' at ({}, {})", glyph.glyph(), x, y);
            return Ok(None);
        };
        log::warn!(
            "Registry had no entry for '{}' at ({}, {}); substituting {}",
            glyph.glyph(),
            x,
            y,
            item.name
        );
        PickedUp { item, source: PickupSource::Synthesized }
    } else {
        return Ok(None);
    };

    player.add_to_inventory(picked.item.clone());
    map.set(x, y, FLOOR);
    log::info!("Picked up {}", picked.item.name);
    Ok(Some(picked))
}

/// Draw a random item of one of `types` (chosen uniformly) from the catalog
fn synthesize(types: &[ItemType], catalog: &ItemCatalog, rng: &mut impl Rng) -> Option<Item> {
    let item_type = match types {
        [] => return None,
        [only] => *only,
        many => many[rng.gen_range(0..many.len())],
    };
    catalog.random_of_type(item_type, rng)
}

/// Equip an item onto the player without removing it from the inventory
pub fn auto_equip_item(player: &mut Player, item: &Item) -> Result<EquipSlot, EquipError> {
    let result = player.auto_equip(item);
    match &result {
        Ok(slot) => log::info!("Equipped {} ({})", item.name, slot),
        Err(e) => log::debug!("Could not equip {}: {}", item.name, e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::catalog::templates;
    use crate::world::tile::{ARMOR_GLYPH, TRINKET_GLYPH, WEAPON_GLYPH};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn open_map(width: i32, height: i32) -> Map {
        Map::from_tiles(width, height, vec![FLOOR; (width * height) as usize]).unwrap()
    }

    #[test]
    fn test_round_trip_through_registry() {
        let catalog = ItemCatalog::builtin();
        let mut map = open_map(15, 15);
        let mut registry = ItemRegistry::new();
        let mut rng = StdRng::seed_from_u64(12);
        registry.distribute_items(&map, catalog, &mut rng).unwrap();
        registry.update_map_with_items(&mut map);

        let target = registry.placed()[3].clone();
        let mut player = Player::new(target.x, target.y);
        let picked = pickup_item(&mut player, &mut map, &mut registry, catalog, &mut rng)
            .unwrap()
            .unwrap();

        assert_eq!(picked.item, target.item);
        assert_eq!(picked.source, PickupSource::Registry);
        assert_eq!(map.get(target.x, target.y), Some(FLOOR));
        assert!(registry.get_at(target.x, target.y).is_none());
        assert_eq!(player.inventory, vec![target.item]);
    }

    #[test]
    fn test_synthesizes_weapon_on_drift() {
        let catalog = ItemCatalog::builtin();
        let mut map = open_map(5, 5);
        map.set(2, 3, WEAPON_GLYPH);
        let mut registry = ItemRegistry::new();
        let mut player = Player::new(2, 3);
        let mut rng = StdRng::seed_from_u64(1);

        let picked = pickup_item(&mut player, &mut map, &mut registry, catalog, &mut rng)
            .unwrap()
            .unwrap();

        assert_eq!(picked.source, PickupSource::Synthesized);
        assert_eq!(picked.item.item_type(), ItemType::Weapon);
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(map.get(2, 3), Some(FLOOR));
    }

    #[test]
    fn test_synthesized_types_follow_symbol() {
        let catalog = ItemCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(30);
        for _ in 0..20 {
            let mut map = open_map(3, 1);
            map.set(0, 0, ARMOR_GLYPH);
            map.set(1, 0, TRINKET_GLYPH);
            let mut registry = ItemRegistry::new();
            let mut player = Player::new(0, 0);

            let armor = pickup_item(&mut player, &mut map, &mut registry, catalog, &mut rng)
                .unwrap()
                .unwrap();
            assert_eq!(armor.item.item_type(), ItemType::Armor);

            player.x = 1;
            let trinket = pickup_item(&mut player, &mut map, &mut registry, catalog, &mut rng)
                .unwrap()
                .unwrap();
            assert!(matches!(trinket.item.item_type(), ItemType::Ring | ItemType::Talisman));
        }
    }

    #[test]
    fn test_nothing_here() {
        let catalog = ItemCatalog::builtin();
        let mut map = open_map(4, 4);
        let mut registry = ItemRegistry::new();
        let mut player = Player::new(1, 1);
        let mut rng = StdRng::seed_from_u64(1);
        let before = map.clone();

        assert_eq!(pickup_item(&mut player, &mut map, &mut registry, catalog, &mut rng), Ok(None));
        assert!(player.inventory.is_empty());
        assert_eq!(map, before);
    }

    #[test]
    fn test_invalid_input_changes_nothing() {
        let catalog = ItemCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(1);
        let mut registry = ItemRegistry::new();

        let mut empty = Map::new(0, 0);
        let mut player = Player::new(0, 0);
        assert_eq!(
            pickup_item(&mut player, &mut empty, &mut registry, catalog, &mut rng),
            Err(PickupError::EmptyMap)
        );

        let mut map = open_map(3, 3);
        map.set(0, 0, WEAPON_GLYPH);
        let mut player = Player::new(7, -1);
        assert_eq!(
            pickup_item(&mut player, &mut map, &mut registry, catalog, &mut rng),
            Err(PickupError::OutOfBounds { x: 7, y: -1, width: 3, height: 3 })
        );
        assert!(player.inventory.is_empty());
        assert_eq!(map.get(0, 0), Some(WEAPON_GLYPH));
    }

    #[test]
    fn test_empty_catalog_yields_nothing_on_drift() {
        let catalog = ItemCatalog::default();
        let mut map = open_map(2, 2);
        map.set(0, 0, ARMOR_GLYPH);
        let mut registry = ItemRegistry::new();
        let mut player = Player::new(0, 0);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(pickup_item(&mut player, &mut map, &mut registry, &catalog, &mut rng), Ok(None));
        assert_eq!(map.get(0, 0), Some(ARMOR_GLYPH));
    }

    #[test]
    fn test_auto_equip_item_never_swaps() {
        let mut player = Player::new(0, 0);
        assert_eq!(auto_equip_item(&mut player, &templates::hunting_dagger()), Ok(EquipSlot::RightHand));
        assert_eq!(auto_equip_item(&mut player, &templates::iron_mace()), Ok(EquipSlot::LeftHand));
        let before = player.equipment.clone();

        assert_eq!(
            auto_equip_item(&mut player, &templates::rusty_shortsword()),
            Err(EquipError::HandsFull)
        );
        assert_eq!(player.equipment, before);
    }
}
