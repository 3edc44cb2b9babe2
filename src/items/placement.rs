//! Item placement
//!
//! Scatters catalog items across the floor tiles of a map and keeps the
//! registry of what lies where until it is picked up.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::ItemCatalog;
use super::item::{Item, ItemType};
use crate::config::DistributionConfig;
use crate::entities::Position;
use crate::world::tile::{ItemGlyph, FLOOR};
use crate::world::Map;

/// Why items could not be distributed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    #[error("cannot distribute items on an empty map")]
    EmptyMap,
}

/// An item lying on a map tile, waiting to be picked up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    pub x: i32,
    pub y: i32,
    pub item: Item,
    /// Map symbol drawn for this item
    pub glyph: char,
}

impl PlacedItem {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Result of drawing the registry onto a map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionReport {
    /// Entries now shown on the map
    pub projected: usize,
    /// Entries whose tile was neither floor nor their own symbol
    pub drifted: Vec<Position>,
}

impl ProjectionReport {
    pub fn is_consistent(&self) -> bool {
        self.drifted.is_empty()
    }
}

/// Items placed on the current map. At most one entry per coordinate.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    placed: Vec<PlacedItem>,
    config: DistributionConfig,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom tuning. Tuning that fails validation is replaced by the defaults.
    pub fn with_config(config: DistributionConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{}, using default distribution settings", e);
                DistributionConfig::default()
            }
        };
        Self { placed: Vec::new(), config }
    }

    pub fn config(&self) -> &DistributionConfig {
        &self.config
    }

    /// Number of items to aim for on a map with `navigable` floor tiles out of `total`
    pub fn target_item_count(&self, navigable: usize, total: usize, rng: &mut impl Rng) -> usize {
        let cfg = &self.config;
        let density = if total == 0 {
            0
        } else {
            (navigable as f64 / total as f64 * cfg.density_scale).floor() as i64
        };
        let jitter = rng.gen_range(cfg.jitter_min..=cfg.jitter_max) as i64;
        let wanted = cfg.base_items as i64 + density + jitter;
        wanted.clamp(cfg.min_items as i64, cfg.max_items as i64) as usize
    }

    /// Roll which item family to place next
    pub fn roll_item_type(&self, rng: &mut impl Rng) -> ItemType {
        let cfg = &self.config;
        let roll: f64 = rng.gen();
        if roll < cfg.weapon_chance {
            ItemType::Weapon
        } else if roll < cfg.weapon_chance + cfg.armor_chance {
            ItemType::Armor
        } else if rng.gen_bool(cfg.ring_share.clamp(0.0, 1.0)) {
            ItemType::Ring
        } else {
            ItemType::Talisman
        }
    }

    /// Replace the registry with a fresh random scatter of catalog items over
    /// the floor tiles of `map`. The map itself is not modified; see
    /// [`ItemRegistry::update_map_with_items`].
    pub fn distribute_items(
        &mut self,
        map: &Map,
        catalog: &ItemCatalog,
        rng: &mut impl Rng,
    ) -> Result<&[PlacedItem], DistributionError> {
        self.placed.clear();

        if map.is_empty() {
            log::warn!("Item distribution skipped: map has no tiles");
            return Err(DistributionError::EmptyMap);
        }

        let navigable = map.floor_count();
        if navigable == 0 {
            log::info!("No floor tiles; placed 0 items");
            return Ok(&self.placed);
        }

        let target = self.target_item_count(navigable, map.len(), rng);
        let max_attempts = target * self.config.attempts_per_item;
        let mut claimed: HashSet<usize> = HashSet::with_capacity(target);
        let mut placed = Vec::with_capacity(target);
        let mut attempts = 0;

        while placed.len() < target && attempts < max_attempts && claimed.len() < navigable {
            attempts += 1;

            let x = rng.gen_range(0..map.width);
            let y = rng.gen_range(0..map.height);
            let idx = map.xy_to_idx(x, y);
            if map.tiles()[idx] != FLOOR || claimed.contains(&idx) {
                continue;
            }

            let item_type = self.roll_item_type(rng);
            let Some(item) = catalog.random_of_type(item_type, rng) else {
                log::debug!("Catalog has no {} items; skipping tile ({}, {})", item_type, x, y);
                continue;
            };

            claimed.insert(idx);
            placed.push(PlacedItem {
                x,
                y,
                item,
                glyph: ItemGlyph::for_item_type(item_type).glyph(),
            });
        }

        if placed.len() < target {
            log::debug!(
                "Placed {} of {} items after {} attempts ({} floor tiles)",
                placed.len(),
                target,
                attempts,
                navigable
            );
        }
        log::info!("Distributed {} items over {} floor tiles", placed.len(), navigable);

        self.placed = placed;
        Ok(&self.placed)
    }

    /// Draw every registry entry onto the map. Entries whose tile has been
    /// changed to something other than floor are left off and reported.
    pub fn update_map_with_items(&self, map: &mut Map) -> ProjectionReport {
        let mut report = ProjectionReport::default();

        for placed in &self.placed {
            match map.get(placed.x, placed.y) {
                Some(FLOOR) => {
                    map.set(placed.x, placed.y, placed.glyph);
                    report.projected += 1;
                }
                Some(tile) if tile == placed.glyph => report.projected += 1,
                _ => {
                    log::warn!(
                        "Registry drift: {} at ({}, {}) no longer sits on floor",
                        placed.item.name,
                        placed.x,
                        placed.y
                    );
                    report.drifted.push(placed.position());
                }
            }
        }

        report
    }

    /// Remove and return the entry at a coordinate
    pub fn take_at(&mut self, x: i32, y: i32) -> Option<PlacedItem> {
        let idx = self.placed.iter().position(|p| p.x == x && p.y == y)?;
        Some(self.placed.remove(idx))
    }

    pub fn get_at(&self, x: i32, y: i32) -> Option<&PlacedItem> {
        self.placed.iter().find(|p| p.x == x && p.y == y)
    }

    /// Forget every remaining placement
    pub fn clear(&mut self) {
        self.placed.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedItem> {
        self.placed.iter()
    }

    pub fn placed(&self) -> &[PlacedItem] {
        &self.placed
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::tile::WALL;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn open_map(width: i32, height: i32) -> Map {
        Map::from_tiles(width, height, vec![FLOOR; (width * height) as usize]).unwrap()
    }

    fn assert_unique_positions(placed: &[PlacedItem]) {
        let unique: HashSet<(i32, i32)> = placed.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(unique.len(), placed.len());
    }

    #[test]
    fn test_empty_map_fails_fast() {
        let mut registry = ItemRegistry::new();
        let mut rng = StdRng::seed_from_u64(1);
        let map = Map::new(0, 0);
        assert_eq!(
            registry.distribute_items(&map, ItemCatalog::builtin(), &mut rng),
            Err(DistributionError::EmptyMap)
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_no_floor_places_nothing() {
        let mut registry = ItemRegistry::new();
        let mut rng = StdRng::seed_from_u64(1);
        let map = Map::new(20, 10);
        let placed = registry.distribute_items(&map, ItemCatalog::builtin(), &mut rng).unwrap();
        assert!(placed.is_empty());
    }

    #[test]
    fn test_only_floor_tiles_are_used() {
        let map = Map::from_tiles(4, 1, vec!['.', '.', '#', '.']).unwrap();
        for seed in 0..50 {
            let mut registry = ItemRegistry::new();
            let mut rng = StdRng::seed_from_u64(seed);
            let placed = registry.distribute_items(&map, ItemCatalog::builtin(), &mut rng).unwrap();
            assert!(placed.len() <= 3);
            for p in placed {
                assert_ne!(map.xy_to_idx(p.x, p.y), 2);
            }
            assert_unique_positions(placed);
        }
    }

    #[test]
    fn test_count_within_bounds_on_open_map() {
        let map = open_map(40, 25);
        for seed in 0..30 {
            let mut registry = ItemRegistry::new();
            let mut rng = StdRng::seed_from_u64(seed);
            let placed = registry.distribute_items(&map, ItemCatalog::builtin(), &mut rng).unwrap();
            assert!((10..=40).contains(&placed.len()), "placed {}", placed.len());
            assert_unique_positions(placed);
            for p in placed {
                assert!(map.is_floor(p.x, p.y));
            }
        }
    }

    #[test]
    fn test_target_count_formula() {
        let registry = ItemRegistry::new();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            // Fully open: 10 + 30 + [-5, 4]
            let n = registry.target_item_count(100, 100, &mut rng);
            assert!((35..=40).contains(&n));
            // No floor: 10 + 0 + [-5, 4], clamped up to 10
            let n = registry.target_item_count(0, 100, &mut rng);
            assert!((10..=14).contains(&n));
        }
    }

    #[test]
    fn test_attempt_budget_ends_fruitless_search() {
        // Every tile is floor but no catalog item exists, so no attempt ever
        // claims a tile and only the attempt cap can stop the loop
        let map = open_map(30, 30);
        let mut registry = ItemRegistry::new();
        let mut rng = StdRng::seed_from_u64(4);
        let placed = registry.distribute_items(&map, &ItemCatalog::default(), &mut rng).unwrap();
        assert!(placed.is_empty());
    }

    #[test]
    fn test_zero_attempt_budget_places_nothing() {
        let config = DistributionConfig { attempts_per_item: 0, ..DistributionConfig::default() };
        let mut registry = ItemRegistry::with_config(config);
        let mut rng = StdRng::seed_from_u64(4);
        let placed = registry.distribute_items(&open_map(20, 20), ItemCatalog::builtin(), &mut rng).unwrap();
        assert!(placed.is_empty());
    }

    #[test]
    fn test_invalid_config_is_replaced() {
        let config = DistributionConfig { jitter_min: 5, jitter_max: -5, ..DistributionConfig::default() };
        let mut registry = ItemRegistry::with_config(config);
        assert_eq!(registry.config(), &DistributionConfig::default());

        let mut rng = StdRng::seed_from_u64(6);
        let placed = registry.distribute_items(&open_map(20, 20), ItemCatalog::builtin(), &mut rng).unwrap();
        assert!((10..=40).contains(&placed.len()));
    }

    #[test]
    fn test_redistribution_replaces_registry() {
        let map = open_map(10, 10);
        let mut registry = ItemRegistry::new();
        let mut rng = StdRng::seed_from_u64(5);
        registry.distribute_items(&map, ItemCatalog::builtin(), &mut rng).unwrap();
        let second = registry.distribute_items(&map, ItemCatalog::builtin(), &mut rng).unwrap().to_vec();
        assert_eq!(registry.placed(), second.as_slice());
        assert_unique_positions(registry.placed());
    }

    #[test]
    fn test_glyph_matches_item_type() {
        let map = open_map(30, 30);
        let mut registry = ItemRegistry::new();
        let mut rng = StdRng::seed_from_u64(11);
        registry.distribute_items(&map, ItemCatalog::builtin(), &mut rng).unwrap();
        for p in registry.iter() {
            assert_eq!(p.glyph, ItemGlyph::for_item_type(p.item.item_type()).glyph());
        }
    }

    #[test]
    fn test_type_roll_distribution() {
        let registry = ItemRegistry::new();
        let mut rng = StdRng::seed_from_u64(21);
        let mut counts = [0usize; 4];
        for _ in 0..10_000 {
            let idx = match registry.roll_item_type(&mut rng) {
                ItemType::Weapon => 0,
                ItemType::Armor => 1,
                ItemType::Ring => 2,
                ItemType::Talisman => 3,
            };
            counts[idx] += 1;
        }
        assert!((3_700..4_300).contains(&counts[0]), "{:?}", counts);
        assert!((2_700..3_300).contains(&counts[1]), "{:?}", counts);
        assert!((1_200..1_800).contains(&counts[2]), "{:?}", counts);
        assert!((1_200..1_800).contains(&counts[3]), "{:?}", counts);
    }

    #[test]
    fn test_projection_and_drift() {
        let mut map = open_map(12, 12);
        let mut registry = ItemRegistry::new();
        let mut rng = StdRng::seed_from_u64(8);
        registry.distribute_items(&map, ItemCatalog::builtin(), &mut rng).unwrap();

        let report = registry.update_map_with_items(&mut map);
        assert_eq!(report.projected, registry.len());
        assert!(report.is_consistent());
        for p in registry.iter() {
            assert_eq!(map.get(p.x, p.y), Some(p.glyph));
        }

        // Projecting again is a no-op
        let again = registry.update_map_with_items(&mut map);
        assert_eq!(again, report);

        // A wall dropped on an item is reported, not overwritten
        let victim = registry.placed()[0].clone();
        map.set(victim.x, victim.y, WALL);
        let drifted = registry.update_map_with_items(&mut map);
        assert_eq!(drifted.drifted, vec![victim.position()]);
        assert_eq!(map.get(victim.x, victim.y), Some(WALL));
    }

    #[test]
    fn test_take_at_removes_entry() {
        let map = open_map(10, 10);
        let mut registry = ItemRegistry::new();
        let mut rng = StdRng::seed_from_u64(2);
        registry.distribute_items(&map, ItemCatalog::builtin(), &mut rng).unwrap();
        let first = registry.placed()[0].clone();
        let before = registry.len();

        assert_eq!(registry.take_at(first.x, first.y), Some(first.clone()));
        assert_eq!(registry.len(), before - 1);
        assert!(registry.get_at(first.x, first.y).is_none());
        assert!(registry.take_at(first.x, first.y).is_none());

        registry.clear();
        assert!(registry.is_empty());
    }
}
