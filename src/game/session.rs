//! Map session
//!
//! Owns the current level: its tile map, the item registry built for it,
//! the player and the seeded RNG.

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::config::GameConfig;
use crate::entities::{Player, Position};
use crate::items::{
    auto_equip_item, pickup_item, DistributionError, EquipError, EquipSlot, Item, ItemCatalog, ItemRegistry,
    PickedUp, PickupError, ProjectionReport,
};
use crate::world::{generate_dungeon, Map, FLOOR};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Distribution(#[from] DistributionError),
    #[error(transparent)]
    Pickup(#[from] PickupError),
}

pub struct MapSession {
    config: GameConfig,
    catalog: ItemCatalog,
    /// Random number generator (seeded for reproducibility)
    rng: StdRng,
    map: Map,
    registry: ItemRegistry,
    player: Player,
    /// Levels loaded so far
    level: u32,
}

impl MapSession {
    /// Create a session with an empty map. `seed` overrides the configured seed.
    ///
    /// A config that fails validation is replaced by the defaults, keeping
    /// only its seed and data directory.
    pub fn new(config: GameConfig, catalog: ItemCatalog, seed: Option<u64>) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{}, using default map and distribution settings", e);
                GameConfig {
                    seed: config.seed,
                    data_dir: config.data_dir,
                    ..GameConfig::default()
                }
            }
        };
        let rng = match seed.or(config.seed) {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let registry = ItemRegistry::with_config(config.distribution.clone());

        Self {
            config,
            catalog,
            rng,
            map: Map::new(0, 0),
            registry,
            player: Player::new(0, 0),
            level: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Replace the current level with `map`, scatter items over it and
    /// draw them onto the grid.
    ///
    /// The player keeps their position if it is walkable on the new map,
    /// otherwise they are moved to the first floor tile.
    pub fn load_level(&mut self, map: Map) -> Result<ProjectionReport, SessionError> {
        self.map = map;
        self.registry.clear();

        let placed = self.registry.distribute_items(&self.map, &self.catalog, &mut self.rng)?.len();

        if !self.map.is_walkable(self.player.x, self.player.y) {
            if let Some(start) = self.first_floor() {
                self.player.move_to(start);
            }
        }

        let report = self.registry.update_map_with_items(&mut self.map);
        self.level += 1;

        log::info!(
            "Loaded level {} ({}x{}): {} items placed, {} drifted",
            self.level,
            self.map.width,
            self.map.height,
            placed,
            report.drifted.len()
        );
        Ok(report)
    }

    /// Generate a fresh dungeon at the configured size and load it
    pub fn generate_level(&mut self) -> Result<ProjectionReport, SessionError> {
        let (map, start) = generate_dungeon(self.config.map.width, self.config.map.height, &mut self.rng);
        self.player.move_to(start);
        self.load_level(map)
    }

    /// Move the player onto a walkable tile. Returns false if the move is blocked.
    pub fn move_player(&mut self, pos: Position) -> bool {
        if !self.map.is_walkable(pos.x, pos.y) {
            return false;
        }
        self.player.move_to(pos);
        true
    }

    /// Pick up whatever lies under the player
    pub fn pickup(&mut self) -> Result<Option<PickedUp>, SessionError> {
        let picked = pickup_item(&mut self.player, &mut self.map, &mut self.registry, &self.catalog, &mut self.rng)?;
        Ok(picked)
    }

    pub fn equip(&mut self, item: &Item) -> Result<EquipSlot, EquipError> {
        auto_equip_item(&mut self.player, item)
    }

    /// Drop every remaining placement and restore its tile to floor
    pub fn reset(&mut self) {
        for placed in self.registry.iter() {
            if self.map.get(placed.x, placed.y) == Some(placed.glyph) {
                self.map.set(placed.x, placed.y, FLOOR);
            }
        }
        let dropped = self.registry.len();
        self.registry.clear();
        log::debug!("Session reset, {} placements dropped", dropped);
    }

    fn first_floor(&self) -> Option<Position> {
        let idx = self.map.tiles().iter().position(|&t| t == FLOOR)?;
        let (x, y) = self.map.idx_to_xy(idx);
        Some(Position::new(x, y))
    }
}
