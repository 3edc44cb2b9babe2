//! Asciicrawl - item core for an ASCII dungeon crawler
//!
//! Static item tables, random item placement on tile maps, pickup and
//! equip rules, and a textual inventory view.

pub mod config;
pub mod combat;
pub mod data;
pub mod entities;
pub mod game;
pub mod items;
pub mod ui;
pub mod world;

// Re-export commonly used types
pub use config::GameConfig;
pub use entities::{Player, Position};
pub use game::MapSession;
pub use items::{Item, ItemCatalog, ItemRegistry, ItemType};
pub use world::map::Map;
