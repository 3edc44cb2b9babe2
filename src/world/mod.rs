//! World module
//!
//! Contains the tile map, the tile alphabet, and procedural generation.

pub mod map;
pub mod tile;
pub mod generation;

pub use map::{Map, MapError};
pub use tile::{ItemGlyph, TileType, ARMOR_GLYPH, FLOOR, TRINKET_GLYPH, WALL, WEAPON_GLYPH};
pub use generation::generate_dungeon;
