//! Tile definitions
//!
//! The tile alphabet shared by the map, the item placer and pickup.

use serde::{Deserialize, Serialize};

use crate::items::ItemType;

/// Walkable floor, the only tile items may be placed on
pub const FLOOR: char = '.';
/// Solid wall
pub const WALL: char = '#';
/// A weapon lying on the floor
pub const WEAPON_GLYPH: char = '\\';
/// An armor piece lying on the floor
pub const ARMOR_GLYPH: char = '&';
/// A ring or talisman lying on the floor
pub const TRINKET_GLYPH: char = '$';

/// Types of tiles the crawler knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    Floor,
    Wall,
    /// Marks an item lying on the tile
    Item(ItemGlyph),
    /// Anything else: doors, stairs, decorations. Treated as obstructed.
    Other(char),
}

/// Which family of item a map symbol stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemGlyph {
    Weapon,
    Armor,
    /// Rings and talismans share a symbol
    Trinket,
}

impl TileType {
    /// Classify a raw map character
    pub fn from_char(c: char) -> Self {
        match c {
            FLOOR => TileType::Floor,
            WALL => TileType::Wall,
            WEAPON_GLYPH => TileType::Item(ItemGlyph::Weapon),
            ARMOR_GLYPH => TileType::Item(ItemGlyph::Armor),
            TRINKET_GLYPH => TileType::Item(ItemGlyph::Trinket),
            other => TileType::Other(other),
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            TileType::Floor => FLOOR,
            TileType::Wall => WALL,
            TileType::Item(g) => g.glyph(),
            TileType::Other(c) => *c,
        }
    }

    /// Only bare floor accepts new items
    pub fn is_floor(&self) -> bool {
        matches!(self, TileType::Floor)
    }

    /// Floor and items on the floor can be stood on
    pub fn is_walkable(&self) -> bool {
        matches!(self, TileType::Floor | TileType::Item(_))
    }
}

impl ItemGlyph {
    pub fn glyph(&self) -> char {
        match self {
            ItemGlyph::Weapon => WEAPON_GLYPH,
            ItemGlyph::Armor => ARMOR_GLYPH,
            ItemGlyph::Trinket => TRINKET_GLYPH,
        }
    }

    /// Map symbol used for an item type
    pub fn for_item_type(item_type: ItemType) -> Self {
        match item_type {
            ItemType::Weapon => ItemGlyph::Weapon,
            ItemType::Armor => ItemGlyph::Armor,
            ItemType::Ring | ItemType::Talisman => ItemGlyph::Trinket,
        }
    }

    /// Item types this symbol can stand for
    pub fn item_types(&self) -> &'static [ItemType] {
        match self {
            ItemGlyph::Weapon => &[ItemType::Weapon],
            ItemGlyph::Armor => &[ItemType::Armor],
            ItemGlyph::Trinket => &[ItemType::Ring, ItemType::Talisman],
        }
    }
}
