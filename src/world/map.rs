//! Map data structure
//!
//! A dungeon floor stored as a flat row-major array of tile characters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tile::{TileType, FLOOR, WALL};
use crate::entities::Position;

/// Errors raised when building a map from raw tiles
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map dimensions {width}x{height} do not match {len} tiles")]
    SizeMismatch { width: i32, height: i32, len: usize },
    #[error("map rows have uneven widths")]
    RaggedRows,
}

/// A dungeon floor map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    tiles: Vec<char>,
}

/// Cell count for a map, if it is non-negative and indexable with `i32` coordinates
fn area(width: i32, height: i32) -> Option<usize> {
    if width < 0 || height < 0 {
        return None;
    }
    width.checked_mul(height).map(|a| a as usize)
}

impl Map {
    /// Create a new map filled with walls. Negative sizes count as zero; an
    /// area too large to index gives an empty map.
    pub fn new(width: i32, height: i32) -> Self {
        let (width, height) = (width.max(0), height.max(0));
        match area(width, height) {
            Some(len) => Self { width, height, tiles: vec![WALL; len] },
            None => {
                log::warn!("Map size {}x{} is too large, using an empty map", width, height);
                Self { width: 0, height: 0, tiles: Vec::new() }
            }
        }
    }

    /// Wrap an existing tile array, checking it holds `width * height` cells
    pub fn from_tiles(width: i32, height: i32, tiles: Vec<char>) -> Result<Self, MapError> {
        if area(width, height) != Some(tiles.len()) {
            return Err(MapError::SizeMismatch { width, height, len: tiles.len() });
        }
        Ok(Self { width, height, tiles })
    }

    /// Build a map from text rows, one string per row
    pub fn from_rows(rows: &[&str]) -> Result<Self, MapError> {
        let width = rows.first().map_or(0, |r| r.chars().count());
        if rows.iter().any(|r| r.chars().count() != width) {
            return Err(MapError::RaggedRows);
        }
        let tiles: Vec<char> = rows.iter().flat_map(|r| r.chars()).collect();
        Self::from_tiles(width as i32, rows.len() as i32, tiles)
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Raw tile characters, row-major
    pub fn tiles(&self) -> &[char] {
        &self.tiles
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Convert 1D index to 2D coordinates
    #[inline]
    pub fn idx_to_xy(&self, idx: usize) -> (i32, i32) {
        let idx = idx as i32;
        (idx % self.width, idx / self.width)
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get the tile character at a position
    pub fn get(&self, x: i32, y: i32) -> Option<char> {
        if self.in_bounds(x, y) {
            Some(self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Get the classified tile at a position
    pub fn tile_type(&self, x: i32, y: i32) -> Option<TileType> {
        self.get(x, y).map(TileType::from_char)
    }

    /// Set the tile character at a position. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, tile: char) {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            self.tiles[idx] = tile;
        }
    }

    pub fn is_floor(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(FLOOR)
    }

    /// Check if a position is walkable
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile_type(x, y).map_or(false, |t| t.is_walkable())
    }

    /// Number of bare floor tiles
    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == FLOOR).count()
    }

    /// Get all walkable positions (for spawning)
    pub fn get_walkable_positions(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, &tile)| TileType::from_char(tile).is_walkable())
            .map(|(idx, _)| {
                let (x, y) = self.idx_to_xy(idx);
                Position::new(x, y)
            })
            .collect()
    }

    /// Render as text, one line per row
    pub fn to_text(&self) -> String {
        if self.width == 0 {
            return String::new();
        }
        self.tiles
            .chunks(self.width as usize)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
