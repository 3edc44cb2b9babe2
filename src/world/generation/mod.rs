//! Procedural map generation

pub mod rooms;

pub use rooms::generate_dungeon;
