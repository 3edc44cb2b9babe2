//! Player and shared entity data

pub mod player;
pub mod stats;

pub use player::Player;
pub use stats::{Debuff, DebuffTickResult, Debuffs, Position, Stat, Stats};
