//! Combat system

pub mod damage;
pub mod status;

pub use damage::{strike, trigger_chance, weapon_damage, StrikeReport};
pub use status::{status_effect_table, EffectKind, StatusEffect, StatusEffectDef, StatusTarget};
