//! Position, attributes and timed debuffs

use serde::{Deserialize, Serialize};

// ============================================================================
// Position
// ============================================================================

/// Position in the game world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Stats
// ============================================================================

/// Attributes that items scale with, modify, or debuff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    Strength,
    Dexterity,
    Intelligence,
    Vitality,
    /// Current hit points; debuffs on this stat are damage over time
    Health,
}

impl Stat {
    pub fn name(&self) -> &'static str {
        match self {
            Stat::Strength => "Strength",
            Stat::Dexterity => "Dexterity",
            Stat::Intelligence => "Intelligence",
            Stat::Vitality => "Vitality",
            Stat::Health => "Health",
        }
    }
}

/// Base character stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Strength - physical damage
    pub strength: i32,
    /// Dexterity - piercing damage, precision
    pub dexterity: i32,
    /// Intelligence - magic damage
    pub intelligence: i32,
    /// Vitality - hit points
    pub vitality: i32,
    /// Current hit points
    pub health: i32,
}

impl Stats {
    pub fn new(str: i32, dex: i32, int: i32, vit: i32) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            intelligence: int,
            vitality: vit,
            health: 50 + vit * 5,
        }
    }

    /// Base player stats
    pub fn player_base() -> Self {
        Self::new(10, 10, 10, 10)
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Dexterity => self.dexterity,
            Stat::Intelligence => self.intelligence,
            Stat::Vitality => self.vitality,
            Stat::Health => self.health,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Strength => &mut self.strength,
            Stat::Dexterity => &mut self.dexterity,
            Stat::Intelligence => &mut self.intelligence,
            Stat::Vitality => &mut self.vitality,
            Stat::Health => &mut self.health,
        }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::player_base()
    }
}

// ============================================================================
// Debuffs
// ============================================================================

/// A timed stat modification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debuff {
    pub stat: Stat,
    /// Change applied while active (per tick for health)
    pub delta: i32,
    pub remaining_ticks: u32,
}

/// Result of ticking active debuffs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebuffTickResult {
    /// Health lost this tick (negative means healed)
    pub damage_dealt: i32,
    /// Number of debuffs that ran out this tick
    pub debuffs_expired: usize,
}

/// Collection of active debuffs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debuffs {
    pub active: Vec<Debuff>,
}

impl Debuffs {
    /// Add a debuff. A debuff on the same stat with the same delta refreshes its duration.
    pub fn add(&mut self, stat: Stat, delta: i32, duration_ticks: u32) {
        if duration_ticks == 0 || delta == 0 {
            return;
        }
        if let Some(existing) = self
            .active
            .iter_mut()
            .find(|d| d.stat == stat && d.delta == delta)
        {
            existing.remaining_ticks = existing.remaining_ticks.max(duration_ticks);
        } else {
            self.active.push(Debuff { stat, delta, remaining_ticks: duration_ticks });
        }
    }

    /// Sum of active non-health deltas for a stat
    pub fn modifier(&self, stat: Stat) -> i32 {
        if stat == Stat::Health {
            return 0;
        }
        self.active.iter().filter(|d| d.stat == stat).map(|d| d.delta).sum()
    }

    /// Advance one tick: health debuffs deal damage, everything counts down
    pub fn tick(&mut self) -> DebuffTickResult {
        let mut result = DebuffTickResult::default();

        for debuff in &mut self.active {
            if debuff.stat == Stat::Health {
                result.damage_dealt -= debuff.delta;
            }
            debuff.remaining_ticks = debuff.remaining_ticks.saturating_sub(1);
        }

        let before = self.active.len();
        self.active.retain(|d| d.remaining_ticks > 0);
        result.debuffs_expired = before - self.active.len();
        result
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
