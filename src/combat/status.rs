//! Status effects system
//!
//! Static table of the effects weapons can inflict, and how each one is
//! applied to a target as timed debuffs.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::Stat;

/// Every status effect a weapon or talisman can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffect {
    Bleed,
    Poison,
    Burn,
    Weaken,
    Slow,
    Dismember,
}

/// How an effect changes its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectKind {
    /// Health loss every tick for the duration
    DamageOverTime { damage_per_tick: i32 },
    /// Temporary reduction of a single stat
    StatDebuff { stat: Stat, amount: i32 },
    /// Rolls its own chance; on success cripples strength and dexterity
    Dismember { chance: f32, amount: i32 },
}

/// Table entry describing one status effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusEffectDef {
    pub effect: StatusEffect,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: EffectKind,
    pub duration_ticks: u32,
}

/// Anything status effects can land on
pub trait StatusTarget {
    /// Apply `delta` to `stat` for `duration_ticks` ticks
    fn apply_debuff(&mut self, stat: Stat, delta: i32, duration_ticks: u32);

    /// Fraction (0.0 - 1.0) by which incoming triggers of `effect` are reduced
    fn effect_resistance(&self, _effect: StatusEffect) -> f32 {
        0.0
    }
}

static STATUS_EFFECTS: [StatusEffectDef; 6] = [
    StatusEffectDef {
        effect: StatusEffect::Bleed,
        name: "Bleed",
        description: "Open wounds drain health each turn.",
        kind: EffectKind::DamageOverTime { damage_per_tick: 2 },
        duration_ticks: 4,
    },
    StatusEffectDef {
        effect: StatusEffect::Poison,
        name: "Poison",
        description: "Venom in the blood saps health slowly but for a long time.",
        kind: EffectKind::DamageOverTime { damage_per_tick: 1 },
        duration_ticks: 8,
    },
    StatusEffectDef {
        effect: StatusEffect::Burn,
        name: "Burn",
        description: "Searing flames deal heavy damage over a short time.",
        kind: EffectKind::DamageOverTime { damage_per_tick: 3 },
        duration_ticks: 3,
    },
    StatusEffectDef {
        effect: StatusEffect::Weaken,
        name: "Weaken",
        description: "Sapped muscles lower strength.",
        kind: EffectKind::StatDebuff { stat: Stat::Strength, amount: 3 },
        duration_ticks: 6,
    },
    StatusEffectDef {
        effect: StatusEffect::Slow,
        name: "Slow",
        description: "Numbed limbs lower dexterity.",
        kind: EffectKind::StatDebuff { stat: Stat::Dexterity, amount: 3 },
        duration_ticks: 6,
    },
    StatusEffectDef {
        effect: StatusEffect::Dismember,
        name: "Dismember",
        description: "A chance to sever a limb, crippling strength and dexterity.",
        kind: EffectKind::Dismember { chance: 0.25, amount: 5 },
        duration_ticks: 30,
    },
];

/// The full effect table, in declaration order
pub fn status_effect_table() -> &'static [StatusEffectDef] {
    &STATUS_EFFECTS
}

impl StatusEffect {
    pub fn def(&self) -> &'static StatusEffectDef {
        let idx = match self {
            StatusEffect::Bleed => 0,
            StatusEffect::Poison => 1,
            StatusEffect::Burn => 2,
            StatusEffect::Weaken => 3,
            StatusEffect::Slow => 4,
            StatusEffect::Dismember => 5,
        };
        &STATUS_EFFECTS[idx]
    }

    /// Get display name for this effect
    pub fn name(&self) -> &'static str {
        self.def().name
    }

    /// Look up an effect by name, ignoring case
    pub fn from_name(name: &str) -> Option<StatusEffect> {
        STATUS_EFFECTS
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .map(|d| d.effect)
    }

    /// Apply the effect to a target, scaled by `power`.
    /// Returns false when a chance-based effect fails its own roll.
    pub fn apply(&self, target: &mut impl StatusTarget, power: f32, rng: &mut impl Rng) -> bool {
        let def = self.def();
        match def.kind {
            EffectKind::DamageOverTime { damage_per_tick } => {
                target.apply_debuff(Stat::Health, -scaled(damage_per_tick, power), def.duration_ticks);
            }
            EffectKind::StatDebuff { stat, amount } => {
                target.apply_debuff(stat, -scaled(amount, power), def.duration_ticks);
            }
            EffectKind::Dismember { chance, amount } => {
                if !rng.gen_bool(chance.clamp(0.0, 1.0) as f64) {
                    return false;
                }
                let delta = -scaled(amount, power);
                target.apply_debuff(Stat::Strength, delta, def.duration_ticks);
                target.apply_debuff(Stat::Dexterity, delta, def.duration_ticks);
            }
        }
        log::debug!("Applied {} (power {:.2})", def.name, power);
        true
    }
}

/// Scale a base magnitude by power, never dropping below 1
fn scaled(base: i32, power: f32) -> i32 {
    ((base as f32 * power).round() as i32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(Stat, i32, u32)>,
    }

    impl StatusTarget for Recorder {
        fn apply_debuff(&mut self, stat: Stat, delta: i32, duration_ticks: u32) {
            self.calls.push((stat, delta, duration_ticks));
        }
    }

    #[test]
    fn test_table_matches_enum() {
        for def in status_effect_table() {
            assert_eq!(def.effect.def(), def);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(StatusEffect::from_name("bleed"), Some(StatusEffect::Bleed));
        assert_eq!(StatusEffect::from_name("DISMEMBER"), Some(StatusEffect::Dismember));
        assert_eq!(StatusEffect::from_name("frozen"), None);
    }

    #[test]
    fn test_dot_hits_health() {
        let mut target = Recorder::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(StatusEffect::Burn.apply(&mut target, 2.0, &mut rng));
        assert_eq!(target.calls, vec![(Stat::Health, -6, 3)]);
    }

    #[test]
    fn test_debuff_hits_stat() {
        let mut target = Recorder::default();
        let mut rng = StdRng::seed_from_u64(1);
        StatusEffect::Slow.apply(&mut target, 1.0, &mut rng);
        assert_eq!(target.calls, vec![(Stat::Dexterity, -3, 6)]);
    }

    #[test]
    fn test_weak_power_still_applies_one() {
        let mut target = Recorder::default();
        let mut rng = StdRng::seed_from_u64(1);
        StatusEffect::Poison.apply(&mut target, 0.1, &mut rng);
        assert_eq!(target.calls, vec![(Stat::Health, -1, 8)]);
    }

    #[test]
    fn test_dismember_is_chance_based() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut landed = 0;
        for _ in 0..400 {
            let mut target = Recorder::default();
            if StatusEffect::Dismember.apply(&mut target, 1.0, &mut rng) {
                landed += 1;
                assert_eq!(target.calls.len(), 2);
            } else {
                assert!(target.calls.is_empty());
            }
        }
        // 25% nominal chance
        assert!(landed > 50 && landed < 150, "landed {}", landed);
    }
}
