//! Weapon strike resolution
//!
//! Stat-scaled weapon damage and on-hit status effect triggers.

use rand::Rng;

use super::status::{StatusEffect, StatusTarget};
use crate::entities::Player;
use crate::items::WeaponStats;

/// Outcome of a single strike
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrikeReport {
    pub damage: i32,
    /// Effects that landed, in weapon order
    pub effects_applied: Vec<StatusEffect>,
}

/// Weapon damage: base plus each scaling stat times its multiplier, never below 1
pub fn weapon_damage(attacker: &Player, weapon: &WeaponStats) -> i32 {
    let scaled: f32 = weapon
        .scaling
        .iter()
        .map(|(stat, mult)| attacker.effective_stat(*stat) as f32 * mult)
        .sum();
    (weapon.base_damage + scaled.floor() as i32).max(1)
}

/// Final trigger chance after the attacker's boosts and the target's resistance.
/// A result that is not a number counts as no chance at all.
pub fn trigger_chance(base: f32, boost: f32, resistance: f32) -> f32 {
    let chance = base * (1.0 + boost) * (1.0 - resistance.clamp(0.0, 1.0));
    if chance.is_finite() {
        chance.clamp(0.0, 1.0)
    } else if chance == f32::INFINITY {
        1.0
    } else {
        0.0
    }
}

/// Strike `target` with `weapon`. The caller applies `damage` to whatever health model the target has.
pub fn strike(
    attacker: &Player,
    weapon: &WeaponStats,
    target: &mut impl StatusTarget,
    rng: &mut impl Rng,
) -> StrikeReport {
    let mut report = StrikeReport {
        damage: weapon_damage(attacker, weapon),
        effects_applied: Vec::new(),
    };

    for application in &weapon.effects {
        let chance = trigger_chance(
            application.chance,
            attacker.equipment.effect_boost(application.effect),
            target.effect_resistance(application.effect),
        );
        if rng.gen_bool(chance as f64) && application.effect.apply(target, application.power, rng) {
            report.effects_applied.push(application.effect);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Stat;
    use crate::items::catalog::templates;
    use crate::items::item::EffectApplication;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Default)]
    struct Dummy {
        resistance: f32,
        debuffs: Vec<(Stat, i32, u32)>,
    }

    impl StatusTarget for Dummy {
        fn apply_debuff(&mut self, stat: Stat, delta: i32, duration_ticks: u32) {
            self.debuffs.push((stat, delta, duration_ticks));
        }

        fn effect_resistance(&self, _effect: StatusEffect) -> f32 {
            self.resistance
        }
    }

    #[test]
    fn test_weapon_damage_scales_with_stats() {
        let player = Player::new(0, 0);
        let mace = templates::iron_mace();
        // 8 + floor(10 * 0.4)
        assert_eq!(weapon_damage(&player, mace.as_weapon().unwrap()), 12);
    }

    #[test]
    fn test_trigger_chance() {
        assert_eq!(trigger_chance(0.5, 0.0, 0.0), 0.5);
        assert_eq!(trigger_chance(0.5, 1.0, 0.0), 1.0);
        assert_eq!(trigger_chance(0.5, 0.0, 1.0), 0.0);
        assert_eq!(trigger_chance(0.8, 1.0, 0.0), 1.0);
        assert!((trigger_chance(0.4, 0.5, 0.5) - 0.3).abs() < 1e-6);
        assert_eq!(trigger_chance(f32::NAN, 0.0, 0.0), 0.0);
        assert_eq!(trigger_chance(0.0, f32::INFINITY, 0.0), 0.0);
        assert_eq!(trigger_chance(0.5, 0.0, f32::NAN), 0.0);
    }

    #[test]
    fn test_nan_chance_never_fires() {
        let player = Player::new(0, 0);
        let mut stats = templates::rusty_shortsword().as_weapon().unwrap().clone();
        stats.effects = vec![EffectApplication { effect: StatusEffect::Bleed, chance: f32::NAN, power: 1.0 }];

        let mut target = Dummy::default();
        let mut rng = StdRng::seed_from_u64(5);
        let report = strike(&player, &stats, &mut target, &mut rng);
        assert!(report.effects_applied.is_empty());
        assert!(target.debuffs.is_empty());
    }

    #[test]
    fn test_guaranteed_effect_lands() {
        let player = Player::new(0, 0);
        let mut stats = templates::rusty_shortsword().as_weapon().unwrap().clone();
        stats.effects = vec![EffectApplication { effect: StatusEffect::Burn, chance: 1.0, power: 1.0 }];

        let mut target = Dummy::default();
        let mut rng = StdRng::seed_from_u64(3);
        let report = strike(&player, &stats, &mut target, &mut rng);

        assert_eq!(report.effects_applied, vec![StatusEffect::Burn]);
        assert_eq!(target.debuffs, vec![(Stat::Health, -3, 3)]);
    }

    #[test]
    fn test_full_resistance_blocks_effects() {
        let player = Player::new(0, 0);
        let mut stats = templates::rusty_shortsword().as_weapon().unwrap().clone();
        stats.effects = vec![EffectApplication { effect: StatusEffect::Bleed, chance: 1.0, power: 1.0 }];

        let mut target = Dummy { resistance: 1.0, ..Default::default() };
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let report = strike(&player, &stats, &mut target, &mut rng);
            assert!(report.effects_applied.is_empty());
        }
        assert!(target.debuffs.is_empty());
    }
}
