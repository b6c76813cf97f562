//! Shared combat math functions.
//!
//! These pure functions calculate damage, crits and mitigation without
//! side effects. Every combat action goes through them so heroes and
//! enemies follow the same rules.

use crate::core::config::CombatConfig;
use crate::core::constants::*;
use rand::Rng;

/// Modifiers on the attacking side of a hit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttackModifiers {
    /// Fractional bonus, e.g. 0.1 for +10%.
    pub damage_boost: f64,
    pub blessed: bool,
    pub tracked_target: bool,
    pub crit: bool,
}

/// Result of running a hit through the target's defenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mitigated {
    /// HP the target should lose.
    pub hp_damage: u32,
    /// Damage soaked by the barrier shield.
    pub absorbed: u32,
}

/// Unmodified damage of an attack: `power + floor(stat × 0.5)`.
pub fn base_damage(power: u32, scaling_stat: u32) -> u32 {
    power + (scaling_stat as f64 * SCALING_STAT_FACTOR).floor() as u32
}

/// Crit chance from luck, clamped to a probability.
pub fn crit_chance(config: &CombatConfig, luck: u32) -> f64 {
    (config.crit_base + luck as f64 * config.crit_per_luck).clamp(0.0, 1.0)
}

/// Roll for critical hit.
///
/// # Arguments
/// * `chance` - Probability of a crit (0.0-1.0)
/// * `rng` - Random number generator
pub fn roll_crit(chance: f64, rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < chance
}

/// Roll whether an evading target dodges the hit.
pub fn roll_evade(rng: &mut impl Rng) -> bool {
    rng.gen::<f64>() < EVADE_CHANCE
}

/// Apply attacker modifiers to base damage.
///
/// Boost, bless and tracking multiply first; a crit doubles the result.
pub fn modified_damage(base: u32, mods: &AttackModifiers) -> u32 {
    let mut damage = base as f64 * (1.0 + mods.damage_boost);
    if mods.blessed {
        damage *= BLESS_MULTIPLIER;
    }
    if mods.tracked_target {
        damage *= TRACKED_MULTIPLIER;
    }
    let mut damage = damage.floor() as u32;
    if mods.crit {
        damage *= CRIT_MULTIPLIER;
    }
    damage
}

/// Run incoming damage through block, shield and flat defense.
///
/// # Arguments
/// * `raw` - Damage after attacker modifiers and crit
/// * `blocking` - Target is blocking (halves the hit)
/// * `shield` - Remaining barrier absorb pool
/// * `defense` - Flat defense subtracted from what passes the shield
///
/// # Returns
/// HP damage (at least 1 once anything passes the shield) and the amount
/// absorbed.
pub fn mitigate(raw: u32, blocking: bool, shield: u32, defense: u32) -> Mitigated {
    let mut damage = if blocking { raw / 2 } else { raw };
    let absorbed = damage.min(shield);
    damage -= absorbed;
    let hp_damage = if damage == 0 {
        0
    } else {
        damage.saturating_sub(defense).max(1)
    };
    Mitigated {
        hp_damage,
        absorbed,
    }
}

/// Poison damage for the given stack count.
pub fn poison_damage(stacks: u32) -> u32 {
    stacks * POISON_DAMAGE_PER_STACK
}

/// One initiative roll: d20 plus a side bonus.
pub fn roll_initiative(bonus: u32, rng: &mut impl Rng) -> u32 {
    rng.gen_range(1..=INITIATIVE_DIE) + bonus
}
