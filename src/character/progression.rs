//! Hero experience and level-ups.

use super::attributes::StatType;
use super::types::Hero;
use crate::core::constants::*;
use rand::Rng;

pub fn xp_for_next_level(level: u32) -> u64 {
    (XP_CURVE_BASE * f64::powf(level as f64, XP_CURVE_EXPONENT)) as u64
}

/// A single level gained, with the stats it raised.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelUp {
    pub new_level: u32,
    pub gains: Vec<(StatType, u32)>,
}

/// Rolls stat gains for one level: each stat gains `0..=rank cap`, never
/// beyond the rank's stat ceiling.
pub fn roll_level_up_gains<R: Rng>(hero: &mut Hero, rng: &mut R) -> Vec<(StatType, u32)> {
    let cap = hero.rank.stat_gain_cap();
    let ceiling = hero.rank.stat_ceiling();
    let mut gains = Vec::new();
    for stat in StatType::all() {
        let roll = rng.gen_range(0..=cap);
        let gained = hero.stats.raise(stat, roll, ceiling);
        if gained > 0 {
            gains.push((stat, gained));
        }
    }
    gains
}

/// Adds XP and processes every level it pays for. A hero at the rank's
/// level cap keeps the XP but gains no more levels.
pub fn apply_xp<R: Rng>(hero: &mut Hero, xp: u64, rng: &mut R) -> Vec<LevelUp> {
    hero.xp += xp;
    let level_cap = hero.rank.level_cap();
    let mut levelups = Vec::new();

    while hero.level < level_cap {
        let xp_needed = xp_for_next_level(hero.level);
        if hero.xp < xp_needed {
            break;
        }
        hero.xp -= xp_needed;
        hero.level += 1;
        let gains = roll_level_up_gains(hero, rng);
        levelups.push(LevelUp {
            new_level: hero.level,
            gains,
        });
    }

    if !levelups.is_empty() {
        tracing::info!("{} reached level {}", hero.name, hero.level);
    }
    levelups
}
