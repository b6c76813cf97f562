//! Quest success probability.
//!
//! The chance is a clamped linear function of how far the roster's average
//! effective stats sit above or below the quest's expectations, plus luck
//! and party bonuses. The roll against it happens once, at execute time.

use super::types::Quest;
use crate::character::attributes::StatType;
use crate::character::derived_stats::average_effective_stat;
use crate::character::types::Hero;
use crate::core::config::SuccessConfig;
use crate::core::error::{GuildError, Result};
use crate::items::EquipmentCatalog;
use crate::party::types::Party;

/// Breakdown of every term feeding the final chance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SuccessBreakdown {
    pub primary_bonus: f64,
    pub secondary_bonus: f64,
    pub luck_bonus: f64,
    pub party_bonus: f64,
    pub bonding_penalty: f64,
    pub chance: f64,
}

/// Computes each term of the success formula. `party` only counts when
/// the roster is exactly its membership.
pub fn success_breakdown(
    quest: &Quest,
    heroes: &[&Hero],
    party: Option<&Party>,
    catalog: &EquipmentCatalog,
    config: &SuccessConfig,
) -> Result<SuccessBreakdown> {
    if heroes.is_empty() {
        return Err(GuildError::EmptyRoster);
    }
    let roster: Vec<_> = heroes.iter().map(|h| h.id).collect();
    let party = party.filter(|p| p.matches_roster(&roster));

    let avg_primary = average_effective_stat(heroes, quest.primary_stat, catalog);
    let primary_bonus = (avg_primary - quest.expected_primary as f64) * config.primary_coefficient;

    let secondary_bonus = match quest.secondary_stat {
        Some(stat) => {
            let avg = average_effective_stat(heroes, stat, catalog);
            (avg - quest.expected_secondary as f64) * config.secondary_coefficient
        }
        None => 0.0,
    };

    let tier = party.map(|p| p.tier_bonuses()).unwrap_or_default();
    let traits = party.map(|p| p.trait_bonuses()).unwrap_or_default();
    let avg_luck = average_effective_stat(heroes, StatType::Luck, catalog) + tier.luck_bonus as f64;
    let luck_bonus = (avg_luck - config.luck_baseline) * config.luck_coefficient;

    let party_bonus = tier.success_bonus + traits.success_bonus;
    let bonding_penalty = party.map_or(0.0, |p| p.bonding_penalty());

    let raw = config.base_chance + primary_bonus + secondary_bonus + luck_bonus + party_bonus
        - bonding_penalty;
    Ok(SuccessBreakdown {
        primary_bonus,
        secondary_bonus,
        luck_bonus,
        party_bonus,
        bonding_penalty,
        chance: raw.clamp(config.floor, config.ceiling),
    })
}

/// Probability in `[floor, ceiling]` that the roster succeeds.
pub fn compute_success_chance(
    quest: &Quest,
    heroes: &[&Hero],
    party: Option<&Party>,
    catalog: &EquipmentCatalog,
    config: &SuccessConfig,
) -> Result<f64> {
    success_breakdown(quest, heroes, party, catalog, config).map(|b| b.chance)
}
