//! Recruiting heroes from the tavern.

use super::attributes::{StatType, Stats};
use super::types::{Hero, HeroClass, HeroId, Race};
use crate::core::config::GameConfig;
use crate::core::error::{GuildError, Result};
use crate::core::game_state::GuildState;
use crate::core::rank::Rank;
use rand::Rng;

/// Rolls a fresh stat block for a rank, then adds race and class bonuses.
pub fn roll_stats<R: Rng>(config: &GameConfig, race: Race, class: HeroClass, rank: Rank, rng: &mut R) -> Stats {
    let range = config.stat_range(rank);
    let race_bonus = config.race_bonus(race);
    let class_bonus = config.class_bonus(class);
    let mut stats = Stats::default();
    for stat in StatType::all() {
        let rolled = rng.gen_range(range.min..=range.max);
        stats.set(stat, rolled + race_bonus.get(stat) + class_bonus.get(stat));
    }
    stats
}

/// Hires a hero into the guild. Checks slots, tavern rank and gold before
/// touching anything.
pub fn hire_hero<R: Rng>(
    state: &mut GuildState,
    config: &GameConfig,
    name: String,
    race: Race,
    class: HeroClass,
    rank: Rank,
    rng: &mut R,
) -> Result<HeroId> {
    let living = state.heroes.values().filter(|h| h.is_alive()).count();
    if living >= state.guild.hero_slots {
        return Err(GuildError::HeroSlotsFull(state.guild.hero_slots));
    }
    if rank > state.guild.max_tavern_rank {
        return Err(GuildError::TavernRankLocked {
            requested: rank,
            max: state.guild.max_tavern_rank,
        });
    }
    let cost = config.hire_cost(rank);
    if state.guild.gold < cost {
        return Err(GuildError::InsufficientGold {
            needed: cost,
            available: state.guild.gold,
        });
    }

    let stats = roll_stats(config, race, class, rank, rng);
    state.guild.gold -= cost;
    let id = state.allocate_hero_id();
    tracing::info!("Hired hero {}: {}, rank {} {}", id, name, rank, class.name());
    state
        .heroes
        .insert(id, Hero::new(id, name, race, class, rank, stats));
    Ok(id)
}
