//! Static configuration tables consumed read-only by the core.
//!
//! The host loads a [`GameConfig`] once at startup (either the built-in
//! defaults or a JSON document) and passes it by reference into every
//! entry point. Nothing in the core mutates it.

use crate::character::types::{HeroClass, Race};
use crate::combat::types::EnemyTemplate;
use crate::core::error::LoadError;
use crate::core::rank::Rank;
use crate::guild::types::{Faction, GuildLevel, ReputationTier};
use crate::items::types::{EquipmentCatalog, StatBonuses};
use crate::quest::types::DropEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Tunable coefficients of the success formula. Only the shape of the
/// formula is fixed; these numbers are expected to move with balancing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessConfig {
    pub base_chance: f64,
    pub primary_coefficient: f64,
    pub secondary_coefficient: f64,
    pub luck_baseline: f64,
    pub luck_coefficient: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl Default for SuccessConfig {
    fn default() -> Self {
        Self {
            base_chance: 0.50,
            primary_coefficient: 0.02,
            secondary_coefficient: 0.01,
            luck_baseline: 10.0,
            luck_coefficient: 0.005,
            floor: 0.05,
            ceiling: 0.95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConfig {
    /// Crit chance before luck, as a probability.
    pub crit_base: f64,
    /// Crit chance added per point of effective luck.
    pub crit_per_luck: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            crit_base: 0.05,
            crit_per_luck: 0.005,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRange {
    pub min: u32,
    pub max: u32,
}

/// Per-rank consequences of finishing a quest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankRewards {
    pub guild_xp: u64,
    pub reputation_gain: i32,
    pub reputation_loss: i32,
    /// Chance an injured hero dies instead, on a failed quest.
    pub death_chance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropTable {
    #[serde(default)]
    pub entries: Vec<DropEntry>,
    /// Guaranteed to Legendary parties on success.
    #[serde(default)]
    pub rare: Option<DropEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub inputs: Vec<(String, u32)>,
    #[serde(default)]
    pub gold_cost: u64,
    pub output: String,
    #[serde(default = "default_output_count")]
    pub output_count: u32,
}

fn default_output_count() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub success: SuccessConfig,
    #[serde(default)]
    pub combat: CombatConfig,
    pub stat_ranges: BTreeMap<Rank, StatRange>,
    #[serde(default)]
    pub race_bonuses: BTreeMap<Race, StatBonuses>,
    #[serde(default)]
    pub class_bonuses: BTreeMap<HeroClass, StatBonuses>,
    pub hire_costs: BTreeMap<Rank, u64>,
    pub rank_rewards: BTreeMap<Rank, RankRewards>,
    #[serde(default)]
    pub catalog: EquipmentCatalog,
    pub enemy_tables: BTreeMap<Rank, Vec<EnemyTemplate>>,
    #[serde(default)]
    pub drop_tables: BTreeMap<Rank, DropTable>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    pub reputation_tiers: Vec<ReputationTier>,
    pub guild_levels: Vec<GuildLevel>,
    #[serde(default)]
    pub factions: Vec<Faction>,
}

impl Default for GameConfig {
    fn default() -> Self {
        super::data::default_config()
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn stat_range(&self, rank: Rank) -> StatRange {
        self.stat_ranges
            .get(&rank)
            .copied()
            .unwrap_or(StatRange { min: 8, max: 12 })
    }

    pub fn race_bonus(&self, race: Race) -> StatBonuses {
        self.race_bonuses.get(&race).cloned().unwrap_or_default()
    }

    pub fn class_bonus(&self, class: HeroClass) -> StatBonuses {
        self.class_bonuses.get(&class).cloned().unwrap_or_default()
    }

    pub fn hire_cost(&self, rank: Rank) -> u64 {
        self.hire_costs.get(&rank).copied().unwrap_or(0)
    }

    pub fn rank_rewards(&self, rank: Rank) -> RankRewards {
        self.rank_rewards.get(&rank).cloned().unwrap_or(RankRewards {
            guild_xp: 0,
            reputation_gain: 0,
            reputation_loss: 0,
            death_chance: 0.0,
        })
    }

    pub fn enemy_table(&self, rank: Rank) -> &[EnemyTemplate] {
        self.enemy_tables
            .get(&rank)
            .map(|t| t.as_slice())
            .unwrap_or(&[])
    }

    pub fn drop_table(&self, rank: Rank) -> Option<&DropTable> {
        self.drop_tables.get(&rank)
    }

    pub fn faction(&self, id: &str) -> Option<&Faction> {
        self.factions.iter().find(|f| f.id == id)
    }

    /// Highest tier whose threshold the reputation meets; the lowest tier
    /// when it meets none.
    pub fn reputation_tier(&self, reputation: i32) -> Option<&ReputationTier> {
        self.reputation_tiers
            .iter()
            .filter(|t| t.min_reputation <= reputation)
            .max_by_key(|t| t.min_reputation)
            .or_else(|| self.reputation_tiers.iter().min_by_key(|t| t.min_reputation))
    }

    pub fn reputation_multiplier(&self, reputation: i32) -> f64 {
        self.reputation_tier(reputation)
            .map_or(1.0, |t| t.reward_multiplier)
    }
}
