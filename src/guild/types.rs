use crate::core::rank::Rank;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: String,
    pub name: String,
    /// Faction that loses standing whenever this one gains it.
    #[serde(default)]
    pub rival: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationTier {
    pub name: String,
    pub min_reputation: i32,
    pub reward_multiplier: f64,
}

/// Caps unlocked at a guild level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildLevel {
    pub level: u32,
    pub xp_required: u64,
    pub hero_slots: usize,
    pub quest_slots: usize,
    pub max_tavern_rank: Rank,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guild {
    pub name: String,
    pub gold: u64,
    pub level: u32,
    pub xp: u64,
    pub hero_slots: usize,
    pub quest_slots: usize,
    pub max_tavern_rank: Rank,
    #[serde(default)]
    pub reputation: BTreeMap<String, i32>,
}

impl Guild {
    pub fn new(name: String) -> Self {
        Self {
            name,
            gold: 500,
            level: 1,
            xp: 0,
            hero_slots: 8,
            quest_slots: 2,
            max_tavern_rank: Rank::D,
            reputation: BTreeMap::new(),
        }
    }

    pub fn reputation_with(&self, faction: &str) -> i32 {
        self.reputation.get(faction).copied().unwrap_or(0)
    }

    pub fn apply_level(&mut self, level: &GuildLevel) {
        self.level = level.level;
        self.hero_slots = level.hero_slots;
        self.quest_slots = level.quest_slots;
        self.max_tavern_rank = level.max_tavern_rank;
    }
}
