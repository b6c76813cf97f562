use crate::character::types::HeroId;
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

pub type PartyId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartyTier {
    Fresh,
    Bonded,
    Veteran,
    Elite,
    Legendary,
}

impl PartyTier {
    /// Tier is a pure function of quests completed together.
    pub fn from_quests(total_quests_completed: u32) -> Self {
        match total_quests_completed {
            n if n >= TIER_LEGENDARY_QUESTS => PartyTier::Legendary,
            n if n >= TIER_ELITE_QUESTS => PartyTier::Elite,
            n if n >= TIER_VETERAN_QUESTS => PartyTier::Veteran,
            n if n >= TIER_BONDED_QUESTS => PartyTier::Bonded,
            _ => PartyTier::Fresh,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PartyTier::Fresh => "Fresh",
            PartyTier::Bonded => "Bonded",
            PartyTier::Veteran => "Veteran",
            PartyTier::Elite => "Elite",
            PartyTier::Legendary => "Legendary",
        }
    }

    pub fn bonuses(&self) -> TierBonuses {
        let (success_bonus, luck_bonus, rerolls, travel_reduction) = match self {
            PartyTier::Fresh => (0.0, 0, 0, 0.0),
            PartyTier::Bonded => (0.05, 1, 0, 0.05),
            PartyTier::Veteran => (0.08, 2, 1, 0.10),
            PartyTier::Elite => (0.12, 3, 1, 0.15),
            PartyTier::Legendary => (0.15, 5, 2, 0.20),
        };
        TierBonuses {
            success_bonus,
            luck_bonus,
            rerolls,
            travel_reduction,
            guaranteed_rare_drop: *self == PartyTier::Legendary,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TierBonuses {
    pub success_bonus: f64,
    pub luck_bonus: u32,
    /// Death results the party may re-roll per quest.
    pub rerolls: u32,
    pub travel_reduction: f64,
    pub guaranteed_rare_drop: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplacementKind {
    /// Incoming hero shares the departing member's class.
    Succession,
    Standard,
}

impl ReplacementKind {
    /// (quest deduction, bonding quests, success penalty)
    pub fn penalty(&self) -> (u32, u32, f64) {
        match self {
            ReplacementKind::Succession => SUCCESSION_REPLACEMENT_PENALTY,
            ReplacementKind::Standard => STANDARD_REPLACEMENT_PENALTY,
        }
    }
}

/// A freshly replaced slot still settling in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondingRecord {
    pub hero_id: HeroId,
    pub quests_remaining: u32,
    pub success_penalty: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacementRecord {
    pub departed: HeroId,
    pub joined: HeroId,
    pub kind: ReplacementKind,
    pub trained: bool,
    pub quests_deducted: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartyTrait {
    Trailblazers,
    BattleHardened,
    Unshakeable,
    TreasureHunters,
}

impl PartyTrait {
    pub const ALL: [PartyTrait; 4] = [
        PartyTrait::Trailblazers,
        PartyTrait::BattleHardened,
        PartyTrait::Unshakeable,
        PartyTrait::TreasureHunters,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PartyTrait::Trailblazers => "Trailblazers",
            PartyTrait::BattleHardened => "Battle-Hardened",
            PartyTrait::Unshakeable => "Unshakeable",
            PartyTrait::TreasureHunters => "Treasure Hunters",
        }
    }

    pub fn is_earned(&self, party: &Party) -> bool {
        match self {
            PartyTrait::Trailblazers => party.total_quests_completed >= TRAILBLAZERS_QUESTS,
            PartyTrait::BattleHardened => party.combat_victories >= BATTLE_HARDENED_VICTORIES,
            PartyTrait::Unshakeable => party.flawless_quests >= UNSHAKEABLE_FLAWLESS,
            PartyTrait::TreasureHunters => party.total_quests_completed >= TREASURE_HUNTERS_QUESTS,
        }
    }
}

/// Permanent bonuses summed over a party's traits.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TraitBonuses {
    pub success_bonus: f64,
    pub travel_reduction: f64,
    pub damage_bonus: f64,
    pub drop_bonus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    pub members: [HeroId; PARTY_SIZE],
    pub total_quests_completed: u32,
    #[serde(default)]
    pub bonding: Vec<BondingRecord>,
    #[serde(default)]
    pub replacements: Vec<ReplacementRecord>,
    #[serde(default)]
    pub traits: Vec<PartyTrait>,
    #[serde(default)]
    pub combat_victories: u32,
    #[serde(default)]
    pub flawless_quests: u32,
}

impl Party {
    pub fn new(id: PartyId, name: String, members: [HeroId; PARTY_SIZE]) -> Self {
        Self {
            id,
            name,
            members,
            total_quests_completed: 0,
            bonding: Vec::new(),
            replacements: Vec::new(),
            traits: Vec::new(),
            combat_victories: 0,
            flawless_quests: 0,
        }
    }

    pub fn tier(&self) -> PartyTier {
        PartyTier::from_quests(self.total_quests_completed)
    }

    /// Computed fresh from the tier on every call.
    pub fn tier_bonuses(&self) -> TierBonuses {
        self.tier().bonuses()
    }

    pub fn trait_bonuses(&self) -> TraitBonuses {
        let mut bonuses = TraitBonuses::default();
        for t in &self.traits {
            match t {
                PartyTrait::Trailblazers => bonuses.travel_reduction += 0.05,
                PartyTrait::BattleHardened => bonuses.damage_bonus += 0.10,
                PartyTrait::Unshakeable => bonuses.success_bonus += 0.03,
                PartyTrait::TreasureHunters => bonuses.drop_bonus += 0.10,
            }
        }
        bonuses
    }

    pub fn contains(&self, hero_id: HeroId) -> bool {
        self.members.contains(&hero_id)
    }

    /// True when `roster` is exactly this party's membership.
    pub fn matches_roster(&self, roster: &[HeroId]) -> bool {
        roster.len() == PARTY_SIZE
            && self.members.iter().all(|m| roster.contains(m))
            && roster.iter().all(|h| self.contains(*h))
    }

    pub fn is_bonding(&self, hero_id: HeroId) -> bool {
        self.bonding.iter().any(|b| b.hero_id == hero_id)
    }

    /// Summed success penalty of every slot still bonding.
    pub fn bonding_penalty(&self) -> f64 {
        self.bonding.iter().map(|b| b.success_penalty).sum()
    }

    pub fn replacement_count(&self) -> u32 {
        self.replacements.len() as u32
    }

    /// At most `MAX_PARTY_REPLACEMENTS` replacements over a party's life.
    pub fn can_replace(&self) -> bool {
        self.replacement_count() < MAX_PARTY_REPLACEMENTS
    }
}
