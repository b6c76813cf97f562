use super::attributes::{StatType, Stats};
use crate::core::rank::Rank;
use crate::items::equipment::Equipment;
use crate::party::types::PartyId;
use crate::quest::types::QuestId;
use serde::{Deserialize, Serialize};

pub type HeroId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeroClass {
    Knight,
    Warrior,
    Archer,
    Mage,
    Cleric,
    Rogue,
}

impl HeroClass {
    pub const ALL: [HeroClass; 6] = [
        HeroClass::Knight,
        HeroClass::Warrior,
        HeroClass::Archer,
        HeroClass::Mage,
        HeroClass::Cleric,
        HeroClass::Rogue,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HeroClass::Knight => "Knight",
            HeroClass::Warrior => "Warrior",
            HeroClass::Archer => "Archer",
            HeroClass::Mage => "Mage",
            HeroClass::Cleric => "Cleric",
            HeroClass::Rogue => "Rogue",
        }
    }

    /// The stat this class scales its attacks with.
    pub fn scaling_stat(&self) -> StatType {
        match self {
            HeroClass::Knight | HeroClass::Warrior => StatType::Strength,
            HeroClass::Archer | HeroClass::Rogue => StatType::Dexterity,
            HeroClass::Mage | HeroClass::Cleric => StatType::Intelligence,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Race {
    Human,
    Elf,
    Dwarf,
    Orc,
    Halfling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeroStatus {
    Idle,
    Traveling,
    Questing,
    Returning,
    Resting,
    Dead,
}

impl HeroStatus {
    /// True while the hero is tied to an active quest.
    pub fn is_on_quest(&self) -> bool {
        matches!(
            self,
            HeroStatus::Traveling | HeroStatus::Questing | HeroStatus::Returning
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    pub race: Race,
    pub class: HeroClass,
    pub rank: Rank,
    pub level: u32,
    pub xp: u64,
    pub stats: Stats,
    #[serde(default)]
    pub equipment: Equipment,
    pub status: HeroStatus,
    /// Back-reference only; the party roster is authoritative.
    #[serde(default)]
    pub party_id: Option<PartyId>,
    /// Seconds of rest left while `status` is `Resting` (transient).
    #[serde(skip)]
    pub rest_remaining: f64,
    #[serde(default)]
    pub quests_completed: u32,
}

impl Hero {
    pub fn new(id: HeroId, name: String, race: Race, class: HeroClass, rank: Rank, stats: Stats) -> Self {
        Self {
            id,
            name,
            race,
            class,
            rank,
            level: 1,
            xp: 0,
            stats,
            equipment: Equipment::new(),
            status: HeroStatus::Idle,
            party_id: None,
            rest_remaining: 0.0,
            quests_completed: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status != HeroStatus::Dead
    }

    pub fn is_idle(&self) -> bool {
        self.status == HeroStatus::Idle
    }

    pub fn base_stat(&self, stat: StatType) -> u32 {
        self.stats.get(stat)
    }
}

/// What remains of a hero after death.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraveRecord {
    pub hero_id: HeroId,
    pub name: String,
    pub class: HeroClass,
    pub level: u32,
    pub quest_id: QuestId,
    pub cause: String,
}
