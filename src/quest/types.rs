use crate::character::attributes::StatType;
use crate::character::types::HeroId;
use crate::combat::types::CombatReport;
use crate::core::rank::Rank;
use crate::party::types::PartyId;
use serde::{Deserialize, Serialize};

pub type QuestId = u32;

/// One material roll: `chance` of gaining `quantity` units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEntry {
    pub material: String,
    pub chance: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardTable {
    pub gold: u64,
    pub xp: u64,
    #[serde(default)]
    pub drops: Vec<DropEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub name: String,
    pub rank: Rank,
    pub primary_stat: StatType,
    pub expected_primary: u32,
    #[serde(default)]
    pub secondary_stat: Option<StatType>,
    #[serde(default)]
    pub expected_secondary: u32,
    #[serde(default)]
    pub faction: Option<String>,
    #[serde(default)]
    pub is_combat: bool,
    #[serde(default)]
    pub rewards: RewardTable,
    /// Raises every material drop chance by half.
    #[serde(default)]
    pub material_bonus: bool,
    /// Seconds, before any reduction.
    pub travel_duration: f64,
    pub execute_duration: f64,
}

impl Quest {
    /// A non-combat quest on a single stat axis with 60s travel and 30s
    /// execution. Adjust fields directly for anything else.
    pub fn new(name: String, rank: Rank, primary_stat: StatType, expected_primary: u32) -> Self {
        Self {
            id: 0,
            name,
            rank,
            primary_stat,
            expected_primary,
            secondary_stat: None,
            expected_secondary: 0,
            faction: None,
            is_combat: false,
            rewards: RewardTable::default(),
            material_bonus: false,
            travel_duration: 60.0,
            execute_duration: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestPhase {
    Traveling,
    Executing,
    AwaitingClaim,
    Returning,
    Completed,
}

impl QuestPhase {
    pub fn name(&self) -> &'static str {
        match self {
            QuestPhase::Traveling => "Traveling",
            QuestPhase::Executing => "Executing",
            QuestPhase::AwaitingClaim => "Awaiting claim",
            QuestPhase::Returning => "Returning",
            QuestPhase::Completed => "Completed",
        }
    }
}

/// Phase budgets fixed when the quest is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseTimings {
    pub travel: f64,
    pub execute: f64,
    pub return_trip: f64,
}

/// The pass/fail result rolled at execute time. Cached so later reads
/// never re-roll.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestOutcome {
    pub success: bool,
    pub roll: f64,
    pub chance: f64,
    pub combat: Option<CombatReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveQuest {
    pub quest: Quest,
    pub phase: QuestPhase,
    /// Seconds spent in the current phase.
    pub phase_elapsed: f64,
    pub roster: Vec<HeroId>,
    pub party_id: Option<PartyId>,
    pub timings: PhaseTimings,
    pub outcome: Option<QuestOutcome>,
}

impl ActiveQuest {
    pub fn id(&self) -> QuestId {
        self.quest.id
    }

    /// Budget of the current phase, or `None` for phases that wait on
    /// the player or are terminal.
    pub fn phase_duration(&self) -> Option<f64> {
        match self.phase {
            QuestPhase::Traveling => Some(self.timings.travel),
            QuestPhase::Executing => Some(self.timings.execute),
            QuestPhase::Returning => Some(self.timings.return_trip),
            QuestPhase::AwaitingClaim | QuestPhase::Completed => None,
        }
    }

    /// Fraction of the current phase elapsed, for display.
    pub fn progress(&self) -> f64 {
        match self.phase_duration() {
            Some(d) if d > 0.0 => (self.phase_elapsed / d).min(1.0),
            Some(_) => 1.0,
            None => 1.0,
        }
    }
}

/// Where a quest currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestState {
    Available,
    Active(QuestPhase),
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestBoard {
    pub available: Vec<Quest>,
    pub active: Vec<ActiveQuest>,
    pub completed: Vec<QuestId>,
}

impl QuestBoard {
    pub fn active_quest(&self, id: QuestId) -> Option<&ActiveQuest> {
        self.active.iter().find(|a| a.id() == id)
    }

    pub fn state_of(&self, id: QuestId) -> Option<QuestState> {
        if self.available.iter().any(|q| q.id == id) {
            Some(QuestState::Available)
        } else if let Some(active) = self.active_quest(id) {
            Some(QuestState::Active(active.phase))
        } else if self.completed.contains(&id) {
            Some(QuestState::Completed)
        } else {
            None
        }
    }
}
