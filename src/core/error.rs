use crate::character::types::{HeroId, HeroStatus};
use crate::core::rank::Rank;
use crate::party::types::PartyId;
use crate::quest::types::QuestId;
use thiserror::Error;

/// Validation failures reported back to the caller. No state is mutated
/// when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GuildError {
    #[error("Hero not found: {0}")]
    HeroNotFound(HeroId),

    #[error("Party not found: {0}")]
    PartyNotFound(PartyId),

    #[error("Quest not found: {0}")]
    QuestNotFound(QuestId),

    #[error("Hero {id} is busy ({status:?})")]
    HeroBusy { id: HeroId, status: HeroStatus },

    #[error("Hero {0} is dead")]
    HeroDead(HeroId),

    #[error("Roster is empty")]
    EmptyRoster,

    #[error("Roster has {0} heroes, expected 1 to 4")]
    InvalidRosterSize(usize),

    #[error("Hero {0} appears more than once")]
    DuplicateHero(HeroId),

    #[error("Quest rank {quest} is too high for a roster led by rank {best}")]
    RankTooHigh { quest: Rank, best: Rank },

    #[error("All {0} quest slots are in use")]
    QuestSlotsFull(usize),

    #[error("All {0} hero slots are in use")]
    HeroSlotsFull(usize),

    #[error("Tavern only offers up to rank {max}, requested {requested}")]
    TavernRankLocked { requested: Rank, max: Rank },

    #[error("Quest {0} is not awaiting a claim")]
    NotAwaitingClaim(QuestId),

    #[error("Quest {0} is not on the available board")]
    QuestNotAvailable(QuestId),

    #[error("Not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u64, available: u64 },

    #[error("Item not owned: {0}")]
    ItemNotOwned(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Nothing equipped in {0}")]
    SlotEmpty(String),

    #[error("Unknown recipe: {0}")]
    UnknownRecipe(String),

    #[error("Not enough {material}: need {needed}, have {available}")]
    InsufficientMaterials {
        material: String,
        needed: u32,
        available: u32,
    },

    #[error("A party needs exactly 4 heroes, got {0}")]
    InvalidPartySize(usize),

    #[error("Party classes must be distinct")]
    DuplicateClass,

    #[error("Hero {hero} already belongs to party {party}")]
    AlreadyInParty { hero: HeroId, party: PartyId },

    #[error("Hero {hero} is not a member of party {party}")]
    NotAPartyMember { hero: HeroId, party: PartyId },

    #[error("Party {0} has reached the replacement limit and must be retired")]
    ReplacementLimitReached(PartyId),

    #[error("Party {0} is out on a quest")]
    PartyBusy(PartyId),

    #[error("Guild already has the maximum of {0} parties")]
    PartyLimitReached(usize),
}

pub type Result<T> = std::result::Result<T, GuildError>;

/// Failures raised while reading persisted or configuration data.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Checksum verification failed")]
    ChecksumMismatch,

    #[error("Unsupported save version {0}")]
    UnsupportedVersion(u32),

    #[error("Unknown reference: {0}")]
    UnknownReference(String),

    #[error("Could not determine save directory")]
    NoSaveDirectory,
}
