// Hero stats
pub const STAT_MIN: u32 = 1;
pub const STAT_MAX: u32 = 99;
pub const NUM_STATS: usize = 5;

// XP and leveling
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;

// Party
pub const PARTY_SIZE: usize = 4;
pub const MAX_ROSTER_SIZE: usize = 4;
pub const MAX_PARTY_REPLACEMENTS: u32 = 2;
pub const PROTO_PARTY_THRESHOLD: u32 = 3;
pub const PARTY_TRAINING_COST: u64 = 250;
pub const MAX_PARTIES: usize = 8;

// Party tier thresholds on total quests completed together
pub const TIER_BONDED_QUESTS: u32 = 3;
pub const TIER_VETERAN_QUESTS: u32 = 10;
pub const TIER_ELITE_QUESTS: u32 = 25;
pub const TIER_LEGENDARY_QUESTS: u32 = 50;

// Replacement penalties: (quest deduction, bonding quests, success penalty)
pub const STANDARD_REPLACEMENT_PENALTY: (u32, u32, f64) = (5, 3, 0.10);
pub const SUCCESSION_REPLACEMENT_PENALTY: (u32, u32, f64) = (2, 2, 0.05);
pub const TRAINING_PENALTY_MULTIPLIER: f64 = 0.5;

// Trait milestones
pub const TRAILBLAZERS_QUESTS: u32 = 15;
pub const BATTLE_HARDENED_VICTORIES: u32 = 10;
pub const UNSHAKEABLE_FLAWLESS: u32 = 5;
pub const TREASURE_HUNTERS_QUESTS: u32 = 25;

// Quest timing
pub const MIN_TRAVEL_FRACTION: f64 = 0.2;

// Rewards
pub const FAILURE_GOLD_FRACTION: f64 = 0.25;
pub const FAILURE_XP_FRACTION: f64 = 0.5;
pub const MATERIAL_BONUS_MULTIPLIER: f64 = 1.5;
pub const DROP_LUCK_COEFFICIENT: f64 = 0.01;
pub const FAILURE_GUILD_XP_FRACTION: f64 = 0.25;
pub const RIVAL_REPUTATION_FRACTION: f64 = 0.5;
pub const REVIVAL_ITEM_ID: &str = "phoenix_feather";

// Injury and death
pub const INJURY_CHANCE_ON_FAILURE: f64 = 0.35;
pub const FALLEN_DEATH_CHANCE_ON_DEFEAT: f64 = 0.5;
pub const REST_SECONDS_PER_INJURY: f64 = 120.0;

// Combat
pub const HERO_BASE_HP: u32 = 40;
pub const HP_PER_VIT: u32 = 5;
pub const DEFENSE_VIT_DIVISOR: u32 = 5;
pub const SCALING_STAT_FACTOR: f64 = 0.5;
pub const CRIT_MULTIPLIER: u32 = 2;
pub const BLESS_MULTIPLIER: f64 = 1.25;
pub const TRACKED_MULTIPLIER: f64 = 1.2;
pub const EVADE_CHANCE: f64 = 0.5;
pub const POISON_DAMAGE_PER_STACK: u32 = 3;
pub const LOW_HP_FRACTION: f64 = 0.4;
pub const HURT_ALLY_FRACTION: f64 = 0.5;
pub const INITIATIVE_DIE: u32 = 20;
pub const INITIATIVE_DEX_DIVISOR: u32 = 5;
pub const CLEAVE_FACTOR: f64 = 0.6;
pub const SHIELD_BASH_COOLDOWN: u32 = 3;
pub const MAX_POISON_STACKS_TARGET: u32 = 3;
pub const HERO_BASE_POWER: u32 = 10;
pub const HEAVY_BLOW_MULTIPLIER: f64 = 1.5;
pub const HEAVY_BLOW_EVERY_ROUNDS: u32 = 3;
pub const AIM_EVERY_ROUNDS: u32 = 3;
pub const TAUNT_ROUNDS: u32 = 2;
pub const BLOCK_ROUNDS: u32 = 2;
pub const EVADE_ROUNDS: u32 = 2;
pub const BLESS_ROUNDS: u32 = 3;
