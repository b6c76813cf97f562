//! Guildhall - simulation core of a real-time guild-management game.
//!
//! Heroes are hired, grouped into parties and sent on quests that advance
//! over wall-clock time. Quest outcomes come from a stat-driven success
//! roll and, for combat quests, a turn-based battle. Claiming a quest pays
//! out rewards and applies injuries, deaths and party progress.
//!
//! Everything mutable lives in one [`core::GuildState`]; [`core::GuildEngine`]
//! wraps it with the configuration and a seeded RNG.

pub mod character;
pub mod combat;
pub mod core;
pub mod guild;
pub mod items;
pub mod party;
pub mod quest;
pub mod rewards;
pub mod utils;
