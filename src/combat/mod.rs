//! Turn-based combat for combat-flagged quests.

pub mod ai;
pub mod logic;
pub mod math;
pub mod types;

pub use logic::*;
pub use types::*;
