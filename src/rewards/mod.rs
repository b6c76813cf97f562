//! Rewards and consequences applied when a quest is claimed.

pub mod logic;

pub use logic::*;
