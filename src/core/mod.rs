//! Core state, configuration and the simulation step.

pub mod config;
pub mod constants;
pub mod data;
pub mod engine;
pub mod error;
pub mod game_state;
pub mod rank;
pub mod tick;

pub use config::*;
pub use constants::*;
pub use engine::GuildEngine;
pub use error::*;
pub use game_state::*;
pub use rank::Rank;
pub use tick::*;
