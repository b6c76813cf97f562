//! Quests: board, success chance and phase lifecycle.

pub mod lifecycle;
pub mod success;
pub mod types;

pub use lifecycle::*;
pub use success::*;
pub use types::*;
