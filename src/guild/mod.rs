//! Guild progression and faction reputation.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
