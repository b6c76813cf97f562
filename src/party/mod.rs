//! Fixed four-hero parties: tiers, bonding, replacement and traits.

pub mod logic;
pub mod proto;
pub mod types;

pub use logic::*;
pub use proto::*;
pub use types::*;
