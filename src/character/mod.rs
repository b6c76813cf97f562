//! Heroes: stats, equipment-aware derived stats, hiring and progression.

pub mod attributes;
pub mod derived_stats;
pub mod hiring;
pub mod progression;
pub mod types;

pub use attributes::*;
pub use derived_stats::*;
pub use hiring::*;
pub use progression::*;
pub use types::*;
