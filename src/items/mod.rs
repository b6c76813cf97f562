//! Item system: catalog types, hero equipment, and the guild inventory.

pub mod equipment;
pub mod inventory;
pub mod types;

pub use equipment::*;
pub use inventory::*;
pub use types::*;
