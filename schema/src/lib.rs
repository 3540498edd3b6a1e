// Creature Tamer Schema - Shared type definitions
// This crate contains the data contracts shared between the identification
// client, the battle engine and the persistence layer.

// Re-export the main types
pub use creature_data::*;
pub use rarity::*;

pub mod creature_data;
pub mod rarity;
