// In: src/lib.rs

//! Creature Tamer
//!
//! Core of a creature-collecting game: identify a photographed creature through
//! a remote vision service (with an offline fallback that never fails), tame it,
//! keep it in a persistent collection and fight timed turn-based battles.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod capture;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod logging;
pub mod rng;
pub mod vision;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{BaseStats, CatalogEntry, CreatureRecord, CreatureStats, Rarity};

// --- From this crate's modules (`src/`) ---

// Identification.
pub use vision::{IdentificationClient, IdentificationResult, ImageRef};

// Battle engine and its observable state.
pub use battle::engine::{BattleEngine, CommandOutcome, IgnoreReason};
pub use battle::state::{BattleMessage, BattleOutcome, BattleSession, BattleSnapshot, Phase};

// Taming and the collection.
pub use capture::{Collection, CreatureStore, FileStore, MemoryStore, TamingProgress, TamingSession};

// Shared infrastructure.
pub use catalog::{catalog, Catalog};
pub use config::{AppConfig, BattleConfig};
pub use rng::{RandomSource, ScriptedRandom, ThreadRandom};

// Crate-specific error and result types.
pub use errors::{CatalogError, ConfigError, FailureKind, IdentifyError, StoreError, StoreResult};
