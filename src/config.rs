// Configuration for the identification client, the battle engine and storage.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

// =============================================================================
// CONFIGURATION STRUCTURES
// =============================================================================

/// Identification service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionSettings {
    /// Classification endpoint the capture is POSTed to
    pub endpoint: String,
    /// Request timeout, covering connect + upload + response
    pub timeout_ms: u64,
    /// Pacing delay applied before a fallback record is returned (0 disables it)
    pub fallback_delay_ms: u64,
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5001/analyze".to_string(),
            timeout_ms: 10_000,
            fallback_delay_ms: 1_500,
        }
    }
}

impl VisionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback_delay_ms)
    }
}

/// Delays between the steps of a turn, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleTimings {
    pub attack_animation_ms: u64,
    pub death_animation_ms: u64,
    pub result_delay_ms: u64,
    pub defend_delay_ms: u64,
    pub potion_heal_ms: u64,
    pub potion_settle_ms: u64,
    pub prompt_restore_ms: u64,
    pub opponent_lead_in_ms: u64,
    pub opponent_attack_ms: u64,
    pub hit_recovery_ms: u64,
}

impl Default for BattleTimings {
    fn default() -> Self {
        Self {
            attack_animation_ms: 500,
            death_animation_ms: 500,
            result_delay_ms: 1_500,
            defend_delay_ms: 500,
            potion_heal_ms: 500,
            potion_settle_ms: 500,
            prompt_restore_ms: 1_000,
            opponent_lead_in_ms: 1_000,
            opponent_attack_ms: 500,
            hit_recovery_ms: 500,
        }
    }
}

impl BattleTimings {
    /// All delays set to zero. Scheduled steps still fire in order.
    pub fn instant() -> Self {
        Self {
            attack_animation_ms: 0,
            death_animation_ms: 0,
            result_delay_ms: 0,
            defend_delay_ms: 0,
            potion_heal_ms: 0,
            potion_settle_ms: 0,
            prompt_restore_ms: 0,
            opponent_lead_in_ms: 0,
            opponent_attack_ms: 0,
            hit_recovery_ms: 0,
        }
    }
}

/// An inclusive integer range read from config as `[low, high]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll(pub u32, pub u32);

impl Roll {
    pub fn low(self) -> u32 {
        self.0.min(self.1)
    }

    pub fn high(self) -> u32 {
        self.0.max(self.1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub max_hp: u32,
    pub player_level: u32,
    pub opponent_level: Roll,
    pub player_damage: Roll,
    pub opponent_damage: Roll,
    pub starting_potions: u32,
    pub heal_amount: u32,
    pub timings: BattleTimings,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_hp: 100,
            player_level: 10,
            opponent_level: Roll(10, 14),
            player_damage: Roll(15, 24),
            opponent_damage: Roll(10, 19),
            starting_potions: 3,
            heal_amount: 30,
            timings: BattleTimings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding one JSON document per store key
    pub directory: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data/store"),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub vision: VisionSettings,
    pub battle: BattleConfig,
    pub storage: StorageSettings,
}

// =============================================================================
// CONFIG LOADING
// =============================================================================

impl AppConfig {
    /// Load configuration from a TOML file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load from `path` when given, otherwise use the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }
}
