use crate::catalog::{catalog, Catalog};
use crate::rng::{RandomSource, ThreadRandom};
use crate::vision::{ImageRef, OFFLINE_EMOJI};
use schema::{BaseStats, CatalogEntry, CreatureRecord, CreatureStats, Rarity};
use serde_json::Map;
use std::sync::Mutex;

pub const OFFLINE_PREFIX: &str = "(Offline) ";
pub const OFFLINE_SCIENTIFIC_NAME: &str = "Server Disconnected";
pub const OFFLINE_DESCRIPTION: &str = "Connection to the identification server was lost. \
    This record was generated from the local backup catalog; check the configured endpoint.";

/// Synthesizes placeholder records from the local catalog.
pub struct FallbackGenerator<R = ThreadRandom> {
    catalog: Catalog,
    rng: Mutex<R>,
}

impl FallbackGenerator<ThreadRandom> {
    pub fn with_bundled_catalog() -> Self {
        Self::new(catalog().clone(), ThreadRandom)
    }
}

impl<R: RandomSource> FallbackGenerator<R> {
    pub fn new(catalog: Catalog, rng: R) -> Self {
        Self {
            catalog,
            rng: Mutex::new(rng),
        }
    }

    /// Builds an offline record for `image` based on a uniformly picked catalog entry.
    pub fn generate(&self, image: &ImageRef, id: String) -> CreatureRecord {
        let base = self.pick();

        CreatureRecord {
            id,
            name: format!("{}{}", OFFLINE_PREFIX, base.name),
            scientific_name: Some(OFFLINE_SCIENTIFIC_NAME.to_string()),
            species: Some(base.name.clone()),
            rarity: base.rarity,
            stats: CreatureStats::offline_default(),
            emoji: OFFLINE_EMOJI.to_string(),
            image: image.as_str().to_string(),
            description: OFFLINE_DESCRIPTION.to_string(),
            extra: Map::new(),
        }
    }

    fn pick(&self) -> CatalogEntry {
        if self.catalog.is_empty() {
            return unknown_specimen();
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let index = rng.pick_index(self.catalog.len(), "fallback catalog entry");
        self.catalog.get(index).cloned().unwrap_or_else(unknown_specimen)
    }
}

fn unknown_specimen() -> CatalogEntry {
    CatalogEntry {
        name: "Unknown Specimen".to_string(),
        scientific_name: OFFLINE_SCIENTIFIC_NAME.to_string(),
        rarity: Rarity::Common,
        emoji: OFFLINE_EMOJI.to_string(),
        stats: BaseStats {
            speed: 10.0,
            defense: 10.0,
            hunger: Some(100.0),
        },
        description: OFFLINE_DESCRIPTION.to_string(),
    }
}
