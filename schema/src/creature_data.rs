use crate::Rarity;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureStats {
    pub speed: f64,
    pub defense: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hunger: Option<f64>,
    /// Stat keys the service sent beyond the known three, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreatureStats {
    pub fn new(speed: f64, defense: f64, hunger: Option<f64>) -> Self {
        Self {
            speed,
            defense,
            hunger,
            extra: Map::new(),
        }
    }

    /// Stats given to every record synthesized while the identification service is unreachable.
    pub fn offline_default() -> Self {
        Self::new(10.0, 10.0, Some(100.0))
    }
}

/// Stats of a bundled catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub speed: f64,
    pub defense: f64,
    #[serde(default)]
    pub hunger: Option<f64>,
}

impl From<BaseStats> for CreatureStats {
    fn from(base: BaseStats) -> Self {
        CreatureStats::new(base.speed, base.defense, base.hunger)
    }
}

/// A captured (or synthesized) creature, as handed to the collection and the UI.
///
/// Keys are camelCase on the wire so the persisted list keeps the same shape
/// as the identification service's JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    /// Catalog species the record was derived from, when it did not come from the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    pub rarity: Rarity,
    pub stats: CreatureStats,
    pub emoji: String,
    pub image: String,
    pub description: String,
    /// Fields the service sent that this schema does not know about, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An entry of the bundled reference catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub scientific_name: String,
    pub rarity: Rarity,
    pub emoji: String,
    pub stats: BaseStats,
    pub description: String,
}

impl CatalogEntry {
    pub fn to_record(&self, id: String, image: String) -> CreatureRecord {
        CreatureRecord {
            id,
            name: self.name.clone(),
            scientific_name: Some(self.scientific_name.clone()),
            species: Some(self.name.clone()),
            rarity: self.rarity,
            stats: self.stats.into(),
            emoji: self.emoji.clone(),
            image,
            description: self.description.clone(),
            extra: Map::new(),
        }
    }
}
