//! The bundled, read-only catalog of reference creatures.
//!
//! The catalog backs the offline fallback and the collection screen. It is
//! compiled into the binary from `data/catalog.ron` and parsed once on first use.

use crate::errors::CatalogError;
use schema::{CatalogEntry, Rarity};
use std::sync::LazyLock;
use tracing::error;

const BUNDLED_CATALOG: &str = include_str!("../data/catalog.ron");

static CATALOG: LazyLock<Catalog> = LazyLock::new(|| match Catalog::parse(BUNDLED_CATALOG) {
    Ok(catalog) => catalog,
    Err(err) => {
        error!("bundled catalog could not be loaded: {}", err);
        Catalog::default()
    }
});

/// Access the global catalog.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Parse a catalog from a RON list of entries.
    pub fn parse(source: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = ron::from_str(source)?;
        Ok(Self { entries })
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive lookup by display name.
    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// The distinct rarities present in the catalog, in rarity order.
    pub fn known_rarities(&self) -> Vec<Rarity> {
        let mut rarities: Vec<Rarity> = self.entries.iter().map(|entry| entry.rarity).collect();
        rarities.sort_by_key(|rarity| *rarity as u8);
        rarities.dedup();
        rarities
    }
}
