use crate::capture::store::CreatureStore;
use crate::catalog::Catalog;
use crate::errors::StoreResult;
use schema::CreatureRecord;
use tracing::info;

/// Store key holding the user's captures as a JSON list.
pub const COLLECTION_KEY: &str = "user_collection";

pub const FEED_AMOUNT: f64 = 20.0;
pub const MAX_HUNGER: f64 = 100.0;

/// The user's captured creatures, persisted under [`COLLECTION_KEY`].
pub struct Collection<S> {
    store: S,
}

impl<S: CreatureStore> Collection<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Captures in the order they were added. Empty when nothing was saved yet.
    pub async fn load(&self) -> StoreResult<Vec<CreatureRecord>> {
        match self.store.get(COLLECTION_KEY).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Adds `record` to the end of the list. Returns the new collection size.
    pub async fn append(&self, record: CreatureRecord) -> StoreResult<usize> {
        let mut records = self.load().await?;
        info!(id = %record.id, name = %record.name, "adding capture to collection");
        records.push(record);
        self.save(&records).await?;
        Ok(records.len())
    }

    /// Raises the hunger stat of capture `id` by [`FEED_AMOUNT`], capped at [`MAX_HUNGER`].
    /// A capture without a hunger stat starts from 0. Returns the new value, or `None`
    /// when no capture has that id.
    pub async fn feed(&self, id: &str) -> StoreResult<Option<f64>> {
        let mut records = self.load().await?;
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            return Ok(None);
        };
        let hunger = (record.stats.hunger.unwrap_or(0.0) + FEED_AMOUNT).min(MAX_HUNGER);
        record.stats.hunger = Some(hunger);
        info!(id, hunger, "fed capture");
        self.save(&records).await?;
        Ok(Some(hunger))
    }

    /// Removes capture `id` for good. Returns false when no capture has that id.
    pub async fn remove(&self, id: &str) -> StoreResult<bool> {
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Ok(false);
        }
        info!(id, "released capture");
        self.save(&records).await?;
        Ok(true)
    }

    async fn save(&self, records: &[CreatureRecord]) -> StoreResult<()> {
        let json = serde_json::to_string(records)?;
        self.store.set(COLLECTION_KEY, json).await
    }

    /// Reference creatures from `catalog` followed by the user's captures.
    pub async fn browse(&self, catalog: &Catalog) -> StoreResult<Vec<CreatureRecord>> {
        let mut view: Vec<CreatureRecord> = catalog
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.to_record(format!("catalog-{}", index + 1), String::new()))
            .collect();
        view.extend(self.load().await?);
        Ok(view)
    }
}
