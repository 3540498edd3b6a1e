//! After identification: taming the creature and keeping it in the collection.

pub mod collection;
pub mod store;
pub mod taming;

pub use collection::{Collection, COLLECTION_KEY, FEED_AMOUNT, MAX_HUNGER};
pub use store::{CreatureStore, FileStore, MemoryStore};
pub use taming::{TamingProgress, TamingSession};
