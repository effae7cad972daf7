pub mod json_backend;
pub mod memory;
pub mod slots;

use crate::errors::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Durable text storage addressed by fixed keys.
///
/// Backends own no ledger state; they mirror whatever the caller last wrote.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored text, or `None` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
pub use slots::{
    CollectionSlots, DefaultReason, LoadOutcome, LoadReport, ACCOUNTS_KEY, CATEGORIES_KEY,
    TRANSACTIONS_KEY,
};
