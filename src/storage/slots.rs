//! The three persisted collections and their load/save policy.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::domain::{LabelSet, Transaction};
use crate::locale::Locale;

use super::{KeyValueStore, Result};

pub const TRANSACTIONS_KEY: &str = "financial-transactions";
pub const CATEGORIES_KEY: &str = "financial-categories";
pub const ACCOUNTS_KEY: &str = "financial-accounts";

/// Why a slot was replaced by its built-in default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultReason {
    /// The key has never been written (or holds empty text).
    Missing,
    /// The backend failed to read the key.
    Unreadable(String),
    /// The stored text is not a valid collection.
    Corrupt(String),
}

/// Result of reading a slot. Reading never fails; it falls back to a default instead.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    Stored(T),
    Defaulted { value: T, reason: DefaultReason },
}

impl<T> LoadOutcome<T> {
    pub fn into_value(self) -> T {
        match self {
            LoadOutcome::Stored(value) | LoadOutcome::Defaulted { value, .. } => value,
        }
    }

    pub fn default_reason(&self) -> Option<&DefaultReason> {
        match self {
            LoadOutcome::Stored(_) => None,
            LoadOutcome::Defaulted { reason, .. } => Some(reason),
        }
    }
}

/// What happened to each slot during startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub transactions: Option<DefaultReason>,
    pub categories: Option<DefaultReason>,
    pub accounts: Option<DefaultReason>,
}

impl LoadReport {
    /// Slots whose stored data could not be used (missing keys are not counted).
    pub fn recovered_slots(&self) -> Vec<&'static str> {
        [
            (TRANSACTIONS_KEY, &self.transactions),
            (CATEGORIES_KEY, &self.categories),
            (ACCOUNTS_KEY, &self.accounts),
        ]
        .into_iter()
        .filter(|(_, reason)| {
            matches!(
                reason,
                Some(DefaultReason::Corrupt(_)) | Some(DefaultReason::Unreadable(_))
            )
        })
        .map(|(key, _)| key)
        .collect()
    }
}

/// Typed access to the transaction, category, and account slots of a store.
#[derive(Clone)]
pub struct CollectionSlots {
    store: Arc<dyn KeyValueStore>,
}

impl CollectionSlots {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load_transactions(&self) -> LoadOutcome<Vec<Transaction>> {
        self.load_slot(TRANSACTIONS_KEY, Vec::new)
    }

    pub fn load_categories(&self, locale: &Locale) -> LoadOutcome<LabelSet> {
        self.load_slot(CATEGORIES_KEY, || locale.default_categories())
    }

    pub fn load_accounts(&self, locale: &Locale) -> LoadOutcome<LabelSet> {
        self.load_slot(ACCOUNTS_KEY, || locale.default_accounts())
    }

    pub fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.save_slot(TRANSACTIONS_KEY, transactions)
    }

    pub fn save_categories(&self, categories: &LabelSet) -> Result<()> {
        self.save_slot(CATEGORIES_KEY, categories)
    }

    pub fn save_accounts(&self, accounts: &LabelSet) -> Result<()> {
        self.save_slot(ACCOUNTS_KEY, accounts)
    }

    fn load_slot<T, F>(&self, key: &str, default: F) -> LoadOutcome<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                return LoadOutcome::Defaulted {
                    value: default(),
                    reason: DefaultReason::Missing,
                }
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "could not read collection, using defaults");
                return LoadOutcome::Defaulted {
                    value: default(),
                    reason: DefaultReason::Unreadable(err.to_string()),
                };
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => LoadOutcome::Stored(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "stored collection is corrupt, using defaults");
                LoadOutcome::Defaulted {
                    value: default(),
                    reason: DefaultReason::Corrupt(err.to_string()),
                }
            }
        }
    }

    fn save_slot<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json).map_err(|err| {
            tracing::warn!(key, error = %err, "failed to persist collection");
            err
        })
    }
}
