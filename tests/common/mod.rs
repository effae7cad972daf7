#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use chrono::NaiveDate;
use finance_core::{
    core::clock::FixedClock,
    domain::{TransactionDraft, TransactionKind},
    locale::Locale,
    storage::JsonFileStore,
    LedgerManager,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated base directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Opens a ledger over JSON files in `<base>/data`, pinned to `today`.
pub fn open_ledger(base: &Path, today: NaiveDate) -> LedgerManager {
    let store = JsonFileStore::new(base.join("data")).expect("create json store");
    LedgerManager::open(Arc::new(store), Locale::en_us(), Box::new(FixedClock::new(today)))
}

pub fn draft(
    on: NaiveDate,
    kind: TransactionKind,
    category: &str,
    account: &str,
    amount: &str,
) -> TransactionDraft {
    TransactionDraft::new(on, format!("{category} entry"), kind, category, account, amount)
}
