use std::{path::PathBuf, sync::Arc};

use chrono::NaiveDate;

use crate::core::clock::Clock;
use crate::core::services::{LabelService, SummaryService, TransactionService};
use crate::domain::{
    CategoryTotal, FilterState, LabelSet, Summary, Transaction, TransactionDraft, TransactionId,
    YearMonth,
};
use crate::errors::{LedgerError, Result, StorageError};
use crate::export::WorkbookExporter;
use crate::locale::Locale;
use crate::storage::{CollectionSlots, KeyValueStore, LoadReport};

/// Sole owner of the canonical transaction, category, and account lists.
///
/// Every mutation is validated first, applied in memory, mirrored to storage on a best-effort
/// basis, and followed by a recomputation of the filtered view and its summary.
pub struct LedgerManager {
    transactions: Vec<Transaction>,
    categories: LabelSet,
    accounts: LabelSet,
    filter: FilterState,
    visible: Vec<usize>,
    summary: Summary,
    slots: CollectionSlots,
    locale: Locale,
    clock: Box<dyn Clock>,
    load_report: LoadReport,
    last_persistence_warning: Option<String>,
}

impl LedgerManager {
    /// Reads the three collections once and starts filtered on the current month.
    pub fn open(store: Arc<dyn KeyValueStore>, locale: Locale, clock: Box<dyn Clock>) -> Self {
        let slots = CollectionSlots::new(store);
        let transactions = slots.load_transactions();
        let categories = slots.load_categories(&locale);
        let accounts = slots.load_accounts(&locale);
        let load_report = LoadReport {
            transactions: transactions.default_reason().cloned(),
            categories: categories.default_reason().cloned(),
            accounts: accounts.default_reason().cloned(),
        };
        let filter = FilterState::month(YearMonth::from_date(clock.today()));

        let mut manager = Self {
            transactions: transactions.into_value(),
            categories: categories.into_value(),
            accounts: accounts.into_value(),
            filter,
            visible: Vec::new(),
            summary: Summary::default(),
            slots,
            locale,
            clock,
            load_report,
            last_persistence_warning: None,
        };
        manager.refresh();
        tracing::info!(
            transactions = manager.transactions.len(),
            categories = manager.categories.len(),
            accounts = manager.accounts.len(),
            "ledger opened"
        );
        manager
    }

    /// Validates `draft`, stores it as the most recent entry, and returns its new id.
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<TransactionId> {
        let transaction = TransactionService::create(draft)?;
        let id = transaction.id.clone();
        TransactionService::prepend(&mut self.transactions, transaction);
        self.persist_transactions();
        self.refresh();
        tracing::debug!(%id, "transaction added");
        Ok(id)
    }

    /// Removes the entry with `id`. Unknown ids are ignored and nothing is written.
    pub fn delete_transaction(&mut self, id: &TransactionId) -> bool {
        if TransactionService::remove(&mut self.transactions, id).is_none() {
            tracing::debug!(%id, "delete ignored, no such transaction");
            return false;
        }
        self.persist_transactions();
        self.refresh();
        tracing::debug!(%id, "transaction deleted");
        true
    }

    /// Appends a category label. Returns `false` when it already existed.
    pub fn add_category(&mut self, label: &str) -> Result<bool> {
        let added = LabelService::add(&mut self.categories, label)?;
        if added {
            let result = self.slots.save_categories(&self.categories);
            self.note_persistence(result);
        }
        Ok(added)
    }

    /// Appends an account label. Returns `false` when it already existed.
    pub fn add_account(&mut self, label: &str) -> Result<bool> {
        let added = LabelService::add(&mut self.accounts, label)?;
        if added {
            let result = self.slots.save_accounts(&self.accounts);
            self.note_persistence(result);
        }
        Ok(added)
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.refresh();
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &LabelSet {
        &self.categories
    }

    pub fn accounts(&self) -> &LabelSet {
        &self.accounts
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Transactions inside the current filter, most recent first.
    pub fn visible_transactions(&self) -> Vec<&Transaction> {
        self.visible
            .iter()
            .filter_map(|idx| self.transactions.get(*idx))
            .collect()
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn top_categories(&self) -> Vec<&CategoryTotal> {
        self.summary.top_categories()
    }

    pub fn period_label(&self) -> String {
        self.locale.period_label(&self.filter)
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Message of the most recent failed write, cleared by the next successful one.
    pub fn last_persistence_warning(&self) -> Option<&str> {
        self.last_persistence_warning.as_deref()
    }

    /// Exports the currently visible transactions and their summary.
    pub fn export(&self, exporter: &WorkbookExporter) -> Result<PathBuf> {
        let visible = self.visible_transactions();
        if visible.is_empty() {
            return Err(LedgerError::NothingToExport);
        }
        let path = exporter.export(
            visible,
            &self.summary,
            &self.period_label(),
            self.clock.today(),
        )?;
        Ok(path)
    }

    fn persist_transactions(&mut self) {
        let result = self.slots.save_transactions(&self.transactions);
        self.note_persistence(result);
    }

    fn note_persistence(&mut self, result: std::result::Result<(), StorageError>) {
        self.last_persistence_warning = match result {
            Ok(()) => None,
            Err(err) => Some(err.to_string()),
        };
    }

    fn refresh(&mut self) {
        self.visible = SummaryService::visible_indices(&self.transactions, &self.filter);
        self.summary = SummaryService::compute(self.visible_transactions());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::domain::{FilterMode, TransactionKind};
    use crate::storage::{DefaultReason, MemoryStore, CATEGORIES_KEY, TRANSACTIONS_KEY};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    fn open(store: &Arc<MemoryStore>) -> LedgerManager {
        LedgerManager::open(
            store.clone(),
            Locale::en_us(),
            Box::new(FixedClock::new(today())),
        )
    }

    fn draft(kind: TransactionKind, category: &str, account: &str, amount: &str) -> TransactionDraft {
        TransactionDraft::new(today(), format!("{category} entry"), kind, category, account, amount)
    }

    #[test]
    fn opens_with_seeds_and_current_month_filter() {
        let store = Arc::new(MemoryStore::new());
        let manager = open(&store);
        assert_eq!(manager.categories(), &Locale::en_us().default_categories());
        assert_eq!(manager.accounts().len(), 5);
        assert_eq!(manager.filter().mode, FilterMode::SingleMonth);
        assert_eq!(manager.filter().selected_month.to_string(), "2024-01");
        assert_eq!(manager.load_report().transactions, Some(DefaultReason::Missing));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn add_prepends_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = open(&store);
        let first = manager
            .add_transaction(draft(TransactionKind::Income, "Salary", "Checking Account", "1000"))
            .unwrap();
        let second = manager
            .add_transaction(draft(TransactionKind::Expense, "Market", "Wallet", "300"))
            .unwrap();

        let ids: Vec<&TransactionId> = manager.transactions().iter().map(|txn| &txn.id).collect();
        assert_eq!(ids, [&second, &first]);
        let stored = store.get(TRANSACTIONS_KEY).unwrap().unwrap();
        assert!(stored.contains(second.as_str()));
        assert_eq!(manager.summary().balance, 700.0);
    }

    #[test]
    fn rejected_draft_changes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = open(&store);
        let err = manager
            .add_transaction(draft(TransactionKind::Expense, "Market", "Wallet", "0"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(manager.transactions().is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn failed_write_keeps_memory_state_and_reports_warning() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = open(&store);
        store.set_fail_writes(true);
        manager
            .add_transaction(draft(TransactionKind::Expense, "Market", "Wallet", "12"))
            .unwrap();
        assert_eq!(manager.transactions().len(), 1);
        assert!(manager.last_persistence_warning().is_some());

        store.set_fail_writes(false);
        manager.add_category("Pets").unwrap();
        assert!(manager.last_persistence_warning().is_none());
    }

    #[test]
    fn duplicate_category_is_a_no_op_without_write() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = open(&store);
        assert!(!manager.add_category("Rent").unwrap());
        assert_eq!(store.write_count(), 0);
        assert!(manager.add_category("rent").unwrap());
        let stored = store.get(CATEGORIES_KEY).unwrap().unwrap();
        assert!(stored.ends_with(r#""Other","rent"]"#), "{stored}");
    }

    #[test]
    fn filter_change_recomputes_view_and_summary() {
        let store = Arc::new(MemoryStore::new());
        let mut manager = open(&store);
        let mut old = draft(TransactionKind::Expense, "Rent", "Bank", "900");
        old.date = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
        manager.add_transaction(old).unwrap();
        manager
            .add_transaction(draft(TransactionKind::Expense, "Market", "Wallet", "50"))
            .unwrap();

        assert_eq!(manager.visible_transactions().len(), 1);
        assert_eq!(manager.summary().total_expense, 50.0);

        manager.set_filter(FilterState::all(today()));
        assert_eq!(manager.visible_transactions().len(), 2);
        assert_eq!(manager.summary().total_expense, 950.0);
        assert_eq!(manager.period_label(), "All entries");
    }

    #[test]
    fn export_refuses_empty_view() {
        let store = Arc::new(MemoryStore::new());
        let manager = open(&store);
        let exporter = WorkbookExporter::new(std::env::temp_dir(), Locale::en_us());
        assert!(matches!(
            manager.export(&exporter),
            Err(LedgerError::NothingToExport)
        ));
    }
}
