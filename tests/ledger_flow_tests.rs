mod common;

use std::sync::Arc;

use common::{date, draft};
use finance_core::{
    core::clock::FixedClock,
    domain::{FilterState, TransactionId, TransactionKind, YearMonth},
    locale::Locale,
    storage::{KeyValueStore, MemoryStore, TRANSACTIONS_KEY},
    LedgerError, LedgerManager,
};

fn open(store: &Arc<MemoryStore>) -> LedgerManager {
    LedgerManager::open(
        store.clone(),
        Locale::en_us(),
        Box::new(FixedClock::new(date(2024, 1, 31))),
    )
}

#[test]
fn income_and_expense_produce_expected_summary() {
    let store = Arc::new(MemoryStore::new());
    let mut manager = open(&store);
    manager
        .add_transaction(draft(
            date(2024, 1, 5),
            TransactionKind::Income,
            "Salary",
            "Checking Account",
            "1000.00",
        ))
        .unwrap();
    manager
        .add_transaction(draft(
            date(2024, 1, 6),
            TransactionKind::Expense,
            "Market",
            "Wallet",
            "300.00",
        ))
        .unwrap();

    let summary = manager.summary();
    assert_eq!(summary.total_income, 1000.0);
    assert_eq!(summary.total_expense, 300.0);
    assert_eq!(summary.balance, 700.0);
    assert_eq!(summary.category_totals.get("Salary"), Some(1000.0));
    assert_eq!(summary.category_totals.get("Market"), Some(-300.0));
    assert_eq!(summary.category_totals.len(), 2);
}

#[test]
fn single_month_filter_keeps_only_that_month() {
    let store = Arc::new(MemoryStore::new());
    let mut manager = open(&store);
    for on in [date(2024, 1, 15), date(2024, 2, 10)] {
        manager
            .add_transaction(draft(on, TransactionKind::Expense, "Rent", "Bank", "10"))
            .unwrap();
    }

    manager.set_filter(FilterState::month("2024-01".parse::<YearMonth>().unwrap()));
    let visible = manager.visible_transactions();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].date, date(2024, 1, 15));
    assert_eq!(manager.period_label(), "January 2024");
}

#[test]
fn inverted_range_is_empty_and_open_range_is_everything() {
    let store = Arc::new(MemoryStore::new());
    let mut manager = open(&store);
    for on in [date(2024, 1, 15), date(2024, 2, 10)] {
        manager
            .add_transaction(draft(on, TransactionKind::Income, "Salary", "Bank", "10"))
            .unwrap();
    }
    let month = YearMonth::from_date(date(2024, 1, 1));

    manager.set_filter(FilterState::range(
        month,
        Some(date(2024, 3, 1)),
        Some(date(2024, 1, 1)),
    ));
    assert!(manager.visible_transactions().is_empty());
    assert_eq!(manager.summary().balance, 0.0);

    manager.set_filter(FilterState::range(month, Some(date(2024, 2, 1)), None));
    assert_eq!(manager.visible_transactions().len(), 2);

    manager.set_filter(FilterState::range(
        month,
        Some(date(2024, 1, 15)),
        Some(date(2024, 1, 15)),
    ));
    assert_eq!(manager.visible_transactions().len(), 1);
}

#[test]
fn deleting_unknown_id_changes_nothing() {
    let store = Arc::new(MemoryStore::new());
    let mut manager = open(&store);
    manager
        .add_transaction(draft(
            date(2024, 1, 2),
            TransactionKind::Expense,
            "Transport",
            "Wallet",
            "4.50",
        ))
        .unwrap();
    let persisted = store.get(TRANSACTIONS_KEY).unwrap();
    let writes = store.write_count();
    let before = manager.transactions().to_vec();

    assert!(!manager.delete_transaction(&TransactionId::from("does-not-exist")));
    assert_eq!(manager.transactions(), before.as_slice());
    assert_eq!(store.get(TRANSACTIONS_KEY).unwrap(), persisted);
    assert_eq!(store.write_count(), writes);
}

#[test]
fn add_then_delete_restores_previous_list() {
    let store = Arc::new(MemoryStore::new());
    let mut manager = open(&store);
    manager
        .add_transaction(draft(
            date(2024, 1, 2),
            TransactionKind::Expense,
            "Health",
            "Bank",
            "80",
        ))
        .unwrap();
    let before = manager.transactions().to_vec();

    let id = manager
        .add_transaction(draft(
            date(2024, 1, 3),
            TransactionKind::Income,
            "Investments",
            "Savings",
            "15",
        ))
        .unwrap();
    assert!(manager.delete_transaction(&id));
    assert_eq!(manager.transactions(), before.as_slice());
}

#[test]
fn totals_track_every_visible_entry() {
    let store = Arc::new(MemoryStore::new());
    let mut manager = open(&store);
    let amounts = ["12.5", "0.01", "999.99", "40"];
    for (idx, amount) in amounts.iter().enumerate() {
        let kind = if idx % 2 == 0 {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        manager
            .add_transaction(draft(date(2024, 1, 10), kind, "Other", "Wallet", amount))
            .unwrap();
    }
    let summary = manager.summary();
    let net: f64 = summary.category_totals.iter().map(|entry| entry.net).sum();
    assert!((summary.balance - net).abs() < 1e-9);
    assert!((summary.total_income - summary.total_expense - summary.balance).abs() < 1e-9);
}

#[test]
fn quota_failure_is_reported_but_entry_stays_visible() {
    let store = Arc::new(MemoryStore::with_quota(64));
    let mut manager = open(&store);
    manager
        .add_transaction(draft(
            date(2024, 1, 9),
            TransactionKind::Expense,
            "Leisure",
            "Wallet",
            "25",
        ))
        .unwrap();

    assert_eq!(manager.visible_transactions().len(), 1);
    let warning = manager.last_persistence_warning().unwrap();
    assert!(warning.contains("quota"), "{warning}");
    assert!(store.get(TRANSACTIONS_KEY).unwrap().is_none());
}

#[test]
fn blank_labels_are_rejected() {
    let store = Arc::new(MemoryStore::new());
    let mut manager = open(&store);
    assert!(matches!(
        manager.add_account("   "),
        Err(LedgerError::Validation(_))
    ));
    assert_eq!(store.write_count(), 0);
}
