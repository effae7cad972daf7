mod common;

use std::fs;

use common::{date, draft, open_ledger, temp_base};
use finance_core::{
    domain::{FilterState, TransactionKind, YearMonth},
    export::{Cell, ExportDocument, WorkbookExporter},
    locale::Locale,
    LedgerError,
};
use regex::Regex;

#[test]
fn export_writes_dated_workbook_for_visible_entries() {
    let base = temp_base();
    let today = date(2024, 2, 14);
    let mut manager = open_ledger(&base, today);
    manager
        .add_transaction(draft(today, TransactionKind::Income, "Salary", "Bank", "2500"))
        .unwrap();

    let exporter = WorkbookExporter::new(base.join("exports"), Locale::pt_br());
    let path = manager.export(&exporter).unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    let pattern = Regex::new(r"^gestao-financeira-\d{4}-\d{2}-\d{2}\.xlsx$").unwrap();
    assert!(pattern.is_match(&name), "{name}");
    assert_eq!(name, "gestao-financeira-2024-02-14.xlsx");
    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], b"PK\x03\x04");
}

#[test]
fn export_of_empty_period_is_refused_without_a_file() {
    let base = temp_base();
    let today = date(2024, 2, 14);
    let mut manager = open_ledger(&base, today);
    manager
        .add_transaction(draft(
            date(2023, 11, 1),
            TransactionKind::Expense,
            "Rent",
            "Bank",
            "900",
        ))
        .unwrap();

    let out_dir = base.join("exports");
    let exporter = WorkbookExporter::new(out_dir.clone(), Locale::en_us());
    assert!(matches!(
        manager.export(&exporter),
        Err(LedgerError::NothingToExport)
    ));
    assert!(!out_dir.exists());
}

#[test]
fn unwritable_target_maps_to_generic_failure() {
    let base = temp_base();
    let today = date(2024, 2, 14);
    let mut manager = open_ledger(&base, today);
    manager
        .add_transaction(draft(today, TransactionKind::Expense, "Market", "Wallet", "5"))
        .unwrap();

    // A regular file where the output directory should be.
    let blocker = base.join("blocked");
    fs::write(&blocker, "not a directory").unwrap();
    let exporter = WorkbookExporter::new(blocker, Locale::en_us());
    assert!(matches!(
        manager.export(&exporter),
        Err(LedgerError::ExportFailed)
    ));
}

#[test]
fn summary_sheet_reflects_filtered_period() {
    let base = temp_base();
    let today = date(2024, 3, 5);
    let mut manager = open_ledger(&base, today);
    manager
        .add_transaction(draft(
            date(2024, 2, 1),
            TransactionKind::Income,
            "Salary",
            "Bank",
            "3000",
        ))
        .unwrap();
    manager
        .add_transaction(draft(
            date(2024, 3, 2),
            TransactionKind::Expense,
            "Transport",
            "Wallet",
            "60",
        ))
        .unwrap();
    manager.set_filter(FilterState::month(YearMonth::new(2024, 2).unwrap()));

    let visible = manager.visible_transactions();
    let document = ExportDocument::build(
        visible.iter().copied(),
        manager.summary(),
        &manager.period_label(),
        manager.locale(),
    );
    assert_eq!(document.detail.rows.len(), 2);
    assert_eq!(
        document.summary.rows[1],
        vec![
            Cell::Text("Period".into()),
            Cell::Text("February 2024".into())
        ]
    );
    assert_eq!(document.summary.rows[5][1], Cell::Number(3000.0));
}
