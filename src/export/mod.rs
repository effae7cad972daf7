//! Two-sheet spreadsheet export of a filtered transaction set.

pub mod workbook;

use crate::core::services::SummaryService;
use crate::domain::{Summary, Transaction};
use crate::locale::Locale;

pub use workbook::WorkbookExporter;

const DETAIL_COLUMN_WIDTHS: [f64; 6] = [12.0, 30.0, 10.0, 20.0, 20.0, 15.0];
const SUMMARY_COLUMN_WIDTHS: [f64; 2] = [30.0, 20.0];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Blank,
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub column_widths: Vec<f64>,
    /// First row is the header.
    pub rows: Vec<Vec<Cell>>,
}

/// Spreadsheet content independent of the file format that stores it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub detail: Sheet,
    pub summary: Sheet,
}

impl ExportDocument {
    pub fn build<'a, I>(
        transactions: I,
        summary: &Summary,
        period_label: &str,
        locale: &Locale,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        Self {
            detail: detail_sheet(transactions, locale),
            summary: summary_sheet(summary, period_label, locale),
        }
    }
}

fn detail_sheet<'a, I>(transactions: I, locale: &Locale) -> Sheet
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let catalog = locale.catalog();
    let mut rows = vec![catalog
        .detail_headers
        .iter()
        .map(|header| Cell::text(*header))
        .collect::<Vec<_>>()];
    rows.extend(transactions.into_iter().map(|txn| {
        vec![
            Cell::text(locale.format_date(txn.date)),
            Cell::text(txn.description.as_str()),
            Cell::text(locale.kind_label(txn.kind)),
            Cell::text(txn.category.as_str()),
            Cell::text(txn.account.as_str()),
            Cell::Number(txn.amount.value()),
        ]
    }));
    Sheet {
        name: catalog.detail_sheet.to_string(),
        column_widths: DETAIL_COLUMN_WIDTHS.to_vec(),
        rows,
    }
}

fn summary_sheet(summary: &Summary, period_label: &str, locale: &Locale) -> Sheet {
    let catalog = locale.catalog();
    let blank = || vec![Cell::Blank, Cell::Blank];
    let mut rows = vec![
        vec![Cell::text(catalog.field_header), Cell::text(catalog.value_header)],
        vec![Cell::text(catalog.period), Cell::text(period_label)],
        blank(),
        vec![
            Cell::text(catalog.total_income),
            Cell::Number(summary.total_income),
        ],
        vec![
            Cell::text(catalog.total_expense),
            Cell::Number(summary.total_expense),
        ],
        vec![Cell::text(catalog.balance), Cell::Number(summary.balance)],
        blank(),
        vec![Cell::text(catalog.by_category), Cell::Blank],
    ];
    rows.extend(
        SummaryService::category_ranking(summary)
            .into_iter()
            .map(|entry| vec![Cell::text(entry.category.as_str()), Cell::Number(entry.net)]),
    );
    Sheet {
        name: catalog.summary_sheet.to_string(),
        column_widths: SUMMARY_COLUMN_WIDTHS.to_vec(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amount, TransactionId, TransactionKind};
    use chrono::NaiveDate;

    fn txn(kind: TransactionKind, category: &str, amount: f64) -> Transaction {
        Transaction {
            id: TransactionId::generate(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            description: format!("{category} entry"),
            kind,
            category: category.into(),
            account: "Wallet".into(),
            amount: Amount::new(amount).unwrap(),
        }
    }

    #[test]
    fn detail_sheet_has_header_and_unsigned_amounts() {
        let transactions = vec![
            txn(TransactionKind::Expense, "Market", 300.0),
            txn(TransactionKind::Income, "Salary", 1000.0),
        ];
        let summary = SummaryService::compute(&transactions);
        let locale = Locale::pt_br();
        let doc = ExportDocument::build(&transactions, &summary, "janeiro de 2024", &locale);

        assert_eq!(doc.detail.name, "Lançamentos");
        assert_eq!(doc.detail.rows.len(), 3);
        assert_eq!(doc.detail.rows[0][0], Cell::text("Data"));
        assert_eq!(
            doc.detail.rows[1],
            vec![
                Cell::text("15/01/2024"),
                Cell::text("Market entry"),
                Cell::text("Despesa"),
                Cell::text("Market"),
                Cell::text("Wallet"),
                Cell::Number(300.0),
            ]
        );
    }

    #[test]
    fn summary_sheet_lists_every_category_by_magnitude() {
        let mut transactions = vec![txn(TransactionKind::Income, "Salary", 5000.0)];
        for idx in 0..12 {
            transactions.push(txn(
                TransactionKind::Expense,
                &format!("cat-{idx}"),
                10.0 + idx as f64,
            ));
        }
        let summary = SummaryService::compute(&transactions);
        let doc = ExportDocument::build(&transactions, &summary, "All entries", &Locale::en_us());

        let rows = &doc.summary.rows;
        assert_eq!(rows[1], vec![Cell::text("Period"), Cell::text("All entries")]);
        assert_eq!(rows[2], vec![Cell::Blank, Cell::Blank]);
        assert_eq!(rows[5][0], Cell::text("Balance"));
        assert_eq!(rows[7][0], Cell::text("By category"));
        let ranked = &rows[8..];
        assert_eq!(ranked.len(), 13);
        assert_eq!(ranked[0][0], Cell::text("Salary"));
        assert_eq!(ranked[1], vec![Cell::text("cat-11"), Cell::Number(-21.0)]);
    }
}
