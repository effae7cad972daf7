//! Period filtering and summary aggregation over transaction lists.

use crate::domain::{CategoryTotal, FilterState, Summary, Transaction};

/// Pure aggregation helpers. Nothing here mutates or reorders its input.
pub struct SummaryService;

impl SummaryService {
    /// Transactions inside the window selected by `filter`, in their original order.
    pub fn filter_by_period<'a>(
        transactions: &'a [Transaction],
        filter: &FilterState,
    ) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .collect()
    }

    /// Positions of the transactions inside the window, used to cache a filtered view.
    pub fn visible_indices(transactions: &[Transaction], filter: &FilterState) -> Vec<usize> {
        transactions
            .iter()
            .enumerate()
            .filter(|(_, txn)| filter.matches(txn))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn compute<'a, I>(transactions: I) -> Summary
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut summary = Summary::default();
        for txn in transactions {
            if txn.is_income() {
                summary.total_income += txn.amount.value();
            } else {
                summary.total_expense += txn.amount.value();
            }
            summary
                .category_totals
                .accumulate(&txn.category, txn.signed_amount());
        }
        summary.balance = summary.total_income - summary.total_expense;
        summary
    }

    /// Every category of `summary` by descending absolute net, as exported.
    pub fn category_ranking(summary: &Summary) -> Vec<&CategoryTotal> {
        summary.category_totals.ranked(None)
    }
}
