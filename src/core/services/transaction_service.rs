//! Business logic helpers for creating and removing transactions.

use crate::domain::{Amount, Transaction, TransactionDraft, TransactionId};
use crate::errors::ValidationError;

use super::ServiceResult;

/// Validates drafts and applies list mutations on the canonical transaction list.
pub struct TransactionService;

impl TransactionService {
    /// Checks a draft and builds the transaction it describes, with a fresh id.
    ///
    /// Rules are checked in order: description, category, account, amount. The first
    /// violation is returned.
    pub fn create(draft: TransactionDraft) -> ServiceResult<Transaction> {
        let description = draft.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        let category = draft.category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        let account = draft.account.trim();
        if account.is_empty() {
            return Err(ValidationError::MissingAccount);
        }
        let amount = Amount::parse(&draft.amount)?;

        Ok(Transaction {
            id: TransactionId::generate(),
            date: draft.date,
            description: description.to_string(),
            kind: draft.kind,
            category: category.to_string(),
            account: account.to_string(),
            amount,
        })
    }

    /// Inserts at the front, keeping the list most-recent-first.
    pub fn prepend(transactions: &mut Vec<Transaction>, transaction: Transaction) {
        transactions.insert(0, transaction);
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    pub fn remove(transactions: &mut Vec<Transaction>, id: &TransactionId) -> Option<Transaction> {
        let position = transactions.iter().position(|txn| &txn.id == id)?;
        Some(transactions.remove(position))
    }
}
