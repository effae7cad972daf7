use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

/// Opaque, never reused identifier assigned when a transaction is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of money flow. The sign of an entry lives here, never in its amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "income", alias = "receita")]
    Income,
    #[serde(rename = "expense", alias = "despesa")]
    Expense,
}

impl TransactionKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" | "receita" => Some(TransactionKind::Income),
            "expense" | "out" | "despesa" => Some(TransactionKind::Expense),
            _ => None,
        }
    }

    /// Applies the kind's sign to a positive magnitude.
    pub fn signed(self, magnitude: f64) -> f64 {
        match self {
            TransactionKind::Income => magnitude,
            TransactionKind::Expense => -magnitude,
        }
    }
}

/// Strictly positive, finite monetary magnitude.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidAmount(value.to_string()))
        }
    }

    /// Parses user input such as `"12.50"`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidAmount(trimmed.to_string()))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// A recorded income or expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub account: String,
    pub amount: Amount,
}

impl Transaction {
    /// Net contribution of this entry: positive for income, negative for expense.
    pub fn signed_amount(&self) -> f64 {
        self.kind.signed(self.amount.value())
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

/// Unvalidated user submission. The amount stays as raw text until validation.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub description: String,
    pub kind: TransactionKind,
    pub category: String,
    pub account: String,
    pub amount: String,
}

impl TransactionDraft {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        kind: TransactionKind,
        category: impl Into<String>,
        account: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            kind,
            category: category.into(),
            account: account.into(),
            amount: amount.into(),
        }
    }
}
