use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

use super::transaction::Transaction;

/// Calendar month used by the single-month filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(ValidationError::InvalidMonth(format!("{year}-{month}")))
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Compares the year and month fields of `date`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for YearMonth {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidMonth(value.to_string());
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    All,
    SingleMonth,
    CustomRange,
}

/// Time-window selection controlling which transactions are visible and exported.
///
/// All fields are kept regardless of `mode`, so switching modes back and forth keeps the
/// previously chosen month and range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub mode: FilterMode,
    pub selected_month: YearMonth,
    pub range_start: Option<NaiveDate>,
    pub range_end: Option<NaiveDate>,
}

impl FilterState {
    pub fn all(reference: NaiveDate) -> Self {
        Self {
            mode: FilterMode::All,
            selected_month: YearMonth::from_date(reference),
            range_start: None,
            range_end: None,
        }
    }

    pub fn month(selected_month: YearMonth) -> Self {
        Self {
            mode: FilterMode::SingleMonth,
            selected_month,
            range_start: None,
            range_end: None,
        }
    }

    pub fn range(
        selected_month: YearMonth,
        range_start: Option<NaiveDate>,
        range_end: Option<NaiveDate>,
    ) -> Self {
        Self {
            mode: FilterMode::CustomRange,
            selected_month,
            range_start,
            range_end,
        }
    }

    /// Bounds of an effective custom range. `None` when the filter is not a range or a
    /// bound is missing, in which case every transaction passes.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.mode, self.range_start, self.range_end) {
            (FilterMode::CustomRange, Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.matches_date(transaction.date)
    }

    pub fn matches_date(&self, date: NaiveDate) -> bool {
        match self.mode {
            FilterMode::All => true,
            FilterMode::SingleMonth => self.selected_month.contains(date),
            FilterMode::CustomRange => match self.bounds() {
                Some((start, end)) => start <= date && date <= end,
                None => true,
            },
        }
    }
}
