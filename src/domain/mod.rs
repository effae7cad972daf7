pub mod filter;
pub mod labels;
pub mod summary;
pub mod transaction;

pub use filter::{parse_iso_date, FilterMode, FilterState, YearMonth};
pub use labels::LabelSet;
pub use summary::{CategoryTotal, CategoryTotals, Summary, TOP_CATEGORY_LIMIT};
pub use transaction::{Amount, Transaction, TransactionDraft, TransactionId, TransactionKind};
