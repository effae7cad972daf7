pub mod label_service;
pub mod summary_service;
pub mod transaction_service;

pub use label_service::LabelService;
pub use summary_service::SummaryService;
pub use transaction_service::TransactionService;

use crate::errors::ValidationError;

pub type ServiceResult<T> = Result<T, ValidationError>;
