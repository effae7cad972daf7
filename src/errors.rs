use thiserror::Error;

/// Reasons a user submission is rejected before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide a description")]
    EmptyDescription,
    #[error("Please select or add a category")]
    MissingCategory,
    #[error("Please select or add an account")]
    MissingAccount,
    #[error("Please provide a valid amount (got `{0}`)")]
    InvalidAmount(String),
    #[error("Label must not be empty")]
    EmptyLabel,
    #[error("Invalid month `{0}`, expected YYYY-MM")]
    InvalidMonth(String),
    #[error("Invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Failures raised by key-value storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage quota exceeded writing `{key}` ({needed} bytes, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Internal detail of a failed workbook export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Workbook error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Serde(String),
}

/// Crate-level error surfaced to callers of the ledger manager.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Persistence error: {0}")]
    Persistence(#[from] StorageError),
    #[error("Could not generate the spreadsheet file")]
    ExportFailed,
    #[error("There are no entries to export")]
    NothingToExport,
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ExportError> for LedgerError {
    fn from(err: ExportError) -> Self {
        tracing::error!(error = %err, "spreadsheet export failed");
        LedgerError::ExportFailed
    }
}

impl From<ConfigError> for LedgerError {
    fn from(err: ConfigError) -> Self {
        LedgerError::Config(err.to_string())
    }
}

/// Failures that stop the interactive shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
