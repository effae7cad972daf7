#![doc(test(attr(deny(warnings))))]

//! Finance Core tracks personal income and expense entries, derives period summaries,
//! and exports filtered views as spreadsheets.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod export;
pub mod locale;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use crate::core::LedgerManager;
pub use crate::errors::{LedgerError, Result};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
