//! Line-oriented shell over the ledger manager.

pub mod commands;
pub mod context;
pub mod output;
mod shell;
pub mod table;

pub use context::{CliMode, CommandError, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
