use std::path::PathBuf;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};
use crate::domain::{parse_iso_date, FilterMode, FilterState, YearMonth};
use crate::errors::LedgerError;
use crate::export::WorkbookExporter;

use super::{usage_error, CommandDefinition};

const FILTER_USAGE: &str = "filter [all | month <YYYY-MM> | range <start|-> <end|->]";
const EXPORT_USAGE: &str = "export [directory]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "summary",
            "Totals and top categories for the current period",
            "summary",
            cmd_summary,
        ),
        CommandDefinition::new(
            "filter",
            "Show or change the period filter",
            FILTER_USAGE,
            cmd_filter,
        ),
        CommandDefinition::new(
            "export",
            "Write the current period to a spreadsheet",
            EXPORT_USAGE,
            cmd_export,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let manager = &context.manager;
    let locale = manager.locale();
    let summary = manager.summary();

    output::section(manager.period_label());
    let mut totals = Table::new(vec![TableColumn::left("Total"), TableColumn::right("Amount")]);
    let catalog = locale.catalog();
    totals.push(vec![
        catalog.total_income.to_string(),
        locale.format_currency(summary.total_income),
    ]);
    totals.push(vec![
        catalog.total_expense.to_string(),
        locale.format_currency(summary.total_expense),
    ]);
    totals.push(vec![
        catalog.balance.to_string(),
        output::signed_amount(
            locale.format_currency(summary.balance),
            summary.balance >= 0.0,
        ),
    ]);
    println!("{}", totals.render());

    let top = manager.top_categories();
    if top.is_empty() {
        return Ok(());
    }
    output::section(catalog.by_category);
    let mut ranking = Table::new(vec![
        TableColumn::left("Category").max_width(24),
        TableColumn::right("Net"),
    ]);
    for entry in top {
        ranking.push(vec![
            entry.category.clone(),
            output::signed_amount(locale.format_currency(entry.net), entry.net >= 0.0),
        ]);
    }
    println!("{}", ranking.render());
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let current = context.manager.filter().clone();
    let next = match args {
        [] => {
            output::info(format!("Current period: {}", context.manager.period_label()));
            return Ok(());
        }
        ["all"] => FilterState {
            mode: FilterMode::All,
            ..current
        },
        ["month"] => FilterState::month(YearMonth::from_date(context.manager.today())),
        ["month", month] => {
            FilterState::month(month.parse::<YearMonth>().map_err(LedgerError::from)?)
        }
        ["range", start, end] => FilterState::range(
            current.selected_month,
            optional_date(start)?,
            optional_date(end)?,
        ),
        _ => return Err(usage_error(FILTER_USAGE)),
    };
    context.manager.set_filter(next);
    output::success(format!("Period: {}", context.manager.period_label()));
    Ok(())
}

/// `-` leaves a range bound unset.
fn optional_date(raw: &str) -> Result<Option<chrono::NaiveDate>, CommandError> {
    if raw == "-" {
        return Ok(None);
    }
    parse_iso_date(raw)
        .map(Some)
        .map_err(|err| CommandError::Ledger(err.into()))
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let dir = match args {
        [] => context.config.export_dir(context.base_dir()),
        [dir] => PathBuf::from(dir),
        _ => return Err(usage_error(EXPORT_USAGE)),
    };
    let exporter = WorkbookExporter::new(dir, context.manager.locale().clone());
    let path = context.manager.export(&exporter)?;
    output::success(format!("Spreadsheet written to {}", path.display()));
    Ok(())
}
