use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::table::{Table, TableColumn};
use crate::domain::{parse_iso_date, Transaction, TransactionDraft, TransactionId, TransactionKind};

use super::{usage_error, CommandDefinition};

const ADD_USAGE: &str =
    "add <income|expense> <amount> <category> <account> <description> [YYYY-MM-DD]";
const DELETE_USAGE: &str = "delete <id>";
const SHORT_ID_LEN: usize = 8;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandDefinition::new(
            "delete",
            "Remove an entry by id or unique id prefix",
            DELETE_USAGE,
            cmd_delete,
        ),
        CommandDefinition::new("list", "Show entries in the current period", "list", cmd_list),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, amount, category, account, description, rest @ ..] = args else {
        return Err(usage_error(ADD_USAGE));
    };
    let kind = TransactionKind::parse(kind).ok_or_else(|| {
        CommandError::InvalidArguments(format!("unknown entry type `{kind}`, use income or expense"))
    })?;
    let date = match rest {
        [] => context.manager.today(),
        [date] => parse_iso_date(date).map_err(|err| CommandError::Ledger(err.into()))?,
        _ => return Err(usage_error(ADD_USAGE)),
    };

    let draft = TransactionDraft::new(date, *description, kind, *category, *account, *amount);
    let id = context.manager.add_transaction(draft)?;
    context.report_persistence();

    let category = category.trim();
    if !category.is_empty() && context.manager.add_category(category)? {
        output::info(format!("Category `{category}` added to the list."));
    }
    let account = account.trim();
    if !account.is_empty() && context.manager.add_account(account)? {
        output::info(format!("Account `{account}` added to the list."));
    }
    output::success(format!("Entry {} recorded.", short_id(&id)));
    if !context.manager.filter().matches_date(date) {
        output::hint("The new entry is outside the current period filter.");
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [needle] = args else {
        return Err(usage_error(DELETE_USAGE));
    };
    let id = resolve_id(context.manager.transactions(), needle)?;
    if context.manager.delete_transaction(&id) {
        context.report_persistence();
        output::success(format!("Entry {} deleted.", short_id(&id)));
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let manager = &context.manager;
    let visible = manager.visible_transactions();
    output::section(manager.period_label());
    if visible.is_empty() {
        output::info("No entries in this period.");
        return Ok(());
    }

    let locale = manager.locale();
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Type"),
        TableColumn::left("Category").max_width(18),
        TableColumn::left("Account").max_width(18),
        TableColumn::right("Amount"),
        TableColumn::left("Description").max_width(32),
    ]);
    for txn in visible {
        let amount = locale.format_currency(txn.signed_amount());
        table.push(vec![
            short_id(&txn.id).to_string(),
            locale.format_date(txn.date),
            locale.kind_label(txn.kind).to_string(),
            txn.category.clone(),
            txn.account.clone(),
            output::signed_amount(amount, txn.is_income()),
            txn.description.clone(),
        ]);
    }
    println!("{}", table.render());
    Ok(())
}

fn short_id(id: &TransactionId) -> &str {
    let raw = id.as_str();
    raw.get(..SHORT_ID_LEN).unwrap_or(raw)
}

/// Resolves a full id or an unambiguous prefix of one.
fn resolve_id(transactions: &[Transaction], needle: &str) -> Result<TransactionId, CommandError> {
    if let Some(txn) = transactions.iter().find(|txn| txn.id.as_str() == needle) {
        return Ok(txn.id.clone());
    }
    let mut matches = transactions
        .iter()
        .filter(|txn| txn.id.as_str().starts_with(needle));
    match (matches.next(), matches.next()) {
        (Some(txn), None) => Ok(txn.id.clone()),
        (Some(_), Some(_)) => Err(CommandError::InvalidArguments(format!(
            "id prefix `{needle}` matches several entries"
        ))),
        (None, _) => Err(CommandError::InvalidArguments(format!(
            "no entry with id `{needle}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Amount;
    use chrono::NaiveDate;

    fn txn(id: &str) -> Transaction {
        Transaction {
            id: TransactionId::from(id),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            description: "entry".into(),
            kind: TransactionKind::Expense,
            category: "Other".into(),
            account: "Wallet".into(),
            amount: Amount::new(1.0).unwrap(),
        }
    }

    #[test]
    fn resolves_exact_and_unique_prefix_ids() {
        let list = vec![txn("abc123"), txn("abd456"), txn("ab")];
        assert_eq!(resolve_id(&list, "ab").unwrap().as_str(), "ab");
        assert_eq!(resolve_id(&list, "abd").unwrap().as_str(), "abd456");
        assert!(resolve_id(&list, "a").is_err());
        assert!(resolve_id(&list, "zzz").is_err());
    }

    #[test]
    fn short_id_handles_short_values() {
        assert_eq!(short_id(&TransactionId::from("abc")), "abc");
        assert_eq!(short_id(&TransactionId::from("0123456789")), "01234567");
    }
}
