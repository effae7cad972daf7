use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::output;
use crate::domain::LabelSet;

use super::{usage_error, CommandDefinition};

const CATEGORY_USAGE: &str = "category <add <name> | list>";
const ACCOUNT_USAGE: &str = "account <add <name> | list>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "category",
            "Add or list categories",
            CATEGORY_USAGE,
            cmd_category,
        ),
        CommandDefinition::new("account", "Add or list accounts", ACCOUNT_USAGE, cmd_account),
    ]
}

#[derive(Clone, Copy)]
enum LabelKind {
    Category,
    Account,
}

impl LabelKind {
    fn noun(self) -> &'static str {
        match self {
            LabelKind::Category => "Category",
            LabelKind::Account => "Account",
        }
    }

    fn usage(self) -> &'static str {
        match self {
            LabelKind::Category => CATEGORY_USAGE,
            LabelKind::Account => ACCOUNT_USAGE,
        }
    }
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    handle(context, args, LabelKind::Category)
}

fn cmd_account(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    handle(context, args, LabelKind::Account)
}

fn handle(context: &mut ShellContext, args: &[&str], kind: LabelKind) -> CommandResult {
    match args {
        ["list"] | [] => {
            let labels = match kind {
                LabelKind::Category => context.manager.categories(),
                LabelKind::Account => context.manager.accounts(),
            };
            print_labels(kind, labels);
            Ok(())
        }
        ["add", words @ ..] if !words.is_empty() => {
            let label = words.join(" ");
            let added = match kind {
                LabelKind::Category => context.manager.add_category(&label)?,
                LabelKind::Account => context.manager.add_account(&label)?,
            };
            if added {
                context.report_persistence();
                output::success(format!("{} `{}` added.", kind.noun(), label.trim()));
            } else {
                output::info(format!("{} `{}` already exists.", kind.noun(), label.trim()));
            }
            Ok(())
        }
        _ => Err(usage_error(kind.usage())),
    }
}

fn print_labels(kind: LabelKind, labels: &LabelSet) {
    output::section(format!("{} list", kind.noun()));
    for (idx, label) in labels.iter().enumerate() {
        println!("{:>3}. {}", idx + 1, label);
    }
}
