use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::utils::build_info;

use super::{usage_error, CommandDefinition};

const CONFIG_USAGE: &str = "config <show | set <locale|currency|data_dir|export_dir> [value]>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("config", "Show or change settings", CONFIG_USAGE, cmd_config),
        CommandDefinition::new("version", "Show build information", "version", cmd_version),
        CommandDefinition::new("help", "List commands or show usage", "help [command]", cmd_help),
        CommandDefinition::new("exit", "Leave the shell", "exit", cmd_exit),
    ]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["show"] | [] => {
            let config = &context.config;
            output::section("Configuration");
            println!("locale     = {}", config.locale);
            println!(
                "currency   = {}",
                config.currency.as_deref().unwrap_or("(locale default)")
            );
            println!(
                "data_dir   = {}",
                config.data_dir(context.base_dir()).display()
            );
            println!(
                "export_dir = {}",
                config.export_dir(context.base_dir()).display()
            );
            Ok(())
        }
        ["set", key, rest @ ..] => {
            let value = rest.join(" ");
            context.config.set(key, &value)?;
            context.persist_config()?;
            output::success(format!("Setting `{key}` saved."));
            if matches!(*key, "locale" | "currency" | "data_dir") {
                output::hint("Restart the shell to apply this setting.");
            }
            Ok(())
        }
        _ => Err(usage_error(CONFIG_USAGE)),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::info(meta.summary());
    output::info(format!("rustc: {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Commands");
            for definition in context.registry.iter() {
                println!("  {:<10} {}", definition.name, definition.description);
            }
            Ok(())
        }
        [name] => {
            let definition = context.registry.get(&name.to_ascii_lowercase()).ok_or_else(|| {
                CommandError::InvalidArguments(format!("no command named `{name}`"))
            })?;
            println!("{}", definition.description);
            println!("usage: {}", definition.usage);
            Ok(())
        }
        _ => Err(usage_error("help [command]")),
    }
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
