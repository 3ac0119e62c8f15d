use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatters::two_column;
use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::ledger::MonthScope;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "config",
            "Show the effective configuration",
            "config",
            cmd_config,
        ),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_config(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let config = &context.config;
    let scope = match config.month_scope {
        MonthScope::CalendarMonth => "calendar_month",
        MonthScope::MonthOnly => "month_only",
    };
    let location = |path: Option<&std::path::PathBuf>| {
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(in memory)".into())
    };

    output::section("Configuration");
    output::block(&two_column(&[
        ("Exchange rate (USD->EUR)", config.exchange_rate.to_string()),
        ("Month scope", scope.to_string()),
        ("Colored output", config.ui_color_enabled.to_string()),
        ("Storage key", config.storage_key.clone()),
        ("Config file", location(context.config_path.as_ref())),
        ("Store directory", location(context.store_dir.as_ref())),
    ]));
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Earning Ledger {}", meta.version));
    output::block(&two_column(&[
        ("Build hash", meta.git_hash.to_string()),
        ("Built at", meta.timestamp.to_string()),
        ("Target", meta.target.to_string()),
        ("Profile", meta.profile.to_string()),
        ("Rustc", meta.rustc.to_string()),
    ]));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => {
                output::section(format!("Help: {}", entry.name));
                output::info(format!("Description: {}", entry.description));
                output::info(format!("Usage: {}", entry.usage));
            }
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    print_overview(&context.registry);
    Ok(())
}

fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    for entry in registry.list() {
        output::block(&format!("  {:<10} {}", entry.name, entry.description));
    }
    output::hint("Rows are numbered as in the `#` column of `list`.");
    output::hint("Use `help <command>` for details.");
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::cli::core::test_support::{run_lines, script_context};

    #[test]
    fn informational_commands_do_not_touch_state() {
        let mut context = script_context(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap());
        run_lines(
            &mut context,
            &["help", "help add", "help nope", "config", "version", "summary"],
        );
        assert!(context.running);
        assert!(context.service.list().is_empty());
    }
}
