use crate::cli::core::{parse_row, CommandError, CommandResult, ShellContext};
use crate::cli::formatters::two_column;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::SaveOutcome;
use crate::ledger::PurchaseForm;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Save a purchase (updates the edited row while editing)",
            "add <date YYYY-MM-DD> <purchase USD> <earning USD>",
            cmd_save,
        ),
        CommandEntry::new(
            "update",
            "Alias of `add`",
            "update <date YYYY-MM-DD> <purchase USD> <earning USD>",
            cmd_save,
        ),
        CommandEntry::new(
            "edit",
            "Load a row into the form for editing",
            "edit <row>",
            cmd_edit,
        ),
        CommandEntry::new("cancel", "Abandon the current edit", "cancel", cmd_cancel),
        CommandEntry::new("delete", "Delete a row", "delete <row>", cmd_delete),
        CommandEntry::new(
            "list",
            "Show purchases and the summary",
            "list",
            cmd_list,
        ),
        CommandEntry::new(
            "summary",
            "Show the summary figures only",
            "summary",
            cmd_summary,
        ),
    ]
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() > 3 {
        return Err(CommandError::InvalidArguments(
            "usage: add <date YYYY-MM-DD> <purchase USD> <earning USD>".into(),
        ));
    }
    let field = |idx: usize| args.get(idx).copied().unwrap_or("");
    let form = PurchaseForm::new(field(0), field(1), field(2));

    let (_, outcome) = context.service.add_or_update(&form, &mut context.session)?;
    match outcome {
        SaveOutcome::Added => output::success("Purchase added."),
        SaveOutcome::Updated => output::success("Purchase updated."),
    }
    context.render_ledger();
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let row = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: edit <row>".into()))?;
    let index = parse_row(row)?;
    let form = context.service.begin_edit(index, &mut context.session)?;

    output::section(format!("Editing row #{}", index + 1));
    output::block(&two_column(&[
        ("Date", form.date),
        ("Purchase (USD)", form.purchase_amount),
        ("Earning (USD)", form.earning_amount),
    ]));
    output::hint("Run `update <date> <purchase> <earning>` to save, or `cancel`.");
    Ok(())
}

fn cmd_cancel(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.session.is_editing() {
        context.service.cancel_edit(&mut context.session);
        output::info("Edit cancelled.");
    } else {
        output::info("No edit in progress.");
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let row = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: delete <row>".into()))?;
    let index = parse_row(row)?;
    if !context.confirm(&format!("Delete row #{}?", index + 1))? {
        output::info("Operation cancelled.");
        return Ok(());
    }

    let removed = context.service.delete(index, &mut context.session)?;
    output::success(format!("Deleted purchase dated {}.", removed.date));
    context.render_ledger();
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.render_ledger();
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.render_summary();
    Ok(())
}
