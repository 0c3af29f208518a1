use crate::{
    cli::{
        core::{CommandError, CommandResult, ShellContext},
        io,
        registry::CommandEntry,
    },
    ledger::Context,
};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "context",
        "Show or switch the active context",
        "context [home|school]",
        cmd_context,
    )]
}

fn cmd_context(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let active = context.active_context();
    match args {
        [] => {
            io::print_info(format!("Active context: {}", active));
            let others: Vec<&str> = Context::ALL
                .iter()
                .filter(|candidate| **candidate != active)
                .map(|candidate| candidate.label())
                .collect();
            io::print_hint(format!(
                "Switch with `context <name>`; also available: {}.",
                others.join(", ")
            ));
            Ok(())
        }
        [name] => {
            let next = name
                .parse::<Context>()
                .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
            if next == active {
                io::print_info(format!("Already in the {} context.", next));
                return Ok(());
            }
            context.config.active_context = next;
            context.form.set_context(next);
            context.persist_config()?;
            tracing::info!(context = %next, "active context switched");
            io::print_success(format!("Switched to the {} context.", next));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: context [home|school]".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::core::{script_context, CliMode, ShellContext};
    use crate::ledger::Context;

    #[test]
    fn switch_is_remembered_in_config() {
        let (mut context, temp) = script_context();
        context.process_line("context SCHOOL").unwrap();
        assert_eq!(context.active_context(), Context::School);
        assert_eq!(context.form.context, Context::School);

        let reopened =
            ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf()).unwrap();
        assert_eq!(reopened.active_context(), Context::School);
    }

    #[test]
    fn unknown_context_is_rejected() {
        let (mut context, _temp) = script_context();
        assert!(context.process_line("context office").is_err());
        assert_eq!(context.active_context(), Context::Home);
    }
}
