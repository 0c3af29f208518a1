use std::env;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::config::{Config, API_KEY_ENV_VARS};
use crate::currency::DigitGrouping;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change settings",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <key> <value> (keys: {})",
                    Config::KEYS.join(", ")
                )));
            }
            let key = args[1].to_ascii_lowercase();
            let value = args[2..].join(" ");
            context.config.set(&key, value.trim())?;
            if key == "context" {
                let active = context.active_context();
                context.form.set_context(active);
            }
            context.persist_config()?;
            tracing::info!(%key, "setting updated");
            io::print_success(format!("Updated `{}`.", key));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{}` (show or set)",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    let grouping = match config.currency.grouping {
        DigitGrouping::Indian => "indian",
        DigitGrouping::Western => "western",
    };
    let export_dir = config
        .report
        .export_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| "(current directory)".into());

    output_section("Configuration");
    let rows = [
        ("context", config.active_context.to_string()),
        ("currency.symbol", config.currency.symbol.clone()),
        ("currency.grouping", grouping.to_string()),
        ("advice.model", config.advice.model.clone()),
        ("advice.endpoint", config.advice.endpoint.clone()),
        ("advice.timeout", format!("{}s", config.advice.timeout_secs)),
        ("advice.api_key", credential_source(config)),
        ("report.dir", export_dir),
        ("report.tables", config.report.table_layout.to_string()),
    ];
    for (key, value) in rows {
        io::print_info(format!("  {:<18} {}", key, value));
    }
    io::print_hint(format!(
        "Stored at {}",
        context.config_manager.path().display()
    ));
}

/// Where the advice credential comes from, never the credential itself.
fn credential_source(config: &Config) -> String {
    let from_env = API_KEY_ENV_VARS.iter().find(|name| {
        env::var(name)
            .map(|value| !value.trim().is_empty())
            .unwrap_or(false)
    });
    match (from_env, &config.advice.api_key) {
        (Some(name), _) => format!("set via ${}", name),
        (None, Some(_)) => "set in config file".into(),
        (None, None) => "not set".into(),
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::core::script_context;
    use crate::ledger::Context;

    #[test]
    fn set_updates_and_persists() {
        let (mut context, _temp) = script_context();
        context
            .process_line("config set report.tables false")
            .unwrap();
        context.process_line("config set context school").unwrap();
        assert!(!context.config.report.table_layout);
        assert_eq!(context.form.context, Context::School);

        let saved = context.config_manager.load().unwrap();
        assert_eq!(saved, context.config);
    }

    #[test]
    fn unknown_key_is_reported() {
        let (mut context, _temp) = script_context();
        assert!(context.process_line("config set theme dark").is_err());
        assert!(context.process_line("config set").is_err());
    }
}
