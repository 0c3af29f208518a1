//! Dispatch, error reporting and confirmation helpers for the shell.

use std::io;

use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::{
    config::ConfigError,
    core::services::ServiceError,
    errors::{CliError, LedgerError},
    report::ReportError,
};

use super::io as cli_io;
pub use super::shell_context::{CliMode, ShellContext};

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Ledger(err) => CommandError::Core(err),
            ServiceError::NotFound(reference) => {
                CommandError::Message(format!("Transaction not found: {reference}"))
            }
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            tracing::debug!(command, args = args.len(), "dispatching command");
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                cli_io::print_info(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit RupeeWise?", true).map_err(CliError::from)
    }

    /// Asks before a destructive action.
    ///
    /// Script mode never prompts; it requires `assume_yes` instead.
    pub(crate) fn confirm_destructive(
        &self,
        prompt: &str,
        assume_yes: bool,
    ) -> Result<bool, CommandError> {
        if assume_yes {
            return Ok(true);
        }
        match self.mode {
            CliMode::Script => Err(CommandError::InvalidArguments(
                "confirmation required; rerun with --yes".into(),
            )),
            CliMode::Interactive => cli_io::confirm_action(&self.theme, prompt, false),
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                tracing::warn!(error = %other, "command failed");
                cli_io::print_error(other);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn script_context() -> (ShellContext, tempfile::TempDir) {
    let temp = tempfile::TempDir::new().expect("temp dir");
    let context = ShellContext::with_base_dir(CliMode::Script, temp.path().to_path_buf())
        .expect("shell context");
    (context, temp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_continues() {
        let (mut context, _temp) = script_context();
        assert_eq!(
            context.process_line("sumary").unwrap(),
            LoopControl::Continue
        );
    }

    #[test]
    fn exit_stops_loop() {
        let (mut context, _temp) = script_context();
        assert_eq!(context.process_line("EXIT").unwrap(), LoopControl::Exit);
    }

    #[test]
    fn script_mode_requires_explicit_confirmation() {
        let (context, _temp) = script_context();
        assert!(matches!(
            context.confirm_destructive("Delete?", false),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(context.confirm_destructive("Delete?", true).unwrap());
    }

    #[test]
    fn unbalanced_quotes_are_a_warning_not_an_error() {
        let (mut context, _temp) = script_context();
        assert_eq!(
            context.process_line("add expense \"10").unwrap(),
            LoopControl::Continue
        );
        assert!(context.store.is_empty());
    }
}
