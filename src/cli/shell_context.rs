use std::path::PathBuf;

use chrono::Local;
use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::{services::TransactionService, utils::app_data_dir, TransactionStore},
    errors::CliError,
    ledger::{Context, Transaction},
    storage::JsonStorage,
};

use super::{commands, forms::TransactionForm, io as cli_io, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can read or mutate.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: TransactionStore,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub form: TransactionForm,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, app_data_dir())
    }

    /// Builds a shell whose data and configuration live under `base`.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let storage = JsonStorage::new(Some(base.clone()))?;
        let store = TransactionStore::load(Box::new(storage));
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable configuration");
                cli_io::print_warning(format!(
                    "Configuration at {} could not be read; using defaults.",
                    config_manager.path().display()
                ));
                Config::default()
            }
        };
        let form = TransactionForm::new(config.active_context, Local::now().date_naive());

        Ok(Self {
            mode,
            registry,
            store,
            config_manager,
            config,
            form,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    pub fn active_context(&self) -> Context {
        self.config.active_context
    }

    /// Transactions of the active context, newest first.
    pub fn listing(&self) -> Vec<&Transaction> {
        TransactionService::for_context(self.store.transactions(), self.active_context())
    }

    pub fn prompt(&self) -> String {
        format!("rupeewise [{}]> ", self.active_context())
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }
}
