//! Core CLI loop, dispatch, and shell context helpers.

use std::io;

use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    core::{
        services::{PurchaseService, ServiceError},
        Clock, EditSession, SystemClock,
    },
    errors::LedgerError,
    storage::{JsonFileStore, PurchaseStore},
};

pub use crate::errors::CliError;

use super::commands;
use super::formatters;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    /// Builds a context backed by the on-disk configuration and JSON store.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load_or_init()?;
        let store_dir = config_manager.store_dir();
        let backend = JsonFileStore::new(store_dir.clone())?;
        let store = PurchaseStore::with_key(Box::new(backend), config.storage_key.clone());
        let service = PurchaseService::new(store, config.exchange_rate)
            .with_month_scope(config.month_scope);

        let mut context = Self::with_parts(mode, service, config, Box::new(SystemClock));
        context.config_path = Some(config_manager.path().to_path_buf());
        context.store_dir = Some(store_dir);
        Ok(context)
    }

    pub fn with_parts(
        mode: CliMode,
        service: PurchaseService,
        config: Config,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled,
        });

        ShellContext {
            mode,
            registry,
            service,
            session: EditSession::Idle,
            config,
            config_path: None,
            store_dir: None,
            clock,
            running: true,
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        match self.service.editing_index(&self.session) {
            Some(index) => format!("earning-ledger [editing #{}]> ", index + 1),
            None => "earning-ledger> ".to_string(),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
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

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match super::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &input.to_lowercase()), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(CommandError::from)
    }

    /// Prints the purchase table followed by the four summary figures.
    pub(crate) fn render_ledger(&self) {
        let purchases = self.service.list();
        let editing = self.service.editing_index(&self.session);
        output::section("Purchases");
        if purchases.is_empty() {
            output::info("No purchases recorded yet.");
        } else {
            output::block(&formatters::purchase_table(&purchases, editing).render());
        }
        self.render_summary();
    }

    pub(crate) fn render_summary(&self) {
        let summary = self.service.summarize(self.clock.today());
        output::section("Summary");
        output::block(&formatters::summary_block(&summary));
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Service(ServiceError::Validation(err)) => {
                output::error(err);
            }
            CommandError::Service(ServiceError::Ledger(LedgerError::IndexOutOfRange {
                index,
                len,
            })) => {
                output::warning(format!(
                    "Row {} does not exist ({} purchases listed). Nothing changed.",
                    index + 1,
                    len
                ));
            }
            CommandError::Service(ServiceError::Ledger(LedgerError::PurchaseNotFound(_))) => {
                output::warning(
                    "The purchase being edited no longer exists. Edit cancelled, nothing changed.",
                );
            }
            other => output::error(other),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<LedgerError> for CommandError {
    fn from(err: LedgerError) -> Self {
        CommandError::Service(ServiceError::Ledger(err))
    }
}

/// Parses a 1-based row number as shown in the purchase table into an index.
pub(crate) fn parse_row(input: &str) -> Result<usize, CommandError> {
    match input.trim().parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "invalid row `{}` (use the number shown in the `#` column)",
            input
        ))),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Local, NaiveDate, TimeZone};

    use super::*;
    use crate::storage::MemoryStore;

    pub(crate) struct FixedClock(pub NaiveDate);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            let noon = self.0.and_hms_opt(12, 0, 0).expect("valid time");
            Local
                .from_local_datetime(&noon)
                .earliest()
                .expect("representable local time")
        }

        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    pub(crate) fn script_context(today: NaiveDate) -> ShellContext {
        let config = Config {
            ui_color_enabled: false,
            ..Config::default()
        };
        let store = PurchaseStore::new(Box::new(MemoryStore::new()));
        let service = PurchaseService::new(store, config.exchange_rate);
        ShellContext::with_parts(CliMode::Script, service, config, Box::new(FixedClock(today)))
    }

    pub(crate) fn run_lines(context: &mut ShellContext, lines: &[&str]) {
        for line in lines {
            match context.process_line(line) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => context.report_error(err),
            }
        }
    }
}
