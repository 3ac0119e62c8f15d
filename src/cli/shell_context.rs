use std::path::PathBuf;

use crate::{
    config::Config,
    core::{services::PurchaseService, Clock, EditSession},
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub service: PurchaseService,
    pub session: EditSession,
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub store_dir: Option<PathBuf>,
    pub clock: Box<dyn Clock>,
    pub running: bool,
}
