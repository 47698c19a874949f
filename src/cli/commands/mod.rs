use std::path::PathBuf;

use anyhow::Result;

use crate::config::{Config, load_config};
use crate::logger::Logger;
use crate::prompt::{AutoPrompter, ConsolePrompter, Prompter};

use super::args::CommonArgs;

pub mod generate;
pub mod hook;
pub mod setup;
pub mod validate;

/// Shared command setup: logger, project root, loaded configuration.
pub struct CommandContext {
    pub config: Config,
    pub project_root: PathBuf,
    pub logger: Logger,
    yes: bool,
}

impl CommandContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let logger = Logger::new(common.verbose);
        let project_root = common
            .project_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let load_result = load_config(&project_root)?;
        if common.verbose && !load_result.from_file {
            logger.info("No .shadregrc.json found, using default configuration");
        }

        Ok(Self {
            config: load_result.config,
            project_root,
            logger,
            yes: common.yes,
        })
    }

    /// Console prompter normally, defaults-only prompter under `--yes`.
    pub fn prompter(&self) -> Box<dyn Prompter> {
        if self.yes {
            Box::new(AutoPrompter)
        } else {
            Box::new(ConsolePrompter)
        }
    }
}
