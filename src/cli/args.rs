//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `generate`: Generate the registry manifest from content collections
//! - `validate`: Validate the registry configuration and component structure
//! - `setup`: Run the interactive setup wizard
//! - `install-hook`: Install the git pre-commit hook
//! - `uninstall-hook`: Uninstall the git pre-commit hook

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root directory (defaults to the current directory)
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// Answer every prompt with its default (non-interactive)
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct SetupCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct InstallHookCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct UninstallHookCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the registry manifest from content collections
    Generate(GenerateCommand),
    /// Validate the registry configuration and component structure
    Validate(ValidateCommand),
    /// Run the setup wizard to configure the registry
    Setup(SetupCommand),
    /// Install the git pre-commit hook
    InstallHook(InstallHookCommand),
    /// Uninstall the git pre-commit hook
    UninstallHook(UninstallHookCommand),
}
