use anyhow::Result;

pub mod args;
pub mod commands;
mod exit_status;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Generate(cmd)) => commands::generate::generate(cmd),
        Some(Command::Validate(cmd)) => commands::validate::validate(cmd),
        Some(Command::Setup(cmd)) => commands::setup::setup(cmd),
        Some(Command::InstallHook(cmd)) => commands::hook::install(cmd),
        Some(Command::UninstallHook(cmd)) => commands::hook::uninstall(cmd),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
