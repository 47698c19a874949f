use anyhow::Result;

use super::CommandContext;
use crate::cli::args::GenerateCommand;
use crate::cli::exit_status::ExitStatus;
use crate::registry::generate_registry;

pub fn generate(cmd: GenerateCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;
    let mut prompter = ctx.prompter();

    generate_registry(
        &ctx.config,
        &ctx.project_root,
        &ctx.logger,
        prompter.as_mut(),
    )?;

    Ok(ExitStatus::Success)
}
