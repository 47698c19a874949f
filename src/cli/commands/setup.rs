use anyhow::Result;

use super::CommandContext;
use crate::cli::args::SetupCommand;
use crate::cli::exit_status::ExitStatus;
use crate::registry::hooks::install_pre_commit_hook;
use crate::registry::setup::run_setup;

pub fn setup(cmd: SetupCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;
    let mut prompter = ctx.prompter();

    let config = run_setup(
        &ctx.config,
        &ctx.project_root,
        &ctx.logger,
        prompter.as_mut(),
    )?;

    if config.pre_commit_hook.enabled
        && ctx.project_root.join(".git").exists()
        && prompter.confirm("Install the git pre-commit hook now?", true)?
    {
        install_pre_commit_hook(&config, &ctx.project_root, &ctx.logger)?;
        ctx.logger.success("Pre-commit hook installed");
    }

    ctx.logger.success("Setup completed successfully");
    Ok(ExitStatus::Success)
}
