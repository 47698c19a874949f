use anyhow::Result;

use super::CommandContext;
use crate::cli::args::{InstallHookCommand, UninstallHookCommand};
use crate::cli::exit_status::ExitStatus;
use crate::registry::hooks::{install_pre_commit_hook, uninstall_pre_commit_hook};

pub fn install(cmd: InstallHookCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;

    install_pre_commit_hook(&ctx.config, &ctx.project_root, &ctx.logger)?;
    ctx.logger.success("Pre-commit hook installed successfully");
    Ok(ExitStatus::Success)
}

pub fn uninstall(cmd: UninstallHookCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;

    if uninstall_pre_commit_hook(&ctx.project_root, &ctx.logger)? {
        ctx.logger.success("Pre-commit hook uninstalled successfully");
    }
    Ok(ExitStatus::Success)
}
