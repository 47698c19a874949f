use anyhow::Result;

use super::CommandContext;
use crate::cli::args::ValidateCommand;
use crate::cli::exit_status::ExitStatus;
use crate::registry::validate_registry;

pub fn validate(cmd: ValidateCommand) -> Result<ExitStatus> {
    let ctx = CommandContext::new(&cmd.common)?;

    let report = validate_registry(&ctx.config, &ctx.project_root, &ctx.logger)?;

    for warning in &report.warnings {
        ctx.logger.warn(warning);
    }
    for error in &report.errors {
        ctx.logger.error(error);
    }

    if report.is_ok() {
        ctx.logger.success("Registry validation completed successfully");
        Ok(ExitStatus::Success)
    } else {
        ctx.logger.error(&format!(
            "Validation failed with {} error(s)",
            report.errors.len()
        ));
        Ok(ExitStatus::Failure)
    }
}
