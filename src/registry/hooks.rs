//! Git pre-commit hook installation.
//!
//! The installed hook regenerates the manifest non-interactively before
//! each commit. A marker line identifies our hook so uninstall never
//! touches a hook the user wrote themselves.

use std::fs;
use std::path::Path;

use anyhow::{Result, bail};

use crate::config::Config;
use crate::logger::Logger;

use super::entries::ensure_dir;

const HOOK_MARKER: &str = "# shadreg pre-commit hook";

fn hook_script() -> String {
    format!(
        "#!/bin/sh\n{}\n# Regenerates the registry manifest before committing.\nshadreg generate --yes || exit 1\n",
        HOOK_MARKER
    )
}

/// Install the pre-commit hook into `.git/hooks/pre-commit`.
///
/// Refuses to overwrite a hook that is not ours.
pub fn install_pre_commit_hook(
    config: &Config,
    project_root: &Path,
    logger: &Logger,
) -> Result<()> {
    let git_dir = project_root.join(".git");
    if !git_dir.exists() {
        bail!("Not a git repository (missing .git directory)");
    }

    if !config.pre_commit_hook.enabled {
        logger.warn(
            "preCommitHook.enabled is false in the configuration; the hook will run regardless once installed",
        );
    }

    let hooks_dir = git_dir.join("hooks");
    ensure_dir(&hooks_dir)?;

    let hook_path = hooks_dir.join("pre-commit");
    if hook_path.exists() {
        let existing = fs::read_to_string(&hook_path)?;
        if !existing.contains(HOOK_MARKER) {
            bail!(
                "A pre-commit hook already exists at {}; refusing to overwrite it",
                hook_path.display()
            );
        }
    }

    fs::write(&hook_path, hook_script())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&hook_path, fs::Permissions::from_mode(0o755))?;
    }

    logger.debug(&format!("Wrote hook to {}", hook_path.display()));
    Ok(())
}

/// Remove the pre-commit hook if it is ours.
///
/// Returns `false` when no hook was installed.
pub fn uninstall_pre_commit_hook(project_root: &Path, logger: &Logger) -> Result<bool> {
    let hook_path = project_root.join(".git/hooks/pre-commit");
    if !hook_path.exists() {
        logger.info("No pre-commit hook installed");
        return Ok(false);
    }

    let existing = fs::read_to_string(&hook_path)?;
    if !existing.contains(HOOK_MARKER) {
        bail!(
            "The pre-commit hook at {} was not installed by shadreg; refusing to remove it",
            hook_path.display()
        );
    }

    fs::remove_file(&hook_path)?;
    Ok(true)
}
