use anyhow::Result;

use crate::CliTest;

#[test]
fn test_install_and_uninstall_hook() -> Result<()> {
    let test = CliTest::new()?;
    std::fs::create_dir_all(test.root().join(".git"))?;

    let output = test.command().arg("install-hook").output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let hook = test.read_file(".git/hooks/pre-commit")?;
    assert!(hook.contains("shadreg generate --yes"));

    let output = test.command().arg("uninstall-hook").output()?;
    assert!(output.status.success());
    assert!(!test.root().join(".git/hooks/pre-commit").exists());

    Ok(())
}

#[test]
fn test_install_hook_outside_git_repo_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("install-hook").output()?;
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("git repository"));

    Ok(())
}

#[test]
fn test_install_hook_preserves_foreign_hook() -> Result<()> {
    let test = CliTest::new()?;
    std::fs::create_dir_all(test.root().join(".git/hooks"))?;
    test.write_file(".git/hooks/pre-commit", "#!/bin/sh\necho mine\n")?;

    let output = test.command().arg("install-hook").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(test.read_file(".git/hooks/pre-commit")?.contains("echo mine"));

    Ok(())
}
