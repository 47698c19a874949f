use anyhow::Result;

use crate::CliTest;

#[test]
fn test_validate_passes_on_valid_project() -> Result<()> {
    let test = CliTest::with_button_project()?;

    let output = test.validate_command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(())
}

#[test]
fn test_validate_fails_on_missing_source_file() -> Result<()> {
    let test = CliTest::with_button_project()?;
    std::fs::remove_file(test.root().join("src/registry/ui/button.tsx"))?;

    let output = test.validate_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("non-existent file"));

    Ok(())
}

#[test]
fn test_validate_fails_when_no_content_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/registry/.keep", "")?;
    std::fs::create_dir_all(test.root().join("src/content"))?;

    let output = test.validate_command().output()?;
    assert_eq!(output.status.code(), Some(1));

    Ok(())
}

#[test]
fn test_validate_warns_on_undeclared_dependency() -> Result<()> {
    let test = CliTest::with_button_project()?;
    test.write_file(
        "src/registry/ui/button.tsx",
        "import React from \"react\";\nexport function Button() { return null; }\n",
    )?;

    let output = test.validate_command().output()?;
    // Warnings do not fail validation
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("missing package dependency: react"));

    Ok(())
}
