use anyhow::Result;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_generate_writes_manifest() -> Result<()> {
    let test = CliTest::with_button_project()?;

    let output = test.generate_command().output()?;
    assert!(
        output.status.success(),
        "generate should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let manifest: Value = serde_json::from_str(&test.read_file("registry.json")?)?;
    assert_eq!(
        manifest["$schema"],
        "https://ui.shadcn.com/schema/registry.json"
    );
    assert_eq!(manifest["name"], "my-registry");
    assert_eq!(manifest["items"][0]["name"], "button");
    assert_eq!(manifest["items"][0]["type"], "registry:ui");
    assert_eq!(manifest["items"][0]["docs"], "https://mycomponents.com/button");

    Ok(())
}

#[test]
fn test_generate_resolves_internal_dependency() -> Result<()> {
    let test = CliTest::with_button_project()?;
    test.write_file(
        "src/registry/ui/button.tsx",
        "import { Card } from \"../card\";\nimport React from \"react\";\nexport function Button() { return null; }\n",
    )?;
    test.write_file(
        "src/content/ui/card.mdx",
        r#"---
type: registry:ui
title: Card
description: A card surface.
language: react
files:
  - path: src/registry/ui/card.tsx
    type: registry:ui
---
"#,
    )?;
    test.write_file("src/registry/ui/card.tsx", "export function Card() {}\n")?;

    let output = test.generate_command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let manifest: Value = serde_json::from_str(&test.read_file("registry.json")?)?;
    let button = &manifest["items"][0];
    assert_eq!(button["name"], "button");
    assert_eq!(button["registryDependencies"][0], "card");
    // react is on the common-package allow-list, added without prompting
    assert_eq!(button["dependencies"][0], "react");

    // The description file was updated too
    let mdx = test.read_file("src/content/ui/button.mdx")?;
    assert!(mdx.contains("internalRegistryDependencies"));
    assert!(mdx.contains("card"));

    Ok(())
}

#[test]
fn test_generate_twice_is_idempotent() -> Result<()> {
    let test = CliTest::with_button_project()?;
    test.write_file(
        "src/registry/ui/button.tsx",
        "import React from \"react\";\nimport { clsx } from \"clsx\";\n",
    )?;

    assert!(test.generate_command().output()?.status.success());
    let first_mdx = test.read_file("src/content/ui/button.mdx")?;
    let first_manifest = test.read_file("registry.json")?;

    assert!(test.generate_command().output()?.status.success());
    assert_eq!(test.read_file("src/content/ui/button.mdx")?, first_mdx);
    assert_eq!(test.read_file("registry.json")?, first_manifest);

    Ok(())
}

#[test]
fn test_generate_fails_on_invalid_component_type() -> Result<()> {
    let test = CliTest::with_button_project()?;
    test.write_file(
        "src/content/ui/button.mdx",
        r#"---
type: registry:bogus
title: Button
description: A clickable button.
files:
  - path: src/registry/ui/button.tsx
    type: registry:bogus
---
"#,
    )?;

    let output = test.generate_command().output()?;
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("registry:bogus"));
    assert!(stderr.contains("button"));
    assert!(!test.root().join("registry.json").exists());

    Ok(())
}

#[test]
fn test_generate_respects_config_file() -> Result<()> {
    let test = CliTest::with_button_project()?;
    test.write_file(
        ".shadregrc.json",
        r#"{
  "registry": { "name": "acme", "homepage": "https://acme.dev" },
  "advanced": { "registryURL": "https://registry.acme.dev" }
}"#,
    )?;

    let output = test.generate_command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let manifest: Value = serde_json::from_str(&test.read_file("registry.json")?)?;
    assert_eq!(manifest["name"], "acme");
    assert_eq!(manifest["homepage"], "https://acme.dev");
    assert_eq!(manifest["items"][0]["docs"], "https://registry.acme.dev/button");

    Ok(())
}
