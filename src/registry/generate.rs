//! The full generation pipeline: scan, parse, reconcile, build, write.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::Config;
use crate::logger::{Logger, Spinner};
use crate::prompt::Prompter;

use super::entries::{find_content_files, parse_registry_entries};
use super::manifest::{build_manifest, write_manifest};
use super::reconcile::reconcile_entries;

/// Generate the registry manifest. Returns the output path.
///
/// Failures anywhere in the pipeline are reported through the spinner and
/// propagated so the CLI layer can set a failure exit status.
pub fn generate_registry(
    config: &Config,
    project_root: &Path,
    logger: &Logger,
    prompter: &mut dyn Prompter,
) -> Result<PathBuf> {
    let spinner = logger.spinner("Scanning content collections");

    let result = run_pipeline(config, project_root, logger, prompter, &spinner);
    if let Err(err) = &result {
        spinner.error(&format!("Failed to generate registry: {:#}", err));
    }
    result
}

fn run_pipeline(
    config: &Config,
    project_root: &Path,
    logger: &Logger,
    prompter: &mut dyn Prompter,
    spinner: &Spinner,
) -> Result<PathBuf> {
    let entry_files = find_content_files(
        &project_root.join(&config.paths.content_collection),
        &config.component_types,
    )?;
    spinner.update(&format!(
        "Found {} entries across all collections",
        entry_files.len()
    ));

    let mut entries = parse_registry_entries(&entry_files, logger);
    spinner.complete(&format!("Parsed {} registry entries", entries.len()));

    logger.info("Checking dependencies for each entry...");
    reconcile_entries(&mut entries, config, project_root, logger, prompter)?;

    logger.info("Building registry items...");
    let manifest = build_manifest(&entries, config, logger)?;

    let out_path = project_root.join(&config.paths.output_registry);
    write_manifest(&manifest, &out_path)?;

    logger.success(&format!(
        "Generated registry manifest at {} with {} items",
        out_path.display(),
        manifest.items.len()
    ));
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use crate::prompt::AutoPrompter;

    const BUTTON_MDX: &str = r#"---
type: registry:ui
title: Button
description: A clickable button.
language: react
files:
  - path: src/registry/ui/button.tsx
    type: registry:ui
---
"#;

    const CARD_MDX: &str = r#"---
type: registry:ui
title: Card
description: A card surface.
language: react
files:
  - path: src/registry/ui/card.tsx
    type: registry:ui
---
"#;

    #[test]
    fn test_generate_end_to_end() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/content/ui")).unwrap();
        fs::create_dir_all(root.join("src/registry/ui")).unwrap();
        fs::write(root.join("src/content/ui/button.mdx"), BUTTON_MDX).unwrap();
        fs::write(root.join("src/content/ui/card.mdx"), CARD_MDX).unwrap();
        fs::write(
            root.join("src/registry/ui/button.tsx"),
            "import { Card } from \"../card\";\nimport React from \"react\";\n",
        )
        .unwrap();
        fs::write(root.join("src/registry/ui/card.tsx"), "export const Card = 1;\n").unwrap();

        let config = Config::default();
        let out_path = generate_registry(
            &config,
            root,
            &Logger::silent(),
            &mut AutoPrompter,
        )
        .unwrap();

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(manifest["items"].as_array().unwrap().len(), 2);

        let button = &manifest["items"][0];
        assert_eq!(button["name"], "button");
        assert_eq!(button["registryDependencies"][0], "card");
        assert_eq!(button["dependencies"][0], "react");
    }

    #[test]
    fn test_generate_fails_on_invalid_type() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/content/ui")).unwrap();
        fs::write(
            root.join("src/content/ui/button.mdx"),
            BUTTON_MDX.replace("registry:ui", "registry:bogus"),
        )
        .unwrap();

        let config = Config::default();
        let err = generate_registry(
            &config,
            root,
            &Logger::silent(),
            &mut AutoPrompter,
        )
        .unwrap_err();
        assert!(err.to_string().contains("registry:bogus"));
        assert!(!root.join("registry.json").exists());
    }
}
