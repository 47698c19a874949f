//! Reconciliation of analyzed dependencies against declared frontmatter.
//!
//! One entry at a time: auto-accept common packages, confirm the rest,
//! confirm internal dependencies, and walk the user through every unknown
//! import. All accepted additions for an entry are persisted in a single
//! merge-update, then the entry is re-read so manifest building sees the
//! updated state.
//!
//! Entries are processed strictly sequentially by index: an entry created
//! mid-run is appended to the working set and reconciled later in the same
//! run, and may be referenced by later entries.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::config::Config;
use crate::logger::Logger;
use crate::prompt::{Prompter, SelectChoice};

use super::analyzer::analyze_dependencies;
use super::entries::{self, collection_dir_name, file_exists};
use super::frontmatter;
use super::matcher::RESOLVE_EXTENSIONS;
use super::template::{ComponentTemplate, generate_component_mdx};
use super::types::{
    DependencyAnalysisResult, DependencyUpdates, Language, RegistryEntry, RegistryFile,
    UnknownImport,
};

/// Packages added to `dependencies` without prompting.
pub const COMMON_PACKAGES: &[&str] = &["react", "clsx", "framer-motion"];

/// Reconcile every entry in the working set, mutating description files
/// and the working set itself as the user accepts additions.
pub fn reconcile_entries(
    working_set: &mut Vec<RegistryEntry>,
    config: &Config,
    project_root: &Path,
    logger: &Logger,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let mut index = 0;
    while index < working_set.len() {
        logger.info(&format!("Processing {}...", working_set[index].name));

        let entry = working_set[index].clone();
        let analysis = analyze_dependencies(&entry, working_set, project_root, logger);

        let mut updates = DependencyUpdates::default();
        queue_package_dependencies(&entry, &analysis, &mut updates, logger, prompter)?;
        queue_internal_dependencies(&entry, &analysis, &mut updates, logger, prompter)?;
        process_unknown_imports(
            &analysis,
            &mut updates,
            working_set,
            config,
            project_root,
            logger,
            prompter,
        )?;

        if !updates.is_empty() {
            persist_updates(&mut working_set[index], updates)?;
            logger.success(&format!(
                "Updated {} with new dependencies",
                working_set[index].name
            ));
        }

        index += 1;
    }

    Ok(())
}

fn queue_package_dependencies(
    entry: &RegistryEntry,
    analysis: &DependencyAnalysisResult,
    updates: &mut DependencyUpdates,
    logger: &Logger,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    for package in &analysis.package_dependencies {
        let declared = entry
            .frontmatter
            .dependencies
            .iter()
            .any(|dep| dep.matches(package));
        if declared || updates.dependencies.contains(package) {
            logger.debug(&format!("Package '{}' already in dependencies", package));
            continue;
        }

        if COMMON_PACKAGES.contains(&package.as_str()) {
            updates.dependencies.push(package.clone());
            logger.info(&format!(
                "Automatically added common package '{}' to dependencies",
                package
            ));
            continue;
        }

        let accepted = prompter.confirm(
            &format!(
                "Import '{}' appears to be a package. Add to dependencies?",
                package
            ),
            true,
        )?;
        if accepted {
            updates.dependencies.push(package.clone());
            logger.success(&format!("Added '{}' to dependencies", package));
        }
    }

    Ok(())
}

fn queue_internal_dependencies(
    entry: &RegistryEntry,
    analysis: &DependencyAnalysisResult,
    updates: &mut DependencyUpdates,
    logger: &Logger,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    for dep_name in &analysis.internal_dependencies {
        let declared = entry
            .frontmatter
            .internal_registry_dependencies
            .iter()
            .any(|dep| dep.matches(dep_name));
        if declared || updates.internal_registry_dependencies.contains(dep_name) {
            logger.debug(&format!(
                "Internal dependency '{}' already declared",
                dep_name
            ));
            continue;
        }

        let accepted = prompter.confirm(
            &format!(
                "Found dependency on registry entry '{}'. Add as internal dependency?",
                dep_name
            ),
            true,
        )?;
        if accepted {
            updates.internal_registry_dependencies.push(dep_name.clone());
            logger.success(&format!(
                "Added '{}' to internalRegistryDependencies",
                dep_name
            ));
        }
    }

    Ok(())
}

/// Locate an unknown import on disk, retrying with source extensions
/// appended.
fn locate_unknown_file(resolved: &str) -> Option<PathBuf> {
    let as_is = PathBuf::from(resolved);
    if file_exists(&as_is) {
        return Some(as_is);
    }
    for ext in RESOLVE_EXTENSIONS {
        let with_ext = PathBuf::from(format!("{}.{}", resolved, ext));
        if file_exists(&with_ext) {
            return Some(with_ext);
        }
    }
    None
}

#[allow(clippy::too_many_arguments)]
fn process_unknown_imports(
    analysis: &DependencyAnalysisResult,
    updates: &mut DependencyUpdates,
    working_set: &mut Vec<RegistryEntry>,
    config: &Config,
    project_root: &Path,
    logger: &Logger,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    for unknown in &analysis.unknown_imports {
        if !prompter.is_interactive() {
            logger.debug(&format!(
                "Skipping unknown import '{}' (non-interactive run)",
                unknown.path
            ));
            continue;
        }

        match locate_unknown_file(&unknown.resolved) {
            Some(actual_path) => handle_local_unknown(
                unknown,
                &actual_path,
                updates,
                working_set,
                config,
                project_root,
                logger,
                prompter,
            )?,
            None => handle_external_unknown(unknown, updates, logger, prompter)?,
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn handle_local_unknown(
    unknown: &UnknownImport,
    actual_path: &Path,
    updates: &mut DependencyUpdates,
    working_set: &mut Vec<RegistryEntry>,
    config: &Config,
    project_root: &Path,
    logger: &Logger,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let action = prompter.select(
        &format!(
            "Import '{}' is a local file but not in any registry entry. What would you like to do?",
            unknown.path
        ),
        &[
            SelectChoice::new("Add to this entry's files", "add-to-files"),
            SelectChoice::new("Create a new registry entry for this file", "create-entry"),
            SelectChoice::new("Skip this import", "skip"),
        ],
    )?;

    match action.as_str() {
        "add-to-files" => {
            let rel_path = relative_to(actual_path, project_root);
            let file_type = prompter.select(
                "What type of file is this?",
                &config
                    .component_types
                    .iter()
                    .map(|t| SelectChoice::new(t.clone(), t.clone()))
                    .collect::<Vec<_>>(),
            )?;

            updates.files.push(RegistryFile {
                path: rel_path.clone(),
                kind: format!("registry:{}", file_type),
                target: None,
            });
            logger.info(&format!(
                "Added '{}' to files with type '{}'",
                rel_path, file_type
            ));
        }
        "create-entry" => {
            let name = create_entry_for_file(
                unknown,
                actual_path,
                working_set,
                config,
                project_root,
                logger,
                prompter,
            )?;
            if !updates.internal_registry_dependencies.contains(&name) {
                updates.internal_registry_dependencies.push(name.clone());
            }
            logger.info(&format!("Added '{}' to internalRegistryDependencies", name));
        }
        _ => {}
    }

    Ok(())
}

fn handle_external_unknown(
    unknown: &UnknownImport,
    updates: &mut DependencyUpdates,
    logger: &Logger,
    prompter: &mut dyn Prompter,
) -> Result<()> {
    let dep_type = prompter.select(
        &format!(
            "Import '{}' is not found in the project. What type of dependency is this?",
            unknown.path
        ),
        &[
            SelectChoice::new("Official shadcn component", "shadcn"),
            SelectChoice::new("External registry URL", "external"),
            SelectChoice::new("Skip this import", "skip"),
        ],
    )?;

    match dep_type.as_str() {
        "shadcn" => {
            let default_name = file_stem_of(&unknown.path);
            let name = prompter.input("Enter the shadcn component name:", &default_name)?;
            if !name.is_empty() {
                updates.shadcn_registry_dependencies.push(name.clone());
                logger.success(&format!("Added '{}' to shadcnRegistryDependencies", name));
            }
        }
        "external" => {
            let url = prompter.input("Enter the external registry URL:", "")?;
            if !url.is_empty() {
                updates.other_registry_dependencies.push(url.clone());
                logger.success(&format!("Added '{}' to otherRegistryDependencies", url));
            }
        }
        _ => {}
    }

    Ok(())
}

/// Infer a component type from a file path.
fn infer_component_type(path: &str) -> &'static str {
    fn use_hook_pattern() -> &'static Regex {
        static USE_HOOK_RE: OnceLock<Regex> = OnceLock::new();
        USE_HOOK_RE.get_or_init(|| Regex::new("use[A-Z]").expect("hook pattern compiles"))
    }

    if path.contains("/ui/") || path.contains("/components/ui/") {
        "ui"
    } else if path.contains("/hooks/") || use_hook_pattern().is_match(path) {
        "hook"
    } else if path.contains("/lib/") {
        "lib"
    } else if path.contains("/blocks/") {
        "block"
    } else {
        "component"
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn file_stem_of(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn relative_to(path: &Path, project_root: &Path) -> String {
    path.strip_prefix(project_root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

/// Create a brand-new registry entry for an unregistered local file and
/// append it to the working set. Returns the new entry name.
fn create_entry_for_file(
    unknown: &UnknownImport,
    actual_path: &Path,
    working_set: &mut Vec<RegistryEntry>,
    config: &Config,
    project_root: &Path,
    logger: &Logger,
    prompter: &mut dyn Prompter,
) -> Result<String> {
    logger.info(&format!(
        "Creating a new registry entry for '{}'...",
        unknown.path
    ));

    let path_str = actual_path.to_string_lossy();
    let inferred = infer_component_type(&path_str);

    let mut type_choices = vec![SelectChoice::new(
        format!("{} ({}) - Inferred", capitalize(inferred), inferred),
        inferred,
    )];
    for component_type in &config.component_types {
        if component_type != inferred {
            type_choices.push(SelectChoice::new(
                format!("{} ({})", capitalize(component_type), component_type),
                component_type.clone(),
            ));
        }
    }
    let file_type = prompter.select("What type of component is this?", &type_choices)?;

    let default_name = actual_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let title = prompter.input("Enter a title for this component:", &default_name)?;
    let description = prompter.input(
        "Enter a description for this component:",
        &format!("A {} component", file_type),
    )?;

    // Default language first so it is the select default
    let mut language_choices = vec![SelectChoice::new(
        config.advanced.default_language.as_str(),
        config.advanced.default_language.as_str(),
    )];
    for language in Language::all() {
        if language != config.advanced.default_language {
            language_choices.push(SelectChoice::new(language.as_str(), language.as_str()));
        }
    }
    let language_value = prompter.select(
        "What language is this component written in?",
        &language_choices,
    )?;
    let language: Language = serde_yaml::from_str(&language_value)
        .with_context(|| format!("Unknown language: {}", language_value))?;

    let categories_input = prompter.input(
        "Enter categories for this component (comma-separated):",
        &file_type,
    )?;
    let categories: Vec<String> = categories_input
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    let rel_path = relative_to(actual_path, project_root);
    let collection_dir = project_root
        .join(&config.paths.content_collection)
        .join(collection_dir_name(&file_type));
    let new_entry_path = collection_dir.join(format!("{}.mdx", default_name));

    let mdx = generate_component_mdx(&ComponentTemplate {
        name: default_name.clone(),
        title,
        description,
        kind: format!("registry:{}", file_type),
        language,
        files: vec![RegistryFile {
            path: rel_path,
            kind: format!("registry:{}", file_type),
            target: None,
        }],
        categories,
    })?;

    entries::write_file(&new_entry_path, &mdx)?;
    logger.success(&format!("Created new entry at {}", new_entry_path.display()));

    let new_entry = entries::parse_registry_entry(&new_entry_path)?;
    working_set.push(new_entry);

    Ok(default_name)
}

/// Persist queued updates to the entry's description file in one
/// merge-update, then refresh the in-memory entry.
fn persist_updates(entry: &mut RegistryEntry, updates: DependencyUpdates) -> Result<()> {
    let text = entries::read_file(&entry.file_path)?;
    let mut doc = frontmatter::parse_document(&text)?;
    frontmatter::merge_updates(&mut doc.frontmatter, updates.to_yaml_updates());
    let updated = frontmatter::stringify_document(&doc.frontmatter, &doc.body)?;
    entries::write_file(&entry.file_path, &updated)?;
    entries::reload_entry(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    use crate::prompt::{Answer, ScriptedPrompter};
    use crate::registry::entries::{find_content_files, parse_registry_entries};

    const BUTTON_SOURCE: &str = r#"
import React from "react";
import { clsx } from "clsx";
import { Card } from "./card";
"#;

    fn mdx(name: &str, file: &str) -> String {
        format!(
            r#"---
type: registry:ui
title: {name}
description: The {name} component.
language: react
files:
  - path: {file}
    type: registry:ui
---

# {name}
"#
        )
    }

    fn project() -> (TempDir, Config) {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/content/ui")).unwrap();
        fs::create_dir_all(root.join("src/registry/ui")).unwrap();

        fs::write(
            root.join("src/content/ui/button.mdx"),
            mdx("button", "src/registry/ui/button.tsx"),
        )
        .unwrap();
        fs::write(
            root.join("src/content/ui/card.mdx"),
            mdx("card", "src/registry/ui/card.tsx"),
        )
        .unwrap();
        fs::write(root.join("src/registry/ui/button.tsx"), BUTTON_SOURCE).unwrap();
        fs::write(root.join("src/registry/ui/card.tsx"), "export const Card = 1;\n").unwrap();

        (dir, Config::default())
    }

    fn load_entries(root: &Path, config: &Config) -> Vec<RegistryEntry> {
        let files = find_content_files(
            &root.join(&config.paths.content_collection),
            &config.component_types,
        )
        .unwrap();
        parse_registry_entries(&files, &Logger::silent())
    }

    #[test]
    fn test_common_packages_added_without_prompting() {
        let (dir, config) = project();
        let mut entries = load_entries(dir.path(), &config);

        // Only the internal 'card' dependency needs confirmation
        let mut prompter = ScriptedPrompter::new([Answer::Confirm(true)]);
        reconcile_entries(
            &mut entries,
            &config,
            dir.path(),
            &Logger::silent(),
            &mut prompter,
        )
        .unwrap();
        assert!(prompter.is_exhausted());

        let button = entries.iter().find(|e| e.name == "button").unwrap();
        assert!(button.frontmatter.dependencies.iter().any(|d| d.matches("react")));
        assert!(button.frontmatter.dependencies.iter().any(|d| d.matches("clsx")));
        assert!(
            button
                .frontmatter
                .internal_registry_dependencies
                .iter()
                .any(|d| d.matches("card"))
        );

        // Persisted to the description file, not just in memory
        let text = fs::read_to_string(dir.path().join("src/content/ui/button.mdx")).unwrap();
        assert!(text.contains("react"));
        assert!(text.contains("internalRegistryDependencies"));
        assert!(text.contains("# button"));
    }

    #[test]
    fn test_declined_internal_dependency_not_persisted() {
        let (dir, config) = project();
        let mut entries = load_entries(dir.path(), &config);

        let mut prompter = ScriptedPrompter::new([Answer::Confirm(false)]);
        reconcile_entries(
            &mut entries,
            &config,
            dir.path(),
            &Logger::silent(),
            &mut prompter,
        )
        .unwrap();

        let button = entries.iter().find(|e| e.name == "button").unwrap();
        assert!(button.frontmatter.internal_registry_dependencies.is_empty());
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let (dir, config) = project();

        let mut entries = load_entries(dir.path(), &config);
        let mut prompter = ScriptedPrompter::new([Answer::Confirm(true)]);
        reconcile_entries(
            &mut entries,
            &config,
            dir.path(),
            &Logger::silent(),
            &mut prompter,
        )
        .unwrap();

        let first_pass = fs::read_to_string(dir.path().join("src/content/ui/button.mdx")).unwrap();

        // Everything is declared now; a second run must ask nothing and
        // introduce no duplicates.
        let mut entries = load_entries(dir.path(), &config);
        let mut prompter = ScriptedPrompter::new([]);
        reconcile_entries(
            &mut entries,
            &config,
            dir.path(),
            &Logger::silent(),
            &mut prompter,
        )
        .unwrap();

        let second_pass = fs::read_to_string(dir.path().join("src/content/ui/button.mdx")).unwrap();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_non_common_package_prompts() {
        let (dir, config) = project();
        fs::write(
            dir.path().join("src/registry/ui/button.tsx"),
            "import { motion } from \"motion-one\";\n",
        )
        .unwrap();

        let mut entries = load_entries(dir.path(), &config);
        let mut prompter = ScriptedPrompter::new([Answer::Confirm(true)]);
        reconcile_entries(
            &mut entries,
            &config,
            dir.path(),
            &Logger::silent(),
            &mut prompter,
        )
        .unwrap();

        assert!(prompter.transcript[0].contains("motion-one"));
        let button = entries.iter().find(|e| e.name == "button").unwrap();
        assert!(button.frontmatter.dependencies.iter().any(|d| d.matches("motion-one")));
    }

    #[test]
    fn test_unknown_import_skipped_when_non_interactive() {
        let (dir, config) = project();
        fs::write(
            dir.path().join("src/registry/ui/button.tsx"),
            "import { helper } from \"@/lib/helper\";\n",
        )
        .unwrap();

        let mut entries = load_entries(dir.path(), &config);
        let mut prompter = crate::prompt::AutoPrompter;
        reconcile_entries(
            &mut entries,
            &config,
            dir.path(),
            &Logger::silent(),
            &mut prompter,
        )
        .unwrap();

        let button = entries.iter().find(|e| e.name == "button").unwrap();
        assert!(button.frontmatter.shadcn_registry_dependencies.is_empty());
        assert!(button.frontmatter.other_registry_dependencies.is_empty());
    }

    #[test]
    fn test_unknown_missing_file_classified_as_shadcn() {
        let (dir, config) = project();
        fs::write(
            dir.path().join("src/registry/ui/button.tsx"),
            "import { Dialog } from \"@/components/ui/dialog\";\n",
        )
        .unwrap();

        let mut entries = load_entries(dir.path(), &config);
        let mut prompter = ScriptedPrompter::new([
            Answer::Select("shadcn".to_string()),
            Answer::Input("dialog".to_string()),
        ]);
        reconcile_entries(
            &mut entries,
            &config,
            dir.path(),
            &Logger::silent(),
            &mut prompter,
        )
        .unwrap();

        let button = entries.iter().find(|e| e.name == "button").unwrap();
        assert_eq!(
            button.frontmatter.shadcn_registry_dependencies,
            vec!["dialog"]
        );
    }

    #[test]
    fn test_unknown_existing_file_can_become_new_entry() {
        let (dir, config) = project();
        fs::create_dir_all(dir.path().join("src/lib")).unwrap();
        fs::write(dir.path().join("src/lib/utils.ts"), "export const cn = 1;\n").unwrap();
        fs::write(
            dir.path().join("src/registry/ui/button.tsx"),
            "import { cn } from \"@/lib/utils\";\n",
        )
        .unwrap();

        let mut entries = load_entries(dir.path(), &config);
        let mut prompter = ScriptedPrompter::new([
            Answer::Select("create-entry".to_string()),
            Answer::Select("lib".to_string()),
            Answer::Input("Utils".to_string()),
            Answer::Input("Shared helpers.".to_string()),
            Answer::Select("react".to_string()),
            Answer::Input("lib, helpers".to_string()),
        ]);
        reconcile_entries(
            &mut entries,
            &config,
            dir.path(),
            &Logger::silent(),
            &mut prompter,
        )
        .unwrap();
        assert!(prompter.is_exhausted());

        // New description file written into the libs collection
        let new_mdx = dir.path().join("src/content/libs/utils.mdx");
        assert!(new_mdx.exists());

        // Appended to the working set and declared as an internal dep
        let utils = entries.iter().find(|e| e.name == "utils").unwrap();
        assert_eq!(utils.frontmatter.type_suffix(), "lib");
        assert_eq!(utils.frontmatter.categories, vec!["lib", "helpers"]);

        let button = entries.iter().find(|e| e.name == "button").unwrap();
        assert!(
            button
                .frontmatter
                .internal_registry_dependencies
                .iter()
                .any(|d| d.matches("utils"))
        );
    }

    #[test]
    fn test_infer_component_type() {
        assert_eq!(infer_component_type("/p/src/components/ui/dialog.tsx"), "ui");
        assert_eq!(infer_component_type("/p/src/hooks/use-toast.ts"), "hook");
        assert_eq!(infer_component_type("/p/src/useToast.ts"), "hook");
        assert_eq!(infer_component_type("/p/src/lib/utils.ts"), "lib");
        assert_eq!(infer_component_type("/p/src/blocks/hero.tsx"), "block");
        assert_eq!(infer_component_type("/p/src/widgets/chart.tsx"), "component");
    }
}
