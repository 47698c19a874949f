//! Interactive setup wizard.
//!
//! Walks the user through registry metadata, paths, component types, and
//! the pre-commit hook, then writes `.shadregrc.json` and scaffolds the
//! content-collection directories.

use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::config::{CONFIG_FILE_NAME, Config};
use crate::logger::Logger;
use crate::prompt::{Prompter, SelectChoice};

use super::entries::{collection_dir_name, ensure_dir, write_file};
use super::types::Language;

fn detect_subdirs(path: &Path) -> Vec<String> {
    let Ok(read_dir) = fs::read_dir(path) else {
        return Vec::new();
    };
    let mut dirs: Vec<String> = read_dir
        .flatten()
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    dirs.sort();
    dirs
}

/// Run the setup wizard. Returns the configuration that was written.
pub fn run_setup(
    current: &Config,
    project_root: &Path,
    logger: &Logger,
    prompter: &mut dyn Prompter,
) -> Result<Config> {
    logger.info("Starting setup wizard");

    let existing_collections =
        detect_subdirs(&project_root.join(&current.paths.content_collection));
    if !existing_collections.is_empty() {
        logger.info(&format!(
            "Detected existing content collections: {}",
            existing_collections.join(", ")
        ));
    }

    let existing_components = detect_subdirs(&project_root.join(&current.paths.registry));
    if !existing_components.is_empty() {
        logger.info(&format!(
            "Detected existing registry components: {}",
            existing_components.join(", ")
        ));
    }

    let mut config = current.clone();

    config.registry.name = prompter.input(
        "What is the name of your registry?",
        &current.registry.name,
    )?;
    config.registry.homepage = prompter.input(
        "What is the homepage URL of your registry?",
        &current.registry.homepage,
    )?;

    config.paths.registry = prompter.input(
        "Where are your registry components stored?",
        &current.paths.registry,
    )?;
    config.paths.content_collection = prompter.input(
        "Where are your content collections stored?",
        &current.paths.content_collection,
    )?;
    config.paths.output_registry = prompter.input(
        "Where should the registry manifest be written?",
        &current.paths.output_registry,
    )?;

    let type_choices: Vec<String> = {
        let mut all = Config::default().component_types;
        for t in &current.component_types {
            if !all.contains(t) {
                all.push(t.clone());
            }
        }
        all
    };
    config.component_types = prompter.multi_select(
        "Which component types does your registry use?",
        &type_choices,
        &current.component_types,
    )?;

    // Default language first so it is the select default
    let mut language_choices = vec![SelectChoice::new(
        current.advanced.default_language.as_str(),
        current.advanced.default_language.as_str(),
    )];
    for language in Language::all() {
        if language != current.advanced.default_language {
            language_choices.push(SelectChoice::new(language.as_str(), language.as_str()));
        }
    }
    let language_value =
        prompter.select("What is the default language for new components?", &language_choices)?;
    config.advanced.default_language =
        serde_yaml::from_str(&language_value).unwrap_or(current.advanced.default_language);

    config.pre_commit_hook.enabled = prompter.confirm(
        "Regenerate the registry automatically from a git pre-commit hook?",
        current.pre_commit_hook.enabled,
    )?;

    config.validate()?;

    let config_path = project_root.join(CONFIG_FILE_NAME);
    write_file(&config_path, &serde_json::to_string_pretty(&config)?)?;
    logger.success(&format!("Wrote {}", config_path.display()));

    let collection_root = project_root.join(&config.paths.content_collection);
    for component_type in &config.component_types {
        ensure_dir(&collection_root.join(collection_dir_name(component_type)))?;
    }
    ensure_dir(&project_root.join(&config.paths.registry))?;
    logger.success("Scaffolded content collection directories");

    Ok(config)
}
