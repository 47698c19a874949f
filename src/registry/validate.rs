//! Registry validation: configuration, entry structure, and dependency
//! declarations.
//!
//! Structural problems (missing fields, invalid types, missing files) are
//! errors; undeclared-but-detected dependencies and unknown imports are
//! warnings. Nothing here mutates files.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::logger::Logger;

use super::analyzer::analyze_dependencies;
use super::entries::{file_exists, find_content_files, parse_registry_entries};

/// Findings of a validation run.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate the registry configuration and component structure.
///
/// Returns the collected findings; only internal failures (I/O) produce an
/// `Err`.
pub fn validate_registry(
    config: &Config,
    project_root: &Path,
    logger: &Logger,
) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();
    let spinner = logger.spinner("Validating registry configuration");

    spinner.update("Validating paths");
    let registry_path = project_root.join(&config.paths.registry);
    if !file_exists(&registry_path) {
        report.errors.push(format!(
            "Registry path does not exist: {}",
            config.paths.registry
        ));
    }

    let collection_path = project_root.join(&config.paths.content_collection);
    if !file_exists(&collection_path) {
        report.errors.push(format!(
            "Content collection path does not exist: {}",
            config.paths.content_collection
        ));
        spinner.error(&format!("Found {} errors", report.errors.len()));
        return Ok(report);
    }

    spinner.update("Finding content files");
    let entry_files = find_content_files(&collection_path, &config.component_types)?;
    if entry_files.is_empty() {
        report.errors.push("No content files found".to_string());
        spinner.error("No content files found");
        return Ok(report);
    }
    spinner.update(&format!("Found {} content files", entry_files.len()));

    spinner.update("Parsing registry entries");
    let entries = parse_registry_entries(&entry_files, logger);
    if entries.is_empty() {
        report.errors.push("No registry entries found".to_string());
        spinner.error("No registry entries found");
        return Ok(report);
    }
    spinner.update(&format!("Parsed {} registry entries", entries.len()));

    spinner.update("Validating registry entries");
    for entry in &entries {
        let fm = &entry.frontmatter;

        if fm.title.is_empty() {
            report
                .errors
                .push(format!("Entry {} is missing a title", entry.name));
        }
        if fm.description.is_empty() {
            report
                .errors
                .push(format!("Entry {} is missing a description", entry.name));
        }

        if fm.kind.is_empty() {
            report
                .errors
                .push(format!("Entry {} is missing a type", entry.name));
        } else if !config
            .component_types
            .iter()
            .any(|t| t == fm.type_suffix())
        {
            report.errors.push(format!(
                "Entry {} has an invalid type: {}",
                entry.name, fm.kind
            ));
        }

        if fm.files.is_empty() {
            report
                .errors
                .push(format!("Entry {} has no files", entry.name));
        } else {
            for file in &fm.files {
                if !file_exists(&project_root.join(&file.path)) {
                    report.errors.push(format!(
                        "Entry {} references non-existent file: {}",
                        entry.name, file.path
                    ));
                }
            }
        }
    }

    spinner.update("Validating dependencies");
    let available: HashSet<&str> = entries.iter().map(|e| e.name.as_str()).collect();

    for entry in &entries {
        let fm = &entry.frontmatter;

        for dep in &fm.internal_registry_dependencies {
            match dep.name_str() {
                Some(name) if available.contains(name) => {}
                Some(name) => report.errors.push(format!(
                    "Entry {} depends on non-existent component: {}",
                    entry.name, name
                )),
                None => report.errors.push(format!(
                    "Entry {} declares an internal dependency without a name",
                    entry.name
                )),
            }
        }

        let analysis = analyze_dependencies(entry, &entries, project_root, logger);

        for package in &analysis.package_dependencies {
            if !fm.dependencies.iter().any(|d| d.matches(package)) {
                report.warnings.push(format!(
                    "Entry {} is missing package dependency: {}",
                    entry.name, package
                ));
            }
        }

        for dep_name in &analysis.internal_dependencies {
            if !fm
                .internal_registry_dependencies
                .iter()
                .any(|d| d.matches(dep_name))
            {
                report.warnings.push(format!(
                    "Entry {} is missing internal dependency: {}",
                    entry.name, dep_name
                ));
            }
        }

        for unknown in &analysis.unknown_imports {
            report.warnings.push(format!(
                "Entry {} has unknown import: {}",
                entry.name, unknown.path
            ));
        }
    }

    if report.errors.is_empty() {
        spinner.complete("Registry validation completed");
    } else {
        spinner.error(&format!("Found {} errors", report.errors.len()));
    }

    Ok(report)
}
