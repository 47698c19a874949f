//! Manifest assembly: project reconciled entries into the output schema.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;

use crate::config::{Config, MissingInternalPolicy};
use crate::logger::Logger;

use super::entries::write_file;
use super::types::{Manifest, REGISTRY_SCHEMA_URL, RegistryEntry, RegistryFile, RegistryItem};

const DEFAULT_AUTHOR: &str = "Unknown <unknown@example.com>";

/// Build the manifest from the (possibly reconciled) working set.
///
/// A single entry with an unrecognized component type invalidates the whole
/// manifest. Internal dependencies naming no known entry are dropped with a
/// warning or are fatal, per `advanced.onMissingInternal`.
pub fn build_manifest(
    entries: &[RegistryEntry],
    config: &Config,
    logger: &Logger,
) -> Result<Manifest> {
    let available: HashSet<&str> = entries.iter().map(|e| e.name.as_str()).collect();

    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        items.push(build_item(entry, &available, config, logger)?);
    }

    Ok(Manifest {
        schema: REGISTRY_SCHEMA_URL.to_string(),
        name: config.registry.name.clone(),
        homepage: config.registry.homepage.clone(),
        items,
    })
}

fn build_item(
    entry: &RegistryEntry,
    available: &HashSet<&str>,
    config: &Config,
    logger: &Logger,
) -> Result<RegistryItem> {
    let fm = &entry.frontmatter;

    let type_suffix = fm.type_suffix();
    if !config.component_types.iter().any(|t| t == type_suffix) {
        anyhow::bail!(
            "Invalid component type '{}' in {}. Must be one of: {}",
            fm.kind,
            entry.name,
            config.component_types.join(", ")
        );
    }

    let mut registry_dependencies: Vec<String> = Vec::new();
    registry_dependencies.extend(fm.shadcn_registry_dependencies.iter().cloned());

    for dep in &fm.internal_registry_dependencies {
        let Some(dep_name) = dep.name_str() else {
            logger.warn(&format!(
                "Component '{}' declares an internal dependency without a name. Skipping.",
                entry.name
            ));
            continue;
        };

        if !available.contains(dep_name) {
            match config.advanced.on_missing_internal {
                MissingInternalPolicy::Warn => {
                    logger.warn(&format!(
                        "Component '{}' depends on internal component '{}', but no such component exists in the registry. Skipping.",
                        entry.name, dep_name
                    ));
                    continue;
                }
                MissingInternalPolicy::Error => {
                    anyhow::bail!(
                        "Component '{}' depends on internal component '{}', but no such component exists in the registry.",
                        entry.name,
                        dep_name
                    );
                }
            }
        }
        registry_dependencies.push(dep_name.to_string());
    }

    registry_dependencies.extend(fm.other_registry_dependencies.iter().cloned());

    let files = fm
        .files
        .iter()
        .map(|file| rewrite_file_path(file, logger))
        .collect();

    let author = fm
        .author
        .clone()
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

    Ok(RegistryItem {
        name: entry.name.clone(),
        kind: fm.kind.clone(),
        title: fm.title.clone(),
        description: fm.description.clone(),
        author,
        dependencies: fm.dependencies.clone(),
        registry_dependencies,
        categories: fm.categories.clone(),
        docs: format!("{}/{}", config.docs_base_url(), entry.name),
        files,
        tailwind: fm.tailwind.clone(),
        css_vars: fm.css_vars.clone(),
        css: fm.css.clone(),
        meta: fm.meta.clone(),
    })
}

/// Rewrite legacy `/components/` paths to the `/registry/` convention.
fn rewrite_file_path(file: &RegistryFile, logger: &Logger) -> RegistryFile {
    if file.path.contains("/components/") {
        let new_path = file.path.replace("/components/", "/registry/");
        logger.info(&format!(
            "Updating file path from {} to {}",
            file.path, new_path
        ));
        return RegistryFile {
            path: new_path,
            ..file.clone()
        };
    }
    file.clone()
}

/// Serialize the manifest and write it, replacing any previous file.
pub fn write_manifest(manifest: &Manifest, out_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    write_file(out_path, &json)
}
