//! Dependency analysis for a single registry entry.
//!
//! For every file an entry declares, extract its imports and sort each
//! specifier into one of three buckets: package dependencies, internal
//! dependencies on other registry entries, or unknown imports that the
//! reconciliation workflow will ask the user about.

use std::path::Path;

use crate::logger::Logger;

use super::imports::{extract_imports, is_package_import, package_name, resolve_import_path};
use super::matcher::find_registry_entry_for_file;
use super::types::{DependencyAnalysisResult, RegistryEntry, UnknownImport};

/// Analyze the imports of `entry`'s declared files.
///
/// Files are processed in declared order, imports in extraction order.
/// Specifiers with a `?` query suffix (asset imports like `./icon.svg?raw`)
/// are skipped entirely. Self-dependencies are suppressed.
pub fn analyze_dependencies(
    entry: &RegistryEntry,
    all_entries: &[RegistryEntry],
    project_root: &Path,
    logger: &Logger,
) -> DependencyAnalysisResult {
    let mut result = DependencyAnalysisResult::default();

    for file in &entry.frontmatter.files {
        let file_path = project_root.join(&file.path);
        logger.debug(&format!("Analyzing imports in {}", file.path));

        for specifier in extract_imports(&file_path, logger) {
            if specifier.contains('?') {
                continue;
            }

            if is_package_import(&specifier) {
                let package = package_name(&specifier).to_string();
                if !result.package_dependencies.contains(&package) {
                    result.package_dependencies.push(package);
                }
                continue;
            }

            let resolved = resolve_import_path(&specifier, &file_path, project_root);
            logger.debug(&format!(
                "Resolved import '{}' to '{}'",
                specifier,
                resolved.display()
            ));

            match find_registry_entry_for_file(&resolved, all_entries, project_root) {
                Some(dependency) if dependency.name == entry.name => {
                    // Self-dependency, nothing to record
                }
                Some(dependency) => {
                    if !result.internal_dependencies.contains(&dependency.name) {
                        result.internal_dependencies.push(dependency.name.clone());
                    }
                }
                None => {
                    result.unknown_imports.push(UnknownImport {
                        path: specifier,
                        resolved: resolved.to_string_lossy().to_string(),
                    });
                }
            }
        }
    }

    result
}
