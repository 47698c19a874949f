//! Content-collection discovery and registry entry parsing.
//!
//! Each component type has its own subdirectory under the content
//! collection, pluralized except for the singular `ui` directory. One
//! MD/MDX description file per component; the entry name is the filename
//! without its extension.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::logger::Logger;

use super::frontmatter::{self, Document};
use super::types::RegistryEntry;

pub fn file_exists(path: &Path) -> bool {
    path.exists()
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Collection directory name for a component type (`ui` stays singular).
pub fn collection_dir_name(component_type: &str) -> String {
    if component_type == "ui" {
        component_type.to_string()
    } else {
        format!("{}s", component_type)
    }
}

/// Find all MD/MDX description files across the per-type collection
/// directories, in component-type order.
pub fn find_content_files(
    content_collection: &Path,
    component_types: &[String],
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for component_type in component_types {
        let dir = content_collection.join(collection_dir_name(component_type));
        for ext in ["md", "mdx"] {
            let pattern = format!("{}/*.{}", dir.display(), ext);
            let matches = glob::glob(&pattern)
                .with_context(|| format!("Invalid content glob: {}", pattern))?;
            for path in matches.flatten() {
                files.push(path);
            }
        }
    }

    Ok(files)
}

/// Entry name derived from a description file path.
pub fn entry_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Parse one description file into a registry entry.
pub fn parse_registry_entry(path: &Path) -> Result<RegistryEntry> {
    let content = read_file(path)?;
    let Document { frontmatter, .. } = frontmatter::parse_document(&content)?;
    let typed = frontmatter::typed_frontmatter(&frontmatter)?;

    Ok(RegistryEntry {
        name: entry_name(path),
        file_path: path.to_path_buf(),
        frontmatter: typed,
        raw: frontmatter,
    })
}

/// Parse description files into registry entries.
///
/// Missing or unparseable files are logged and skipped; parsing never
/// aborts the run.
pub fn parse_registry_entries(paths: &[PathBuf], logger: &Logger) -> Vec<RegistryEntry> {
    let mut entries = Vec::new();

    for path in paths {
        if !file_exists(path) {
            logger.warn(&format!("File does not exist: {}", path.display()));
            continue;
        }

        match parse_registry_entry(path) {
            Ok(entry) => {
                logger.debug(&format!("Parsed registry entry: {}", entry.name));
                entries.push(entry);
            }
            Err(err) => {
                logger.error(&format!("Failed to parse {}: {:#}", path.display(), err));
            }
        }
    }

    entries
}

/// Re-read one entry's description file, refreshing its in-memory state.
pub fn reload_entry(entry: &mut RegistryEntry) -> Result<()> {
    let fresh = parse_registry_entry(&entry.file_path)?;
    entry.frontmatter = fresh.frontmatter;
    entry.raw = fresh.raw;
    Ok(())
}
