//! Matching resolved import paths back to registry entries.
//!
//! Matching is deliberately loose: besides exact and extension-stripped
//! equality it accepts substring containment and basename equality, so
//! alias-resolved and relocated paths still find their entry. The cost is
//! possible false positives for same-named files owned by different
//! entries; the heuristics live in this one pure function so they can be
//! tuned and tested in isolation.

use std::path::{Path, PathBuf};

use super::imports::normalize_path;
use super::types::RegistryEntry;

/// Extensions tried when a specifier omits one.
pub const RESOLVE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "astro"];

fn strip_extension(path: &Path) -> PathBuf {
    match (path.parent(), path.file_stem()) {
        (Some(parent), Some(stem)) if path.extension().is_some() => parent.join(stem),
        _ => path.to_path_buf(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Find the registry entry owning `path`, if any.
///
/// Entry file paths are resolved against `project_root`. The first entry
/// (in input order) with any matching declared file wins.
pub fn find_registry_entry_for_file<'a>(
    path: &Path,
    entries: &'a [RegistryEntry],
    project_root: &Path,
) -> Option<&'a RegistryEntry> {
    let normalized = normalize_path(path);
    let without_ext = strip_extension(&normalized);

    let mut candidates: Vec<PathBuf> = vec![normalized, without_ext.clone()];
    for ext in RESOLVE_EXTENSIONS {
        candidates.push(without_ext.with_extension(ext));
    }

    for entry in entries {
        for file in &entry.frontmatter.files {
            let entry_path = normalize_path(&project_root.join(&file.path));
            let entry_without_ext = strip_extension(&entry_path);
            let entry_str = entry_path.to_string_lossy();
            let entry_base = file_name(&entry_path);
            let entry_stem = file_name(&entry_without_ext);

            for candidate in &candidates {
                if candidate == &entry_path || candidate == &entry_without_ext {
                    return Some(entry);
                }

                let candidate_str = candidate.to_string_lossy();
                let candidate_base = file_name(candidate);
                let candidate_stem = file_name(&strip_extension(candidate));

                if entry_str.contains(candidate_str.as_ref())
                    || candidate_str.contains(entry_str.as_ref())
                    || candidate_base == entry_base
                    || candidate_stem == entry_stem
                {
                    return Some(entry);
                }
            }
        }
    }

    None
}
