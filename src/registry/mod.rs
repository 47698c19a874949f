//! Core registry engine.
//!
//! The pipeline runs leaf-first: `entries` discovers and parses description
//! files, `imports`/`matcher`/`analyzer` classify each entry's imports,
//! `reconcile` applies policy and user decisions back to the description
//! files, and `manifest` projects the working set into the output schema.

pub mod analyzer;
pub mod entries;
pub mod frontmatter;
pub mod generate;
pub mod hooks;
pub mod imports;
pub mod manifest;
pub mod matcher;
pub mod reconcile;
pub mod setup;
pub mod template;
pub mod types;
pub mod validate;

pub use analyzer::analyze_dependencies;
pub use generate::generate_registry;
pub use imports::{extract_imports, is_package_import, resolve_import_path};
pub use manifest::{build_manifest, write_manifest};
pub use matcher::find_registry_entry_for_file;
pub use types::{
    DependencyAnalysisResult, DependencyRef, Frontmatter, Manifest, RegistryEntry, RegistryFile,
    RegistryItem, UnknownImport,
};
pub use validate::{ValidationReport, validate_registry};
