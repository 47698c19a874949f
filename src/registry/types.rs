//! Type definitions for registry entries and the output manifest.
//!
//! A registry entry is one logical component/hook/block, described by a
//! front-matter-bearing MDX/MD file and backed by one or more source files.
//! The manifest is the final JSON document emitted for external consumption.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// `$schema` value emitted into the manifest.
pub const REGISTRY_SCHEMA_URL: &str = "https://ui.shadcn.com/schema/registry.json";

/// Languages a component can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Astro,
    React,
    Vue,
    Html,
}

impl Language {
    pub fn all() -> [Language; 4] {
        [Language::Astro, Language::React, Language::Vue, Language::Html]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Astro => "astro",
            Language::React => "react",
            Language::Vue => "vue",
            Language::Html => "html",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source file declared by a registry entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryFile {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// A declared dependency: either a bare name or an object form carrying
/// `name`/`package` (package deps) or `name`/`component` (internal deps).
///
/// Replaces the original's ad hoc runtime shape tests with a tagged union
/// and an explicit equality function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyRef {
    Name(String),
    Ref {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        package: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        component: Option<String>,
    },
}

impl DependencyRef {
    /// The declared name, if any shape carries one.
    pub fn name_str(&self) -> Option<&str> {
        match self {
            DependencyRef::Name(name) => Some(name),
            DependencyRef::Ref {
                name,
                package,
                component,
            } => name
                .as_deref()
                .or(component.as_deref())
                .or(package.as_deref()),
        }
    }

    /// Whether this declaration refers to `candidate`, under any of its
    /// accepted shapes.
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            DependencyRef::Name(name) => name == candidate,
            DependencyRef::Ref {
                name,
                package,
                component,
            } => {
                name.as_deref() == Some(candidate)
                    || package.as_deref() == Some(candidate)
                    || component.as_deref() == Some(candidate)
            }
        }
    }
}

/// Structured metadata parsed from a description file's front block.
///
/// Required fields use empty defaults so that a malformed file still parses
/// and validation (not deserialization) reports what is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Component type tag of the form `registry:<kind>`.
    #[serde(default, rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Package dependencies (npm names), mixed string/object forms.
    #[serde(default)]
    pub dependencies: Vec<DependencyRef>,

    /// Official shadcn registry components this entry depends on.
    #[serde(default)]
    pub shadcn_registry_dependencies: Vec<String>,

    /// Names of other entries in this registry, mixed string/object forms.
    #[serde(default)]
    pub internal_registry_dependencies: Vec<DependencyRef>,

    /// External registry URLs.
    #[serde(default)]
    pub other_registry_dependencies: Vec<String>,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    #[serde(default)]
    pub files: Vec<RegistryFile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tailwind: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_vars: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl Frontmatter {
    /// The component type with the `registry:` prefix stripped.
    pub fn type_suffix(&self) -> &str {
        self.kind.strip_prefix("registry:").unwrap_or(&self.kind)
    }
}

/// One parsed registry entry: a description file plus its metadata.
///
/// `raw` keeps the unparsed front-block mapping so updates can be merged
/// back without losing fields the typed view does not model.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    /// Unique name, derived from the description filename.
    pub name: String,
    /// Path of the description file.
    pub file_path: PathBuf,
    pub frontmatter: Frontmatter,
    pub raw: serde_yaml::Mapping,
}

/// An import that matched neither a package nor a known registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownImport {
    /// The specifier as written in source.
    pub path: String,
    /// The project-absolute resolution of the specifier.
    pub resolved: String,
}

/// Result of analyzing one entry's imports.
#[derive(Debug, Clone, Default)]
pub struct DependencyAnalysisResult {
    /// Package names, insertion order, deduplicated.
    pub package_dependencies: Vec<String>,
    /// Names of other registry entries, deduplicated, self excluded.
    pub internal_dependencies: Vec<String>,
    /// Unresolved imports; every occurrence is recorded, even repeats.
    pub unknown_imports: Vec<UnknownImport>,
}

/// Dependency additions queued for one entry during reconciliation,
/// persisted to the description file in a single merge-update.
#[derive(Debug, Clone, Default)]
pub struct DependencyUpdates {
    pub dependencies: Vec<String>,
    pub shadcn_registry_dependencies: Vec<String>,
    pub internal_registry_dependencies: Vec<String>,
    pub other_registry_dependencies: Vec<String>,
    pub files: Vec<RegistryFile>,
}

impl DependencyUpdates {
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
            && self.shadcn_registry_dependencies.is_empty()
            && self.internal_registry_dependencies.is_empty()
            && self.other_registry_dependencies.is_empty()
            && self.files.is_empty()
    }

    /// Non-empty buckets as (frontmatter key, YAML value) pairs.
    pub fn to_yaml_updates(&self) -> Vec<(String, serde_yaml::Value)> {
        let mut updates = Vec::new();

        fn push_strings(updates: &mut Vec<(String, serde_yaml::Value)>, key: &str, values: &[String]) {
            if !values.is_empty() {
                let seq = values
                    .iter()
                    .map(|v| serde_yaml::Value::String(v.clone()))
                    .collect();
                updates.push((key.to_string(), serde_yaml::Value::Sequence(seq)));
            }
        }

        push_strings(&mut updates, "dependencies", &self.dependencies);
        push_strings(
            &mut updates,
            "shadcnRegistryDependencies",
            &self.shadcn_registry_dependencies,
        );
        push_strings(
            &mut updates,
            "internalRegistryDependencies",
            &self.internal_registry_dependencies,
        );
        push_strings(
            &mut updates,
            "otherRegistryDependencies",
            &self.other_registry_dependencies,
        );

        if !self.files.is_empty() {
            let seq = serde_yaml::to_value(&self.files)
                .expect("registry files serialize to YAML");
            updates.push(("files".to_string(), seq));
        }

        updates
    }
}

/// One item in the output manifest: a read-only projection of an entry
/// plus its resolved registry dependencies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub author: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyRef>,
    pub registry_dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    pub docs: String,
    pub files: Vec<RegistryFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tailwind: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_vars: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

/// The output manifest document.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    pub homepage: String,
    pub items: Vec<RegistryItem>,
}
