use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::registry::types::Language;

pub const CONFIG_FILE_NAME: &str = ".shadregrc.json";

/// Path configuration for the registry pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathsConfig {
    /// Where components to be included in the registry are stored.
    #[serde(default = "default_registry_path")]
    pub registry: String,

    /// Where MDX content collections are stored.
    #[serde(default = "default_content_collection")]
    pub content_collection: String,

    /// Output path for the generated registry file.
    #[serde(default = "default_output_registry")]
    pub output_registry: String,
}

/// Registry metadata emitted into the manifest.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryMeta {
    #[serde(default = "default_registry_name")]
    pub name: String,
    #[serde(default = "default_registry_homepage")]
    pub homepage: String,
}

/// Pre-commit hook configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreCommitHookConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Glob patterns of files that should trigger regeneration.
    #[serde(default = "default_hook_paths")]
    pub paths: Vec<String>,
}

/// Policy for internal dependencies that name no known registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingInternalPolicy {
    /// Drop the dependency from the manifest and log a warning.
    Warn,
    /// Abort manifest generation.
    Error,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedConfig {
    /// Default language offered when creating new registry entries.
    #[serde(default = "default_language")]
    pub default_language: Language,

    /// Base URL used to build per-item docs links.
    /// Falls back to the registry homepage when empty.
    #[serde(default, rename = "registryURL")]
    pub registry_url: String,

    #[serde(default)]
    pub delete_registry_after_build: bool,

    #[serde(default = "default_missing_internal_policy")]
    pub on_missing_internal: MissingInternalPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default = "default_component_types")]
    pub component_types: Vec<String>,

    #[serde(default)]
    pub registry: RegistryMeta,

    #[serde(default)]
    pub pre_commit_hook: PreCommitHookConfig,

    #[serde(default)]
    pub advanced: AdvancedConfig,
}

fn default_registry_path() -> String {
    "src/registry".to_string()
}

fn default_content_collection() -> String {
    "src/content".to_string()
}

fn default_output_registry() -> String {
    "registry.json".to_string()
}

fn default_registry_name() -> String {
    "my-registry".to_string()
}

fn default_registry_homepage() -> String {
    "https://mycomponents.com".to_string()
}

fn default_hook_paths() -> Vec<String> {
    vec!["src/registry/**/*".to_string()]
}

fn default_language() -> Language {
    Language::React
}

fn default_missing_internal_policy() -> MissingInternalPolicy {
    MissingInternalPolicy::Warn
}

fn default_component_types() -> Vec<String> {
    [
        "ui",
        "component",
        "block",
        "hook",
        "lib",
        "page",
        "file",
        "style",
        "theme",
    ]
    .map(String::from)
    .to_vec()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            registry: default_registry_path(),
            content_collection: default_content_collection(),
            output_registry: default_output_registry(),
        }
    }
}

impl Default for RegistryMeta {
    fn default() -> Self {
        Self {
            name: default_registry_name(),
            homepage: default_registry_homepage(),
        }
    }
}

impl Default for PreCommitHookConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            paths: default_hook_paths(),
        }
    }
}

impl Default for AdvancedConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            registry_url: String::new(),
            delete_registry_after_build: false,
            on_missing_internal: default_missing_internal_policy(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            component_types: default_component_types(),
            registry: RegistryMeta::default(),
            pre_commit_hook: PreCommitHookConfig::default(),
            advanced: AdvancedConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if required fields are empty or any glob patterns
    /// in `preCommitHook.paths` are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.paths.registry.is_empty() {
            anyhow::bail!("Registry path is required");
        }
        if self.paths.content_collection.is_empty() {
            anyhow::bail!("Content collection path is required");
        }
        if self.paths.output_registry.is_empty() {
            anyhow::bail!("Output registry path is required");
        }
        if self.registry.name.is_empty() {
            anyhow::bail!("Registry name is required");
        }
        if self.registry.homepage.is_empty() {
            anyhow::bail!("Registry homepage is required");
        }
        if self.component_types.is_empty() {
            anyhow::bail!("At least one component type is required");
        }

        for pattern in &self.pre_commit_hook.paths {
            Pattern::new(pattern).with_context(|| {
                format!(
                    "Invalid glob pattern in 'preCommitHook.paths': \"{}\"",
                    pattern
                )
            })?;
        }

        Ok(())
    }

    /// Base URL for per-item docs links (registryURL > homepage).
    pub fn docs_base_url(&self) -> &str {
        if self.advanced.registry_url.is_empty() {
            &self.registry.homepage
        } else {
            &self.advanced.registry_url
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
