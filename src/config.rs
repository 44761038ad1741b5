//! Global configuration stored in stencil.json.
//!
//! Holds the author identity, the workspace root new projects are created
//! under, and the template settings (repo URL plus the literal markers the
//! rewrite phase expects to find). Every marker the engine and mutator
//! consume is explicit configuration here; nothing is ambient.

use serde::{Deserialize, Serialize};
use std::fs;

use crate::error::Result;
use crate::paths;

/// Root configuration structure for stencil.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StencilConfig {
    /// Author name used for new projects (prompted when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Directory new projects are created under. Supports `~` expansion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<String>,

    #[serde(default)]
    pub template: TemplateConfig,
}

/// Template repository settings and rewrite markers.
///
/// Defaults describe the upstream example-mod template; a stencil.json can
/// point at any repository whose markers are known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Template repository URL to clone.
    #[serde(default = "default_repo")]
    pub repo: String,

    /// Author placeholder used in the template's package directories.
    #[serde(default = "default_author_marker")]
    pub author_marker: String,

    /// Project-id placeholder used in directories and build properties.
    #[serde(default = "default_id_marker")]
    pub id_marker: String,

    /// Main type-name placeholder used in source files.
    #[serde(default = "default_class_marker")]
    pub class_marker: String,

    /// Path from the project root to the package parent directory.
    #[serde(default = "default_package_dir")]
    pub package_dir: String,

    /// Extension of source files that carry a package declaration.
    #[serde(default = "default_source_ext")]
    pub source_ext: String,

    /// File whose logging calls reference the main type (expected twice).
    #[serde(default = "default_proxy_file")]
    pub proxy_file: String,

    /// Build properties file rewritten via a chain.
    #[serde(default = "default_properties_file")]
    pub properties_file: String,

    /// Occurrences of the package marker inside the properties file.
    #[serde(default = "default_package_marker_count")]
    pub package_marker_count: usize,

    /// Directories pruned from the fresh clone.
    #[serde(default = "default_prune_dirs")]
    pub prune_dirs: Vec<String>,

    /// Suffix for transient backup files during rewrites.
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            repo: default_repo(),
            author_marker: default_author_marker(),
            id_marker: default_id_marker(),
            class_marker: default_class_marker(),
            package_dir: default_package_dir(),
            source_ext: default_source_ext(),
            proxy_file: default_proxy_file(),
            properties_file: default_properties_file(),
            package_marker_count: default_package_marker_count(),
            prune_dirs: default_prune_dirs(),
            backup_suffix: default_backup_suffix(),
        }
    }
}

impl TemplateConfig {
    /// Full package placeholder, e.g. "com.myname.mymodid".
    pub fn package_marker(&self) -> String {
        format!("com.{}.{}", self.author_marker, self.id_marker)
    }

    /// Main source file placeholder, e.g. "MyMod.java".
    pub fn class_file(&self) -> String {
        format!("{}{}", self.class_marker, self.source_ext)
    }
}

// =============================================================================
// Default value functions (match the upstream template)
// =============================================================================

fn default_repo() -> String {
    "https://github.com/SinTh0r4s/ExampleMod1.7.10".to_string()
}

fn default_author_marker() -> String {
    "myname".to_string()
}

fn default_id_marker() -> String {
    "mymodid".to_string()
}

fn default_class_marker() -> String {
    "MyMod".to_string()
}

fn default_package_dir() -> String {
    "src/main/java/com".to_string()
}

fn default_source_ext() -> String {
    ".java".to_string()
}

fn default_proxy_file() -> String {
    "CommonProxy.java".to_string()
}

fn default_properties_file() -> String {
    "gradle.properties".to_string()
}

fn default_package_marker_count() -> usize {
    5
}

fn default_prune_dirs() -> Vec<String> {
    vec![".git".to_string(), ".github".to_string()]
}

fn default_backup_suffix() -> String {
    ".bak".to_string()
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load config, falling back to defaults when stencil.json is missing or invalid.
pub fn load_config() -> StencilConfig {
    load_config_from_file().unwrap_or_default()
}

/// Attempt to load config from the stencil.json file.
fn load_config_from_file() -> Result<StencilConfig> {
    let path = paths::stencil_json()?;

    if !path.exists() {
        return Err(crate::Error::other("stencil.json not found"));
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    parse_config(&content, &path.display().to_string())
}

/// Parse config file content. Separated from the file read so fixtures can
/// exercise parsing directly.
pub fn parse_config(content: &str, path: &str) -> Result<StencilConfig> {
    serde_json::from_str(content).map_err(|e| crate::Error::config_invalid_json(path, e))
}

/// Save config to the stencil.json file (creates it if missing).
pub fn save_config(config: &StencilConfig) -> Result<()> {
    let path = paths::stencil_json()?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
        })?;
    }

    let content = serde_json::to_string_pretty(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize stencil.json".to_string()))
    })?;

    fs::write(&path, content).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("write {}", path.display())))
    })?;

    Ok(())
}

/// Delete the stencil.json file (reset to defaults)
pub fn reset_config() -> Result<bool> {
    let path = paths::stencil_json()?;

    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("delete {}", path.display())))
        })?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Get the path to stencil.json (for display purposes)
pub fn config_path() -> Result<String> {
    Ok(paths::stencil_json()?.display().to_string())
}
