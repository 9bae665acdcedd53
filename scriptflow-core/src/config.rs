//! Configuration file support
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.scriptflowrc.json` in project root
//! 3. `scriptflow.config.json` in project root
//!
//! All fields are optional. CLI flags take precedence over config file values.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default exclude patterns applied when no config is specified
const DEFAULT_EXCLUDES: &[&str] = &[
    "**/.git/**",
    "**/node_modules/**",
    "**/bin/**",
    "**/obj/**",
    "**/*.Tests.ps1",
];

/// Config file names probed in the project root, in order.
const CONFIG_FILE_NAMES: &[&str] = &[".scriptflowrc.json", "scriptflow.config.json"];

/// Scriptflow configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptflowConfig {
    /// Glob patterns for files to include (default: all supported extensions)
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns for files to exclude (default: VCS dirs, test scripts)
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Title used in the HTML report header
    #[serde(default)]
    pub report_title: Option<String>,
}

/// Resolved configuration with compiled glob patterns
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Compiled include patterns (empty means include all)
    pub include: Option<GlobSet>,
    /// Compiled exclude patterns
    pub exclude: GlobSet,
    /// HTML report title
    pub report_title: String,
    /// Path the config was loaded from, when one was found
    pub config_path: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Check whether a script file passes the include/exclude filters.
    pub fn should_include(&self, path: &Path) -> bool {
        if self.exclude.is_match(path) {
            return false;
        }
        match &self.include {
            Some(include) => include.is_match(path),
            None => true,
        }
    }
}

/// Load configuration and resolve it against defaults.
///
/// `explicit_path` (the CLI flag) wins over auto-discovery; a missing
/// explicit path is an error, while absent discovery files just mean
/// defaults.
pub fn load_and_resolve(
    project_root: &Path,
    explicit_path: Option<&Path>,
) -> Result<ResolvedConfig> {
    let (config, config_path) = match explicit_path {
        Some(path) => {
            let config = load_file(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?;
            (config, Some(path.to_path_buf()))
        }
        None => match discover_config(project_root) {
            Some(path) => {
                let config = load_file(&path)
                    .with_context(|| format!("Failed to load config file: {}", path.display()))?;
                (config, Some(path))
            }
            None => (ScriptflowConfig::default(), None),
        },
    };

    resolve(config, config_path)
}

/// Compile a config into its resolved form.
pub fn resolve(config: ScriptflowConfig, config_path: Option<PathBuf>) -> Result<ResolvedConfig> {
    let include = if config.include.is_empty() {
        None
    } else {
        Some(build_glob_set(&config.include).context("Invalid include pattern")?)
    };

    let exclude_patterns: Vec<String> = if config.exclude.is_empty() {
        DEFAULT_EXCLUDES.iter().map(|p| p.to_string()).collect()
    } else {
        config.exclude.clone()
    };
    let exclude = build_glob_set(&exclude_patterns).context("Invalid exclude pattern")?;

    Ok(ResolvedConfig {
        include,
        exclude,
        report_title: config
            .report_title
            .unwrap_or_else(|| "PowerShell Script Function Summary".to_string()),
        config_path,
    })
}

/// Parse a config file, rejecting unknown fields.
pub fn load_file(path: &Path) -> Result<ScriptflowConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: ScriptflowConfig = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid JSON in config file: {}", path.display()))?;
    Ok(config)
}

fn discover_config(project_root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("Bad glob: {}", pattern))?);
    }
    Ok(builder.build()?)
}
