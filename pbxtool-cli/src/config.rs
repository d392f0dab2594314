//! Configuration file loading for pbxtool.
//!
//! Discovers and loads `pbxtool.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use pbxtool_core::ToolSettings;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "pbxtool.toml";

/// Top-level configuration from pbxtool.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PbxtoolConfig {
    /// Path to the `project.pbxproj` manifest.
    pub project: Option<Utf8PathBuf>,

    /// Directory holding timestamped backups.
    pub backup_dir: Option<Utf8PathBuf>,

    /// Target used by `add` when none is given on the command line.
    pub default_target: Option<String>,

    pub cleanup: CleanupConfig,
}

/// Cleanup section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    /// Display names removed by `cleanup`; replaces the built-in list when set.
    pub files: Option<Vec<String>>,
}

/// Discover the pbxtool.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a pbxtool.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<PbxtoolConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<PbxtoolConfig> {
    let config: PbxtoolConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<PbxtoolConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(PbxtoolConfig::default()),
    }
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: PbxtoolConfig,
}

impl ConfigMerger {
    pub fn new(config: PbxtoolConfig) -> Self {
        Self { config }
    }

    /// CLI flags override the file; the file overrides built-in defaults.
    pub fn merge_cli_args(
        self,
        cli_project: Option<Utf8PathBuf>,
        cli_backup_dir: Option<Utf8PathBuf>,
    ) -> ToolSettings {
        let defaults = ToolSettings::default();
        ToolSettings {
            project_path: cli_project
                .or(self.config.project)
                .unwrap_or(defaults.project_path),
            backup_dir: cli_backup_dir
                .or(self.config.backup_dir)
                .unwrap_or(defaults.backup_dir),
            default_target: self.config.default_target.or(defaults.default_target),
            target_policy: defaults.target_policy,
            cleanup_files: self.config.cleanup.files.unwrap_or(defaults.cleanup_files),
        }
    }
}
