//! Configuration file loading for screenfix.
//!
//! Discovers and loads `screenfix.toml` from the working directory (or an
//! explicit `--config` path). Merges config file settings with CLI arguments
//! (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "screenfix.toml";

/// Top-level configuration from screenfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScreenfixConfig {
    /// Directory scan settings.
    pub scan: ScanConfig,

    /// Settings specific to the migrate rule.
    pub migrate: MigrateConfig,
}

/// Scan section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory containing the screen files.
    pub dir: Option<Utf8PathBuf>,

    /// Candidate file extension (default ".js").
    pub extension: Option<String>,
}

/// Migrate section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MigrateConfig {
    /// Module path used for the injected getWalletBalance import.
    pub api_import: Option<String>,
}

/// Discover the screenfix.toml config file in the working directory.
pub fn discover_config() -> Option<Utf8PathBuf> {
    let config_path = Utf8PathBuf::from(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a screenfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<ScreenfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<ScreenfixConfig> {
    let config: ScreenfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load an explicit config path, the discovered default, or the built-in
/// defaults when no file exists.
pub fn load_or_default(explicit: Option<&Utf8Path>) -> anyhow::Result<ScreenfixConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => match discover_config() {
            Some(path) => load_config(&path),
            None => Ok(ScreenfixConfig::default()),
        },
    }
}

/// Sweep settings after merging config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedSweep {
    pub screens_dir: Utf8PathBuf,
    pub extension: String,
}

/// Merge scan settings: CLI over config file over built-in defaults.
pub fn merge_sweep(
    config: &ScreenfixConfig,
    cli_dir: Option<&Utf8Path>,
    cli_ext: Option<&str>,
) -> MergedSweep {
    let screens_dir = cli_dir
        .map(Utf8Path::to_path_buf)
        .or_else(|| config.scan.dir.clone())
        .unwrap_or_else(|| Utf8PathBuf::from("."));

    let extension = cli_ext
        .map(str::to_string)
        .or_else(|| config.scan.extension.clone())
        .unwrap_or_else(|| screenfix_edit::DEFAULT_EXTENSION.to_string());

    MergedSweep {
        screens_dir,
        extension,
    }
}
