use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

pub const DEFAULT_PYTHON: &str = "python3";

/// User settings from `config.toml` in the platform config directory.
///
/// Every key is optional:
///
/// ```toml
/// python = "/usr/bin/python3.12"
/// debug = false
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Interpreter used to create environments.
    pub python: String,
    /// Show installer output and bold progress lines.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            python: DEFAULT_PYTHON.to_string(),
            debug: false,
        }
    }
}

impl Config {
    /// Loads the global config, falling back to defaults when the file is missing.
    pub fn load_global() -> Result<Config> {
        Config::load_or_default(get_global_config_file()?)
    }

    /// Loads `path`, or returns the defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))
    }
}

/// Returns the path of `config.toml` in the platform config directory.
pub fn get_global_config_file() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("dev", "barrel", "barrel")
        .ok_or_else(|| anyhow!("Could not get project directories"))?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}
