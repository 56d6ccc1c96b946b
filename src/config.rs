//! User configuration: `~/.ctrace.yaml` with `CTRACE_*` environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Config file names looked up in the home directory, in order
pub const CONFIG_FILE_NAMES: &[&str] = &[".ctrace.yaml", ".ctrace.yml"];

/// Settings for a ctrace run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Whether to color terminal output
    pub color: bool,
    /// Directory holding `go.mod`; discovered from the traced file when unset
    pub module_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            color: true,
            module_root: None,
        }
    }
}

impl Config {
    /// Loads the home directory config file (if any) and applies the environment
    pub fn load() -> Result<Self> {
        let mut config = match dirs::home_dir() {
            Some(home) => Self::from_dir(&home)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads the first config file found in `dir`, or defaults if there is none
    pub fn from_dir(dir: &Path) -> Result<Self> {
        match CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
        {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!("Using config file: {}", path.display());
        Ok(config)
    }

    /// Overrides settings from `CTRACE_LOG_LEVEL`, `CTRACE_COLOR` and `CTRACE_MODULE_ROOT`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(level) = lookup("CTRACE_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(color) = lookup("CTRACE_COLOR") {
            self.color = parse_bool(&color)
                .with_context(|| format!("Invalid CTRACE_COLOR value '{}'", color))?;
        }
        if let Some(root) = lookup("CTRACE_MODULE_ROOT") {
            self.module_root = Some(PathBuf::from(root));
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected true or false, got '{}'", other),
    }
}
