use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::format::DistanceUnit;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SWIMDASH_CONFIG";

/// Centralized configuration for swimdash
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    pub log_level: Option<String>,
    pub data: DataConfig,
    pub server: ServerSection,
    pub display: DisplayConfig,
}

/// Where the two source tables live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub records: PathBuf,
    pub aggregates: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            records: PathBuf::from("assets/daily_swim_summary.csv"),
            aggregates: PathBuf::from("assets/aggregated_swim_data.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Allow any CORS origin instead of localhost only
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub distance_units: DistanceUnit,
}

impl DashConfig {
    /// Load config from an explicit path, `$SWIMDASH_CONFIG`, or
    /// ~/.swimdash/config.toml.
    ///
    /// An explicitly named file must exist. The default location is optional:
    /// without it every setting takes its default.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (config_path, required) = Self::resolve_path(explicit);

        if !config_path.exists() {
            if required {
                anyhow::bail!(
                    "Config not found at {:?}\n\nRun: swimdash config init",
                    config_path
                );
            }
            tracing::debug!("no config at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }

        Self::from_file(&config_path)
    }

    /// Parse a specific config file.
    pub fn from_file(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)
            .context(format!("Failed to read config file: {:?}", config_path))?;

        let mut config: Self =
            toml::from_str(&content).context("Failed to parse config file (invalid TOML)")?;

        // Expand variables (${var} substitution)
        config.expand_variables(config_path.parent());

        tracing::debug!("loaded config from {:?}", config_path);
        Ok(config)
    }

    /// Which file [`load`](Self::load) reads, and whether it must exist.
    pub fn resolve_path(explicit: Option<&Path>) -> (PathBuf, bool) {
        match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match env::var(CONFIG_ENV) {
                Ok(path) if !path.trim().is_empty() => (PathBuf::from(path), true),
                _ => (Self::config_path(), false),
            },
        }
    }

    /// Get config file path: ~/.swimdash/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".swimdash/config.toml")
    }

    /// Expand ${var} references in data paths
    fn expand_variables(&mut self, config_dir: Option<&Path>) {
        let mut vars = HashMap::new();

        vars.insert("HOME".to_string(), env::var("HOME").unwrap_or_default());
        if let Some(dir) = config_dir {
            vars.insert("config_dir".to_string(), dir.display().to_string());
        }

        self.data.records = Self::expand_path(&self.data.records, &vars);
        self.data.aggregates = Self::expand_path(&self.data.aggregates, &vars);
    }

    /// Expand ${var} references in a path
    fn expand_path(path: &Path, vars: &HashMap<String, String>) -> PathBuf {
        let path_str = path.display().to_string();
        PathBuf::from(Self::expand_string(&path_str, vars))
    }

    /// Expand ${var} references in a string
    fn expand_string(s: &str, vars: &HashMap<String, String>) -> String {
        let mut result = s.to_string();

        for (key, value) in vars {
            let pattern = format!("${{{}}}", key);
            result = result.replace(&pattern, value);
        }

        result
    }

    /// Check that both source tables exist as files
    pub fn validate_paths(&self) -> Result<()> {
        let paths = [
            ("data.records", &self.data.records),
            ("data.aggregates", &self.data.aggregates),
        ];

        let mut errors = Vec::new();

        for (name, path) in paths {
            if !path.exists() {
                errors.push(format!("  ✗ {}: {:?} (does not exist)", name, path));
            } else if !path.is_file() {
                errors.push(format!("  ✗ {}: {:?} (not a file)", name, path));
            }
        }

        if !errors.is_empty() {
            anyhow::bail!("Path validation failed:\n{}", errors.join("\n"));
        }

        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// Save config to file
    pub fn save(&self, config_path: &Path) -> Result<()> {
        // Create directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(config_path, self.to_toml()?)
            .context(format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }
}
