//! Viewer configuration.
//!
//! Resolution order:
//! 1. explicit `--config <path>`
//! 2. `CEDAR_VIEWER_CONFIG` environment variable
//! 3. built-in defaults
//!
//! Single settings can then be overridden from the environment
//! (`CEDAR_VIEWER_SAMPLE_DIR`, `CEDAR_VIEWER_HIDE_NAMESPACE`); a `.env` file in
//! the working directory is honoured. Command-line flags win over all of it.

use crate::render::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use viewer_projection::View;

pub const CONFIG_ENV: &str = "CEDAR_VIEWER_CONFIG";
pub const SAMPLE_DIR_ENV: &str = "CEDAR_VIEWER_SAMPLE_DIR";
pub const HIDE_NAMESPACE_ENV: &str = "CEDAR_VIEWER_HIDE_NAMESPACE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Directory holding `schema.cedarschema` (or `schema.json`) and
    /// `entities.json`. The bundled samples are used when unset.
    pub sample_dir: Option<PathBuf>,
    /// Start with namespace prefixes hidden.
    pub hide_namespace_prefix: bool,
    /// View shown when no subcommand is given.
    pub default_view: View,
    /// Output format when `--format` is not given.
    pub output: OutputFormat,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            sample_dir: None,
            hide_namespace_prefix: false,
            default_view: View::Overview,
            output: OutputFormat::Pretty,
        }
    }
}

impl ViewerConfig {
    /// Parse a YAML document.
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).context("Invalid viewer configuration")
    }

    /// Load a YAML config file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&source)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        info!(path = %path.display(), "Loaded viewer config");
        Ok(config)
    }

    /// Resolve the configuration from an optional explicit path and the
    /// process environment.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env");
        }

        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::load_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Apply single-setting overrides from a variable lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(SAMPLE_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            self.sample_dir = Some(PathBuf::from(dir));
        }

        if let Some(value) = lookup(HIDE_NAMESPACE_ENV) {
            match parse_flag(&value) {
                Some(hide) => self.hide_namespace_prefix = hide,
                None => warn!(
                    variable = HIDE_NAMESPACE_ENV,
                    value = %value,
                    "Ignoring unrecognized boolean"
                ),
            }
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn test_yaml_with_defaults() {
        let config = ViewerConfig::from_yaml("default_view: by-type\noutput: json\n").unwrap();
        assert_eq!(
            config,
            ViewerConfig {
                default_view: View::ByType,
                output: OutputFormat::Json,
                ..ViewerConfig::default()
            }
        );
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = ViewerConfig::from_yaml("colour: always\n").unwrap_err();
        assert!(format!("{err:#}").contains("colour"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (SAMPLE_DIR_ENV, "/data/cedar"),
            (HIDE_NAMESPACE_ENV, "yes"),
        ]);
        let mut config = ViewerConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.sample_dir, Some(PathBuf::from("/data/cedar")));
        assert!(config.hide_namespace_prefix);
    }

    #[test]
    fn test_bad_flag_keeps_value() {
        let mut config = ViewerConfig {
            hide_namespace_prefix: true,
            ..ViewerConfig::default()
        };
        config.apply_overrides(|name| (name == HIDE_NAMESPACE_ENV).then(|| "maybe".to_string()));
        assert!(config.hide_namespace_prefix);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.yaml");
        std::fs::write(&path, "hide_namespace_prefix: true\nsample_dir: ./data\n").unwrap();

        let config = ViewerConfig::load_file(&path).unwrap();
        assert!(config.hide_namespace_prefix);
        assert_eq!(config.sample_dir, Some(PathBuf::from("./data")));

        let missing = ViewerConfig::load_file(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(missing.to_string().contains("Failed to read config file"));
    }
}
