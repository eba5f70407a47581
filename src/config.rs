//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsprune/rsprune.toml`
//! 3. Environment variables: `RSPRUNE_*` prefix
//! 4. The `--source-dir` flag

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for rsprune.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding named tree documents as `<name>.json`
    /// (default: current directory)
    pub source_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
        }
    }
}

/// Raw settings for intermediate parsing (fields are Option to detect
/// "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub source_dir: Option<PathBuf>,
}

/// Get the XDG config directory for rsprune.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rsprune").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rsprune.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/rsprune/rsprune.toml`
    /// 3. Environment variables: `RSPRUNE_*` prefix
    /// 4. `source_dir_flag`, when given on the command line
    pub fn load(source_dir_flag: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                if let Some(dir) = raw.source_dir {
                    current.source_dir = dir;
                }
            }
        }

        current = Self::apply_env_overrides(current)?;

        if let Some(dir) = source_dir_flag {
            current.source_dir = dir.to_path_buf();
        }

        Ok(current)
    }

    /// Apply RSPRUNE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(Environment::with_prefix("RSPRUNE"));
        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("source_dir") {
            settings.source_dir = PathBuf::from(val);
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# rsprune configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/rsprune/rsprune.toml
#   Env:    RSPRUNE_* environment variables (explicit overrides)
#   Flag:   --source-dir on the command line

# Directory holding named tree documents as <name>.json
# source_dir = "/var/lib/trees"
"#
        .to_string()
    }

    /// Write the template to the global config path, refusing to overwrite.
    pub fn init_global() -> Result<PathBuf, ApplicationError> {
        let path = global_config_path().ok_or_else(|| ApplicationError::Config {
            message: "could not determine the global config directory".to_string(),
        })?;
        if path.exists() {
            return Err(ApplicationError::Config {
                message: format!("refusing to overwrite existing config: {}", path.display()),
            });
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ApplicationError::Config {
                message: format!("create {}: {}", parent.display(), e),
            })?;
        }
        std::fs::write(&path, Self::template()).map_err(|e| ApplicationError::Config {
            message: format!("write {}: {}", path.display(), e),
        })?;
        Ok(path)
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load(None).expect("load defaults");
        assert_eq!(settings.source_dir, PathBuf::from("."));
    }

    #[test]
    fn given_flag_when_loading_then_flag_wins() {
        let settings = Settings::load(Some(Path::new("/tmp/trees"))).expect("load with flag");
        assert_eq!(settings.source_dir, PathBuf::from("/tmp/trees"));
    }

    #[test]
    fn given_settings_when_rendering_toml_then_contains_source_dir() {
        let settings = Settings {
            source_dir: PathBuf::from("/data/trees"),
        };
        let toml = settings.to_toml().expect("render toml");
        assert!(toml.contains("source_dir"));
        assert!(toml.contains("/data/trees"));
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("parse template");
        // All template entries are commented out
        assert!(raw.source_dir.is_none());
    }
}
