//! Global uniqueness configuration.
//!
//! The embedding queue system loads a [`UniquenessConfig`] once at process
//! start and hands a shared reference to the digest engine. The engine never
//! reads configuration through ambient state.
//!
//! Precedence, lowest to highest: built-in defaults, optional config file,
//! environment variables (`UNIQUEJOBS_*`).

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Raw, fully-optional config file section.
#[derive(Debug, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub unique_prefix: Option<String>,
    #[serde(default)]
    pub unique_args_enabled: Option<bool>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Process-wide uniqueness defaults.
///
/// `unique_prefix` is prepended (with a `:` separator) to every computed
/// digest; `unique_args_enabled` turns argument filtering on for handlers
/// that do not override it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniquenessConfig {
    pub unique_prefix: String,
    pub unique_args_enabled: bool,
}

impl Default for UniquenessConfig {
    fn default() -> Self {
        Self {
            unique_prefix: "uniquejobs".to_string(),
            unique_args_enabled: false,
        }
    }
}

/// Load a [`RawConfigFile`] from a path. The format is inferred from the
/// extension: .toml, .yaml/.yml, .json
pub fn load_raw_from_file<P: AsRef<Path>>(path: P) -> Result<RawConfigFile, ConfigError> {
    let path = path.as_ref();
    let s = fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());
    parse_config_str(&s, ext.as_deref())
}

/// Parse configuration from a string with optional format hint
#[inline]
fn parse_config_str(s: &str, ext: Option<&str>) -> Result<RawConfigFile, ConfigError> {
    match ext {
        #[cfg(feature = "toml")]
        Some("toml") => toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string())),
        #[cfg(feature = "yaml")]
        Some("yaml" | "yml") => {
            serde_yaml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
        }
        #[cfg(feature = "json")]
        Some("json") => serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string())),
        _ => parse_config_auto(s),
    }
}

/// Try to parse config by attempting each enabled format
#[inline]
fn parse_config_auto(s: &str) -> Result<RawConfigFile, ConfigError> {
    #[cfg(feature = "yaml")]
    if let Ok(cfg) = serde_yaml::from_str(s) {
        return Ok(cfg);
    }

    #[cfg(feature = "toml")]
    if let Ok(cfg) = toml::from_str(s) {
        return Ok(cfg);
    }

    #[cfg(feature = "json")]
    if let Ok(cfg) = serde_json::from_str(s) {
        return Ok(cfg);
    }

    #[cfg(any(feature = "yaml", feature = "toml", feature = "json"))]
    {
        Err(ConfigError::Parse(
            "failed to parse config as any supported format".into(),
        ))
    }

    #[cfg(not(any(feature = "yaml", feature = "toml", feature = "json")))]
    {
        let _ = s; // suppress unused warning
        Err(ConfigError::Parse("no config format enabled".into()))
    }
}

/// Load a concrete [`UniquenessConfig`] from an optional file and environment
/// variables. Environment variables take precedence over file values and
/// defaults.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<UniquenessConfig, ConfigError> {
    let mut cfg = UniquenessConfig::default();

    if let Some(p) = path {
        let raw = load_raw_from_file(p)?;
        if let Some(v) = raw.unique_prefix {
            cfg.unique_prefix = v;
        }
        if let Some(v) = raw.unique_args_enabled {
            cfg.unique_args_enabled = v;
        }
    }

    apply_env_overrides(&mut cfg)?;
    validate(&cfg)?;

    Ok(cfg)
}

/// Apply `UNIQUEJOBS_*` environment variable overrides to config
fn apply_env_overrides(cfg: &mut UniquenessConfig) -> Result<(), ConfigError> {
    if let Some(v) = env_str("UNIQUEJOBS_PREFIX") {
        cfg.unique_prefix = v;
    }
    if let Some(v) = env_bool("UNIQUEJOBS_UNIQUE_ARGS_ENABLED")? {
        cfg.unique_args_enabled = v;
    }
    Ok(())
}

/// The prefix ends up on the left of `"{prefix}:{hex}"`, so it must be
/// non-empty and free of the separator.
fn validate(cfg: &UniquenessConfig) -> Result<(), ConfigError> {
    if cfg.unique_prefix.is_empty() {
        return Err(ConfigError::Validation("unique_prefix is empty".into()));
    }
    if cfg.unique_prefix.contains(':') {
        return Err(ConfigError::Validation(format!(
            "unique_prefix {:?} contains ':'",
            cfg.unique_prefix
        )));
    }
    Ok(())
}

/// Helper to get env var as string
#[inline]
fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Helper to parse env var as bool
#[inline]
fn env_bool(key: &str) -> Result<Option<bool>, ConfigError> {
    match env::var(key) {
        Ok(v) => parse_bool(&v)
            .map(Some)
            .map_err(|_| ConfigError::Parse(format!("invalid {}", key))),
        Err(_) => Ok(None),
    }
}

fn parse_bool(s: &str) -> Result<bool, ()> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(()),
    }
}
