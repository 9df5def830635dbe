//! Shared configuration for the fabricsim tools.
//!
//! A TOML file at the platform config path, overlaid with
//! `FABRICSIM_`-prefixed environment variables, translated into
//! `fabricsim_core::EngineConfig`. The CLI adds flag-aware wrappers on top.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fabricsim_core::{EngineConfig, FabricName};

/// Environment prefix. Nested keys use `__`, e.g.
/// `FABRICSIM_ENGINE__STATE_FILE`.
pub const ENV_PREFIX: &str = "FABRICSIM_";

const OUTPUT_FORMATS: &[&str] = &["table", "json", "json-compact", "yaml", "plain"];
const COLOR_MODES: &[&str] = &["auto", "always", "never"];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub engine: Engine,
}

/// Output presentation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// Overview engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Engine {
    /// Keep overview state between runs.
    #[serde(default = "default_persist")]
    pub persist: bool,

    /// Where the state lives. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_file: Option<PathBuf>,

    /// Fabrics initialized on startup even with no switches.
    #[serde(default)]
    pub preload_fabrics: Vec<String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            persist: default_persist(),
            state_file: None,
            preload_fabrics: Vec::new(),
        }
    }
}

fn default_persist() -> bool {
    true
}

impl Config {
    /// Reject values the CLI would otherwise silently ignore.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !OUTPUT_FORMATS.contains(&self.defaults.output.as_str()) {
            return Err(ConfigError::Validation {
                field: "defaults.output".into(),
                reason: format!(
                    "'{}' is not one of {}",
                    self.defaults.output,
                    OUTPUT_FORMATS.join(", ")
                ),
            });
        }
        if !COLOR_MODES.contains(&self.defaults.color.as_str()) {
            return Err(ConfigError::Validation {
                field: "defaults.color".into(),
                reason: format!(
                    "'{}' is not one of {}",
                    self.defaults.color,
                    COLOR_MODES.join(", ")
                ),
            });
        }
        if let Some(bad) = self.engine.preload_fabrics.iter().find(|f| f.trim().is_empty()) {
            return Err(ConfigError::Validation {
                field: "engine.preload_fabrics".into(),
                reason: format!("fabric name '{bad}' is blank"),
            });
        }
        Ok(())
    }

    /// Effective state file: explicit path, platform default, or `None`
    /// when persistence is off.
    pub fn state_file(&self) -> Option<PathBuf> {
        if !self.engine.persist {
            return None;
        }
        Some(
            self.engine
                .state_file
                .clone()
                .unwrap_or_else(default_state_file),
        )
    }

    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig {
            preload_fabrics: self
                .engine
                .preload_fabrics
                .iter()
                .map(|f| FabricName::new(f.trim()))
                .collect(),
            state_file: self.state_file(),
        }
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "fabricsim", "fabricsim")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default location of the persisted overview state.
pub fn default_state_file() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("state.json"),
        |dirs| dirs.data_dir().join("state.json"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("fabricsim");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file + environment. A missing file is not an
/// error; defaults apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config, returning a default if anything goes wrong.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    cfg.validate()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}
