//! CLI configuration: thin wrapper around `fabricsim_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--config, --state-file, --ephemeral, ...).

use clap::ValueEnum;

use fabricsim_core::EngineConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use fabricsim_config::{Config, config_path, load_config_from};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Load the config named by `--config`, or the canonical one.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = global.config_file.clone().unwrap_or_else(config_path);
    Ok(load_config_from(&path)?)
}

/// Fill unset presentation flags from the config file.
///
/// Flag > env > config > built-in default.
pub fn apply_defaults(global: &mut GlobalOpts, cfg: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&cfg.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&cfg.defaults.color, true).ok();
    }
}

/// Translate config + global flags into an `EngineConfig`.
pub fn engine_config(cfg: &Config, global: &GlobalOpts) -> EngineConfig {
    let mut engine = cfg.to_engine_config();
    if global.ephemeral {
        engine.state_file = None;
    } else if let Some(ref path) = global.state_file {
        engine.state_file = Some(path.clone());
    }
    engine
}

impl GlobalOpts {
    /// Effective output format.
    pub fn format(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }

    /// Effective color mode.
    pub fn color_mode(&self) -> ColorMode {
        self.color.clone().unwrap_or(ColorMode::Auto)
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["fabricsim"];
        argv.extend_from_slice(args);
        argv.push("roles");
        match Cli::try_parse_from(argv) {
            Ok(cli) => cli.global,
            Err(e) => panic!("parse failed: {e}"),
        }
    }

    #[test]
    fn flags_beat_config_defaults() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();
        cfg.defaults.color = "never".into();

        let mut g = global(&["-o", "json"]);
        apply_defaults(&mut g, &cfg);
        assert_eq!(g.format(), OutputFormat::Json);
        assert_eq!(g.color_mode(), ColorMode::Never);
    }

    #[test]
    fn config_defaults_fill_unset_flags() {
        let mut cfg = Config::default();
        cfg.defaults.output = "json-compact".into();

        let mut g = global(&[]);
        apply_defaults(&mut g, &cfg);
        assert_eq!(g.format(), OutputFormat::JsonCompact);
    }

    #[test]
    fn state_file_flag_and_ephemeral_override_config() {
        let mut cfg = Config::default();
        cfg.engine.state_file = Some(PathBuf::from("/from/config.json"));

        let engine = engine_config(&cfg, &global(&["--state-file", "/from/flag.json"]));
        assert_eq!(engine.state_file.as_deref(), Some(Path::new("/from/flag.json")));

        let engine = engine_config(&cfg, &global(&["--ephemeral"]));
        assert!(engine.state_file.is_none());

        let engine = engine_config(&cfg, &global(&[]));
        assert_eq!(engine.state_file.as_deref(), Some(Path::new("/from/config.json")));
    }
}
