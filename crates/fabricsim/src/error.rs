//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use fabricsim_config::ConfigError;
use fabricsim_core::{Category, CoreError, FixedBucket, HealthStatus, SwitchRole, SyncStatus};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const STATE: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(fabricsim::not_found),
        help("Run: fabricsim {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid role: '{value}'")]
    #[diagnostic(
        code(fabricsim::invalid_role),
        help("Valid roles: {valid}\nRun: fabricsim roles")
    )]
    InvalidRole { value: String, valid: String },

    #[error("Unknown {category} value: '{bucket}'")]
    #[diagnostic(code(fabricsim::unknown_bucket), help("Expected one of: {valid}"))]
    UnknownBucket {
        category: String,
        bucket: String,
        valid: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fabricsim::validation))]
    Validation { field: String, reason: String },

    // ── State file ───────────────────────────────────────────────────
    #[error("State file {path} is unusable: {reason}")]
    #[diagnostic(
        code(fabricsim::state),
        help("Fix or remove the file, point --state-file elsewhere, or run with --ephemeral.")
    )]
    State { path: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(fabricsim::config),
        help("Check the config file (fabricsim config path) and FABRICSIM_* variables.")
    )]
    Config { message: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(fabricsim::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML payload: {0}")]
    #[diagnostic(code(fabricsim::yaml), help("Check the YAML file contents and try again."))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::InvalidRole { .. }
            | Self::UnknownBucket { .. }
            | Self::Validation { .. }
            | Self::Json(_)
            | Self::Yaml(_) => exit_code::USAGE,
            Self::State { .. } => exit_code::STATE,
            Self::Config { .. } | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

fn valid_buckets(category: Category) -> String {
    fn keys<B: FixedBucket>() -> String {
        B::all().iter().map(|b| b.key()).collect::<Vec<_>>().join(", ")
    }
    match category {
        Category::Sync => keys::<SyncStatus>(),
        Category::Health => keys::<HealthStatus>(),
        Category::Role => keys::<SwitchRole>(),
        Category::HwModel | Category::SwVersion => "any non-empty value".into(),
    }
}

fn valid_roles() -> String {
    SwitchRole::all()
        .iter()
        .map(|r| format!("'{}'", r.external()))
        .collect::<Vec<_>>()
        .join(", ")
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { fabric, .. } => CliError::NotFound {
                resource_type: "fabric".into(),
                identifier: fabric,
                list_command: "fabric list".into(),
            },

            CoreError::InvalidRole { value } => CliError::InvalidRole {
                value,
                valid: valid_roles(),
            },

            CoreError::UnknownBucket { category, bucket } => CliError::UnknownBucket {
                valid: valid_buckets(category),
                category: category.to_string(),
                bucket,
            },

            CoreError::Persistence { path, reason } => CliError::State { path, reason },

            CoreError::Serialization(e) => CliError::State {
                path: "(state file)".into(),
                reason: e.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
