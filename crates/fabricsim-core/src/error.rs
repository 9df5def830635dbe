// ── Core error types ──
//
// Everything the overview engine can reject. Validation errors are
// raised before any bucket is touched, so a caller that sees one of
// these knows nothing was committed.

use thiserror::Error;

use crate::model::Category;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Lookup errors ────────────────────────────────────────────────
    #[error("No {category} overview for fabric {fabric}")]
    NotFound { fabric: String, category: Category },

    // ── Validation errors ────────────────────────────────────────────
    #[error("Invalid role: {value}")]
    InvalidRole { value: String },

    #[error("Unknown {category} bucket: {bucket}")]
    UnknownBucket { category: Category, bucket: String },

    // ── Persistence errors ───────────────────────────────────────────
    #[error("State file {path}: {reason}")]
    Persistence { path: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn not_found(fabric: impl Into<String>, category: Category) -> Self {
        Self::NotFound {
            fabric: fabric.into(),
            category,
        }
    }

    pub(crate) fn invalid_role(value: impl Into<String>) -> Self {
        Self::InvalidRole {
            value: value.into(),
        }
    }

    pub(crate) fn unknown_bucket(category: Category, bucket: impl Into<String>) -> Self {
        Self::UnknownBucket {
            category,
            bucket: bucket.into(),
        }
    }

    /// Validation failures: rejected input, nothing changed.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidRole { .. } | Self::UnknownBucket { .. })
    }
}
