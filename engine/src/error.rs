//! Error types for controller construction and tunables loading.
//!
//! Runtime misuse of the state machine (dispatch before init, reentrant
//! switches, double subscriptions) is not represented here: those are broken
//! invariants and panic at the call site.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while building a controller or loading its tunables.
#[derive(Debug, Error)]
pub enum LocomotionError {
    /// A required collaborator handle was not supplied to the builder.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// A tunable value is outside its valid range.
    #[error("invalid tunable `{field}`: {reason}")]
    InvalidTunable { field: &'static str, reason: String },

    /// The tunables file could not be read.
    #[error("failed to read tunables from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tunables document is not valid JSON for [`crate::config::LocomotionTunables`].
    #[error("failed to parse tunables: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LocomotionError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidTunable {
            field,
            reason: reason.into(),
        }
    }
}
