use std::{io, path::PathBuf};

use thiserror::Error;

use crate::domain::WorkflowStep;

/// Failures surfaced to the user by a workflow action.
///
/// Every variant is terminal for the action that produced it; callers show
/// it and leave state as it was.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(
        "field '{field}' is required. If there is a pre-existing manifest, then enter its path. Otherwise, fill out all other fields"
    )]
    RequiredField { field: &'static str },
    #[error("sign: field '{field}' is required")]
    SignFieldRequired { field: &'static str },
    #[error("please select an API server")]
    ApiNotSelected,
    #[error("artifact Path field is required")]
    ArtifactPathRequired,
    #[error("invalid manifest name '{name}': {reason}")]
    InvalidManifestName { name: String, reason: String },
    #[error("unknown step {0}")]
    UnknownStep(String),
    #[error("error running {step} step: {source}")]
    Step {
        step: WorkflowStep,
        #[source]
        source: BackendError,
    },
    #[error("{context} {}: {source}", path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WorkflowError {
    pub fn io(context: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            context,
            path: path.into(),
            source,
        }
    }

    /// Input the user can fix by editing the form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::RequiredField { .. }
                | Self::SignFieldRequired { .. }
                | Self::ApiNotSelected
                | Self::ArtifactPathRequired
                | Self::InvalidManifestName { .. }
        )
    }
}

/// Error reported by a [`crate::backend::WorkflowBackend`] implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
