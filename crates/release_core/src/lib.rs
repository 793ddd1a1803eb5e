//! Toolkit-independent core of the release package manager: form inputs,
//! manifest naming, the backend capability and the workflow state machine.

pub mod artifacts;
pub mod backend;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod manifest;
pub mod workflow;

pub use artifacts::ArtifactSource;
pub use backend::{PlaceholderBackend, StepRequest, WorkflowBackend};
pub use config::{ConfigArgs, ConfigPaths};
pub use domain::{ApiTarget, VersionInfo, WorkflowPhase, WorkflowStep};
pub use error::{BackendError, ConfigError, WorkflowError};
pub use form::{ManifestForm, SignInputs};
pub use manifest::{ManifestName, ManifestNameParser, TemplateNameParser};
pub use workflow::{ActionOutcome, Workflow};
