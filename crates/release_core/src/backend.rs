//! Packaging backend capability and step dispatch.

use std::path::PathBuf;

use crate::{
    config::ConfigPaths,
    domain::{ApiTarget, WorkflowStep},
    error::{BackendError, WorkflowError},
};

/// Everything a step needs to address the packaging backend.
#[derive(Debug, Clone, Default)]
pub struct StepRequest {
    pub manifest_path: PathBuf,
    pub artifact_path: PathBuf,
    pub api: Option<ApiTarget>,
    pub force: bool,
    pub config: ConfigPaths,
}

/// One method per workflow step. Each returns the backend's output text.
pub trait WorkflowBackend {
    fn create(&self, request: &StepRequest) -> Result<String, BackendError>;
    fn sign(&self, request: &StepRequest) -> Result<String, BackendError>;
    fn stage(&self, request: &StepRequest) -> Result<String, BackendError>;
    fn publish(&self, request: &StepRequest) -> Result<String, BackendError>;
}

/// Stand-in backend that performs nothing and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderBackend;

impl WorkflowBackend for PlaceholderBackend {
    fn create(&self, _request: &StepRequest) -> Result<String, BackendError> {
        Ok("The create step would have been run here".to_string())
    }

    fn sign(&self, _request: &StepRequest) -> Result<String, BackendError> {
        Ok("The sign step would have been run".to_string())
    }

    fn stage(&self, _request: &StepRequest) -> Result<String, BackendError> {
        Ok("The stage step would have been run".to_string())
    }

    fn publish(&self, _request: &StepRequest) -> Result<String, BackendError> {
        Ok("The publish step would have been run".to_string())
    }
}

pub fn run_step(
    backend: &dyn WorkflowBackend,
    step: WorkflowStep,
    request: &StepRequest,
) -> Result<String, WorkflowError> {
    tracing::info!(
        %step,
        manifest = %request.manifest_path.display(),
        api = request.api.map(ApiTarget::as_str),
        force = request.force,
        "running workflow step"
    );
    let result = match step {
        WorkflowStep::Create => backend.create(request),
        WorkflowStep::Sign => backend.sign(request),
        WorkflowStep::Stage => backend.stage(request),
        WorkflowStep::Publish => backend.publish(request),
    };
    result.map_err(|source| {
        tracing::warn!(%step, error = %source, "workflow step failed");
        WorkflowError::Step { step, source }
    })
}

/// Runs a step by name. Unknown names fail before the backend is touched.
pub fn run_external_command(
    backend: &dyn WorkflowBackend,
    step_name: &str,
    request: &StepRequest,
) -> Result<String, WorkflowError> {
    let step = step_name.parse::<WorkflowStep>()?;
    run_step(backend, step, request)
}

/// Text of the information dialog shown after a step succeeds, or `None`
/// when the backend had nothing to say.
pub fn success_report(step: WorkflowStep, message: &str) -> Option<String> {
    if message.is_empty() {
        return None;
    }
    Some(format!(
        "{step} step completed successfully!\n\nOutput:\n{message}"
    ))
}
