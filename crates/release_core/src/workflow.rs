//! Application state: sequences create, sign, stage and publish over the
//! form and artifact inputs.
//!
//! Every action validates all of its inputs before touching state, so a
//! failed action leaves the workflow exactly as it was. The only exception
//! is a sign that fails after its create step succeeded: the created
//! manifest stays tracked, since that step did complete.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    artifacts::ArtifactSource,
    backend::{run_step, success_report, StepRequest, WorkflowBackend},
    config::ConfigPaths,
    domain::{ApiTarget, WorkflowPhase, WorkflowStep},
    error::WorkflowError,
    form::ManifestForm,
    manifest::{ManifestNameParser, TemplateNameParser},
};

/// What the UI should show after an action succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Success reports, one per step that produced output, in run order.
    pub reports: Vec<String>,
    /// Ask whether the freshly signed manifest should move elsewhere.
    pub prompt_relocate: bool,
}

pub struct Workflow {
    form: ManifestForm,
    artifacts: ArtifactSource,
    phase: WorkflowPhase,
    force: bool,
    stage_publish_enabled: bool,
    config: ConfigPaths,
    backend: Box<dyn WorkflowBackend>,
    parser: Box<dyn ManifestNameParser>,
}

impl Workflow {
    pub fn new(backend: Box<dyn WorkflowBackend>, config: ConfigPaths) -> Self {
        Self::with_parser(backend, Box::new(TemplateNameParser), config)
    }

    pub fn with_parser(
        backend: Box<dyn WorkflowBackend>,
        parser: Box<dyn ManifestNameParser>,
        config: ConfigPaths,
    ) -> Self {
        Self {
            form: ManifestForm::new(),
            artifacts: ArtifactSource::default(),
            phase: WorkflowPhase::NoManifest,
            force: false,
            stage_publish_enabled: false,
            config,
            backend,
            parser,
        }
    }

    pub fn form(&self) -> &ManifestForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ManifestForm {
        &mut self.form
    }

    pub fn artifacts(&self) -> &ArtifactSource {
        &self.artifacts
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    pub fn force(&self) -> bool {
        self.force
    }

    pub fn set_force(&mut self, force: bool) {
        self.force = force;
    }

    pub fn stage_publish_enabled(&self) -> bool {
        self.stage_publish_enabled
    }

    pub fn config(&self) -> &ConfigPaths {
        &self.config
    }

    pub fn select_api(&mut self, target: ApiTarget) {
        tracing::debug!(api = %target, "api target selected");
        self.form.set_selected_api(target);
    }

    /// Changing the artifact directory invalidates any signature.
    pub fn set_artifact_path(&mut self, path: impl Into<String>) {
        if self.artifacts.set_path(path) {
            self.artifacts_changed();
        }
    }

    pub fn artifacts_changed(&mut self) {
        if self.stage_publish_enabled {
            tracing::info!("artifact set changed; manifest must be signed again");
        }
        self.stage_publish_enabled = false;
        if self.phase == WorkflowPhase::Signed {
            self.phase = WorkflowPhase::Created;
        }
    }

    /// A manifest is tracked once it exists on disk or was created by this
    /// session's create step.
    fn manifest_is_tracked(&self) -> bool {
        let path = self.form.manifest_path().trim();
        !path.is_empty() && (Path::new(path).is_file() || self.phase != WorkflowPhase::NoManifest)
    }

    fn step_request(&self, manifest_path: PathBuf, api: Option<ApiTarget>) -> StepRequest {
        StepRequest {
            manifest_path,
            artifact_path: PathBuf::from(self.artifacts.path()),
            api,
            force: self.force,
            config: self.config.clone(),
        }
    }

    /// Creates the manifest first when none is tracked, then signs it.
    ///
    /// New manifests are named under `working_dir`.
    pub fn sign(&mut self, working_dir: &Path) -> Result<ActionOutcome, WorkflowError> {
        self.artifacts.validate_artifact_path()?;

        let needs_create = !self.manifest_is_tracked();
        let manifest_path = if needs_create {
            self.form.create_manifest(working_dir)?
        } else {
            PathBuf::from(self.form.manifest_path().trim())
        };
        let api = self.form.check_api_selected()?;

        let mut outcome = ActionOutcome::default();
        let request = self.step_request(manifest_path.clone(), Some(api));

        if needs_create {
            match run_step(self.backend.as_ref(), WorkflowStep::Create, &request) {
                Ok(message) => {
                    self.form
                        .set_manifest_path(manifest_path.to_string_lossy().into_owned());
                    self.form.set_fields_enabled(false);
                    self.phase = WorkflowPhase::Created;
                    outcome
                        .reports
                        .extend(success_report(WorkflowStep::Create, &message));
                }
                Err(err) => {
                    self.form.set_manifest_path("");
                    self.phase = WorkflowPhase::NoManifest;
                    return Err(err);
                }
            }
        }

        let message = run_step(self.backend.as_ref(), WorkflowStep::Sign, &request)?;
        self.phase = WorkflowPhase::Signed;
        self.stage_publish_enabled = true;
        outcome
            .reports
            .extend(success_report(WorkflowStep::Sign, &message));
        outcome.prompt_relocate = true;
        tracing::info!(manifest = %manifest_path.display(), "manifest signed");
        Ok(outcome)
    }

    pub fn stage(&mut self) -> Result<ActionOutcome, WorkflowError> {
        self.run_release_step(WorkflowStep::Stage)
    }

    pub fn publish(&mut self) -> Result<ActionOutcome, WorkflowError> {
        self.run_release_step(WorkflowStep::Publish)
    }

    fn run_release_step(&mut self, step: WorkflowStep) -> Result<ActionOutcome, WorkflowError> {
        let inputs = self.form.validate_sign_inputs()?;
        let request = self.step_request(PathBuf::from(inputs.manifest_path), Some(inputs.api));
        let message = run_step(self.backend.as_ref(), step, &request)?;
        self.force = false;
        Ok(ActionOutcome {
            reports: success_report(step, &message).into_iter().collect(),
            prompt_relocate: false,
        })
    }

    /// Runs a step by name against the current inputs without validating
    /// them first.
    pub fn run_external_command(&self, step_name: &str) -> Result<ActionOutcome, WorkflowError> {
        let step = step_name.parse::<WorkflowStep>()?;
        let request = self.step_request(
            PathBuf::from(self.form.manifest_path().trim()),
            self.form.selected_api(),
        );
        let message = run_step(self.backend.as_ref(), step, &request)?;
        Ok(ActionOutcome {
            reports: success_report(step, &message).into_iter().collect(),
            prompt_relocate: false,
        })
    }

    /// Moves the manifest file into `new_dir`, keeping its name.
    pub fn relocate_manifest(&mut self, new_dir: &Path) -> Result<PathBuf, WorkflowError> {
        let current = PathBuf::from(self.form.manifest_path().trim());
        let file_name = current
            .file_name()
            .ok_or(WorkflowError::SignFieldRequired {
                field: "manifestPath",
            })?
            .to_owned();
        let target = new_dir.join(file_name);
        if target == current {
            return Ok(target);
        }

        fs::rename(&current, &target)
            .map_err(|err| WorkflowError::io("failed to move manifest", &current, err))?;
        tracing::info!(
            from = %current.display(),
            to = %target.display(),
            "manifest relocated"
        );
        self.form
            .set_manifest_path(target.to_string_lossy().into_owned());
        Ok(target)
    }

    /// Declining relocation resets the force flag.
    pub fn keep_manifest_location(&mut self) {
        self.force = false;
    }

    /// Switches to an existing manifest; its name drives the locked fields.
    pub fn load_manifest(&mut self, path: &str) -> Result<(), WorkflowError> {
        self.form.apply_manifest_path(path, self.parser.as_ref())?;
        self.phase = WorkflowPhase::Created;
        self.stage_publish_enabled = false;
        tracing::info!(manifest = path, "manifest loaded");
        Ok(())
    }

    pub fn new_manifest(&mut self) {
        self.form.reset_for_new_manifest();
        self.phase = WorkflowPhase::NoManifest;
        self.stage_publish_enabled = false;
    }

    pub fn autofill(&mut self) {
        self.form.autofill();
        self.set_artifact_path(ArtifactSource::SAMPLE_PATH);
        self.phase = WorkflowPhase::NoManifest;
        self.stage_publish_enabled = false;
    }
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
