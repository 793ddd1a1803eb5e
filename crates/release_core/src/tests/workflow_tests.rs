use super::*;

use std::{
    cell::RefCell,
    env,
    rc::Rc,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{backend::PlaceholderBackend, domain::VersionInfo, error::BackendError};

const SAMPLE_NAME: &str = "egps-gmed-1.0.0-123-to-1.1.0-124.manifest.json";

fn temp_root(label: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("release_core_{label}_{suffix}"));
    fs::create_dir_all(&root).expect("temp root");
    root
}

fn ready_workflow() -> Workflow {
    let mut workflow = Workflow::new(Box::new(PlaceholderBackend), ConfigPaths::default());
    workflow.set_artifact_path("/srv/artifacts");
    workflow.form_mut().set_all_text(
        "egps",
        "gmed",
        VersionInfo::new("1.0.0", "123"),
        VersionInfo::new("1.1.0", "124"),
    );
    workflow.select_api(ApiTarget::Dev);
    workflow
}

/// Records every request and fails the configured step.
struct ScriptedBackend {
    requests: Rc<RefCell<Vec<(WorkflowStep, StepRequest)>>>,
    fail: Option<WorkflowStep>,
}

impl ScriptedBackend {
    fn run(&self, step: WorkflowStep, request: &StepRequest) -> Result<String, BackendError> {
        self.requests.borrow_mut().push((step, request.clone()));
        if self.fail == Some(step) {
            return Err(BackendError::new("backend refused"));
        }
        Ok(format!("{step} done"))
    }
}

impl WorkflowBackend for ScriptedBackend {
    fn create(&self, request: &StepRequest) -> Result<String, BackendError> {
        self.run(WorkflowStep::Create, request)
    }
    fn sign(&self, request: &StepRequest) -> Result<String, BackendError> {
        self.run(WorkflowStep::Sign, request)
    }
    fn stage(&self, request: &StepRequest) -> Result<String, BackendError> {
        self.run(WorkflowStep::Stage, request)
    }
    fn publish(&self, request: &StepRequest) -> Result<String, BackendError> {
        self.run(WorkflowStep::Publish, request)
    }
}

type Requests = Rc<RefCell<Vec<(WorkflowStep, StepRequest)>>>;

fn scripted_workflow(fail: Option<WorkflowStep>, config: ConfigPaths) -> (Workflow, Requests) {
    let requests = Requests::default();
    let backend = ScriptedBackend {
        requests: Rc::clone(&requests),
        fail,
    };
    let mut workflow = Workflow::new(Box::new(backend), config);
    workflow.set_artifact_path("/srv/artifacts");
    workflow.form_mut().set_all_text(
        "egps",
        "gmed",
        VersionInfo::new("1.0.0", "123"),
        VersionInfo::new("1.1.0", "124"),
    );
    workflow.select_api(ApiTarget::Prod);
    (workflow, requests)
}

#[test]
fn sign_requires_artifact_path() {
    let mut workflow = Workflow::new(Box::new(PlaceholderBackend), ConfigPaths::default());
    let err = workflow.sign(Path::new("/work")).expect_err("no artifacts");
    assert!(matches!(err, WorkflowError::ArtifactPathRequired));
    assert_eq!(workflow.phase(), WorkflowPhase::NoManifest);
}

#[test]
fn sign_without_manifest_creates_then_signs() {
    let mut workflow = ready_workflow();
    let outcome = workflow.sign(Path::new("/work")).expect("sign");

    assert_eq!(
        outcome.reports,
        vec![
            "create step completed successfully!\n\nOutput:\nThe create step would have been run here"
                .to_string(),
            "sign step completed successfully!\n\nOutput:\nThe sign step would have been run"
                .to_string(),
        ]
    );
    assert!(outcome.prompt_relocate);
    assert_eq!(workflow.phase(), WorkflowPhase::Signed);
    assert!(workflow.stage_publish_enabled());
    assert!(!workflow.form().fields_enabled());
    assert_eq!(
        PathBuf::from(workflow.form().manifest_path()),
        Path::new("/work").join(SAMPLE_NAME)
    );
}

#[test]
fn sign_validates_everything_before_running_steps() {
    let (mut workflow, requests) = scripted_workflow(None, ConfigPaths::default());
    workflow.form_mut().build_from.clear();
    let err = workflow.sign(Path::new("/work")).expect_err("missing build");
    assert!(matches!(
        err,
        WorkflowError::RequiredField { field: "buildFrom" }
    ));

    let mut workflow = Workflow::new(Box::new(PlaceholderBackend), ConfigPaths::default());
    workflow.set_artifact_path("/srv/artifacts");
    workflow.form_mut().autofill();
    let err = workflow.sign(Path::new("/work")).expect_err("no api");
    assert!(matches!(err, WorkflowError::ApiNotSelected));
    assert!(workflow.form().manifest_path().is_empty());
    assert!(workflow.form().fields_enabled());
    assert_eq!(workflow.phase(), WorkflowPhase::NoManifest);
    assert!(requests.borrow().is_empty());
}

#[test]
fn failed_create_clears_manifest_path() {
    let (mut workflow, requests) =
        scripted_workflow(Some(WorkflowStep::Create), ConfigPaths::default());
    let err = workflow.sign(Path::new("/work")).expect_err("create fails");
    assert_eq!(err.to_string(), "error running create step: backend refused");
    assert!(workflow.form().manifest_path().is_empty());
    assert!(workflow.form().fields_enabled());
    assert_eq!(workflow.phase(), WorkflowPhase::NoManifest);
    assert_eq!(requests.borrow().len(), 1);
}

#[test]
fn failed_sign_keeps_created_manifest_but_stays_unsigned() {
    let (mut workflow, _) = scripted_workflow(Some(WorkflowStep::Sign), ConfigPaths::default());
    workflow.sign(Path::new("/work")).expect_err("sign fails");
    assert_eq!(workflow.phase(), WorkflowPhase::Created);
    assert!(!workflow.stage_publish_enabled());
    assert!(!workflow.form().manifest_path().is_empty());
}

#[test]
fn created_manifest_is_not_created_twice() {
    let (mut workflow, requests) = scripted_workflow(None, ConfigPaths::default());
    workflow.sign(Path::new("/work")).expect("first sign");
    let outcome = workflow.sign(Path::new("/elsewhere")).expect("second sign");

    assert_eq!(outcome.reports, vec!["sign step completed successfully!\n\nOutput:\nsign done".to_string()]);
    let steps: Vec<_> = requests.borrow().iter().map(|(step, _)| *step).collect();
    assert_eq!(
        steps,
        vec![WorkflowStep::Create, WorkflowStep::Sign, WorkflowStep::Sign]
    );
}

#[test]
fn existing_manifest_on_disk_is_signed_directly() {
    let root = temp_root("existing_manifest");
    let manifest = root.join(SAMPLE_NAME);
    fs::write(&manifest, "{}").expect("manifest");

    let (mut workflow, requests) = scripted_workflow(None, ConfigPaths::default());
    workflow
        .form_mut()
        .set_manifest_path(manifest.to_string_lossy().into_owned());
    workflow.sign(Path::new("/unused")).expect("sign");

    let recorded = requests.borrow();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0, WorkflowStep::Sign);
    assert_eq!(recorded[0].1.manifest_path, manifest);

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn step_requests_carry_configuration_and_inputs() {
    let config = ConfigPaths {
        aws_cred: Some("/home/ci/.aws/credentials".into()),
        private_key: Some("/keys/release.pem".into()),
        ..ConfigPaths::default()
    };
    let (mut workflow, requests) = scripted_workflow(None, config.clone());
    workflow.set_force(true);
    workflow.sign(Path::new("/work")).expect("sign");

    let recorded = requests.borrow();
    let (_, request) = recorded.last().expect("sign request");
    assert_eq!(request.config, config);
    assert_eq!(request.api, Some(ApiTarget::Prod));
    assert_eq!(request.artifact_path, PathBuf::from("/srv/artifacts"));
    assert!(request.force);
}

#[test]
fn stage_and_publish_require_sign_inputs() {
    let mut workflow = Workflow::new(Box::new(PlaceholderBackend), ConfigPaths::default());
    assert!(matches!(
        workflow.stage(),
        Err(WorkflowError::SignFieldRequired {
            field: "manifestPath"
        })
    ));
    workflow.form_mut().set_manifest_path("/work/x.manifest.json");
    assert!(matches!(
        workflow.publish(),
        Err(WorkflowError::SignFieldRequired { field: "apiServer" })
    ));
}

#[test]
fn stage_and_publish_clear_force_on_success() {
    let mut workflow = ready_workflow();
    workflow.sign(Path::new("/work")).expect("sign");

    workflow.set_force(true);
    let outcome = workflow.stage().expect("stage");
    assert!(!workflow.force());
    assert_eq!(
        outcome.reports,
        vec!["stage step completed successfully!\n\nOutput:\nThe stage step would have been run".to_string()]
    );

    workflow.set_force(true);
    workflow.publish().expect("publish");
    assert!(!workflow.force());
}

#[test]
fn failed_publish_keeps_force() {
    let (mut workflow, _) = scripted_workflow(Some(WorkflowStep::Publish), ConfigPaths::default());
    workflow.sign(Path::new("/work")).expect("sign");
    workflow.set_force(true);
    workflow.publish().expect_err("publish fails");
    assert!(workflow.force());
    assert!(workflow.stage_publish_enabled());
}

#[test]
fn artifact_changes_force_a_new_signature() {
    let mut workflow = ready_workflow();
    workflow.sign(Path::new("/work")).expect("sign");
    assert!(workflow.stage_publish_enabled());

    workflow.set_artifact_path("/srv/artifacts");
    assert!(workflow.stage_publish_enabled(), "same directory is not a change");

    workflow.set_artifact_path("/srv/artifacts-v2");
    assert!(!workflow.stage_publish_enabled());
    assert_eq!(workflow.phase(), WorkflowPhase::Created);
}

#[test]
fn relocation_moves_manifest_and_updates_path() {
    let root = temp_root("relocate");
    let target_dir = root.join("signed");
    fs::create_dir_all(&target_dir).expect("target dir");
    let manifest = root.join(SAMPLE_NAME);
    fs::write(&manifest, "{}").expect("manifest");

    let mut workflow = ready_workflow();
    workflow
        .form_mut()
        .set_manifest_path(manifest.to_string_lossy().into_owned());
    let moved = workflow.relocate_manifest(&target_dir).expect("relocate");

    assert_eq!(moved, target_dir.join(SAMPLE_NAME));
    assert!(moved.is_file());
    assert!(!manifest.exists());
    assert_eq!(PathBuf::from(workflow.form().manifest_path()), moved);

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn failed_relocation_keeps_path() {
    let root = temp_root("relocate_missing");
    let mut workflow = ready_workflow();
    let missing = root.join(SAMPLE_NAME);
    workflow
        .form_mut()
        .set_manifest_path(missing.to_string_lossy().into_owned());

    let err = workflow
        .relocate_manifest(&root.join("nowhere"))
        .expect_err("nothing to move");
    assert!(matches!(err, WorkflowError::Io { .. }));
    assert_eq!(PathBuf::from(workflow.form().manifest_path()), missing);

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn keeping_manifest_location_clears_force() {
    let mut workflow = ready_workflow();
    workflow.set_force(true);
    workflow.keep_manifest_location();
    assert!(!workflow.force());
}

#[test]
fn loading_manifest_locks_form_and_requires_sign() {
    let root = temp_root("load_manifest");
    let manifest = root.join("ltp-e3d-3.2-40-to-3.3-41.manifest.json");
    fs::write(&manifest, "{}").expect("manifest");

    let mut workflow = ready_workflow();
    workflow.sign(Path::new("/work")).expect("sign");

    workflow
        .load_manifest(&manifest.to_string_lossy())
        .expect("load");
    assert_eq!(workflow.form().platform, "ltp");
    assert_eq!(workflow.form().version_to, "3.3");
    assert!(!workflow.form().fields_enabled());
    assert_eq!(workflow.phase(), WorkflowPhase::Created);
    assert!(!workflow.stage_publish_enabled());

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn missing_manifest_is_not_loaded_and_sign_creates_it() {
    let root = temp_root("missing_manifest");
    let missing = root.join("gone").join(SAMPLE_NAME);
    let (mut workflow, requests) = scripted_workflow(None, ConfigPaths::default());

    let err = workflow
        .load_manifest(&missing.to_string_lossy())
        .expect_err("no file behind path");
    assert!(matches!(err, WorkflowError::Io { .. }));
    assert_eq!(workflow.phase(), WorkflowPhase::NoManifest);
    assert!(workflow.form().manifest_path().is_empty());
    assert!(workflow.form().fields_enabled());

    workflow.sign(Path::new("/work")).expect("sign");
    let steps: Vec<_> = requests.borrow().iter().map(|(step, _)| *step).collect();
    assert_eq!(steps, vec![WorkflowStep::Create, WorkflowStep::Sign]);

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn relocating_into_current_directory_is_a_no_op() {
    let root = temp_root("relocate_same_dir");
    let manifest = root.join(SAMPLE_NAME);
    fs::write(&manifest, "{}").expect("manifest");

    let mut workflow = ready_workflow();
    workflow
        .form_mut()
        .set_manifest_path(manifest.to_string_lossy().into_owned());
    let moved = workflow.relocate_manifest(&root).expect("relocate");

    assert_eq!(moved, manifest);
    assert!(manifest.is_file());
    assert_eq!(PathBuf::from(workflow.form().manifest_path()), manifest);

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn new_manifest_resets_workflow() {
    let mut workflow = ready_workflow();
    workflow.sign(Path::new("/work")).expect("sign");
    workflow.new_manifest();

    assert_eq!(workflow.phase(), WorkflowPhase::NoManifest);
    assert!(!workflow.stage_publish_enabled());
    assert!(workflow.form().fields_enabled());
    assert!(workflow.form().platform.is_empty());
    assert_eq!(workflow.form().selected_api(), Some(ApiTarget::Dev));
}

#[test]
fn autofill_sets_sample_release_and_artifacts() {
    let mut workflow = Workflow::new(Box::new(PlaceholderBackend), ConfigPaths::default());
    workflow.autofill();
    assert_eq!(workflow.artifacts().path(), ArtifactSource::SAMPLE_PATH);
    assert_eq!(workflow.form().build_from, "rc11b");
    assert!(workflow.form().manifest_path().is_empty());
}

#[test]
fn unknown_external_command_fails_without_side_effects() {
    let (workflow, requests) = scripted_workflow(None, ConfigPaths::default());
    let err = workflow
        .run_external_command("archive")
        .expect_err("unknown step");
    assert!(matches!(err, WorkflowError::UnknownStep(_)));
    assert!(requests.borrow().is_empty());
}
