//! Events queued by widgets and the error model shown in dialogs.

use release_core::{ApiTarget, WorkflowError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    NewManifest,
    Autofill,
    ApiSelected(ApiTarget),
    /// The manifest chooser committed a path; `previous` is what it replaced.
    ManifestPathChanged {
        previous: String,
    },
    ArtifactPathChanged {
        previous: String,
    },
    Sign,
    Stage,
    Publish,
    Quit,
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::NewManifest => "new_manifest",
            UiEvent::Autofill => "autofill",
            UiEvent::ApiSelected(_) => "api_selected",
            UiEvent::ManifestPathChanged { .. } => "manifest_path_changed",
            UiEvent::ArtifactPathChanged { .. } => "artifact_path_changed",
            UiEvent::Sign => "sign",
            UiEvent::Stage => "stage",
            UiEvent::Publish => "publish",
            UiEvent::Quit => "quit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Filesystem,
    Step,
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    message: String,
}

impl UiError {
    pub fn new(category: UiErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }

    pub fn from_workflow(err: &WorkflowError) -> Self {
        let category = if err.is_validation() {
            UiErrorCategory::Validation
        } else {
            match err {
                WorkflowError::Io { .. } => UiErrorCategory::Filesystem,
                WorkflowError::Step { .. } => UiErrorCategory::Step,
                _ => UiErrorCategory::Unexpected,
            }
        };
        Self::new(category, err.to_string())
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn title(&self) -> &'static str {
        err_label(self.category())
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Missing input",
        UiErrorCategory::Filesystem => "File error",
        UiErrorCategory::Step => "Step failed",
        UiErrorCategory::Unexpected => "Error",
    }
}
