//! Workflow input set collected by the inputs panel.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    domain::{ApiTarget, VersionInfo},
    error::WorkflowError,
    manifest::{ManifestName, ManifestNameParser},
};

pub const PLATFORM_SUGGESTIONS: [&str; 4] = ["egps", "ehub", "e3d", "ltp"];
pub const APPLICATION_SUGGESTIONS: [&str; 2] = ["gmed", "e3d"];

/// Validated pair required by sign, stage and publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInputs {
    pub manifest_path: String,
    pub api: ApiTarget,
}

#[derive(Debug, Clone)]
pub struct ManifestForm {
    pub platform: String,
    pub application: String,
    pub version_from: String,
    pub build_from: String,
    pub version_to: String,
    pub build_to: String,
    manifest_path: String,
    selected_api: Option<ApiTarget>,
    // One flag for all six metadata fields; they are never partially editable.
    fields_enabled: bool,
}

impl Default for ManifestForm {
    fn default() -> Self {
        Self {
            platform: String::new(),
            application: String::new(),
            version_from: String::new(),
            build_from: String::new(),
            version_to: String::new(),
            build_to: String::new(),
            manifest_path: String::new(),
            selected_api: None,
            fields_enabled: true,
        }
    }
}

impl ManifestForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manifest_path(&self) -> &str {
        &self.manifest_path
    }

    pub fn set_manifest_path(&mut self, path: impl Into<String>) {
        self.manifest_path = path.into();
    }

    pub fn selected_api(&self) -> Option<ApiTarget> {
        self.selected_api
    }

    pub fn is_selected(&self, target: ApiTarget) -> bool {
        self.selected_api == Some(target)
    }

    pub fn set_selected_api(&mut self, target: ApiTarget) {
        self.selected_api = Some(target);
    }

    pub fn fields_enabled(&self) -> bool {
        self.fields_enabled
    }

    pub fn set_fields_enabled(&mut self, enabled: bool) {
        self.fields_enabled = enabled;
    }

    /// Trimmed metadata in template order, keyed by the names used in errors.
    fn required_values(&self) -> [(&'static str, &str); 6] {
        [
            ("platform", self.platform.trim()),
            ("app", self.application.trim()),
            ("verFrom", self.version_from.trim()),
            ("buildFrom", self.build_from.trim()),
            ("verTo", self.version_to.trim()),
            ("buildTo", self.build_to.trim()),
        ]
    }

    /// Derives the manifest path for the current metadata under `directory`.
    ///
    /// Nothing is written to disk.
    pub fn create_manifest(&self, directory: &Path) -> Result<PathBuf, WorkflowError> {
        let values = self.required_values();
        if let Some(&(field, _)) = values.iter().find(|(_, value)| value.is_empty()) {
            return Err(WorkflowError::RequiredField { field });
        }
        let [platform, application, version_from, build_from, version_to, build_to] =
            values.map(|(_, value)| value.to_string());

        // Platform and application are the only dash-free components of
        // the template; a dash there makes the name unreadable.
        let dashed = platform.contains('-') || application.contains('-');
        let name = ManifestName {
            platform,
            application,
            from: VersionInfo::new(version_from, build_from),
            to: VersionInfo::new(version_to, build_to),
        };
        if dashed {
            return Err(WorkflowError::InvalidManifestName {
                name: name.file_name(),
                reason: "platform and application may not contain '-'".to_string(),
            });
        }
        Ok(directory.join(name.file_name()))
    }

    pub fn validate_sign_inputs(&self) -> Result<SignInputs, WorkflowError> {
        let manifest_path = self.manifest_path.trim();
        if manifest_path.is_empty() {
            return Err(WorkflowError::SignFieldRequired {
                field: "manifestPath",
            });
        }
        let api = self.selected_api.ok_or(WorkflowError::SignFieldRequired {
            field: "apiServer",
        })?;
        Ok(SignInputs {
            manifest_path: manifest_path.to_string(),
            api,
        })
    }

    pub fn check_api_selected(&self) -> Result<ApiTarget, WorkflowError> {
        self.selected_api.ok_or(WorkflowError::ApiNotSelected)
    }

    pub fn set_all_text(
        &mut self,
        platform: impl Into<String>,
        application: impl Into<String>,
        from: VersionInfo,
        to: VersionInfo,
    ) {
        self.platform = platform.into();
        self.application = application.into();
        self.version_from = from.version;
        self.build_from = from.build;
        self.version_to = to.version;
        self.build_to = to.build;
    }

    /// Populates the form from an existing manifest's file name and locks
    /// the derived fields. The form is unchanged if no file exists at `path`
    /// or the name does not parse.
    pub fn apply_manifest_path(
        &mut self,
        path: &str,
        parser: &dyn ManifestNameParser,
    ) -> Result<(), WorkflowError> {
        let metadata = fs::metadata(path)
            .map_err(|err| WorkflowError::io("failed to open manifest", path, err))?;
        if !metadata.is_file() {
            return Err(WorkflowError::io(
                "failed to open manifest",
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "expected a .manifest.json file"),
            ));
        }

        let file_name = Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parsed = parser.parse(&file_name)?;

        self.set_all_text(parsed.platform, parsed.application, parsed.from, parsed.to);
        self.set_fields_enabled(false);
        self.manifest_path = path.to_string();
        Ok(())
    }

    pub fn reset_for_new_manifest(&mut self) {
        self.manifest_path.clear();
        self.set_all_text("", "", VersionInfo::default(), VersionInfo::default());
        self.set_fields_enabled(true);
    }

    pub fn autofill(&mut self) {
        self.set_all_text(
            "egps",
            "gmed",
            VersionInfo::new("6.0", "rc11b"),
            VersionInfo::new("6.1", "rc2a"),
        );
        self.manifest_path.clear();
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
