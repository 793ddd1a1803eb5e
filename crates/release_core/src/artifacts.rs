use crate::error::WorkflowError;

/// Directory the release artifacts are read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactSource {
    path: String,
}

impl ArtifactSource {
    pub const SAMPLE_PATH: &'static str = r"..\example\artifacts";

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns `true` when the directory actually changed.
    pub fn set_path(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if path == self.path {
            return false;
        }
        self.path = path;
        true
    }

    pub fn validate_artifact_path(&self) -> Result<&str, WorkflowError> {
        if self.path.is_empty() {
            return Err(WorkflowError::ArtifactPathRequired);
        }
        Ok(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_artifact_path_is_required() {
        let mut artifacts = ArtifactSource::default();
        let err = artifacts.validate_artifact_path().expect_err("empty");
        assert_eq!(err.to_string(), "artifact Path field is required");

        artifacts.set_path("/srv/artifacts");
        assert_eq!(
            artifacts.validate_artifact_path().expect("set"),
            "/srv/artifacts"
        );
    }

    #[test]
    fn reports_whether_the_directory_changed() {
        let mut artifacts = ArtifactSource::default();
        assert!(artifacts.set_path("a"));
        assert!(!artifacts.set_path("a"));
        assert!(artifacts.set_path("b"));
    }
}
