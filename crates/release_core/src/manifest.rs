//! Manifest file naming: deriving a name from release metadata and reading
//! the metadata back out of a name.

use crate::{domain::VersionInfo, error::WorkflowError};

pub const MANIFEST_SUFFIX: &str = ".manifest.json";
const RANGE_SEPARATOR: &str = "-to-";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestName {
    pub platform: String,
    pub application: String,
    pub from: VersionInfo,
    pub to: VersionInfo,
}

impl ManifestName {
    /// `<platform>-<app>-<verFrom>-<buildFrom>-to-<verTo>-<buildTo>.manifest.json`
    pub fn file_name(&self) -> String {
        format!(
            "{}-{}-{}-{}{RANGE_SEPARATOR}{}-{}{MANIFEST_SUFFIX}",
            self.platform,
            self.application,
            self.from.version,
            self.from.build,
            self.to.version,
            self.to.build,
        )
    }
}

/// Reads release metadata out of a manifest file name.
pub trait ManifestNameParser {
    fn parse(&self, file_name: &str) -> Result<ManifestName, WorkflowError>;
}

/// Inverts [`ManifestName::file_name`].
///
/// Platform and application may not contain `-`; builds are taken as the
/// last dash-separated component of each side so versions may.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNameParser;

impl ManifestNameParser for TemplateNameParser {
    fn parse(&self, file_name: &str) -> Result<ManifestName, WorkflowError> {
        let invalid = |reason: &str| WorkflowError::InvalidManifestName {
            name: file_name.to_string(),
            reason: reason.to_string(),
        };

        let stem = file_name
            .strip_suffix(MANIFEST_SUFFIX)
            .ok_or_else(|| invalid("missing .manifest.json suffix"))?;
        let (from_part, to_part) = stem
            .split_once(RANGE_SEPARATOR)
            .ok_or_else(|| invalid("missing '-to-' separator"))?;

        let mut head = from_part.splitn(3, '-');
        let platform = head.next().unwrap_or_default();
        let application = head.next().unwrap_or_default();
        let from_rest = head
            .next()
            .ok_or_else(|| invalid("expected <platform>-<app>-<version>-<build> before '-to-'"))?;

        let from = split_version_build(from_rest).ok_or_else(|| invalid("missing from build"))?;
        let to = split_version_build(to_part).ok_or_else(|| invalid("missing to build"))?;

        if platform.is_empty() || application.is_empty() {
            return Err(invalid("empty platform or application"));
        }

        Ok(ManifestName {
            platform: platform.to_string(),
            application: application.to_string(),
            from,
            to,
        })
    }
}

fn split_version_build(part: &str) -> Option<VersionInfo> {
    let (version, build) = part.rsplit_once('-')?;
    if version.is_empty() || build.is_empty() {
        return None;
    }
    Some(VersionInfo::new(version, build))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ManifestName {
        ManifestName {
            platform: "egps".to_string(),
            application: "gmed".to_string(),
            from: VersionInfo::new("1.0.0", "123"),
            to: VersionInfo::new("1.1.0", "124"),
        }
    }

    #[test]
    fn renders_template_file_name() {
        assert_eq!(
            sample().file_name(),
            "egps-gmed-1.0.0-123-to-1.1.0-124.manifest.json"
        );
    }

    #[test]
    fn parses_back_what_it_renders() {
        let parsed = TemplateNameParser
            .parse("egps-gmed-1.0.0-123-to-1.1.0-124.manifest.json")
            .expect("parse");
        assert_eq!(parsed, sample());
    }

    #[test]
    fn keeps_dashes_inside_versions() {
        let parsed = TemplateNameParser
            .parse("ehub-e3d-6.0-beta-rc11b-to-6.1-rc2a.manifest.json")
            .expect("parse");
        assert_eq!(parsed.from, VersionInfo::new("6.0-beta", "rc11b"));
        assert_eq!(parsed.to, VersionInfo::new("6.1", "rc2a"));
    }

    #[test]
    fn rejects_names_outside_the_template() {
        for name in [
            "egps-gmed-1.0.0-123-to-1.1.0-124.json",
            "egps-gmed-1.0.0-123-1.1.0-124.manifest.json",
            "egps-gmed-to-1.1.0-124.manifest.json",
            "egps-gmed-1.0.0-123-to-124.manifest.json",
        ] {
            let err = TemplateNameParser.parse(name).expect_err(name);
            assert!(matches!(err, WorkflowError::InvalidManifestName { .. }));
        }
    }
}
