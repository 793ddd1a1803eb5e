use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::WorkflowError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub build: String,
}

impl VersionInfo {
    pub fn new(version: impl Into<String>, build: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            build: build.into(),
        }
    }
}

/// Backend environment a workflow step addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiTarget {
    Dev,
    Stage,
    Prod,
}

impl ApiTarget {
    pub const ALL: [ApiTarget; 3] = [ApiTarget::Dev, ApiTarget::Stage, ApiTarget::Prod];

    pub fn as_str(self) -> &'static str {
        match self {
            ApiTarget::Dev => "dev",
            ApiTarget::Stage => "stage",
            ApiTarget::Prod => "prod",
        }
    }
}

impl fmt::Display for ApiTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" => Ok(ApiTarget::Dev),
            "stage" => Ok(ApiTarget::Stage),
            "prod" => Ok(ApiTarget::Prod),
            other => Err(format!("unknown API target '{other}' (expected dev, stage or prod)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Create,
    Sign,
    Stage,
    Publish,
}

impl WorkflowStep {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowStep::Create => "create",
            WorkflowStep::Sign => "sign",
            WorkflowStep::Stage => "stage",
            WorkflowStep::Publish => "publish",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowStep {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(WorkflowStep::Create),
            "sign" => Ok(WorkflowStep::Sign),
            "stage" => Ok(WorkflowStep::Stage),
            "publish" => Ok(WorkflowStep::Publish),
            other => Err(WorkflowError::UnknownStep(other.to_string())),
        }
    }
}

/// Where the current manifest is in the create/sign lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowPhase {
    #[default]
    NoManifest,
    Created,
    Signed,
}
