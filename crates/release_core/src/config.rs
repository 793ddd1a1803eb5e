//! Backend configuration paths, layered from a TOML file, environment
//! variables and command-line flags (later layers win).

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::ConfigError;

pub const CONFIG_DIR_NAME: &str = "release_package_manager";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_AWS_CRED: &str = "RPM_AWS_CRED";
pub const ENV_API_CONFIG: &str = "RPM_API_CONFIG";
pub const ENV_PRIVATE_KEY: &str = "RPM_PRIVATE_KEY";
pub const ENV_SCHEMA_DIR: &str = "RPM_SCHEMA_DIR";

/// Paths handed to the packaging backend with every workflow step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigPaths {
    pub aws_cred: Option<PathBuf>,
    pub api_config_override: Option<PathBuf>,
    pub private_key: Option<PathBuf>,
    pub schema_dir: Option<PathBuf>,
}

impl ConfigPaths {
    /// Fills every field that `other` sets.
    fn overlay(&mut self, other: ConfigPaths) {
        if other.aws_cred.is_some() {
            self.aws_cred = other.aws_cred;
        }
        if other.api_config_override.is_some() {
            self.api_config_override = other.api_config_override;
        }
        if other.private_key.is_some() {
            self.private_key = other.private_key;
        }
        if other.schema_dir.is_some() {
            self.schema_dir = other.schema_dir;
        }
    }
}

/// Flags every binary accepts for the backend paths, flattened into its CLI.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Path to AWS credentials file
    #[arg(long = "aws-cred")]
    pub aws_cred: Option<PathBuf>,
    /// Path to API configuration file
    #[arg(long = "api")]
    pub api_config: Option<PathBuf>,
    /// Path to private key file
    #[arg(long = "private")]
    pub private_key: Option<PathBuf>,
    /// Path to schema directory
    #[arg(long = "schema")]
    pub schema_dir: Option<PathBuf>,
    /// TOML file with default paths
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn flags(&self) -> ConfigPaths {
        ConfigPaths {
            aws_cred: self.aws_cred.clone(),
            api_config_override: self.api_config.clone(),
            private_key: self.private_key.clone(),
            schema_dir: self.schema_dir.clone(),
        }
    }

    /// Layers these flags over the environment and the config file.
    pub fn load(&self) -> Result<ConfigPaths, ConfigError> {
        load_config_paths(self.config.as_deref(), self.flags())
    }
}

pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Resolves configuration for the running process.
///
/// An explicit `config_file` must be readable; the default location is only
/// consulted when it exists.
pub fn load_config_paths(
    config_file: Option<&Path>,
    flags: ConfigPaths,
) -> Result<ConfigPaths, ConfigError> {
    let file = match config_file {
        Some(path) => Some(read_config_file(path)?),
        None => match default_config_file() {
            Some(path) if path.is_file() => Some(read_config_file(&path)?),
            _ => None,
        },
    };
    Ok(resolve_config_paths(
        file,
        |name| std::env::var(name).ok(),
        flags,
    ))
}

pub fn read_config_file(path: &Path) -> Result<ConfigPaths, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed = toml::from_str::<ConfigPaths>(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(parsed)
}

pub fn resolve_config_paths(
    file: Option<ConfigPaths>,
    env: impl Fn(&str) -> Option<String>,
    flags: ConfigPaths,
) -> ConfigPaths {
    let mut resolved = file.unwrap_or_default();

    let env_path = |name: &str| {
        env(name)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
    };
    resolved.overlay(ConfigPaths {
        aws_cred: env_path(ENV_AWS_CRED),
        api_config_override: env_path(ENV_API_CONFIG),
        private_key: env_path(ENV_PRIVATE_KEY),
        schema_dir: env_path(ENV_SCHEMA_DIR),
    });
    resolved.overlay(flags);
    resolved
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
