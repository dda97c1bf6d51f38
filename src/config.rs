use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// Environment variable overriding the project root.
pub const PROJECT_ROOT_ENV: &str = "WEAVE_GITOPS_PROJECT_ROOT";

/// Environment variable naming the CI step output file.
pub const CI_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Config file looked up in the project root when no path is given.
pub const CONFIG_FILE_NAME: &str = "weavegitops.toml";

/// Represents the complete configuration for weavegitops.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,
}

fn default_chart() -> String {
    "gitops-server".to_string()
}

fn default_package_json() -> PathBuf {
    PathBuf::from("package.json")
}

/// Configuration for `release bump`.
///
/// Paths are relative to the project root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Chart directory name under `charts/`.
    #[serde(default = "default_chart")]
    pub chart: String,

    #[serde(default = "default_package_json")]
    pub package_json: PathBuf,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            chart: default_chart(),
            package_json: default_package_json(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `weavegitops.toml` in the project root
/// 3. Default configuration if no file found
pub fn load_config(config_path: Option<&Path>, project_root: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = project_root.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                return Ok(Config::default());
            }
            candidate
        }
    };

    let config_str = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("failed to read {}: {}", path.display(), e))
    })?;
    let config: Config = toml::from_str(&config_str)
        .map_err(|e| ReleaseError::config(format!("invalid {}: {}", path.display(), e)))?;

    validate(&config)?;
    tracing::debug!(file = %path.display(), chart = %config.release.chart, "loaded config");
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    let chart = &config.release.chart;
    if chart.is_empty() || chart.contains(&['/', '\\'][..]) || chart == "." || chart == ".." {
        return Err(ReleaseError::config(format!(
            "chart must be a single directory name, got '{}'",
            chart
        )));
    }
    Ok(())
}

/// Runtime settings for a bump: static config plus the environment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    pub release: ReleaseConfig,
    /// CI output file to append `version=<new>` to.
    pub ci_output: Option<PathBuf>,
}

impl Settings {
    /// Settings from a loaded config, with the CI output path from the environment.
    pub fn with_config(config: Config) -> Self {
        Settings {
            release: config.release,
            ci_output: env_path(CI_OUTPUT_ENV),
        }
    }
}

/// Reads a path from the environment. An empty value counts as unset.
fn env_path(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// The project root: `WEAVE_GITOPS_PROJECT_ROOT` if set, else the current directory.
pub fn project_root() -> Result<PathBuf> {
    match env_path(PROJECT_ROOT_ENV) {
        Some(root) if root.is_absolute() => Ok(root),
        Some(root) => Ok(env::current_dir()?.join(root)),
        None => Ok(env::current_dir()?),
    }
}
