//! Optional `pyship.toml` configuration.

use std::path::{Path, PathBuf};

use pyship_plugin::{PluginError, PluginResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "pyship.toml";

/// Hook configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookConfig {
    /// Registry configuration.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Package configuration.
    #[serde(default)]
    pub package: PackageConfig,
}

/// Registry section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Upload endpoint.
    #[serde(default = "default_registry_url")]
    pub url: String,

    /// Explicit API token, overriding the environment.
    pub token: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            token: None,
        }
    }
}

fn default_registry_url() -> String {
    pyship_registry::DEFAULT_REGISTRY_URL.to_string()
}

/// Package section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Directory holding built distributions, relative to the project
    /// root unless absolute.
    #[serde(default = "default_dist_dir")]
    pub dist_dir: PathBuf,

    /// Prerelease identifier for the `pre*` bumps (e.g. "beta").
    pub preid: Option<String>,

    /// Command that builds the distributions when none are present.
    pub build_command: Option<Vec<String>>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            dist_dir: default_dist_dir(),
            preid: None,
            build_command: None,
        }
    }
}

fn default_dist_dir() -> PathBuf {
    PathBuf::from("dist")
}

impl HookConfig {
    /// Loads configuration from the given file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> PluginResult<Self> {
        let path = path.as_ref();
        debug!(?path, "loading hook configuration");

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| PluginError::ConfigError(e.to_string()))
    }

    /// Loads `<root>/pyship.toml` if it exists.
    ///
    /// A missing file is not an error; the defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from_root(root: impl AsRef<Path>) -> PluginResult<Option<Self>> {
        let path = root.as_ref().join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }
}
