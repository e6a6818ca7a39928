//! PyPI publish hook plugin.
//!
//! Registers for the two release lifecycle callbacks:
//! - `on_version`: writes the bumped version into `pyproject.toml`
//! - `on_publish`: uploads the built distributions to the package index
//!
//! The two phases are coupled only through the descriptor on disk, which
//! the host commits between them.

mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use pyship_manifest::ProjectDescriptor;
use pyship_plugin::{
    Plugin, PluginError, PluginResult, PublishOutcome, ReleaseContext, ReleaseHook,
    VersionOutcome,
};
use pyship_registry::{
    DEFAULT_REGISTRY_URL, HttpUploader, IndexUploader, RegistryCredentials, RegistryError,
    UploadRequest, UploadStatus, locate_artifacts, upload_all,
};
use pyship_version::next_version;
use tracing::{debug, info};

pub use config::{CONFIG_FILE_NAME, HookConfig, PackageConfig, RegistryConfig};

/// PyPI hook for Python projects.
pub struct PypiHook {
    /// Upload endpoint.
    registry_url: String,
    /// Directory holding built distributions.
    dist_dir: PathBuf,
    /// Prerelease identifier for the `pre*` bumps.
    preid: Option<String>,
    /// Explicit API token, overriding the environment.
    token: Option<String>,
    /// Command that builds the distributions when none are present.
    build_command: Option<Vec<String>>,
    /// Whether to fall back to environment credentials.
    env_credentials: bool,
    /// Replacement transport (alternate registries, tests).
    uploader: Option<Arc<dyn IndexUploader>>,
}

impl PypiHook {
    /// Creates a new PyPI hook with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            dist_dir: PathBuf::from("dist"),
            preid: None,
            token: None,
            build_command: None,
            env_credentials: true,
            uploader: None,
        }
    }

    /// Creates a hook from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &HookConfig) -> Self {
        let mut hook = Self::new()
            .with_registry_url(config.registry.url.clone())
            .with_dist_dir(config.package.dist_dir.clone());
        hook.preid = config.package.preid.clone();
        hook.token = config.registry.token.clone();
        hook.build_command = config.package.build_command.clone();
        hook
    }

    /// Sets the upload endpoint.
    #[must_use]
    pub fn with_registry_url(mut self, url: impl Into<String>) -> Self {
        self.registry_url = url.into();
        self
    }

    /// Sets the dist directory (relative to the project root unless
    /// absolute).
    #[must_use]
    pub fn with_dist_dir(mut self, dist_dir: impl Into<PathBuf>) -> Self {
        self.dist_dir = dist_dir.into();
        self
    }

    /// Sets the prerelease identifier used by the `pre*` bumps.
    #[must_use]
    pub fn with_preid(mut self, preid: impl Into<String>) -> Self {
        self.preid = Some(preid.into());
        self
    }

    /// Sets an explicit API token, overriding the environment.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the command that builds the distributions when the dist
    /// directory holds none.
    #[must_use]
    pub fn with_build_command(mut self, command: Vec<String>) -> Self {
        self.build_command = Some(command);
        self
    }

    /// Enables or disables the environment credential fallback.
    ///
    /// Useful for hosts that inject credentials explicitly and for
    /// hermetic tests.
    #[must_use]
    pub fn with_env_credentials(mut self, enabled: bool) -> Self {
        self.env_credentials = enabled;
        self
    }

    /// Replaces the HTTP transport.
    #[must_use]
    pub fn with_uploader(mut self, uploader: Arc<dyn IndexUploader>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// Returns the upload endpoint.
    #[must_use]
    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Returns the dist directory.
    #[must_use]
    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// Returns the prerelease identifier, if set.
    #[must_use]
    pub fn preid(&self) -> Option<&str> {
        self.preid.as_deref()
    }

    /// Resolves credentials without touching the network.
    fn resolve_credentials(&self) -> Option<RegistryCredentials> {
        if let Some(token) = &self.token {
            return Some(RegistryCredentials::token(token.clone()));
        }
        if self.env_credentials {
            return RegistryCredentials::resolve();
        }
        None
    }

    /// Resolves the dist directory against the project root.
    fn dist_dir_in(&self, root: &Path) -> PathBuf {
        if self.dist_dir.is_absolute() {
            self.dist_dir.clone()
        } else {
            root.join(&self.dist_dir)
        }
    }

    /// Runs the configured build command in the project root.
    async fn run_build(&self, command: &[String], root: &Path) -> PluginResult<()> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| PluginError::ConfigError("empty build command".to_string()))?;

        info!(command = %command.join(" "), "building distributions");
        let status = tokio::process::Command::new(program)
            .args(args)
            .current_dir(root)
            .status()
            .await?;

        if !status.success() {
            return Err(PluginError::ExecutionFailed(format!(
                "build command `{}` exited with {status}",
                command.join(" ")
            )));
        }
        Ok(())
    }
}

impl Default for PypiHook {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for PypiHook {
    fn name(&self) -> &'static str {
        "pypi"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Writes the bumped version to pyproject.toml and publishes built distributions to PyPI"
    }
}

/// Maps a lower-level failure into a rejected hook operation.
fn execution(err: impl std::fmt::Display) -> PluginError {
    PluginError::ExecutionFailed(err.to_string())
}

#[async_trait]
impl ReleaseHook for PypiHook {
    async fn on_version(&self, ctx: &ReleaseContext) -> PluginResult<VersionOutcome> {
        if ctx.bump.is_none() {
            info!("no release found, doing nothing");
            return Ok(VersionOutcome::Noop);
        }

        // Always re-read the descriptor; the file is the source of truth.
        let mut descriptor =
            ProjectDescriptor::load_from_root(&ctx.project_root).map_err(execution)?;
        let previous = descriptor.version().clone();
        let next = next_version(&previous, ctx.bump, self.preid.as_deref())
            .map_err(|e| PluginError::ConfigError(format!("invalid prerelease identifier: {e}")))?;

        descriptor.set_version(&next);
        if ctx.dry_run {
            debug!(%previous, %next, "dry run, not persisting descriptor");
        } else {
            descriptor.save().map_err(execution)?;
        }

        info!(bump = %ctx.bump, %previous, %next, "applied version bump");
        Ok(VersionOutcome::Applied { previous, next })
    }

    async fn on_publish(&self, ctx: &ReleaseContext) -> PluginResult<PublishOutcome> {
        // Credentials first: fail before any network call is attempted.
        let credentials = self
            .resolve_credentials()
            .ok_or_else(|| execution(RegistryError::AuthMissing))?;

        let descriptor =
            ProjectDescriptor::load_from_root(&ctx.project_root).map_err(execution)?;
        let name = descriptor.name().to_string();
        let version = descriptor.version().clone();
        let dist_dir = self.dist_dir_in(&ctx.project_root);

        let mut artifacts = locate_artifacts(&dist_dir, &name, &version).map_err(execution)?;
        if artifacts.is_empty() {
            if let Some(command) = &self.build_command {
                self.run_build(command, &ctx.project_root).await?;
                artifacts = locate_artifacts(&dist_dir, &name, &version).map_err(execution)?;
            }
        }
        if artifacts.is_empty() {
            return Err(execution(RegistryError::ArtifactMissing {
                name,
                version: version.to_string(),
                dir: dist_dir,
            }));
        }

        if ctx.dry_run {
            info!(count = artifacts.len(), "dry run, skipping upload");
            return Ok(PublishOutcome::Skipped);
        }

        let requests: Vec<UploadRequest> = artifacts
            .into_iter()
            .map(|file| UploadRequest {
                package: name.clone(),
                version: version.clone(),
                file,
            })
            .collect();

        let status = match &self.uploader {
            Some(uploader) => upload_all(uploader.as_ref(), &credentials, &requests).await,
            None => {
                let uploader = HttpUploader::new(self.registry_url.clone());
                upload_all(&uploader, &credentials, &requests).await
            }
        }
        .map_err(execution)?;

        let outcome = match status {
            UploadStatus::Uploaded => PublishOutcome::Published,
            UploadStatus::AlreadyExists => PublishOutcome::AlreadyExists,
        };
        info!(package = %name, %version, %outcome, "publish phase finished");
        Ok(outcome)
    }
}
