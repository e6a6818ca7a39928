//! Registry error types.

use std::path::PathBuf;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry error types.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No credentials could be resolved. Raised before any network call.
    #[error(
        "no registry credentials found: set {token} or {user}/{pass}",
        token = crate::ENV_TOKEN,
        user = crate::ENV_USERNAME,
        pass = crate::ENV_PASSWORD
    )]
    AuthMissing,

    /// No built distribution matches the descriptor's name and version.
    #[error("no artifact for {name} {version} under {dir}")]
    ArtifactMissing {
        name: String,
        version: String,
        dir: PathBuf,
    },

    /// The upload request itself failed (connect, timeout, transport).
    #[error("upload to {url} failed")]
    Upload {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The index answered with a status this crate does not accept.
    #[error("index rejected upload with status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_missing_display_names_the_sources() {
        let msg = RegistryError::AuthMissing.to_string();
        assert!(msg.contains("PYPI_TOKEN"));
        assert!(msg.contains("TWINE_USERNAME"));
        assert!(msg.contains("TWINE_PASSWORD"));
    }

    #[test]
    fn test_artifact_missing_display() {
        let err = RegistryError::ArtifactMissing {
            name: "zarr-checksum".to_string(),
            version: "1.3.0".to_string(),
            dir: PathBuf::from("/repo/dist"),
        };
        assert_eq!(
            err.to_string(),
            "no artifact for zarr-checksum 1.3.0 under /repo/dist"
        );
    }

    #[test]
    fn test_unexpected_status_display() {
        let err = RegistryError::UnexpectedStatus {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "index rejected upload with status 503: overloaded"
        );
    }
}
