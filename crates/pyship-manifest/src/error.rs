//! Manifest error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing the project descriptor.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// No descriptor exists at the expected project root.
    #[error("project descriptor not found: {0}")]
    NotFound(PathBuf),

    /// The descriptor is not valid TOML.
    #[error("failed to parse {file}: {reason}")]
    Parse { file: String, reason: String },

    /// The descriptor has no package name.
    #[error("package name not found in {0}")]
    NameMissing(String),

    /// The descriptor has no version field.
    #[error("version not found in {0}")]
    VersionMissing(String),

    /// The current version does not parse as a semantic version.
    #[error("malformed version in {file}: {reason}")]
    MalformedVersion { file: String, reason: String },

    /// The updated descriptor could not be persisted.
    #[error("failed to persist {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ManifestError::NotFound(PathBuf::from("/repo/pyproject.toml"));
        assert_eq!(
            err.to_string(),
            "project descriptor not found: /repo/pyproject.toml"
        );
    }

    #[test]
    fn test_version_missing_display() {
        let err = ManifestError::VersionMissing("pyproject.toml".to_string());
        assert_eq!(err.to_string(), "version not found in pyproject.toml");
    }

    #[test]
    fn test_malformed_version_display() {
        let err = ManifestError::MalformedVersion {
            file: "pyproject.toml".to_string(),
            reason: "unexpected character".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed version in pyproject.toml: unexpected character"
        );
    }

    #[test]
    fn test_write_display_and_source() {
        let err = ManifestError::Write {
            path: PathBuf::from("/repo/pyproject.toml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to persist /repo/pyproject.toml");
        assert!(std::error::Error::source(&err).is_some());
    }
}
