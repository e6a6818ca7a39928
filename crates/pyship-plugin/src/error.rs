//! Plugin error types.

use thiserror::Error;

/// Plugin-related errors.
///
/// Every hook failure surfaces to the host as one of these, carrying a
/// human-readable cause. Hooks never retry or swallow failures
/// themselves.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Hook execution failed.
    #[error("hook execution failed: {0}")]
    ExecutionFailed(String),

    /// Configuration error.
    #[error("hook configuration error: {0}")]
    ConfigError(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_failed_display() {
        let err = PluginError::ExecutionFailed("descriptor not found".to_string());
        assert_eq!(err.to_string(), "hook execution failed: descriptor not found");
    }

    #[test]
    fn test_config_error_display() {
        let err = PluginError::ConfigError("invalid preid".to_string());
        assert_eq!(err.to_string(), "hook configuration error: invalid preid");
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = PluginError::from(io);
        assert!(matches!(err, PluginError::Io(_)));
    }

    #[test]
    fn test_error_is_debug() {
        let err = PluginError::ExecutionFailed("test".to_string());
        let debug = format!("{err:?}");
        assert!(debug.contains("ExecutionFailed"));
    }
}
