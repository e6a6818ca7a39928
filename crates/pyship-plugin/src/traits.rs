//! Plugin traits.

use async_trait::async_trait;

use crate::{PluginResult, PublishOutcome, ReleaseContext, VersionOutcome};

/// Base trait for all plugins.
pub trait Plugin: Send + Sync {
    /// Returns the plugin name.
    fn name(&self) -> &'static str;

    /// Returns the plugin version.
    fn version(&self) -> &'static str;

    /// Returns a short description of the plugin.
    fn description(&self) -> &'static str {
        ""
    }
}

/// The two lifecycle callbacks a release hook registers for.
///
/// The host calls `on_version` during its version phase, commits the
/// resulting descriptor change, then calls `on_publish`. The two phases
/// share no in-process state; the descriptor file is the hand-off.
#[allow(unused_variables)]
#[async_trait]
pub trait ReleaseHook: Plugin {
    /// Called once per release cycle with the resolved bump decision.
    ///
    /// Writes the next version into the project descriptor, or reports a
    /// no-op when the decision is `none`.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor is missing, its version is
    /// malformed, or the updated descriptor cannot be persisted.
    async fn on_version(&self, ctx: &ReleaseContext) -> PluginResult<VersionOutcome> {
        Ok(VersionOutcome::Noop)
    }

    /// Called once per release cycle, after any version commit.
    ///
    /// Uploads the built artifact(s) for the descriptor's current
    /// name/version to the package index.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials cannot be resolved, no artifact
    /// exists and none can be built, or the upload fails.
    async fn on_publish(&self, ctx: &ReleaseContext) -> PluginResult<PublishOutcome> {
        Ok(PublishOutcome::Skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bump;

    // A minimal hook that uses all defaults
    struct MinimalHook;

    impl Plugin for MinimalHook {
        fn name(&self) -> &'static str {
            "minimal-hook"
        }
        fn version(&self) -> &'static str {
            "1.0.0"
        }
        // Using default description
    }

    impl ReleaseHook for MinimalHook {}

    fn create_test_context() -> ReleaseContext {
        ReleaseContext::new("/tmp/test", Bump::Minor)
    }

    #[test]
    fn test_default_description() {
        let hook = MinimalHook;
        assert_eq!(hook.description(), "");
    }

    #[tokio::test]
    async fn test_default_on_version_is_noop() {
        let hook = MinimalHook;
        let ctx = create_test_context();
        assert_eq!(hook.on_version(&ctx).await.unwrap(), VersionOutcome::Noop);
    }

    #[tokio::test]
    async fn test_default_on_publish_is_skipped() {
        let hook = MinimalHook;
        let ctx = create_test_context();
        assert_eq!(
            hook.on_publish(&ctx).await.unwrap(),
            PublishOutcome::Skipped
        );
    }
}
