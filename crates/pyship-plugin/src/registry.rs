//! Host-side hook registry.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{PluginResult, PublishOutcome, ReleaseContext, ReleaseHook, VersionOutcome};

/// Registry a host hands to plugins at construction time.
///
/// Plugins register themselves once; the host then dispatches each
/// lifecycle phase exactly once per release cycle, sequentially, awaiting
/// every hook. A hook failure stops the dispatch and propagates to the
/// host.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Arc<dyn ReleaseHook>>,
}

impl HookRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a release hook.
    pub fn register(&mut self, hook: Arc<dyn ReleaseHook>) {
        debug!(hook = hook.name(), "registered release hook");
        self.hooks.push(hook);
    }

    /// Returns the registered hooks.
    #[must_use]
    pub fn hooks(&self) -> &[Arc<dyn ReleaseHook>] {
        &self.hooks
    }

    /// Returns true when no hooks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Dispatches the version phase to every registered hook.
    ///
    /// # Errors
    ///
    /// Returns the first hook failure, undispatched hooks are skipped.
    pub async fn dispatch_version(
        &self,
        ctx: &ReleaseContext,
    ) -> PluginResult<Vec<VersionOutcome>> {
        let mut outcomes = Vec::with_capacity(self.hooks.len());
        for hook in &self.hooks {
            debug!(hook = hook.name(), bump = %ctx.bump, "running version hook");
            let outcome = hook.on_version(ctx).await?;
            info!(hook = hook.name(), ?outcome, "version hook finished");
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Dispatches the publish phase to every registered hook.
    ///
    /// # Errors
    ///
    /// Returns the first hook failure, undispatched hooks are skipped.
    pub async fn dispatch_publish(
        &self,
        ctx: &ReleaseContext,
    ) -> PluginResult<Vec<PublishOutcome>> {
        let mut outcomes = Vec::with_capacity(self.hooks.len());
        for hook in &self.hooks {
            debug!(hook = hook.name(), "running publish hook");
            let outcome = hook.on_publish(ctx).await?;
            info!(hook = hook.name(), %outcome, "publish hook finished");
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}
