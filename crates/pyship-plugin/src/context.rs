//! Release context shared with hooks.

use std::collections::HashMap;

use serde_json::Value;

use crate::Bump;

/// Per-cycle state passed to every hook invocation.
///
/// Deliberately carries no version numbers: the project descriptor on
/// disk is the single source of truth, and hooks re-read it at the start
/// of each phase.
#[derive(Debug)]
pub struct ReleaseContext {
    /// Path to the project root (where the descriptor lives).
    pub project_root: std::path::PathBuf,

    /// The bump decision resolved by the host for this cycle.
    pub bump: Bump,

    /// Whether this is a dry run (no writes, no uploads).
    pub dry_run: bool,

    /// Arbitrary metadata for inter-hook communication.
    pub metadata: HashMap<String, Value>,
}

impl ReleaseContext {
    /// Creates a new release context.
    #[must_use]
    pub fn new(project_root: impl Into<std::path::PathBuf>, bump: Bump) -> Self {
        Self {
            project_root: project_root.into(),
            bump,
            dry_run: false,
            metadata: HashMap::new(),
        }
    }

    /// Sets the dry run flag.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Gets a metadata value.
    #[must_use]
    pub fn get_metadata(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Sets a metadata value.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: Value) {
        self.metadata.insert(key.into(), value);
    }
}
