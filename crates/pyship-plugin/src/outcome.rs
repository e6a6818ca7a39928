//! Hook outcomes returned to the host.

use semver::Version;

/// Outcome of the version phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionOutcome {
    /// The descriptor was rewritten with the next version.
    Applied {
        /// Version before the bump.
        previous: Version,
        /// Version written to the descriptor.
        next: Version,
    },
    /// No release this cycle; the descriptor was left untouched.
    Noop,
}

impl VersionOutcome {
    /// Returns true when nothing was (or would be) written.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }
}

/// Outcome of a publish attempt.
///
/// A hard failure is not a variant here: it surfaces as a rejected
/// operation (an `Err`) carrying its cause. `AlreadyExists` is an
/// expected steady state on retried release runs, never a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// At least one artifact was uploaded to the index.
    Published,
    /// Every artifact was already present on the index.
    AlreadyExists,
    /// Nothing to publish (dry run or publishing disabled).
    Skipped,
}

impl std::fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Published => write!(f, "published"),
            Self::AlreadyExists => write!(f, "already-exists"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}
