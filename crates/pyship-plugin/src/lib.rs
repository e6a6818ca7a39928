//! Plugin contract consumed by Pyship hooks.
//!
//! This crate models the surface a release host exposes to its plugins:
//! - [`Plugin`]: base trait for all plugins
//! - [`ReleaseHook`]: the two lifecycle callbacks, `on_version` and
//!   `on_publish`
//! - [`ReleaseContext`]: per-cycle state handed to each callback
//! - [`HookRegistry`]: host-owned registry that dispatches each phase
//!
//! The host invokes each phase once per release cycle and awaits the
//! returned future, so hook I/O never blocks its scheduler.

mod context;
mod error;
mod outcome;
mod registry;
mod traits;

pub use context::ReleaseContext;
pub use error::{PluginError, PluginResult};
pub use outcome::{PublishOutcome, VersionOutcome};
pub use pyship_version::Bump;
pub use registry::HookRegistry;
pub use traits::{Plugin, ReleaseHook};
