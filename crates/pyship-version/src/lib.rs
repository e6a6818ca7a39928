//! Bump decisions and semantic-version increment rules.
//!
//! The host orchestrator decides *whether* and *by how much* a release
//! bumps; this crate only knows how to turn that decision into the next
//! version.

mod bump;

pub use bump::{Bump, ParseBumpError, next_version};
