//! Project descriptor reading and writing.
//!
//! The descriptor (`pyproject.toml`) is the single source of truth for
//! the package's name and version, and the only file this workspace ever
//! mutates. Writes are lossless (everything but the version survives
//! byte-for-byte) and atomic (temp file plus rename).

mod descriptor;
mod error;

pub use descriptor::{DESCRIPTOR_FILE_NAME, ProjectDescriptor};
pub use error::{ManifestError, ManifestResult};
