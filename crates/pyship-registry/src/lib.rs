//! Package-index access for Pyship.
//!
//! Three concerns, in the order the publish phase walks them:
//! - [`RegistryCredentials`]: resolved from the environment or config,
//!   before any network call
//! - [`locate_artifacts`]: finds the built distributions for a
//!   name/version pair in the dist directory
//! - [`IndexUploader`] / [`HttpUploader`]: one upload attempt per file
//!   against the index's legacy upload endpoint, with duplicate files
//!   reported as [`UploadStatus::AlreadyExists`] rather than failures

mod artifact;
mod credentials;
mod error;
mod upload;

pub use artifact::locate_artifacts;
pub use credentials::{
    ENV_PASSWORD, ENV_TOKEN, ENV_USERNAME, RegistryCredentials,
};
pub use error::{RegistryError, RegistryResult};
pub use upload::{
    DEFAULT_REGISTRY_URL, HttpUploader, IndexUploader, UploadRequest, UploadStatus, upload_all,
};
