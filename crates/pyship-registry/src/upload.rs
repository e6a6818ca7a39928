//! Upload client for the index's legacy upload API.

use std::path::PathBuf;

use async_trait::async_trait;
use semver::Version;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::{RegistryCredentials, RegistryError, RegistryResult};

/// Default upload endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "https://upload.pypi.org/legacy/";

/// How much response body to keep in an error cause.
const BODY_LIMIT: usize = 512;

/// Outcome of a single file upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    /// The index accepted the file.
    Uploaded,
    /// The index already holds this exact file for `name@version`.
    AlreadyExists,
}

/// One file to upload, with the metadata the index requires.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Package name from the descriptor.
    pub package: String,
    /// Version from the descriptor.
    pub version: Version,
    /// Path to the built distribution.
    pub file: PathBuf,
}

/// A single-attempt upload seam.
///
/// Implementations perform exactly one attempt per call and never retry:
/// the upload endpoint is not idempotent, so retry policy belongs to the
/// host's orchestration layer.
#[async_trait]
pub trait IndexUploader: Send + Sync {
    /// Uploads one file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the request fails in
    /// transport, or the index answers with anything other than success
    /// or a duplicate-file rejection.
    async fn upload(
        &self,
        credentials: &RegistryCredentials,
        request: &UploadRequest,
    ) -> RegistryResult<UploadStatus>;
}

/// Uploads every file exactly once and aggregates the outcome.
///
/// Any accepted file makes the batch `Uploaded`; a batch in which the
/// index already held every file is `AlreadyExists` (the expected steady
/// state of a re-triggered release run). The first hard failure stops
/// the batch. Callers must hand in at least one file; an empty batch
/// would report `AlreadyExists` without contacting the index.
///
/// # Errors
///
/// Propagates the first upload failure.
pub async fn upload_all(
    uploader: &dyn IndexUploader,
    credentials: &RegistryCredentials,
    requests: &[UploadRequest],
) -> RegistryResult<UploadStatus> {
    let mut any_uploaded = false;
    for request in requests {
        let status = uploader.upload(credentials, request).await?;
        info!(
            file = %request.file.display(),
            package = %request.package,
            version = %request.version,
            ?status,
            "upload attempt finished"
        );
        any_uploaded |= status == UploadStatus::Uploaded;
    }

    if any_uploaded {
        Ok(UploadStatus::Uploaded)
    } else {
        Ok(UploadStatus::AlreadyExists)
    }
}

/// HTTP uploader against a legacy upload endpoint.
pub struct HttpUploader {
    client: reqwest::Client,
    url: String,
}

impl HttpUploader {
    /// Creates an uploader for the given endpoint.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            url: url.into(),
        }
    }

    /// Returns the upload endpoint.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpUploader {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_URL)
    }
}

#[async_trait]
impl IndexUploader for HttpUploader {
    async fn upload(
        &self,
        credentials: &RegistryCredentials,
        request: &UploadRequest,
    ) -> RegistryResult<UploadStatus> {
        let bytes = tokio::fs::read(&request.file).await?;
        let digest = format!("{:x}", Sha256::digest(&bytes));
        let file_name = request
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let filetype = if file_name.ends_with(".whl") {
            "bdist_wheel"
        } else {
            "sdist"
        };

        debug!(
            url = %self.url,
            file = %file_name,
            filetype,
            "uploading distribution"
        );

        let form = reqwest::multipart::Form::new()
            .text(":action", "file_upload")
            .text("protocol_version", "1")
            .text("name", request.package.clone())
            .text("version", request.version.to_string())
            .text("filetype", filetype)
            .text("sha256_digest", digest)
            .part(
                "content",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            );

        let transport = |source: reqwest::Error| RegistryError::Upload {
            url: self.url.clone(),
            source,
        };

        let response = self
            .client
            .post(&self.url)
            .basic_auth(credentials.username(), Some(credentials.secret()))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        map_upload_response(status, &body)
    }
}

/// Classifies an index response.
///
/// The index reports a duplicate file as 409, though some deployments
/// answer 400 or 403 with an "already exists" message instead. All of
/// these are the recoverable already-exists outcome, never a failure.
fn map_upload_response(status: u16, body: &str) -> RegistryResult<UploadStatus> {
    match status {
        200..=299 => Ok(UploadStatus::Uploaded),
        409 => Ok(UploadStatus::AlreadyExists),
        400 | 403 if body.to_ascii_lowercase().contains("already exist") => {
            Ok(UploadStatus::AlreadyExists)
        }
        _ => Err(RegistryError::UnexpectedStatus {
            status,
            body: body.chars().take(BODY_LIMIT).collect(),
        }),
    }
}
