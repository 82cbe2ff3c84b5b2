//! # upload: sending the build artifact to the scene-creator API
//!
//! This module defines the [`Uploader`] trait and the plain data types that
//! travel through it. The real implementation is [`http::HttpUploader`]; tests
//! use the `mockall`-generated `MockUploader`.
//!
//! An [`UploadTarget`] describes where the artifact goes and whether the API
//! version header is sent. The header-less form covers the older endpoint
//! revisions, so one uploader serves all of them.

pub mod http;

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use thiserror::Error;

use crate::token::AuthToken;

pub use http::HttpUploader;

/// Header carrying the auth token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
/// Header carrying the API version, sent only when the target has one.
pub const API_VERSION_HEADER: &str = "scene-creator-api-version";
/// Multipart field name of the payload.
pub const FILE_FIELD: &str = "file";

/// Value of the API version header. Kept as text: overrides from the
/// environment are passed through as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersion(String);

impl ApiVersion {
    pub fn new(value: impl Into<String>) -> Self {
        ApiVersion(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for ApiVersion {
    fn from(value: u32) -> Self {
        ApiVersion(value.to_string())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Endpoint to upload to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub url: String,
    /// `None` sends no version header.
    pub api_version: Option<ApiVersion>,
}

/// Everything needed for one upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub target: UploadTarget,
    pub token: AuthToken,
    /// Local file sent as the `file` multipart part.
    pub payload: PathBuf,
}

/// Raw server reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum UploadError {
    /// The payload could not be read. No request was sent.
    #[error("failed to read payload {path:?}")]
    Payload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid value for header {name}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("upload request failed")]
    Http(#[from] reqwest::Error),
}

/// Sends an [`UploadRequest`] and returns whatever the server answered.
///
/// Implementations report transport problems as `Err`; any HTTP status,
/// including errors, comes back as `Ok` so the caller decides what counts as
/// success.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadResponse, UploadError>;
}
