use async_trait::async_trait;
use reqwest::header::HeaderValue;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use sha2::{Digest, Sha256};
use tracing::{error, info};

use super::{
    UploadError, UploadRequest, UploadResponse, Uploader, API_VERSION_HEADER, AUTH_TOKEN_HEADER,
    FILE_FIELD,
};

const PAYLOAD_MIME: &str = "application/octet-stream";

/// [`Uploader`] backed by a reqwest client: one multipart POST per upload.
pub struct HttpUploader {
    client: Client,
}

impl HttpUploader {
    pub fn new() -> Result<Self, UploadError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpUploader { client })
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, UploadError> {
    HeaderValue::from_str(value).map_err(|source| UploadError::InvalidHeader { name, source })
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadResponse, UploadError> {
        let bytes = tokio::fs::read(&request.payload).await.map_err(|e| {
            error!(error = ?e, payload = ?request.payload, "Failed to read payload");
            UploadError::Payload {
                path: request.payload.clone(),
                source: e,
            }
        })?;

        let digest = format!("{:x}", Sha256::digest(&bytes));
        info!(
            payload = ?request.payload,
            size = bytes.len(),
            sha256 = %digest,
            "Payload read"
        );

        let mut token = header_value(AUTH_TOKEN_HEADER, request.token.expose())?;
        token.set_sensitive(true);

        let file_name = request
            .payload
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| FILE_FIELD.to_string());
        let part = Part::bytes(bytes).file_name(file_name).mime_str(PAYLOAD_MIME)?;
        let form = Form::new().part(FILE_FIELD, part);

        let mut builder = self
            .client
            .post(&request.target.url)
            .header(AUTH_TOKEN_HEADER, token)
            .multipart(form);
        if let Some(version) = &request.target.api_version {
            builder = builder.header(
                API_VERSION_HEADER,
                header_value(API_VERSION_HEADER, version.as_str())?,
            );
        }

        info!(
            url = %request.target.url,
            api_version = request.target.api_version.as_ref().map(|v| v.as_str()),
            "Sending upload request"
        );
        let response = builder.send().await.map_err(|e| {
            error!(error = %e, url = %request.target.url, "Upload request failed");
            e
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        info!(status, body_len = body.len(), "Upload response received");

        Ok(UploadResponse { status, body })
    }
}
