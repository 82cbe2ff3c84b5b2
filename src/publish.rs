//! Runs one upload and turns the result into the line printed by the CLI.
//!
//! Only HTTP 200 counts as success. Transport errors and every other status
//! collapse into [`UploadOutcome::Failure`]; the reason carries the response
//! body so CI logs show what the server said.

use std::fmt;

use tracing::{error, info};

use crate::upload::{UploadRequest, Uploader};

/// Result of a single upload run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success,
    Failure { reason: String },
}

impl UploadOutcome {
    /// Builds a failure whose reason fits on one output line: line breaks are
    /// folded into single spaces and blank lines dropped.
    pub fn failure(reason: impl AsRef<str>) -> Self {
        let reason = reason
            .as_ref()
            .split(|c: char| c == '\n' || c == '\r')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        UploadOutcome::Failure { reason }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success)
    }

    /// Process exit code: 0 on success, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            UploadOutcome::Success => 0,
            UploadOutcome::Failure { .. } => 1,
        }
    }
}

impl fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadOutcome::Success => f.write_str("Success!"),
            UploadOutcome::Failure { reason } => write!(f, "Error! {reason}"),
        }
    }
}

/// Uploads the request's payload once. Never retries.
pub async fn publish(uploader: &dyn Uploader, request: &UploadRequest) -> UploadOutcome {
    match uploader.upload(request).await {
        Ok(response) if response.status == 200 => {
            info!(url = %request.target.url, "Upload accepted");
            UploadOutcome::Success
        }
        Ok(response) => {
            error!(
                status = response.status,
                body = %response.body,
                "Upload rejected"
            );
            if response.body.trim().is_empty() {
                UploadOutcome::failure(format!("HTTP {}", response.status))
            } else {
                UploadOutcome::failure(response.body)
            }
        }
        Err(e) => {
            let reason = format!("{:#}", anyhow::Error::new(e));
            error!(error = %reason, "Upload failed");
            UploadOutcome::failure(reason)
        }
    }
}
