//! CLI surface for scene-upload.
//!
//! [`Cli`] holds the flags; [`run`] resolves the upload settings and performs
//! the upload. Printing and the process exit code stay in `main`, so tests can
//! call [`run`] directly and inspect the [`UploadOutcome`].
use crate::config::{resolve_request, EnvOverrides, SettingsOverrides};
use crate::load_config::load_config;
use crate::publish::{publish, UploadOutcome};
use crate::upload::HttpUploader;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Upload the scene creator build artifact to the scene-creator API.
///
/// Reads the auth token from TOKEN, or from the fallback token file when TOKEN
/// is unset. API_VERSION overrides the default version header.
#[derive(Parser, Debug, Default)]
#[clap(name = "scene-upload", version)]
pub struct Cli {
    /// Optional YAML file describing the upload target
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Upload endpoint
    #[clap(long)]
    pub url: Option<String>,

    /// Value of the scene-creator-api-version header
    #[clap(long, conflicts_with = "without_api_version")]
    pub api_version: Option<String>,

    /// Do not send the scene-creator-api-version header
    #[clap(long)]
    pub without_api_version: bool,

    /// File read for the token when TOKEN is unset
    #[clap(long)]
    pub token_file: Option<PathBuf>,

    /// Artifact to upload
    #[clap(long)]
    pub payload: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            url: self.url.clone(),
            api_version: self.api_version.clone(),
            without_api_version: self.without_api_version,
            token_file: self.token_file.clone(),
            payload: self.payload.clone(),
        }
    }
}

/// Resolves settings and uploads once.
///
/// Configuration and token errors are returned as `Err` before any request is
/// made; everything after that is folded into the returned [`UploadOutcome`].
pub async fn run(cli: Cli) -> Result<UploadOutcome> {
    tracing::info!("trace_initialised");

    let file_config = match &cli.config {
        Some(path) => Some(load_config(path)?),
        None => None,
    };
    let env = EnvOverrides::from_process()?;
    let request = resolve_request(&cli.overrides(), file_config.as_ref(), &env)?;

    let uploader = HttpUploader::new()?;
    let outcome = publish(&uploader, &request).await;
    tracing::info!(success = outcome.is_success(), "Upload finished");
    Ok(outcome)
}
