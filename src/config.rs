//! Compiled-in defaults and the merge of CLI flags, environment and config file
//! into a single [`UploadRequest`].
//!
//! Precedence, highest first: CLI flag, environment, YAML file, default. The
//! token is the exception: `TOKEN` wins, otherwise the token file chosen by the
//! same precedence is read.

use std::env::VarError;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use crate::load_config::FileConfig;
use crate::token::resolve_token;
use crate::upload::{ApiVersion, UploadRequest, UploadTarget};

pub const DEFAULT_UPLOAD_URL: &str = "https://api.castle.xyz/api/scene-creator/upload";
pub const DEFAULT_API_VERSION: u32 = 33;
pub const DEFAULT_TOKEN_FILE: &str = "../../ghost-secret/ci-secret-file.txt";
pub const DEFAULT_PAYLOAD: &str = "../scene_creator.love";

pub const TOKEN_ENV: &str = "TOKEN";
pub const API_VERSION_ENV: &str = "API_VERSION";

/// Snapshot of the environment variables the uploader reads. Empty values are
/// stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub token: Option<String>,
    pub api_version: Option<String>,
}

impl EnvOverrides {
    /// Reads the process environment. A variable that is set but not valid
    /// UTF-8 is an error rather than being treated as unset.
    pub fn from_process() -> Result<Self> {
        Ok(EnvOverrides {
            token: non_empty_var(TOKEN_ENV, std::env::var(TOKEN_ENV))?,
            api_version: non_empty_var(API_VERSION_ENV, std::env::var(API_VERSION_ENV))?,
        })
    }
}

fn non_empty_var(name: &str, value: Result<String, VarError>) -> Result<Option<String>> {
    match value {
        Ok(v) => Ok(non_empty(Some(v))),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => {
            error!(variable = name, "Environment variable is not valid UTF-8");
            anyhow::bail!("{name} is set but is not valid UTF-8")
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub url: Option<String>,
    pub api_version: Option<String>,
    pub without_api_version: bool,
    pub token_file: Option<PathBuf>,
    pub payload: Option<PathBuf>,
}

/// Builds the request for this run. Fails before any network activity when the
/// token cannot be resolved.
pub fn resolve_request(
    overrides: &SettingsOverrides,
    file: Option<&FileConfig>,
    env: &EnvOverrides,
) -> Result<UploadRequest> {
    let file_target = file.map(|f| &f.target);

    let url = overrides
        .url
        .clone()
        .or_else(|| file_target.and_then(|t| t.url.clone()))
        .unwrap_or_else(|| DEFAULT_UPLOAD_URL.to_string());

    let send_api_version =
        !overrides.without_api_version && file_target.map_or(true, |t| t.send_api_version);
    let api_version = if send_api_version {
        Some(
            non_empty(overrides.api_version.clone())
                .map(ApiVersion::new)
                .or_else(|| env.api_version.clone().map(ApiVersion::new))
                .or_else(|| file_target.and_then(|t| t.api_version.clone()).map(ApiVersion::from))
                .unwrap_or_else(|| ApiVersion::from(DEFAULT_API_VERSION)),
        )
    } else {
        None
    };

    let token_file = overrides
        .token_file
        .clone()
        .or_else(|| file.and_then(|f| f.token_file.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE));

    let payload = overrides
        .payload
        .clone()
        .or_else(|| file.and_then(|f| f.payload.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PAYLOAD));

    let (token, token_source) = resolve_token(env.token.as_deref(), &token_file)
        .context("Could not resolve the auth token")?;

    info!(
        url = %url,
        api_version = api_version.as_ref().map(|v| v.as_str()),
        payload = ?payload,
        "Resolved upload settings"
    );
    debug!(?token_source, "Token source");

    Ok(UploadRequest {
        target: UploadTarget { url, api_version },
        token,
        payload,
    })
}
