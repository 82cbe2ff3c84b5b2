//! Auth token resolution.
//!
//! The token comes from the `TOKEN` environment variable when it is set and
//! non-empty, otherwise from a fallback secret file on disk. Both paths end in
//! an [`AuthToken`], which refuses to print its value through `Debug`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{error, info};

/// Opaque credential sent as the `X-Auth-Token` header.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a raw token, trimming surrounding whitespace. Returns `None` when
    /// nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(AuthToken(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Where the token was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    File(PathBuf),
}

#[derive(Debug, Error)]
pub enum TokenLoadError {
    #[error("TOKEN is not set and the fallback token file {path:?} could not be read")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOKEN is not set and the fallback token file {path:?} is empty")]
    Empty { path: PathBuf },
}

/// Resolves the token from the environment value if present, else from the
/// fallback file.
///
/// `env_token` is expected to be the raw `TOKEN` value; an empty or
/// whitespace-only value counts as unset.
pub fn resolve_token(
    env_token: Option<&str>,
    fallback: &Path,
) -> Result<(AuthToken, TokenSource), TokenLoadError> {
    if let Some(token) = env_token.and_then(AuthToken::new) {
        info!(source = "environment", "Resolved auth token");
        return Ok((token, TokenSource::Environment));
    }

    let raw = fs::read_to_string(fallback).map_err(|e| {
        error!(error = ?e, token_file = ?fallback, "Failed to read fallback token file");
        TokenLoadError::Read {
            path: fallback.to_path_buf(),
            source: e,
        }
    })?;

    match AuthToken::new(&raw) {
        Some(token) => {
            info!(source = "file", token_file = ?fallback, "Resolved auth token");
            Ok((token, TokenSource::File(fallback.to_path_buf())))
        }
        None => {
            error!(token_file = ?fallback, "Fallback token file is empty");
            Err(TokenLoadError::Empty {
                path: fallback.to_path_buf(),
            })
        }
    }
}
