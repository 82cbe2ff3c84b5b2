//! `load_config` module: reads the optional YAML file that describes an upload target.
//!
//! The file never carries the token itself, only where to find it. Every field
//! is optional; anything left out falls back to the environment or the
//! compiled-in defaults (see [`crate::config::resolve_request`]).
//!
//! Accepted schema:
//!
//! ```yaml
//! target:
//!   url: https://api.castle.xyz/api/scene-creator/upload
//!   api_version: 33
//!   send_api_version: true
//! token_file: ../../ghost-secret/ci-secret-file.txt
//! payload: ../scene_creator.love
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::upload::ApiVersion;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub target: TargetSection,
    pub token_file: Option<PathBuf>,
    pub payload: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSection {
    pub url: Option<String>,
    pub api_version: Option<ApiVersionYaml>,
    #[serde(default = "send_api_version_default")]
    pub send_api_version: bool,
}

impl Default for TargetSection {
    fn default() -> Self {
        TargetSection {
            url: None,
            api_version: None,
            send_api_version: send_api_version_default(),
        }
    }
}

fn send_api_version_default() -> bool {
    true
}

/// YAML allows the version as either `33` or `"33"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiVersionYaml {
    Number(u32),
    Text(String),
}

impl From<ApiVersionYaml> for ApiVersion {
    fn from(value: ApiVersionYaml) -> Self {
        match value {
            ApiVersionYaml::Number(n) => ApiVersion::from(n),
            ApiVersionYaml::Text(s) => ApiVersion::new(s),
        }
    }
}

/// Loads and parses the YAML config at `path`.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    // An empty document deserializes to unit, not to an all-default struct.
    if config_content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file is empty, using defaults");
        return Ok(FileConfig::default());
    }

    match serde_yaml::from_str::<FileConfig>(&config_content) {
        Ok(conf) => {
            info!(
                config_path = ?path_ref,
                url = conf.target.url.as_deref(),
                send_api_version = conf.target.send_api_version,
                "Parsed config YAML successfully"
            );
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!(
                "Failed to parse config YAML {:?}: {e}",
                path_ref
            ))
        }
    }
}
