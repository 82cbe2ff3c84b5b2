#![doc = "scene-upload: push the scene creator build artifact to the scene-creator API."]

//! One run resolves an auth token and upload target, sends a single multipart
//! POST and reports `Success!` or `Error! ...`.
//!
//! - [`config`]: defaults and precedence of CLI, environment and config file
//! - [`token`]: token lookup from `TOKEN` or the fallback secret file
//! - [`upload`]: the [`upload::Uploader`] trait and its HTTP implementation
//! - [`publish`]: maps an upload result to an [`publish::UploadOutcome`]

pub mod cli;
pub mod config;
pub mod load_config;
pub mod publish;
pub mod token;
pub mod upload;

pub use cli::{run, Cli};
