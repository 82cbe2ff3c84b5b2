use scene_upload::config::{resolve_request, EnvOverrides, SettingsOverrides};
use scene_upload::load_config::load_config;
use scene_upload::upload::ApiVersion;
use std::fs::write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn config_file(yaml: &str) -> NamedTempFile {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), yaml).unwrap();
    config_file
}

/// A full config file feeds every part of the request.
#[test]
fn test_load_config_full_target() {
    let secret = config_file("file-token\n");
    let config_yaml = format!(
        r#"
target:
  url: https://staging.example.com/api/scene-creator/upload
  api_version: 34
token_file: {}
payload: ./build/scene_creator.love
"#,
        secret.path().display()
    );
    let config_file = config_file(&config_yaml);

    let config = load_config(config_file.path()).expect("Config should load");
    assert_eq!(
        config.target.url.as_deref(),
        Some("https://staging.example.com/api/scene-creator/upload")
    );
    assert!(config.target.send_api_version);

    let request = resolve_request(
        &SettingsOverrides::default(),
        Some(&config),
        &EnvOverrides::default(),
    )
    .expect("Request should resolve from config");
    assert_eq!(request.target.api_version, Some(ApiVersion::new("34")));
    assert_eq!(request.token.expose(), "file-token");
    assert_eq!(request.payload, PathBuf::from("./build/scene_creator.love"));
}

/// Older endpoint revisions sent no version header.
#[test]
fn test_load_config_legacy_target_without_version_header() {
    let config_file = config_file(
        r#"
target:
  url: https://legacy.example.com/upload
  send_api_version: false
"#,
    );

    let config = load_config(config_file.path()).expect("Config should load");
    assert!(!config.target.send_api_version);

    let env = EnvOverrides {
        token: Some("env-token".to_string()),
        api_version: Some("7".to_string()),
    };
    let request = resolve_request(&SettingsOverrides::default(), Some(&config), &env).unwrap();
    assert_eq!(request.target.url, "https://legacy.example.com/upload");
    assert_eq!(request.target.api_version, None);
}

#[test]
fn test_load_config_accepts_string_version() {
    let config_file = config_file("target:\n  api_version: \"35\"\n");
    let config = load_config(config_file.path()).unwrap();
    let env = EnvOverrides {
        token: Some("t".to_string()),
        api_version: None,
    };
    let request = resolve_request(&SettingsOverrides::default(), Some(&config), &env).unwrap();
    assert_eq!(request.target.api_version, Some(ApiVersion::new("35")));
}

#[test]
fn test_load_config_empty_file_uses_defaults() {
    let config_file = config_file("");
    let config = load_config(config_file.path()).expect("Empty config should load");
    assert!(config.target.url.is_none());
    assert!(config.target.send_api_version);
    assert!(config.payload.is_none());
}

#[test]
fn test_load_config_rejects_unknown_fields() {
    let config_file = config_file("target:\n  uri: https://typo.example.com\n");
    let err = load_config(config_file.path()).unwrap_err();
    assert!(
        err.to_string().contains("Failed to parse config YAML"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_load_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(dir.path().join("missing.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
