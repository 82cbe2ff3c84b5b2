use scene_upload::publish::{publish, UploadOutcome};
use scene_upload::token::AuthToken;
use scene_upload::upload::{
    ApiVersion, MockUploader, UploadError, UploadRequest, UploadResponse, UploadTarget,
};
use std::path::PathBuf;

fn request() -> UploadRequest {
    UploadRequest {
        target: UploadTarget {
            url: "https://api.castle.xyz/api/scene-creator/upload".to_string(),
            api_version: Some(ApiVersion::from(33)),
        },
        token: AuthToken::new("abc123").unwrap(),
        payload: PathBuf::from("../scene_creator.love"),
    }
}

#[tokio::test]
async fn test_status_200_is_success() {
    let mut uploader = MockUploader::new();
    uploader
        .expect_upload()
        .times(1)
        .withf(|req| req.token.expose() == "abc123")
        .returning(|_| {
            Ok(UploadResponse {
                status: 200,
                body: "{\"ok\":true}".to_string(),
            })
        });

    let outcome = publish(&uploader, &request()).await;

    assert_eq!(outcome, UploadOutcome::Success);
    assert_eq!(outcome.to_string(), "Success!");
    assert_eq!(outcome.exit_code(), 0);
}

#[tokio::test]
async fn test_status_500_reports_body() {
    let mut uploader = MockUploader::new();
    uploader.expect_upload().times(1).returning(|_| {
        Ok(UploadResponse {
            status: 500,
            body: "internal error".to_string(),
        })
    });

    let outcome = publish(&uploader, &request()).await;

    assert_eq!(outcome.to_string(), "Error! internal error");
    assert_eq!(outcome.exit_code(), 1);
}

#[tokio::test]
async fn test_other_2xx_statuses_are_failures() {
    let mut uploader = MockUploader::new();
    uploader.expect_upload().times(1).returning(|_| {
        Ok(UploadResponse {
            status: 201,
            body: String::new(),
        })
    });

    let outcome = publish(&uploader, &request()).await;

    assert_eq!(outcome.to_string(), "Error! HTTP 201");
    assert_eq!(outcome.exit_code(), 1);
}

#[tokio::test]
async fn test_upload_error_becomes_failure_with_cause() {
    let mut uploader = MockUploader::new();
    uploader.expect_upload().times(1).returning(|req| {
        Err(UploadError::Payload {
            path: req.payload.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
    });

    let outcome = publish(&uploader, &request()).await;

    let line = outcome.to_string();
    assert!(line.starts_with("Error! "), "got: {line}");
    assert!(line.contains("scene_creator.love"), "got: {line}");
    assert!(line.contains("no such file"), "got: {line}");
    assert_eq!(outcome.exit_code(), 1);
}
