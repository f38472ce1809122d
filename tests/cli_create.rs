//! Execution tests for POST creates.
//!
//! Uses wiremock to stand in for App Store Connect.

use ascapi::{AppPreview, AppStoreVersionSubmission, AscClient, AscError, Create};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_submit_version_for_review() {
    let mock_server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "data": {
            "type": "appStoreVersionSubmissions",
            "relationships": {
                "appStoreVersion": {"data": {"type": "appStoreVersions", "id": "v-1"}}
            }
        }
    });

    Mock::given(method("POST"))
        .and(path("/appStoreVersionSubmissions"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": {
                "id": "sub-9",
                "type": "appStoreVersionSubmissions",
                "relationships": {
                    "appStoreVersion": {"data": {"type": "appStoreVersions", "id": "v-1"}}
                }
            },
            "links": {"self": "https://api.example/appStoreVersionSubmissions/sub-9"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let request = AppStoreVersionSubmission::request_for_version("v-1");
    let response = AppStoreVersionSubmission::create(&client, &request)
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 201);
    let created = response.into_body();
    assert_eq!(created.data.id, "sub-9");
    assert_eq!(created.data.app_store_version_id(), Some("v-1"));
}

#[tokio::test]
async fn test_reserve_app_preview() {
    let mock_server = MockServer::start().await;

    let expected_body = serde_json::json!({
        "data": {
            "type": "appPreviews",
            "attributes": {"fileName": "intro.mp4", "fileSize": 1024},
            "relationships": {
                "appPreviewSet": {"data": {"type": "appPreviewSets", "id": "set-1"}}
            }
        }
    });

    Mock::given(method("POST"))
        .and(path("/appPreviews"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": {
                "id": "p-7",
                "type": "appPreviews",
                "attributes": {
                    "fileName": "intro.mp4",
                    "fileSize": 1024,
                    "assetDeliveryState": {"state": "AWAITING_UPLOAD"},
                    "uploadOperations": [{
                        "method": "PUT",
                        "url": "https://upload.example/p-7",
                        "length": 1024,
                        "offset": 0,
                        "requestHeaders": [{"name": "Content-Type", "value": "video/mp4"}]
                    }]
                },
                "relationships": {
                    "appPreviewSet": {"data": {"type": "appPreviewSets", "id": "set-1"}}
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let request = AppPreview::reserve("set-1", "intro.mp4", 1024);
    let preview = AppPreview::create(&client, &request)
        .await
        .unwrap()
        .into_body();

    assert_eq!(preview.data.delivery_state(), Some("AWAITING_UPLOAD"));
    assert_eq!(preview.data.app_preview_set_id(), Some("set-1"));
    let operations = preview.data.upload_operations();
    assert_eq!(operations.len(), 1);
    assert_eq!(operations[0].method.as_deref(), Some("PUT"));
    assert_eq!(operations[0].length, Some(1024));
}

#[tokio::test]
async fn test_create_rejects_response_of_other_kind() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/appStoreVersionSubmissions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": {"id": "v-1", "type": "appStoreVersions"}
        })))
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let request = AppStoreVersionSubmission::request_for_version("v-1");
    let err = AppStoreVersionSubmission::create(&client, &request)
        .await
        .unwrap_err();

    assert!(matches!(err, AscError::Decoding { .. }));
    assert_eq!(err.status_code(), Some(201));
}

#[tokio::test]
async fn test_create_validation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/appStoreVersionSubmissions"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "errors": [{
                "status": "409",
                "code": "STATE_ERROR",
                "title": "The request cannot be fulfilled because of the state of another resource.",
                "detail": "The version is already submitted."
            }]
        })))
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let request = AppStoreVersionSubmission::request_for_version("v-1");
    let err = AppStoreVersionSubmission::create(&client, &request)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(409));
    assert!(err.to_string().contains("already submitted"));
}
