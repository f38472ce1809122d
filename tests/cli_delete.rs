//! Execution tests for DELETE requests.

use ascapi::{AppPreview, AppStoreVersionSubmission, AscClient, Delete};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_delete_submission_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/appStoreVersionSubmissions/sub-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let response = AppStoreVersionSubmission::delete(&client, "sub-1")
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 204);
}

#[tokio::test]
async fn test_delete_missing_preview_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/appPreviews/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": [{"status": "404", "code": "NOT_FOUND", "title": "Not found"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    let err = AppPreview::delete(&client, "gone").await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_ignores_unexpected_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/appPreviews/p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = AscClient::new("test-token", &mock_server.uri()).unwrap();
    assert!(AppPreview::delete(&client, "p-1").await.is_ok());
}
