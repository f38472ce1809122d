//! E2E tests using the mock App Store Connect server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use ascapi::mock_server::{Fixtures, MockServer, MockState};
use ascapi::{
    get_app_for_beta_license_agreement, get_beta_license_agreement_for_app,
    get_submission_for_app_store_version, App, AppPreview, AppPreviewUpdateAttributes,
    AppStoreVersionSubmission, AscClient, AscError, BetaLicenseAgreement,
    BetaLicenseAgreementUpdateAttributes, Create, Delete, Get, GetBetaLicenseAgreementQuery, List,
    ListBetaLicenseAgreementsQuery, Page, Update, UpdateRequest,
};

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    let client = reqwest::Client::new();
    let result = client.get(format!("{}/health", url)).send().await;

    assert!(result.is_err());
}

// =============================================================================
// Beta License Agreement Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_list_and_get_agreement_workflow() {
    let server = MockServer::start().await;
    let client = AscClient::new("test-token", server.url()).unwrap();

    let all = BetaLicenseAgreement::list_all(&client, &Default::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let first = &all[0];
    let fetched = BetaLicenseAgreement::get(&client, &first.id, &Default::default())
        .await
        .unwrap()
        .into_body();

    assert_eq!(fetched.data, *first);
    assert_eq!(
        fetched.links.self_link,
        format!("{}/betaLicenseAgreements/{}", server.url(), first.id)
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_paginate_agreements_one_at_a_time() {
    let server = MockServer::start().await;
    let client = AscClient::new("test-token", server.url()).unwrap();

    let query = ListBetaLicenseAgreementsQuery {
        limit: Some(1),
        ..Default::default()
    };

    let first = Page::from(
        BetaLicenseAgreement::list_page(&client, &query, None)
            .await
            .unwrap()
            .into_body(),
    );
    assert_eq!(first.len(), 1);
    assert_eq!(first.total, Some(2));
    assert!(first.has_more);

    let cursor = first.next_cursor.clone().unwrap();
    let second = Page::from(
        BetaLicenseAgreement::list_page(&client, &query, Some(&cursor))
            .await
            .unwrap()
            .into_body(),
    );
    assert_eq!(second.len(), 1);
    assert!(!second.has_more);
    assert_ne!(first.items[0].id, second.items[0].id);

    server.shutdown().await;
}

#[tokio::test]
async fn test_filter_agreements_by_app_with_included_app() {
    let server = MockServer::start().await;
    let client = AscClient::new("test-token", server.url()).unwrap();

    let query = ListBetaLicenseAgreementsQuery {
        filter_app: vec!["1002".into()],
        include: vec!["app".into()],
        ..Default::default()
    };
    let document = BetaLicenseAgreement::list_page(&client, &query, None)
        .await
        .unwrap()
        .into_body();

    assert_eq!(document.data.len(), 1);
    assert_eq!(document.data[0].app_id(), Some("1002"));

    let apps = document.included_of::<App>().unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].name(), Some("Tide Tables"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_agreement_relationship_endpoints() {
    let server = MockServer::start().await;
    let client = AscClient::new("test-token", server.url()).unwrap();

    let app = get_app_for_beta_license_agreement(&client, "bla-1001", &Default::default())
        .await
        .unwrap()
        .into_body();
    assert_eq!(app.data.id, "1001");
    assert_eq!(app.data.bundle_id(), Some("com.example.skyjournal"));

    let agreement = get_beta_license_agreement_for_app(&client, "1001", &Default::default())
        .await
        .unwrap()
        .into_body();
    assert_eq!(agreement.data.id, "bla-1001");

    server.shutdown().await;
}

#[tokio::test]
async fn test_update_agreement_workflow() {
    let server = MockServer::start().await;
    let client = AscClient::new("test-token", server.url()).unwrap();

    let body = UpdateRequest::<BetaLicenseAgreement>::new("bla-1002").attributes(
        BetaLicenseAgreementUpdateAttributes {
            agreement_text: Some("Updated terms.".into()),
        },
    );
    let updated = BetaLicenseAgreement::update(&client, "bla-1002", &body)
        .await
        .unwrap()
        .into_body();
    assert_eq!(updated.data.agreement_text(), Some("Updated terms."));

    let refetched = BetaLicenseAgreement::get(&client, "bla-1002", &Default::default())
        .await
        .unwrap()
        .into_body();
    assert_eq!(refetched.data.agreement_text(), Some("Updated terms."));

    server.shutdown().await;
}

#[tokio::test]
async fn test_update_with_mismatched_id_conflicts() {
    let server = MockServer::start().await;
    let client = AscClient::new("test-token", server.url()).unwrap();

    let body = UpdateRequest::<BetaLicenseAgreement>::new("bla-1002");
    let err = BetaLicenseAgreement::update(&client, "bla-1001", &body)
        .await
        .unwrap_err();

    match err {
        AscError::ApiError { status_code, errors, .. } => {
            assert_eq!(status_code, Some(409));
            assert!(!errors.is_empty());
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_invalid_limit_is_rejected() {
    let server = MockServer::start().await;
    let client = AscClient::new("test-token", server.url()).unwrap();

    let query = ListBetaLicenseAgreementsQuery {
        limit: Some(500),
        ..Default::default()
    };
    let err = BetaLicenseAgreement::list_page(&client, &query, None)
        .await
        .unwrap_err();

    match err {
        AscError::ApiError { status_code, errors, .. } => {
            assert_eq!(status_code, Some(400));
            let parameter = errors[0].source.as_ref().and_then(|s| s.parameter.as_deref());
            assert_eq!(parameter, Some("limit"));
        }
        other => panic!("Expected ApiError, got {other:?}"),
    }

    server.shutdown().await;
}

// =============================================================================
// App Preview Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_preview_upload_workflow() {
    let server = MockServer::start().await;
    let client = AscClient::new("test-token", server.url()).unwrap();

    // Reserve
    let request = AppPreview::reserve("set-iphone65", "tour.mp4", 4096);
    let reserved = AppPreview::create(&client, &request).await.unwrap();
    assert_eq!(reserved.status.as_u16(), 201);
    let reserved = reserved.into_body().data;

    assert_eq!(reserved.delivery_state(), Some("AWAITING_UPLOAD"));
    assert_eq!(reserved.app_preview_set_id(), Some("set-iphone65"));
    assert_eq!(reserved.upload_operations().len(), 1);
    assert_ne!(reserved.id, "preview-1");

    // Commit
    let body = UpdateRequest::<AppPreview>::new(reserved.id.clone()).attributes(
        AppPreviewUpdateAttributes {
            source_file_checksum: Some("d41d8cd98f00b204e9800998ecf8427e".into()),
            uploaded: Some(true),
            ..Default::default()
        },
    );
    let committed = AppPreview::update(&client, &reserved.id, &body)
        .await
        .unwrap()
        .into_body()
        .data;
    assert_eq!(committed.delivery_state(), Some("UPLOAD_COMPLETE"));
    assert!(committed.upload_operations().is_empty());

    // Delete
    let deleted = AppPreview::delete(&client, &reserved.id).await.unwrap();
    assert_eq!(deleted.status.as_u16(), 204);

    let err = AppPreview::get(&client, &reserved.id, &Default::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    // The fixture preview is untouched
    let fixture = AppPreview::get(&client, "preview-1", &Default::default())
        .await
        .unwrap()
        .into_body();
    assert_eq!(fixture.data.file_name(), Some("walkthrough.mp4"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_reserve_without_file_name_conflicts() {
    let server = MockServer::start().await;
    let client = AscClient::new("test-token", server.url()).unwrap();

    let request = AppPreview::reserve("set-iphone65", "", 10);
    let err = AppPreview::create(&client, &request).await.unwrap_err();
    assert_eq!(err.status_code(), Some(409));

    server.shutdown().await;
}

// =============================================================================
// Submission Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_submit_then_withdraw_workflow() {
    let server = MockServer::start().await;
    let client = AscClient::new("test-token", server.url()).unwrap();

    let request = AppStoreVersionSubmission::request_for_version("v-1001-2");
    let created = AppStoreVersionSubmission::create(&client, &request)
        .await
        .unwrap()
        .into_body()
        .data;
    assert_eq!(created.app_store_version_id(), Some("v-1001-2"));

    let fetched = get_submission_for_app_store_version(&client, "v-1001-2", &Default::default())
        .await
        .unwrap()
        .into_body();
    assert_eq!(fetched.data.id, created.id);

    {
        let state = server.state();
        let state = state.read().await;
        assert_eq!(
            state.versions["v-1001-2"].app_store_state(),
            Some("WAITING_FOR_REVIEW")
        );
        assert!(state.submissions.contains_key(&created.id));
    }

    AppStoreVersionSubmission::delete(&client, &created.id)
        .await
        .unwrap();

    let err = get_submission_for_app_store_version(&client, "v-1001-2", &Default::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    server.shutdown().await;
}

#[tokio::test]
async fn test_resubmitting_conflicts() {
    let server = MockServer::start().await;
    let client = AscClient::new("test-token", server.url()).unwrap();

    // v-1002-1 is already in review in the default scenario
    let request = AppStoreVersionSubmission::request_for_version("v-1002-1");
    let err = AppStoreVersionSubmission::create(&client, &request)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(409));

    server.shutdown().await;
}

// =============================================================================
// Auth and Rate Limit Tests
// =============================================================================

#[tokio::test]
async fn test_required_token_is_enforced() {
    let state = MockState::new()
        .with_app(Fixtures::app("1", "Solo", "com.example.solo", "SOLO"))
        .with_agreement(Fixtures::agreement("bla-1", "1", "Terms"))
        .with_required_token("secret");
    let server = MockServer::with_state(state).await;

    let wrong = AscClient::new("nope", server.url()).unwrap();
    let err = BetaLicenseAgreement::get(&wrong, "bla-1", &Default::default())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(401));

    let right = AscClient::new("secret", server.url()).unwrap();
    let agreement = BetaLicenseAgreement::get(&right, "bla-1", &Default::default())
        .await
        .unwrap();
    assert_eq!(agreement.body.data.agreement_text(), Some("Terms"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_rate_limit_counts_down() {
    let server = MockServer::start().await;
    let client = AscClient::new("test-token", server.url()).unwrap();
    let query = GetBetaLicenseAgreementQuery::default();

    let first = BetaLicenseAgreement::get(&client, "bla-1001", &query)
        .await
        .unwrap()
        .rate_limit()
        .unwrap();
    let second = BetaLicenseAgreement::get(&client, "bla-1001", &query)
        .await
        .unwrap()
        .rate_limit()
        .unwrap();

    assert_eq!(first.limit, Some(3600));
    assert_eq!(second.remaining.unwrap() + 1, first.remaining.unwrap());

    server.shutdown().await;
}
