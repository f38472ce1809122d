//! Mock App Store Connect server for E2E testing.
//!
//! This module provides an in-memory mock server that speaks the JSON:API
//! envelope for integration and end-to-end testing. Unlike wiremock which
//! mocks at the HTTP level per-test, this server maintains state across
//! requests, enabling realistic workflow testing (reserve a preview, commit
//! its upload, submit a version, withdraw the submission).
//!
//! # Example
//!
//! ```ignore
//! use ascapi::mock_server::MockServer;
//! use ascapi::{AscClient, BetaLicenseAgreement, Get};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = AscClient::new("test-token", server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let response = BetaLicenseAgreement::get(&client, "bla-1001", &Default::default())
//!         .await
//!         .unwrap();
//!     assert_eq!(response.body.data.app_id(), Some("1001"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::{MockState, StateError, HOURLY_REQUEST_LIMIT};
