//! Mock App Store Connect server.
//!
//! Provides an axum-based HTTP server that simulates the App Store Connect API.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::handlers::documents::{error_response, SharedState};
use super::state::{MockState, HOURLY_REQUEST_LIMIT};

/// A mock App Store Connect server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    ///
    /// Useful when you want to control exactly what data is available.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(mut state: MockState) -> Self {
        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");
        let url = format!("http://{}", addr);

        state.base_url = url.clone();
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url,
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating an `AscClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        let scenario = Fixtures::default_scenario();
        Self::state_from_scenario(scenario)
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for app in scenario.apps {
            state = state.with_app(app);
        }

        for agreement in scenario.agreements {
            state = state.with_agreement(agreement);
        }

        for version in scenario.versions {
            state = state.with_version(version);
        }

        for submission in scenario.submissions {
            state = state.with_submission(submission);
        }

        for preview in scenario.previews {
            state = state.with_preview(preview);
        }

        state
    }

    /// Create the axum router with all routes.
    pub(crate) fn create_router(state: SharedState) -> Router {
        Router::new()
            // Beta license agreement routes
            .route("/betaLicenseAgreements", get(handlers::list_agreements))
            .route(
                "/betaLicenseAgreements/:id",
                get(handlers::get_agreement).patch(handlers::update_agreement),
            )
            .route(
                "/betaLicenseAgreements/:id/app",
                get(handlers::get_agreement_app),
            )
            .route(
                "/apps/:id/betaLicenseAgreement",
                get(handlers::get_app_agreement),
            )
            // App preview routes
            .route("/appPreviews", post(handlers::create_preview))
            .route(
                "/appPreviews/:id",
                get(handlers::get_preview)
                    .patch(handlers::update_preview)
                    .delete(handlers::delete_preview),
            )
            // Submission routes
            .route(
                "/appStoreVersionSubmissions",
                post(handlers::create_submission),
            )
            .route(
                "/appStoreVersionSubmissions/:id",
                delete(handlers::delete_submission),
            )
            .route(
                "/appStoreVersions/:id/appStoreVersionSubmission",
                get(handlers::get_version_submission),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), authorize))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Check the bearer token and report the remaining hourly budget.
async fn authorize(State(state): State<SharedState>, request: Request, next: Next) -> Response {
    let remaining = {
        let mut state = state.write().await;
        if let Some(expected) = &state.required_token {
            let presented = request
                .headers()
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "));
            if presented != Some(expected.as_str()) {
                return error_response(
                    StatusCode::UNAUTHORIZED,
                    "NOT_AUTHORIZED",
                    "Authentication credentials are missing or invalid.",
                    "Provide a properly configured and signed bearer token, and make sure that it has not expired.",
                );
            }
        }
        state.record_request()
    };

    let mut response = next.run(request).await;
    let budget = format!("user-hour-lim:{HOURLY_REQUEST_LIMIT};user-hour-rem:{remaining};");
    if let Ok(value) = HeaderValue::from_str(&budget) {
        response.headers_mut().insert("x-rate-limit", value);
    }
    response
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
