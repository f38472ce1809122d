//! App Store Connect API client library.
//!
//! A Rust library for the App Store Connect REST API. Every endpoint speaks
//! the same JSON:API resource envelope, so the envelope is typed once in
//! [`envelope`] and each resource kind plugs into it through a zero-sized
//! marker type implementing [`ResourceKind`].
//!
//! # Quick Start
//!
//! ```no_run
//! use ascapi::{AscClient, BetaLicenseAgreement, Get, List};
//!
//! #[tokio::main]
//! async fn main() -> ascapi::Result<()> {
//!     // Create client from environment variables
//!     let client = AscClient::from_env()?;
//!
//!     // Get an agreement by id
//!     let response = BetaLicenseAgreement::get(&client, "123", &Default::default()).await?;
//!     println!("Agreement: {:?}", response.body.data.agreement_text());
//!
//!     // List all agreements, following cursor links
//!     let agreements = BetaLicenseAgreement::list_all(&client, &Default::default()).await?;
//!     println!("Found {} agreements", agreements.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around five operation traits:
//!
//! - [`Get`] - Fetch a single resource by ID
//! - [`List`] - Fetch cursor-paginated collections of resources
//! - [`Create`] - Create a resource
//! - [`Update`] - Modify an existing resource
//! - [`Delete`] - Remove a resource
//!
//! Each resource kind (like [`BetaLicenseAgreement`] or [`AppPreview`])
//! implements the traits that are supported by its API endpoints. Endpoints
//! on relationship paths are plain functions such as
//! [`get_beta_license_agreement_for_app`].
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `ASC_API_TOKEN` (required) - A signed App Store Connect JWT
//! - `ASC_API_URL` (optional) - Base URL (defaults to `https://api.appstoreconnect.apple.com/v1`)

mod client;
pub mod envelope;
mod error;
mod models;
mod pagination;
mod response;
mod traits;

pub mod cli;
#[cfg(feature = "test-server")]
pub mod mock_server;
pub mod output;

// Re-export core types
pub use client::AscClient;
pub use error::{AscError, ErrorObject, ErrorResponse, ErrorSource, Result};
pub use pagination::Page;
pub use response::{ApiResponse, RateLimit};

// Re-export the envelope types callers touch most
pub use envelope::{
    CreateRequest, IncludedResource, ListDocument, NoFields, Relationship, RelationshipData,
    Resource, ResourceKind, SingleDocument, UpdateRequest,
};

// Re-export traits
pub use output::PrettyPrint;
pub use traits::{Create, Delete, Get, List, Update, DEFAULT_PAGE_SIZE};

// Re-export models
pub use models::{
    // App types
    App,
    AppAttributes,
    AppRelationships,
    // App preview set types
    AppPreviewSet,
    AppPreviewSetAttributes,
    AppPreviewSetRelationships,
    PreviewType,
    // App preview types
    AppMediaAssetState,
    AppMediaStateError,
    AppPreview,
    AppPreviewAttributes,
    AppPreviewCreateAttributes,
    AppPreviewCreateRelationships,
    AppPreviewRelationships,
    AppPreviewUpdateAttributes,
    GetAppPreviewQuery,
    ImageAsset,
    UploadOperation,
    UploadOperationHeader,
    // App Store version types
    AppStoreVersion,
    AppStoreVersionAttributes,
    AppStoreVersionRelationships,
    // Submission types
    AppStoreVersionSubmission,
    AppStoreVersionSubmissionCreateRelationships,
    AppStoreVersionSubmissionRelationships,
    GetAppStoreVersionSubmissionForAppStoreVersionQuery,
    // Beta license agreement types
    BetaLicenseAgreement,
    BetaLicenseAgreementAttributes,
    BetaLicenseAgreementRelationships,
    BetaLicenseAgreementUpdateAttributes,
    GetAppForBetaLicenseAgreementQuery,
    GetBetaLicenseAgreementForAppQuery,
    GetBetaLicenseAgreementQuery,
    ListBetaLicenseAgreementsQuery,
};

// Re-export relationship endpoints
pub use models::{
    get_app_for_beta_license_agreement, get_beta_license_agreement_for_app,
    get_submission_for_app_store_version,
};
