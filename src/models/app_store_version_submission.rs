//! App Store version submission model and trait implementations.
//!
//! Creating a submission sends a version to App Review; deleting it pulls
//! the version back out of the review queue.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::AscClient;
use crate::envelope::{
    Creatable, CreateRequest, NoFields, Relationship, RelationshipRequest, Resource,
    ResourceKind, SingleDocument,
};
use crate::error::Result;
use crate::models::app_store_version::AppStoreVersion;
use crate::response::ApiResponse;
use crate::traits::{get_related, related_path, Create, Delete};

/// Marker for the `appStoreVersionSubmissions` resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppStoreVersionSubmission;

impl ResourceKind for AppStoreVersionSubmission {
    const TYPE: &'static str = "appStoreVersionSubmissions";
    type Attributes = NoFields;
    type Relationships = AppStoreVersionSubmissionRelationships;
}

impl Creatable for AppStoreVersionSubmission {
    type CreateAttributes = NoFields;
    type CreateRelationships = AppStoreVersionSubmissionCreateRelationships;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStoreVersionSubmissionRelationships {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_store_version: Option<Relationship>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStoreVersionSubmissionCreateRelationships {
    pub app_store_version: RelationshipRequest,
}

impl AppStoreVersionSubmission {
    /// Build the request that submits an App Store version for review.
    pub fn request_for_version(
        app_store_version_id: impl Into<String>,
    ) -> CreateRequest<AppStoreVersionSubmission> {
        CreateRequest::new().relationships(AppStoreVersionSubmissionCreateRelationships {
            app_store_version: RelationshipRequest::to::<AppStoreVersion>(app_store_version_id),
        })
    }
}

impl Resource<AppStoreVersionSubmission> {
    /// Id of the submitted version, when linkage was included.
    pub fn app_store_version_id(&self) -> Option<&str> {
        self.relationships.as_ref()?.app_store_version.as_ref()?.id()
    }
}

/// Query parameters for reading the submission of an App Store version.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetAppStoreVersionSubmissionForAppStoreVersionQuery {
    #[serde(
        rename = "fields[appStoreVersions]",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub fields_app_store_versions: Vec<String>,

    #[serde(
        rename = "fields[appStoreVersionSubmissions]",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub fields_app_store_version_submissions: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
}

#[async_trait]
impl Create for AppStoreVersionSubmission {}

#[async_trait]
impl Delete for AppStoreVersionSubmission {}

/// Get the submission of an App Store version.
///
/// Fails with a 404 [`AscError::ApiError`](crate::AscError::ApiError) when
/// the version has not been submitted.
#[tracing::instrument(skip(client, query))]
pub async fn get_submission_for_app_store_version(
    client: &AscClient,
    app_store_version_id: &str,
    query: &GetAppStoreVersionSubmissionForAppStoreVersionQuery,
) -> Result<ApiResponse<SingleDocument<AppStoreVersionSubmission>>> {
    let path = related_path::<AppStoreVersion>(app_store_version_id, "appStoreVersionSubmission");
    get_related::<AppStoreVersionSubmission, _>(client, &path, query).await
}
