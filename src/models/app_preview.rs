//! App preview model and trait implementations.
//!
//! A preview is a short video in an app preview set. Uploading one is a
//! three step flow: create the preview to reserve it and receive upload
//! operations, PUT the file parts to the returned URLs, then mark the
//! preview as uploaded with its checksum.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::envelope::{
    Creatable, CreateRequest, Relationship, RelationshipRequest, Resource, ResourceKind,
    Updatable,
};
use crate::models::app_preview_set::AppPreviewSet;
use crate::traits::{Create, Delete, Get, Update};

/// Marker for the `appPreviews` resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppPreview;

impl ResourceKind for AppPreview {
    const TYPE: &'static str = "appPreviews";
    type Attributes = AppPreviewAttributes;
    type Relationships = AppPreviewRelationships;
}

impl Creatable for AppPreview {
    type CreateAttributes = AppPreviewCreateAttributes;
    type CreateRelationships = AppPreviewCreateRelationships;
}

impl Updatable for AppPreview {
    type UpdateAttributes = AppPreviewUpdateAttributes;
    type UpdateRelationships = crate::envelope::NoFields;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPreviewAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_delivery_state: Option<AppMediaAssetState>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Poster frame, e.g. `00:00:05:00`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_frame_time_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_image: Option<ImageAsset>,

    /// MD5 checksum of the uploaded source file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file_checksum: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_operations: Option<Vec<UploadOperation>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPreviewRelationships {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_preview_set: Option<Relationship>,
}

/// Attributes required to reserve a preview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPreviewCreateAttributes {
    pub file_name: String,

    pub file_size: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_frame_time_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPreviewCreateRelationships {
    pub app_preview_set: RelationshipRequest,
}

/// Writable attributes of a preview, used to commit an upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPreviewUpdateAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_frame_time_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file_checksum: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded: Option<bool>,
}

/// Processing state of an uploaded media asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppMediaAssetState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<AppMediaStateError>>,

    /// e.g. `AWAITING_UPLOAD`, `UPLOAD_COMPLETE`, `COMPLETE` or `FAILED`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<AppMediaStateError>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppMediaStateError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An image rendered by the server at a requested size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// URL with `{w}`, `{h}` and `{f}` placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl ImageAsset {
    /// Fill the template URL for a concrete size and format (e.g. `png`).
    pub fn url_for(&self, width: u32, height: u32, format: &str) -> Option<String> {
        self.template_url.as_ref().map(|t| {
            t.replace("{w}", &width.to_string())
                .replace("{h}", &height.to_string())
                .replace("{f}", format)
        })
    }
}

/// One part of a file upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOperation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,

    /// HTTP method to send the part with, usually `PUT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_headers: Option<Vec<UploadOperationHeader>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadOperationHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl AppPreview {
    /// Build the request that reserves a preview in a preview set.
    pub fn reserve(
        app_preview_set_id: impl Into<String>,
        file_name: impl Into<String>,
        file_size: u64,
    ) -> CreateRequest<AppPreview> {
        CreateRequest::new()
            .attributes(AppPreviewCreateAttributes {
                file_name: file_name.into(),
                file_size,
                ..Default::default()
            })
            .relationships(AppPreviewCreateRelationships {
                app_preview_set: RelationshipRequest::to::<AppPreviewSet>(app_preview_set_id),
            })
    }
}

impl Resource<AppPreview> {
    pub fn file_name(&self) -> Option<&str> {
        self.attributes.as_ref()?.file_name.as_deref()
    }

    pub fn file_size(&self) -> Option<u64> {
        self.attributes.as_ref()?.file_size
    }

    /// Delivery state string, e.g. `COMPLETE`.
    pub fn delivery_state(&self) -> Option<&str> {
        self.attributes
            .as_ref()?
            .asset_delivery_state
            .as_ref()?
            .state
            .as_deref()
    }

    /// Upload parts the server expects, empty once the upload is committed.
    pub fn upload_operations(&self) -> &[UploadOperation] {
        self.attributes
            .as_ref()
            .and_then(|a| a.upload_operations.as_deref())
            .unwrap_or_default()
    }

    pub fn app_preview_set_id(&self) -> Option<&str> {
        self.relationships.as_ref()?.app_preview_set.as_ref()?.id()
    }
}

/// Query parameters for reading one app preview.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetAppPreviewQuery {
    #[serde(rename = "fields[appPreviews]", skip_serializing_if = "Vec::is_empty")]
    pub fields_app_previews: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
}

#[async_trait]
impl Get for AppPreview {
    type Query = GetAppPreviewQuery;
}

#[async_trait]
impl Create for AppPreview {}

#[async_trait]
impl Update for AppPreview {}

#[async_trait]
impl Delete for AppPreview {}
