//! App Store version model.
//!
//! Only used as the target of submission relationships and as a decode
//! target for `include=appStoreVersion`.

use serde::{Deserialize, Serialize};

use crate::envelope::{Relationship, Resource, ResourceKind};

/// Marker for the `appStoreVersions` resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppStoreVersion;

impl ResourceKind for AppStoreVersion {
    const TYPE: &'static str = "appStoreVersions";
    type Attributes = AppStoreVersionAttributes;
    type Relationships = AppStoreVersionRelationships;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStoreVersionAttributes {
    /// Platform, e.g. `IOS`, `MAC_OS` or `TV_OS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_string: Option<String>,

    /// Review state, e.g. `WAITING_FOR_REVIEW`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_store_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStoreVersionRelationships {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<Relationship>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_store_version_submission: Option<Relationship>,
}

impl Resource<AppStoreVersion> {
    pub fn version_string(&self) -> Option<&str> {
        self.attributes.as_ref()?.version_string.as_deref()
    }

    pub fn app_store_state(&self) -> Option<&str> {
        self.attributes.as_ref()?.app_store_state.as_deref()
    }
}
