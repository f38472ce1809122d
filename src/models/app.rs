//! App model.
//!
//! Apps are never fetched directly by this crate; they arrive as related
//! resources (`betaLicenseAgreements/{id}/app`) or in `included` arrays.

use serde::{Deserialize, Serialize};

use crate::envelope::{PagedRelationship, Relationship, Resource, ResourceKind};

/// Marker for the `apps` resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct App;

impl ResourceKind for App {
    const TYPE: &'static str = "apps";
    type Attributes = AppAttributes;
    type Relationships = AppRelationships;
}

/// Attributes of an app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_in_new_territories: Option<bool>,

    /// Bundle identifier (e.g., "com.example.app").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,

    /// Content rights declaration, e.g. `DOES_NOT_USE_THIRD_PARTY_CONTENT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_rights_declaration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_or_ever_was_made_for_kids: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Primary locale (e.g., "en-US").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_locale: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
}

/// Relationships of an app this crate knows how to follow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppRelationships {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta_license_agreement: Option<Relationship>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_store_versions: Option<PagedRelationship>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builds: Option<PagedRelationship>,
}

impl Resource<App> {
    /// Get the app name, if it was selected.
    pub fn name(&self) -> Option<&str> {
        self.attributes.as_ref()?.name.as_deref()
    }

    /// Get the bundle identifier, if it was selected.
    pub fn bundle_id(&self) -> Option<&str> {
        self.attributes.as_ref()?.bundle_id.as_deref()
    }

    /// Get the SKU, if it was selected.
    pub fn sku(&self) -> Option<&str> {
        self.attributes.as_ref()?.sku.as_deref()
    }

    /// Id of the app's beta license agreement, when linkage was included.
    pub fn beta_license_agreement_id(&self) -> Option<&str> {
        self.relationships
            .as_ref()?
            .beta_license_agreement
            .as_ref()?
            .id()
    }
}
