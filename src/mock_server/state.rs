//! Mock server state management.
//!
//! Provides the in-memory data store for the mock App Store Connect server.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    App, AppMediaAssetState, AppPreview, AppPreviewAttributes, AppPreviewCreateAttributes,
    AppPreviewRelationships, AppPreviewUpdateAttributes, AppStoreVersion,
    AppStoreVersionSubmission, AppStoreVersionSubmissionRelationships, BetaLicenseAgreement,
    Relationship, RelationshipData, Resource, UploadOperation,
};

/// Hourly request budget reported in `X-Rate-Limit`.
pub const HOURLY_REQUEST_LIMIT: u32 = 3600;

/// Why a mutation was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The target resource does not exist.
    NotFound { kind: &'static str, id: String },
    /// The request conflicts with the current state.
    Conflict(String),
}

/// Shared state for the mock server.
///
/// Resources are kept in ordered maps so list endpoints page through them
/// in a stable order. It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    pub apps: BTreeMap<String, Resource<App>>,

    pub agreements: BTreeMap<String, Resource<BetaLicenseAgreement>>,

    pub previews: BTreeMap<String, Resource<AppPreview>>,

    pub versions: BTreeMap<String, Resource<AppStoreVersion>>,

    pub submissions: BTreeMap<String, Resource<AppStoreVersionSubmission>>,

    /// Optional authentication token. If set, requests must carry it as a bearer token.
    pub required_token: Option<String>,

    /// Address the server is reachable at, used to build absolute links.
    pub base_url: String,

    /// Requests answered so far, reported against [`HOURLY_REQUEST_LIMIT`].
    pub requests_served: u32,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    pub fn with_app(mut self, app: Resource<App>) -> Self {
        self.apps.insert(app.id.clone(), app);
        self
    }

    pub fn with_agreement(mut self, agreement: Resource<BetaLicenseAgreement>) -> Self {
        self.agreements.insert(agreement.id.clone(), agreement);
        self
    }

    pub fn with_preview(mut self, preview: Resource<AppPreview>) -> Self {
        self.previews.insert(preview.id.clone(), preview);
        self
    }

    pub fn with_version(mut self, version: Resource<AppStoreVersion>) -> Self {
        self.versions.insert(version.id.clone(), version);
        self
    }

    pub fn with_submission(mut self, submission: Resource<AppStoreVersionSubmission>) -> Self {
        self.submissions.insert(submission.id.clone(), submission);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Absolute URL of `path` on this server.
    pub fn link(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Count a request and return how many remain this hour.
    pub fn record_request(&mut self) -> u32 {
        self.requests_served = self.requests_served.saturating_add(1);
        HOURLY_REQUEST_LIMIT.saturating_sub(self.requests_served)
    }

    /// Next `{prefix}-{n}` id not held by any stored resource.
    fn allocate_id(&mut self, prefix: &str) -> String {
        loop {
            self.next_id += 1;
            let id = format!("{prefix}-{}", self.next_id);
            if !self.previews.contains_key(&id) && !self.submissions.contains_key(&id) {
                return id;
            }
        }
    }

    /// List agreements in id order, optionally limited to some apps.
    pub fn list_agreements(&self, app_ids: &[String]) -> Vec<&Resource<BetaLicenseAgreement>> {
        self.agreements
            .values()
            .filter(|a| {
                app_ids.is_empty()
                    || a.app_id()
                        .map(|id| app_ids.iter().any(|wanted| wanted == id))
                        .unwrap_or(false)
            })
            .collect()
    }

    /// The app an agreement belongs to.
    pub fn app_for_agreement(&self, agreement_id: &str) -> Option<&Resource<App>> {
        let app_id = self.agreements.get(agreement_id)?.app_id()?;
        self.apps.get(app_id)
    }

    /// The agreement of an app.
    pub fn agreement_for_app(&self, app_id: &str) -> Option<&Resource<BetaLicenseAgreement>> {
        self.agreements
            .values()
            .find(|a| a.app_id() == Some(app_id))
    }

    /// Replace an agreement's text and return the updated version.
    pub fn update_agreement(
        &mut self,
        id: &str,
        agreement_text: Option<String>,
    ) -> Option<&Resource<BetaLicenseAgreement>> {
        let agreement = self.agreements.get_mut(id)?;
        if let Some(text) = agreement_text {
            agreement
                .attributes
                .get_or_insert_with(Default::default)
                .agreement_text = Some(text);
        }
        Some(&*agreement)
    }

    /// Reserve a new preview awaiting upload.
    pub fn create_preview(
        &mut self,
        app_preview_set_id: &str,
        attributes: AppPreviewCreateAttributes,
    ) -> Resource<AppPreview> {
        let id = self.allocate_id("preview");
        let upload = UploadOperation {
            length: Some(attributes.file_size),
            method: Some("PUT".to_string()),
            offset: Some(0),
            request_headers: None,
            url: Some(self.link(&format!("uploads/{id}"))),
        };

        let preview = Resource::<AppPreview>::new(id.clone())
            .with_attributes(AppPreviewAttributes {
                asset_delivery_state: Some(AppMediaAssetState {
                    state: Some("AWAITING_UPLOAD".to_string()),
                    ..Default::default()
                }),
                file_name: Some(attributes.file_name),
                file_size: Some(attributes.file_size),
                mime_type: attributes.mime_type,
                preview_frame_time_code: attributes.preview_frame_time_code,
                upload_operations: Some(vec![upload]),
                ..Default::default()
            })
            .with_relationships(AppPreviewRelationships {
                app_preview_set: Some(Relationship {
                    data: Some(RelationshipData::new("appPreviewSets", app_preview_set_id)),
                    links: None,
                }),
            });

        self.previews.insert(id, preview.clone());
        preview
    }

    /// Apply writable attributes to a preview. Committing an upload clears
    /// its upload operations.
    pub fn update_preview(
        &mut self,
        id: &str,
        changes: AppPreviewUpdateAttributes,
    ) -> Option<&Resource<AppPreview>> {
        let preview = self.previews.get_mut(id)?;
        let attributes = preview.attributes.get_or_insert_with(Default::default);

        if let Some(code) = changes.preview_frame_time_code {
            attributes.preview_frame_time_code = Some(code);
        }
        if let Some(checksum) = changes.source_file_checksum {
            attributes.source_file_checksum = Some(checksum);
        }
        if changes.uploaded == Some(true) {
            attributes.upload_operations = None;
            attributes.asset_delivery_state = Some(AppMediaAssetState {
                state: Some("UPLOAD_COMPLETE".to_string()),
                ..Default::default()
            });
        }
        Some(&*preview)
    }

    pub fn delete_preview(&mut self, id: &str) -> bool {
        self.previews.remove(id).is_some()
    }

    /// The submission of an App Store version, if it was submitted.
    pub fn submission_for_version(
        &self,
        version_id: &str,
    ) -> Option<&Resource<AppStoreVersionSubmission>> {
        self.submissions
            .values()
            .find(|s| s.app_store_version_id() == Some(version_id))
    }

    /// Submit a version for review.
    pub fn create_submission(
        &mut self,
        version_id: &str,
    ) -> Result<Resource<AppStoreVersionSubmission>, StateError> {
        if !self.versions.contains_key(version_id) {
            return Err(StateError::NotFound {
                kind: "appStoreVersions",
                id: version_id.to_string(),
            });
        }
        if self.submission_for_version(version_id).is_some() {
            return Err(StateError::Conflict(format!(
                "App Store version '{version_id}' is already submitted for review"
            )));
        }

        let id = self.allocate_id("submission");
        let submission = Resource::<AppStoreVersionSubmission>::new(id.clone()).with_relationships(
            AppStoreVersionSubmissionRelationships {
                app_store_version: Some(Relationship {
                    data: Some(RelationshipData::new("appStoreVersions", version_id)),
                    links: None,
                }),
            },
        );
        self.set_version_state(version_id, "WAITING_FOR_REVIEW");
        self.submissions.insert(id, submission.clone());
        Ok(submission)
    }

    /// Withdraw a submission, returning its version to the developer.
    pub fn delete_submission(&mut self, id: &str) -> bool {
        let Some(submission) = self.submissions.remove(id) else {
            return false;
        };
        if let Some(version_id) = submission.app_store_version_id() {
            self.set_version_state(version_id, "DEVELOPER_REJECTED");
        }
        true
    }

    fn set_version_state(&mut self, version_id: &str, state: &str) {
        if let Some(version) = self.versions.get_mut(version_id) {
            version
                .attributes
                .get_or_insert_with(Default::default)
                .app_store_state = Some(state.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    #[test]
    fn test_state_list_agreements_with_filter() {
        let state = MockState::new()
            .with_agreement(Fixtures::agreement("bla-1", "1", "one"))
            .with_agreement(Fixtures::agreement("bla-2", "2", "two"))
            .with_agreement(Fixtures::agreement("bla-3", "3", "three"));

        assert_eq!(state.list_agreements(&[]).len(), 3);

        let filtered = state.list_agreements(&["3".to_string(), "1".to_string()]);
        let ids: Vec<_> = filtered.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["bla-1", "bla-3"]);
    }

    #[test]
    fn test_state_update_agreement() {
        let mut state = MockState::new().with_agreement(Fixtures::agreement("bla-1", "1", "old"));

        let updated = state
            .update_agreement("bla-1", Some("new".to_string()))
            .unwrap();
        assert_eq!(updated.agreement_text(), Some("new"));
        assert!(state.update_agreement("missing", None).is_none());
    }

    #[test]
    fn test_state_preview_upload_lifecycle() {
        let mut state = MockState::new();
        state.base_url = "http://127.0.0.1:9".to_string();

        let preview = state.create_preview(
            "set-1",
            AppPreviewCreateAttributes {
                file_name: "clip.mov".to_string(),
                file_size: 10,
                ..Default::default()
            },
        );
        assert_eq!(preview.delivery_state(), Some("AWAITING_UPLOAD"));
        assert_eq!(
            preview.upload_operations()[0].url.as_deref(),
            Some(format!("http://127.0.0.1:9/uploads/{}", preview.id).as_str())
        );

        let committed = state
            .update_preview(
                &preview.id,
                AppPreviewUpdateAttributes {
                    uploaded: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(committed.delivery_state(), Some("UPLOAD_COMPLETE"));
        assert!(committed.upload_operations().is_empty());

        assert!(state.delete_preview(&preview.id));
        assert!(!state.delete_preview(&preview.id));
    }

    #[test]
    fn test_state_submission_rules() {
        let mut state = MockState::new().with_version(Fixtures::version("v-1", "1", "1.0"));

        assert!(matches!(
            state.create_submission("v-unknown"),
            Err(StateError::NotFound { .. })
        ));

        let submission = state.create_submission("v-1").unwrap();
        assert_eq!(
            state.versions["v-1"].app_store_state(),
            Some("WAITING_FOR_REVIEW")
        );
        assert!(matches!(
            state.create_submission("v-1"),
            Err(StateError::Conflict(_))
        ));

        assert!(state.delete_submission(&submission.id));
        assert!(state.submission_for_version("v-1").is_none());
    }

    #[test]
    fn test_allocated_ids_skip_fixtures() {
        let mut state = MockState::new()
            .with_version(Fixtures::version("v-1", "1", "1.0"))
            .with_submission(Fixtures::submission("submission-1", "v-0"));

        let created = state.create_submission("v-1").unwrap();
        assert_eq!(created.id, "submission-2");
        assert_eq!(state.submissions.len(), 2);
    }

    #[test]
    fn test_record_request_counts_down() {
        let mut state = MockState::new();
        assert_eq!(state.record_request(), HOURLY_REQUEST_LIMIT - 1);
        assert_eq!(state.record_request(), HOURLY_REQUEST_LIMIT - 2);
    }
}
