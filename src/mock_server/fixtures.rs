//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use crate::{
    App, AppAttributes, AppMediaAssetState, AppPreview, AppPreviewAttributes,
    AppPreviewRelationships, AppRelationships, AppStoreVersion, AppStoreVersionAttributes,
    AppStoreVersionRelationships, AppStoreVersionSubmission,
    AppStoreVersionSubmissionRelationships, BetaLicenseAgreement, BetaLicenseAgreementAttributes,
    BetaLicenseAgreementRelationships, ImageAsset, Relationship, RelationshipData, Resource,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

fn to_one(kind: &str, id: &str) -> Option<Relationship> {
    Some(Relationship {
        data: Some(RelationshipData::new(kind, id)),
        links: None,
    })
}

impl Fixtures {
    // =========================================================================
    // App Fixtures
    // =========================================================================

    /// Create an app with name, bundle id and SKU.
    pub fn app(id: &str, name: &str, bundle_id: &str, sku: &str) -> Resource<App> {
        Resource::new(id)
            .with_attributes(AppAttributes {
                bundle_id: Some(bundle_id.to_string()),
                name: Some(name.to_string()),
                primary_locale: Some("en-US".to_string()),
                sku: Some(sku.to_string()),
                ..Default::default()
            })
            .with_relationships(AppRelationships {
                beta_license_agreement: to_one("betaLicenseAgreements", &format!("bla-{id}")),
                ..Default::default()
            })
    }

    // =========================================================================
    // Beta License Agreement Fixtures
    // =========================================================================

    /// Create an agreement linked to an app.
    pub fn agreement(id: &str, app_id: &str, text: &str) -> Resource<BetaLicenseAgreement> {
        Resource::new(id)
            .with_attributes(BetaLicenseAgreementAttributes {
                agreement_text: Some(text.to_string()),
            })
            .with_relationships(BetaLicenseAgreementRelationships {
                app: to_one("apps", app_id),
            })
    }

    // =========================================================================
    // App Store Version Fixtures
    // =========================================================================

    /// Create an iOS version that is ready to submit.
    pub fn version(id: &str, app_id: &str, version_string: &str) -> Resource<AppStoreVersion> {
        Resource::new(id)
            .with_attributes(AppStoreVersionAttributes {
                platform: Some("IOS".to_string()),
                version_string: Some(version_string.to_string()),
                app_store_state: Some("PREPARE_FOR_SUBMISSION".to_string()),
                release_type: Some("MANUAL".to_string()),
                created_date: Some("2024-03-01T10:00:00-08:00".to_string()),
            })
            .with_relationships(AppStoreVersionRelationships {
                app: to_one("apps", app_id),
                ..Default::default()
            })
    }

    /// Create a submission for a version.
    pub fn submission(id: &str, version_id: &str) -> Resource<AppStoreVersionSubmission> {
        Resource::new(id).with_relationships(AppStoreVersionSubmissionRelationships {
            app_store_version: to_one("appStoreVersions", version_id),
        })
    }

    // =========================================================================
    // App Preview Fixtures
    // =========================================================================

    /// Create a fully processed preview.
    pub fn processed_preview(id: &str, set_id: &str, file_name: &str) -> Resource<AppPreview> {
        Resource::new(id)
            .with_attributes(AppPreviewAttributes {
                asset_delivery_state: Some(AppMediaAssetState {
                    state: Some("COMPLETE".to_string()),
                    ..Default::default()
                }),
                file_name: Some(file_name.to_string()),
                file_size: Some(8_388_608),
                mime_type: Some("video/mp4".to_string()),
                preview_frame_time_code: Some("00:00:05:00".to_string()),
                preview_image: Some(ImageAsset {
                    height: Some(2688),
                    template_url: Some(format!(
                        "https://is1-ssl.mzstatic.com/image/thumb/{id}/{{w}}x{{h}}bb.{{f}}"
                    )),
                    width: Some(1242),
                }),
                source_file_checksum: Some("5d41402abc4b2a76b9719d911017c592".to_string()),
                video_url: Some(format!("https://video.example.com/{id}.m3u8")),
                ..Default::default()
            })
            .with_relationships(AppPreviewRelationships {
                app_preview_set: to_one("appPreviewSets", set_id),
            })
    }

    // =========================================================================
    // Scenario Fixtures
    // =========================================================================

    /// Create a default scenario with two apps and their resources.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related data.
#[derive(Debug, Clone)]
pub struct DefaultScenario {
    pub apps: Vec<Resource<App>>,
    pub agreements: Vec<Resource<BetaLicenseAgreement>>,
    pub versions: Vec<Resource<AppStoreVersion>>,
    pub submissions: Vec<Resource<AppStoreVersionSubmission>>,
    pub previews: Vec<Resource<AppPreview>>,
}

impl DefaultScenario {
    fn new() -> Self {
        let apps = vec![
            Fixtures::app("1001", "Sky Journal", "com.example.skyjournal", "SKY-1"),
            Fixtures::app("1002", "Tide Tables", "com.example.tides", "TIDE-1"),
        ];

        let agreements = vec![
            Fixtures::agreement(
                "bla-1001",
                "1001",
                "Sky Journal beta builds are confidential.",
            ),
            Fixtures::agreement("bla-1002", "1002", "Tide Tables beta terms."),
        ];

        let versions = vec![
            Fixtures::version("v-1001-2", "1001", "2.0"),
            Fixtures::version("v-1002-1", "1002", "1.0"),
        ];

        let submissions = vec![Fixtures::submission("submission-1", "v-1002-1")];

        let previews = vec![Fixtures::processed_preview(
            "preview-1",
            "set-iphone65",
            "walkthrough.mp4",
        )];

        Self {
            apps,
            agreements,
            versions,
            submissions,
            previews,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_links_its_agreement() {
        let app = Fixtures::app("7", "Seven", "com.example.seven", "SEVEN");
        assert_eq!(app.name(), Some("Seven"));
        assert_eq!(app.beta_license_agreement_id(), Some("bla-7"));
    }

    #[test]
    fn test_agreement_links_its_app() {
        let agreement = Fixtures::agreement("bla-7", "7", "Terms");
        assert_eq!(agreement.app_id(), Some("7"));
        assert_eq!(agreement.agreement_text(), Some("Terms"));
    }

    #[test]
    fn test_processed_preview_template() {
        let preview = Fixtures::processed_preview("p-1", "set-1", "clip.mp4");
        let image = preview
            .attributes
            .as_ref()
            .and_then(|a| a.preview_image.clone())
            .unwrap();
        assert_eq!(
            image.url_for(100, 200, "png").as_deref(),
            Some("https://is1-ssl.mzstatic.com/image/thumb/p-1/100x200bb.png")
        );
        assert_eq!(preview.delivery_state(), Some("COMPLETE"));
    }

    #[test]
    fn test_default_scenario() {
        let scenario = Fixtures::default_scenario();
        assert_eq!(scenario.apps.len(), 2);
        assert_eq!(scenario.agreements.len(), 2);
        assert!(!scenario.versions.is_empty());
        assert!(!scenario.submissions.is_empty());
        assert!(!scenario.previews.is_empty());
    }
}
