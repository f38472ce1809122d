//! Beta license agreement model and trait implementations.
//!
//! Every app has exactly one beta license agreement, shown to TestFlight
//! testers before they install a build.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::AscClient;
use crate::envelope::{Relationship, Resource, ResourceKind, SingleDocument, Updatable};
use crate::error::Result;
use crate::models::app::App;
use crate::response::ApiResponse;
use crate::traits::{get_related, related_path, Get, List, Update};

/// Marker for the `betaLicenseAgreements` resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetaLicenseAgreement;

impl ResourceKind for BetaLicenseAgreement {
    const TYPE: &'static str = "betaLicenseAgreements";
    type Attributes = BetaLicenseAgreementAttributes;
    type Relationships = BetaLicenseAgreementRelationships;
}

impl Updatable for BetaLicenseAgreement {
    type UpdateAttributes = BetaLicenseAgreementUpdateAttributes;
    type UpdateRelationships = crate::envelope::NoFields;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaLicenseAgreementAttributes {
    /// The license text shown to testers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreement_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaLicenseAgreementRelationships {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<Relationship>,
}

/// Writable attributes of a beta license agreement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetaLicenseAgreementUpdateAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreement_text: Option<String>,
}

impl Resource<BetaLicenseAgreement> {
    /// Get the agreement text, if it was selected.
    pub fn agreement_text(&self) -> Option<&str> {
        self.attributes.as_ref()?.agreement_text.as_deref()
    }

    /// Id of the app this agreement belongs to, when linkage was included.
    pub fn app_id(&self) -> Option<&str> {
        self.relationships.as_ref()?.app.as_ref()?.id()
    }
}

/// Query parameters for listing beta license agreements.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListBetaLicenseAgreementsQuery {
    /// App fields to return for included apps.
    #[serde(rename = "fields[apps]", skip_serializing_if = "Vec::is_empty")]
    pub fields_apps: Vec<String>,

    /// Agreement fields to return.
    #[serde(
        rename = "fields[betaLicenseAgreements]",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub fields_beta_license_agreements: Vec<String>,

    /// Only agreements of these app ids.
    #[serde(rename = "filter[app]", skip_serializing_if = "Vec::is_empty")]
    pub filter_app: Vec<String>,

    /// Related resources to sideload (`app`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Query parameters for reading one beta license agreement.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetBetaLicenseAgreementQuery {
    #[serde(rename = "fields[apps]", skip_serializing_if = "Vec::is_empty")]
    pub fields_apps: Vec<String>,

    #[serde(
        rename = "fields[betaLicenseAgreements]",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub fields_beta_license_agreements: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
}

/// Query parameters for reading the app of a beta license agreement.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetAppForBetaLicenseAgreementQuery {
    #[serde(rename = "fields[apps]", skip_serializing_if = "Vec::is_empty")]
    pub fields_apps: Vec<String>,
}

/// Query parameters for reading the beta license agreement of an app.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetBetaLicenseAgreementForAppQuery {
    #[serde(
        rename = "fields[betaLicenseAgreements]",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub fields_beta_license_agreements: Vec<String>,
}

#[async_trait]
impl Get for BetaLicenseAgreement {
    type Query = GetBetaLicenseAgreementQuery;
}

#[async_trait]
impl List for BetaLicenseAgreement {
    type Query = ListBetaLicenseAgreementsQuery;
}

#[async_trait]
impl Update for BetaLicenseAgreement {}

/// Get the app a beta license agreement belongs to.
///
/// # Example
///
/// ```ignore
/// use ascapi::{AscClient, get_app_for_beta_license_agreement};
///
/// let client = AscClient::from_env()?;
/// let app = get_app_for_beta_license_agreement(&client, "bla-1", &Default::default()).await?;
/// println!("App: {:?}", app.body.data.name());
/// ```
#[tracing::instrument(skip(client, query))]
pub async fn get_app_for_beta_license_agreement(
    client: &AscClient,
    id: &str,
    query: &GetAppForBetaLicenseAgreementQuery,
) -> Result<ApiResponse<SingleDocument<App>>> {
    let path = related_path::<BetaLicenseAgreement>(id, "app");
    get_related::<App, _>(client, &path, query).await
}

/// Get the beta license agreement of an app.
///
/// # Arguments
///
/// * `client` - The App Store Connect API client
/// * `app_id` - The app identifier
/// * `query` - Field selection
#[tracing::instrument(skip(client, query))]
pub async fn get_beta_license_agreement_for_app(
    client: &AscClient,
    app_id: &str,
    query: &GetBetaLicenseAgreementForAppQuery,
) -> Result<ApiResponse<SingleDocument<BetaLicenseAgreement>>> {
    let path = related_path::<App>(app_id, "betaLicenseAgreement");
    get_related::<BetaLicenseAgreement, _>(client, &path, query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{build_query, decode_list, UpdateRequest};

    #[test]
    fn test_agreement_deserialize() {
        let resource: Resource<BetaLicenseAgreement> = serde_json::from_value(serde_json::json!({
            "id": "123",
            "type": "betaLicenseAgreements",
            "attributes": {"agreementText": "Be nice"},
            "relationships": {
                "app": {"data": {"type": "apps", "id": "1001"}}
            },
            "links": {"self": "https://x/v1/betaLicenseAgreements/123"}
        }))
        .unwrap();

        assert_eq!(resource.agreement_text(), Some("Be nice"));
        assert_eq!(resource.app_id(), Some("1001"));
        assert_eq!(
            resource.self_link(),
            Some("https://x/v1/betaLicenseAgreements/123")
        );
    }

    #[test]
    fn test_agreement_list_with_included_apps() {
        let body = br#"{
            "data": [
                {"id": "b", "type": "betaLicenseAgreements"},
                {"id": "a", "type": "betaLicenseAgreements"}
            ],
            "included": [
                {"id": "1001", "type": "apps", "attributes": {"name": "Sky Journal"}}
            ],
            "links": {"self": "https://x/v1/betaLicenseAgreements"}
        }"#;
        let document = decode_list::<BetaLicenseAgreement>(body).unwrap();

        let ids: Vec<_> = document.data.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        let apps = document.included_of::<App>().unwrap();
        assert_eq!(apps[0].name(), Some("Sky Journal"));
    }

    #[test]
    fn test_list_query_keys() {
        let query = ListBetaLicenseAgreementsQuery {
            fields_beta_license_agreements: vec!["agreementText".into(), "app".into()],
            filter_app: vec!["1001".into()],
            limit: Some(20),
            ..Default::default()
        };
        let mut pairs = build_query(&query).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                (
                    "fields[betaLicenseAgreements]".to_string(),
                    "agreementText,app".to_string()
                ),
                ("filter[app]".to_string(), "1001".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_update_request_shape() {
        let request = UpdateRequest::<BetaLicenseAgreement>::new("123").attributes(
            BetaLicenseAgreementUpdateAttributes {
                agreement_text: Some("New terms".into()),
            },
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "123",
                "type": "betaLicenseAgreements",
                "attributes": {"agreementText": "New terms"}
            })
        );
    }
}
