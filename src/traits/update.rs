//! Update trait for modifying resources.

use async_trait::async_trait;

use crate::client::AscClient;
use crate::envelope::{decode_single, encode_single, SingleDocument, Updatable, UpdateRequest};
use crate::error::Result;
use crate::response::ApiResponse;
use crate::traits::instance_path;

/// Update an existing resource with `PATCH {type}/{id}`.
///
/// # Example
///
/// ```ignore
/// use ascapi::{AscClient, BetaLicenseAgreement, BetaLicenseAgreementUpdateAttributes, Update, UpdateRequest};
///
/// let client = AscClient::from_env()?;
/// let body = UpdateRequest::<BetaLicenseAgreement>::new("123").attributes(
///     BetaLicenseAgreementUpdateAttributes {
///         agreement_text: Some("New terms".to_string()),
///     },
/// );
/// let updated = BetaLicenseAgreement::update(&client, "123", &body).await?;
/// ```
#[async_trait]
pub trait Update: Updatable {
    /// Update the resource and return the updated version.
    ///
    /// # Arguments
    ///
    /// * `client` - The App Store Connect API client
    /// * `id` - The resource identifier
    /// * `body` - Update request; its `id` must echo `id`
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded, the resource is not
    /// found, or the request fails.
    #[tracing::instrument(skip(client, body))]
    async fn update(
        client: &AscClient,
        id: &str,
        body: &UpdateRequest<Self>,
    ) -> Result<ApiResponse<SingleDocument<Self>>> {
        let payload = encode_single(body)?;
        let response = client.patch(&instance_path::<Self>(id), payload).await?;
        ApiResponse::read_with(response, decode_single::<Self>).await
    }
}
