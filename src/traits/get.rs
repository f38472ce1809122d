//! Get trait for fetching single resources.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::AscClient;
use crate::envelope::{build_query, decode_single, ResourceKind, SingleDocument};
use crate::error::Result;
use crate::response::ApiResponse;
use crate::traits::instance_path;

/// Fetch a single resource by ID.
///
/// Implement this trait for resource kinds that can be read individually at
/// `GET {type}/{id}`.
///
/// # Example
///
/// ```ignore
/// use ascapi::{AscClient, BetaLicenseAgreement, Get};
///
/// let client = AscClient::from_env()?;
/// let response = BetaLicenseAgreement::get(&client, "123", &Default::default()).await?;
/// println!("{:?}", response.body.data.agreement_text());
/// ```
#[async_trait]
pub trait Get: ResourceKind {
    /// Field selection and include options accepted by the endpoint.
    type Query: Serialize + Default + Send + Sync;

    /// Fetch the resource by ID.
    ///
    /// # Arguments
    ///
    /// * `client` - The App Store Connect API client
    /// * `id` - The resource identifier
    /// * `query` - Field selection and include options
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not decode
    /// as a resource of this kind.
    #[tracing::instrument(skip(client, query))]
    async fn get(
        client: &AscClient,
        id: &str,
        query: &Self::Query,
    ) -> Result<ApiResponse<SingleDocument<Self>>> {
        get_related::<Self, _>(client, &instance_path::<Self>(id), query).await
    }
}

/// Fetch a single resource of kind `K` from an arbitrary path.
///
/// Used for relationship endpoints such as `betaLicenseAgreements/{id}/app`
/// whose response kind differs from the kind in the path.
pub async fn get_related<K, Q>(
    client: &AscClient,
    path: &str,
    query: &Q,
) -> Result<ApiResponse<SingleDocument<K>>>
where
    K: ResourceKind,
    Q: Serialize + ?Sized,
{
    let params = build_query(query)?;
    let response = client.get_with_query(path, &params).await?;
    ApiResponse::read_with(response, decode_single::<K>).await
}
