//! Create trait for adding resources.

use async_trait::async_trait;

use crate::client::AscClient;
use crate::envelope::{decode_single, encode_single, Creatable, CreateRequest, SingleDocument};
use crate::error::Result;
use crate::response::ApiResponse;
use crate::traits::collection_path;

/// Create a resource with `POST {type}`.
///
/// # Example
///
/// ```ignore
/// use ascapi::{AscClient, AppStoreVersionSubmission, Create};
///
/// let client = AscClient::from_env()?;
/// let request = AppStoreVersionSubmission::request_for_version("version-id");
/// let created = AppStoreVersionSubmission::create(&client, &request).await?;
/// ```
#[async_trait]
pub trait Create: Creatable {
    /// Create the resource and return it as stored by the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded, the request fails, or
    /// the response does not decode as a resource of this kind.
    #[tracing::instrument(skip(client, body))]
    async fn create(
        client: &AscClient,
        body: &CreateRequest<Self>,
    ) -> Result<ApiResponse<SingleDocument<Self>>> {
        let payload = encode_single(body)?;
        let response = client.post(&collection_path::<Self>(), payload).await?;
        ApiResponse::read_with(response, decode_single::<Self>).await
    }
}
