//! Delete trait for removing resources.

use async_trait::async_trait;

use crate::client::AscClient;
use crate::envelope::ResourceKind;
use crate::error::Result;
use crate::response::ApiResponse;
use crate::traits::instance_path;

/// Delete a resource with `DELETE {type}/{id}`.
#[async_trait]
pub trait Delete: ResourceKind {
    /// Delete the resource. The server answers `204 No Content`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource is not found or the request fails.
    #[tracing::instrument(skip(client))]
    async fn delete(client: &AscClient, id: &str) -> Result<ApiResponse<()>> {
        let response = client.delete(&instance_path::<Self>(id), None).await?;
        ApiResponse::read_with(response, |_| Ok(())).await
    }
}
