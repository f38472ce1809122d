//! List trait for fetching collections of resources.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::AscClient;
use crate::envelope::{build_query, decode_list, ListDocument, Resource, ResourceKind};
use crate::error::Result;
use crate::response::ApiResponse;
use crate::traits::collection_path;

/// Largest page size App Store Connect accepts for most collections.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List resources with cursor pagination.
///
/// Each page's `links.next` URL carries an opaque `cursor` parameter that
/// selects the following page.
///
/// # Example
///
/// ```ignore
/// use ascapi::{AscClient, BetaLicenseAgreement, List};
///
/// let client = AscClient::from_env()?;
///
/// // Fetch a single page
/// let page = BetaLicenseAgreement::list_page(&client, &Default::default(), None).await?;
///
/// // Fetch all pages
/// let all = BetaLicenseAgreement::list_all(&client, &Default::default()).await?;
/// ```
#[async_trait]
pub trait List: ResourceKind {
    /// Filter, field selection, include and `limit` options.
    type Query: Serialize + Default + Send + Sync;

    /// List resources matching the query (single page).
    ///
    /// # Arguments
    ///
    /// * `client` - The App Store Connect API client
    /// * `query` - Query options
    /// * `cursor` - Cursor from a previous page's `next` link, `None` for the first page
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(client, query))]
    async fn list_page(
        client: &AscClient,
        query: &Self::Query,
        cursor: Option<&str>,
    ) -> Result<ApiResponse<ListDocument<Self>>> {
        #[derive(Serialize)]
        struct RequestParams<'a, Q> {
            #[serde(flatten)]
            query: &'a Q,
            #[serde(skip_serializing_if = "Option::is_none")]
            cursor: Option<&'a str>,
        }

        let params = build_query(&RequestParams { query, cursor })?;
        let response = client
            .get_with_query(&collection_path::<Self>(), &params)
            .await?;
        ApiResponse::read_with(response, decode_list::<Self>).await
    }

    /// List all resources matching the query (fetches all pages).
    ///
    /// This method follows `links.next` until the server stops sending one.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails, or if a `next` link
    /// carries no cursor to follow.
    async fn list_all(client: &AscClient, query: &Self::Query) -> Result<Vec<Resource<Self>>> {
        let mut all_items = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0;

        loop {
            let response = Self::list_page(client, query, cursor.as_deref()).await?;
            let status = response.status.as_u16();
            let document = response.into_body();
            pages += 1;

            let next = document
                .links
                .try_next_cursor()
                .map_err(|e| e.with_status(status))?;
            tracing::debug!(
                kind = Self::TYPE,
                page = pages,
                items = document.data.len(),
                more = next.is_some(),
                "fetched page"
            );
            all_items.extend(document.data);

            match next {
                Some(next) => cursor = Some(next),
                None => break,
            }

            // Safety limit to prevent infinite loops
            if pages >= MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }
}
