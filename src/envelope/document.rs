//! Top-level documents: the `data` / `included` / `meta` / `links` wrapper.

use serde::{Deserialize, Serialize};

use crate::envelope::query::cursor_from_link;
use crate::envelope::resource::{
    Creatable, IncludedResource, Resource, ResourceKind, TypeTag, Updatable,
};
use crate::error::{AscError, Result};

/// Links of a single-resource document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentLinks {
    #[serde(rename = "self", default)]
    pub self_link: String,
}

/// Links of a list document, with cursor navigation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagedDocumentLinks {
    #[serde(rename = "self", default)]
    pub self_link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

impl PagedDocumentLinks {
    /// The opaque `cursor` parameter of the `next` link.
    pub fn next_cursor(&self) -> Option<String> {
        self.next.as_deref().and_then(cursor_from_link)
    }

    /// Like [`next_cursor`](Self::next_cursor), but a `next` link without a
    /// readable `cursor` is an error rather than the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`AscError::Decoding`] carrying the link when `next` is not an
    /// absolute URL or has no `cursor` parameter.
    pub fn try_next_cursor(&self) -> Result<Option<String>> {
        let Some(link) = self.next.as_deref() else {
            return Ok(None);
        };
        match cursor_from_link(link) {
            Some(cursor) => Ok(Some(cursor)),
            None => Err(AscError::Decoding {
                message: "next link has no readable cursor".into(),
                status_code: None,
                preview: link.to_string(),
            }),
        }
    }
}

/// Paging counters of a list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    /// Total number of resources across all pages.
    #[serde(default)]
    pub total: u32,
    /// Page size the server applied.
    #[serde(default)]
    pub limit: u32,
}

/// The `meta` member of a list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInformation {
    pub paging: Paging,
}

/// A response holding one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct SingleDocument<K: ResourceKind> {
    pub data: Resource<K>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<IncludedResource>>,

    #[serde(default)]
    pub links: DocumentLinks,
}

impl<K: ResourceKind> SingleDocument<K> {
    /// Sideloaded resources of kind `R`, in server order.
    ///
    /// # Errors
    ///
    /// Fails if an entry tagged `R::TYPE` does not decode as `R`.
    pub fn included_of<R: ResourceKind>(&self) -> Result<Vec<Resource<R>>> {
        typed_included(self.included.as_deref())
    }
}

/// A response holding an ordered list of resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct ListDocument<K: ResourceKind> {
    pub data: Vec<Resource<K>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<IncludedResource>>,

    #[serde(default)]
    pub links: PagedDocumentLinks,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PagingInformation>,
}

impl<K: ResourceKind> ListDocument<K> {
    /// Paging counters, if the server sent a `meta` block.
    pub fn paging(&self) -> Option<Paging> {
        self.meta.map(|m| m.paging)
    }

    /// Whether a `next` link points at another page.
    pub fn has_more(&self) -> bool {
        self.links.next.is_some()
    }

    /// Sideloaded resources of kind `R`, in server order.
    ///
    /// # Errors
    ///
    /// Fails if an entry tagged `R::TYPE` does not decode as `R`.
    pub fn included_of<R: ResourceKind>(&self) -> Result<Vec<Resource<R>>> {
        typed_included(self.included.as_deref())
    }
}

fn typed_included<R: ResourceKind>(
    included: Option<&[IncludedResource]>,
) -> Result<Vec<Resource<R>>> {
    included
        .unwrap_or_default()
        .iter()
        .filter(|r| r.is::<R>())
        .map(IncludedResource::parse::<R>)
        .collect()
}

/// A request body: `{"data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDocument<D> {
    pub data: D,
}

/// Body of a create (POST) request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct CreateRequest<K: Creatable> {
    #[serde(rename = "type")]
    pub kind: TypeTag<K>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<K::CreateAttributes>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<K::CreateRelationships>,
}

impl<K: Creatable> CreateRequest<K> {
    pub fn new() -> Self {
        Self {
            kind: TypeTag::new(),
            attributes: None,
            relationships: None,
        }
    }

    #[must_use]
    pub fn attributes(mut self, attributes: K::CreateAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    #[must_use]
    pub fn relationships(mut self, relationships: K::CreateRelationships) -> Self {
        self.relationships = Some(relationships);
        self
    }
}

impl<K: Creatable> Default for CreateRequest<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of a modify (PATCH) request. The `id` echoes the target resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct UpdateRequest<K: Updatable> {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: TypeTag<K>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<K::UpdateAttributes>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<K::UpdateRelationships>,
}

impl<K: Updatable> UpdateRequest<K> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: TypeTag::new(),
            attributes: None,
            relationships: None,
        }
    }

    #[must_use]
    pub fn attributes(mut self, attributes: K::UpdateAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    #[must_use]
    pub fn relationships(mut self, relationships: K::UpdateRelationships) -> Self {
        self.relationships = Some(relationships);
        self
    }
}
