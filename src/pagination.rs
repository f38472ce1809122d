//! Pagination utilities for App Store Connect list responses.

use serde::Serialize;

use crate::envelope::{ListDocument, Resource, ResourceKind};

/// A page of results, flattened out of a list document.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages (if known).
    pub total: Option<u32>,
    /// Page size the server applied (if known).
    pub limit: Option<u32>,
    /// Cursor selecting the next page.
    pub next_cursor: Option<String>,
    /// Whether there are more pages.
    pub has_more: bool,
}

impl<K: ResourceKind> From<ListDocument<K>> for Page<Resource<K>> {
    fn from(document: ListDocument<K>) -> Self {
        let paging = document.paging();
        let next_cursor = document.links.next_cursor();
        Self {
            has_more: document.has_more(),
            items: document.data,
            total: paging.map(|p| p.total),
            limit: paging.map(|p| p.limit),
            next_cursor,
        }
    }
}

impl<T> Page<T> {
    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
