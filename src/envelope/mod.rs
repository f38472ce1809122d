//! JSON:API resource envelope shared by every App Store Connect endpoint.
//!
//! Every request and response body has the same outer shape:
//!
//! ```json
//! {
//!   "data": { "id": "...", "type": "...", "attributes": {}, "relationships": {} },
//!   "included": [],
//!   "meta": { "paging": { "total": 0, "limit": 0 } },
//!   "links": { "self": "..." }
//! }
//! ```
//!
//! This module types that shape once, generically over a [`ResourceKind`],
//! and provides the four codec operations endpoints are built from:
//! [`encode_single`], [`decode_single`], [`decode_list`] and [`build_query`].

mod document;
mod query;
mod resource;

use serde::Serialize;
use serde_json::Value;

pub use document::{
    CreateRequest, DocumentLinks, ListDocument, PagedDocumentLinks, Paging, PagingInformation,
    RequestDocument, SingleDocument, UpdateRequest,
};
pub use query::{build_query, cursor_from_link, to_query_string, QueryPairs};
pub use resource::{
    Creatable, IncludedResource, NoFields, PagedRelationship, Payload, Relationship,
    RelationshipData, RelationshipLinks, RelationshipRequest, Resource, ResourceKind,
    ResourceLinks, TypeTag, Updatable,
};

use crate::error::{AscError, Result};

/// Wrap `data` in a request document and serialize it.
///
/// Optional members that are unset are omitted, never written as `null`.
///
/// # Errors
///
/// Returns [`AscError::Encoding`] if `data` does not serialize to an object
/// with a non-empty `type`, or if it carries an `id` that is empty.
pub fn encode_single<D: Serialize>(data: &D) -> Result<Vec<u8>> {
    let value = serde_json::to_value(data).map_err(|e| AscError::Encoding(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| AscError::Encoding("resource must serialize to a JSON object".into()))?;

    match object.get("type").and_then(Value::as_str) {
        Some(tag) if !tag.is_empty() => {}
        _ => {
            return Err(AscError::Encoding(
                "resource `type` must be a non-empty string".into(),
            ))
        }
    }

    if let Some(id) = object.get("id") {
        match id.as_str() {
            Some(id) if !id.is_empty() => {}
            _ => {
                return Err(AscError::Encoding(
                    "resource `id` must be a non-empty string".into(),
                ))
            }
        }
    }

    serde_json::to_vec(&RequestDocument { data }).map_err(|e| AscError::Encoding(e.to_string()))
}

/// Decode a single-resource document of kind `K`.
///
/// # Errors
///
/// Returns [`AscError::Decoding`] if `data` is missing, lacks `id`/`type`, or
/// its `type` is not `K::TYPE`.
pub fn decode_single<K: ResourceKind>(bytes: &[u8]) -> Result<SingleDocument<K>> {
    serde_json::from_slice(bytes).map_err(|e| AscError::decoding(e, bytes))
}

/// Decode a list document of kind `K`, preserving server order.
///
/// # Errors
///
/// Returns [`AscError::Decoding`] if `data` is not an array of `K` resources.
pub fn decode_list<K: ResourceKind>(bytes: &[u8]) -> Result<ListDocument<K>> {
    serde_json::from_slice(bytes).map_err(|e| AscError::decoding(e, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, serde::Deserialize)]
    struct NoteAttributes {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    }

    impl ResourceKind for Note {
        const TYPE: &'static str = "notes";
        type Attributes = NoteAttributes;
        type Relationships = NoFields;
    }

    impl Updatable for Note {
        type UpdateAttributes = NoteAttributes;
        type UpdateRelationships = NoFields;
    }

    #[derive(Serialize)]
    struct Untyped {
        id: &'static str,
        #[serde(rename = "type")]
        kind: &'static str,
    }

    #[test]
    fn test_encode_rejects_empty_type() {
        let err = encode_single(&Untyped { id: "1", kind: "" }).unwrap_err();
        assert!(matches!(err, AscError::Encoding(_)));
    }

    #[test]
    fn test_encode_rejects_missing_type() {
        let err = encode_single(&serde_json::json!({"id": "1"})).unwrap_err();
        assert!(matches!(err, AscError::Encoding(_)));
    }

    #[test]
    fn test_encode_rejects_empty_update_id() {
        let err = encode_single(&UpdateRequest::<Note>::new("")).unwrap_err();
        assert!(err.to_string().contains("`id`"));
    }

    #[test]
    fn test_encode_rejects_non_objects() {
        assert!(encode_single(&"notes").is_err());
    }

    #[test]
    fn test_decode_single_reports_payload() {
        let body = br#"{"data": {"id": "1", "type": "widgets"}}"#;
        match decode_single::<Note>(body) {
            Err(AscError::Decoding {
                message, preview, ..
            }) => {
                assert!(message.contains("expected resource type `notes`"));
                assert!(preview.contains("widgets"));
            }
            other => panic!("Expected Decoding, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_single_requires_data() {
        assert!(decode_single::<Note>(br#"{"links": {"self": "x"}}"#).is_err());
    }

    #[test]
    fn test_decode_list_rejects_single_object() {
        let body = br#"{"data": {"id": "1", "type": "notes"}}"#;
        assert!(matches!(
            decode_list::<Note>(body),
            Err(AscError::Decoding { .. })
        ));
    }

    #[test]
    fn test_decode_list_rejects_mixed_kinds() {
        let body = br#"{"data": [{"id": "1", "type": "notes"}, {"id": "2", "type": "apps"}]}"#;
        assert!(decode_list::<Note>(body).is_err());
    }
}
