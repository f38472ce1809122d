//! Resource objects and the kind descriptors that type them.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeOwned, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::envelope::document::PagingInformation;
use crate::error::{AscError, Result};

/// Bounds shared by every attribute and relationship record.
pub trait Payload:
    Serialize + DeserializeOwned + fmt::Debug + Clone + PartialEq + Send + Sync + 'static
{
}

impl<T> Payload for T where
    T: Serialize + DeserializeOwned + fmt::Debug + Clone + PartialEq + Send + Sync + 'static
{
}

/// Describes one App Store Connect resource kind.
///
/// Implemented by a zero-sized marker type per kind. The marker fixes the
/// wire `type` tag and the shape of the `attributes` and `relationships`
/// records, so `Resource<BetaLicenseAgreement>` can only ever hold a
/// `betaLicenseAgreements` resource.
pub trait ResourceKind: fmt::Debug + Clone + PartialEq + Send + Sync + 'static {
    /// The vendor-defined `type` tag, e.g. `"betaLicenseAgreements"`.
    const TYPE: &'static str;

    /// Scalar fields under `attributes`.
    type Attributes: Payload;

    /// Named links to other resources under `relationships`.
    type Relationships: Payload;
}

/// Writable subset accepted when creating a resource.
pub trait Creatable: ResourceKind {
    type CreateAttributes: Payload;
    type CreateRelationships: Payload;
}

/// Writable subset accepted when modifying a resource.
pub trait Updatable: ResourceKind {
    type UpdateAttributes: Payload;
    type UpdateRelationships: Payload;
}

/// Record for kinds that have no attributes or relationships at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoFields {}

/// The `type` member of a resource, pinned to `K::TYPE`.
///
/// Serializes as the tag string. Deserializing any other string fails, which
/// is how a `betaLicenseAgreements` body is kept from decoding as an
/// `appPreviews` resource.
pub struct TypeTag<K>(PhantomData<fn() -> K>);

impl<K: ResourceKind> TypeTag<K> {
    pub fn new() -> Self {
        TypeTag(PhantomData)
    }

    pub fn as_str(&self) -> &'static str {
        K::TYPE
    }
}

impl<K: ResourceKind> Default for TypeTag<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for TypeTag<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for TypeTag<K> {}

impl<K> PartialEq for TypeTag<K> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<K> Eq for TypeTag<K> {}

impl<K: ResourceKind> fmt::Debug for TypeTag<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({:?})", K::TYPE)
    }
}

impl<K: ResourceKind> fmt::Display for TypeTag<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(K::TYPE)
    }
}

impl<K: ResourceKind> Serialize for TypeTag<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(K::TYPE)
    }
}

impl<'de, K: ResourceKind> Deserialize<'de> for TypeTag<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        struct TagVisitor<K>(PhantomData<fn() -> K>);

        impl<'de, K: ResourceKind> Visitor<'de> for TagVisitor<K> {
            type Value = TypeTag<K>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "the resource type tag `{}`", K::TYPE)
            }

            fn visit_str<E: de::Error>(self, value: &str) -> core::result::Result<Self::Value, E> {
                if value == K::TYPE {
                    Ok(TypeTag::new())
                } else {
                    Err(E::custom(format!(
                        "expected resource type `{}`, found `{}`",
                        K::TYPE,
                        value
                    )))
                }
            }
        }

        deserializer.deserialize_str(TagVisitor(PhantomData))
    }
}

/// A single resource object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "", deserialize = ""))]
pub struct Resource<K: ResourceKind> {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: TypeTag<K>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<K::Attributes>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<K::Relationships>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ResourceLinks>,
}

impl<K: ResourceKind> Resource<K> {
    /// Create a bare resource with only the required members set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: TypeTag::new(),
            attributes: None,
            relationships: None,
            links: None,
        }
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: K::Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    #[must_use]
    pub fn with_relationships(mut self, relationships: K::Relationships) -> Self {
        self.relationships = Some(relationships);
        self
    }

    #[must_use]
    pub fn with_self_link(mut self, url: impl Into<String>) -> Self {
        self.links = Some(ResourceLinks {
            self_link: url.into(),
        });
        self
    }

    /// The wire `type` tag.
    pub fn type_tag(&self) -> &'static str {
        K::TYPE
    }

    /// The `links.self` URL, if the server sent one.
    pub fn self_link(&self) -> Option<&str> {
        self.links.as_ref().map(|l| l.self_link.as_str())
    }

    /// Linkage to this resource, for use in another resource's relationships.
    pub fn linkage(&self) -> RelationshipData {
        RelationshipData::of::<K>(&self.id)
    }
}

/// Links attached to a resource instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceLinks {
    #[serde(rename = "self")]
    pub self_link: String,
}

/// Type and id of a related resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationshipData {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl RelationshipData {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Linkage to a resource of kind `K`.
    pub fn of<K: ResourceKind>(id: impl Into<String>) -> Self {
        Self::new(K::TYPE, id)
    }

    pub fn is<K: ResourceKind>(&self) -> bool {
        self.kind == K::TYPE
    }
}

/// Navigation links of a relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

/// A to-one relationship as it appears in responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RelationshipData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<RelationshipLinks>,
}

impl Relationship {
    /// Id of the related resource, when linkage data was included.
    pub fn id(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.id.as_str())
    }
}

/// A to-many relationship as it appears in responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagedRelationship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<RelationshipData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<RelationshipLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PagingInformation>,
}

/// A to-one relationship in a request body, where linkage is mandatory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRequest {
    pub data: RelationshipData,
}

impl RelationshipRequest {
    pub fn to<K: ResourceKind>(id: impl Into<String>) -> Self {
        Self {
            data: RelationshipData::of::<K>(id),
        }
    }
}

/// A sideloaded resource from the `included` array.
///
/// The array is heterogeneous, so entries are kept untyped until the caller
/// asks for a specific kind with [`IncludedResource::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncludedResource {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<ResourceLinks>,
}

impl IncludedResource {
    /// Returns true if this entry is a resource of kind `K`.
    pub fn is<K: ResourceKind>(&self) -> bool {
        self.kind == K::TYPE
    }

    /// Decode this entry as a typed resource.
    ///
    /// # Errors
    ///
    /// Returns [`AscError::Decoding`] if the tag is not `K::TYPE` or the
    /// attributes do not fit `K::Attributes`.
    pub fn parse<K: ResourceKind>(&self) -> Result<Resource<K>> {
        let value = serde_json::to_value(self).map_err(|e| AscError::Encoding(e.to_string()))?;
        serde_json::from_value(value.clone())
            .map_err(|e| AscError::decoding(e, value.to_string().as_bytes()))
    }
}

fn payload_value<T: Serialize>(payload: &T) -> Result<serde_json::Value> {
    serde_json::to_value(payload).map_err(|e| AscError::Encoding(e.to_string()))
}

impl<K: ResourceKind> TryFrom<Resource<K>> for IncludedResource {
    type Error = AscError;

    fn try_from(resource: Resource<K>) -> Result<Self> {
        Ok(IncludedResource {
            id: resource.id,
            kind: K::TYPE.to_string(),
            attributes: resource.attributes.as_ref().map(payload_value).transpose()?,
            relationships: resource
                .relationships
                .as_ref()
                .map(payload_value)
                .transpose()?,
            links: resource.links,
        })
    }
}
