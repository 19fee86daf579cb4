//! Payload object model for the writer.
//!
//! This module contains the object-model types a caller constructs and pushes into the
//! writer: resources (entries), resource sets (feeds), nested resource infos
//! (navigation/association links), entity reference links, error payloads, and service
//! documents. Items are plain data; all validation happens inside the writer pipeline
//! when an item is written.
//!
//! # Key Components
//!
//! - [`crate::model::Item`] - tagged union over every writable payload kind
//! - [`crate::model::Resource`] - a single entity instance
//! - [`crate::model::ResourceSet`] - an ordered collection of resources
//! - [`crate::model::NestedResourceInfo`] - a navigation or association link
//! - [`crate::model::EntityReferenceLink`] - a bare `$ref`-style URI reference
//! - [`crate::model::ODataError`] - a top-level error payload
//! - [`crate::model::ServiceDocument`] - the service's entity-set/singleton listing
//!
//! # Usage Examples
//!
//! ```rust
//! use jsonlight::model::{Resource, Value};
//!
//! let order = Resource::new()
//!     .with_type_name("Model.Order")
//!     .with_property("Id", Value::Integer(1))
//!     .with_property("Note", Value::String("rush".into()));
//! assert_eq!(order.properties.len(), 2);
//! ```

mod value;

pub use value::{CollectionValue, ComplexValue, Property, StreamReference, Value};

use crate::uri::Uri;

/// A named instance annotation attached to a payload item.
///
/// Whether an annotation is actually written is decided by the configured
/// [`crate::AnnotationFilter`].
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceAnnotation {
    /// Fully qualified annotation name, e.g. `custom.starRating`.
    pub name: String,
    /// The annotation value.
    pub value: Value,
}

impl InstanceAnnotation {
    /// Creates an annotation from a name and value.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        InstanceAnnotation {
            name: name.into(),
            value,
        }
    }
}

/// Serialization hint used to compute context URLs when no model is supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializationInfo {
    /// Name of the navigation source (entity set) the payload belongs to.
    pub navigation_source_name: String,
    /// Entity type of the navigation source, when known.
    pub navigation_source_entity_type: Option<String>,
}

impl SerializationInfo {
    /// Creates a serialization hint for the named navigation source.
    pub fn new(navigation_source_name: impl Into<String>) -> Self {
        SerializationInfo {
            navigation_source_name: navigation_source_name.into(),
            navigation_source_entity_type: None,
        }
    }

    /// Sets the entity type of the navigation source.
    #[must_use]
    pub fn with_entity_type(mut self, type_name: impl Into<String>) -> Self {
        self.navigation_source_entity_type = Some(type_name.into());
        self
    }
}

/// A single entity instance (formerly "entry").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    /// Type name; optional unless the payload is model-bound, in which case required.
    pub type_name: Option<String>,
    /// Entity id.
    pub id: Option<Uri>,
    /// Entity ETag.
    pub etag: Option<String>,
    /// Read link.
    pub read_link: Option<Uri>,
    /// Edit link.
    pub edit_link: Option<Uri>,
    /// Default stream for media link entries.
    pub media_resource: Option<StreamReference>,
    /// Structural properties in write order.
    pub properties: Vec<Property>,
    /// Instance annotations on the resource.
    pub instance_annotations: Vec<InstanceAnnotation>,
    /// Context-URL hint used when no model is supplied.
    pub serialization_info: Option<SerializationInfo>,
}

impl Resource {
    /// Creates an empty resource.
    #[must_use]
    pub fn new() -> Self {
        Resource::default()
    }

    /// Sets the type name.
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Sets the entity id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<Uri>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the ETag.
    #[must_use]
    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    /// Sets the read link.
    #[must_use]
    pub fn with_read_link(mut self, link: impl Into<Uri>) -> Self {
        self.read_link = Some(link.into());
        self
    }

    /// Sets the edit link.
    #[must_use]
    pub fn with_edit_link(mut self, link: impl Into<Uri>) -> Self {
        self.edit_link = Some(link.into());
        self
    }

    /// Sets the default stream (media resource).
    #[must_use]
    pub fn with_media_resource(mut self, media: StreamReference) -> Self {
        self.media_resource = Some(media);
        self
    }

    /// Appends a structural property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.push(Property::new(name, value));
        self
    }

    /// Appends an instance annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: InstanceAnnotation) -> Self {
        self.instance_annotations.push(annotation);
        self
    }

    /// Sets the serialization hint for model-free context URLs.
    #[must_use]
    pub fn with_serialization_info(mut self, info: SerializationInfo) -> Self {
        self.serialization_info = Some(info);
        self
    }
}

/// An ordered collection of resources (formerly "feed").
///
/// `count` and `next_page_link` are response-only; both are rejected in request
/// payloads. A next page link that only becomes known while the contained resources
/// are being written can be supplied late via
/// [`crate::writer::Writer::set_next_page_link`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceSet {
    /// Resource set id.
    pub id: Option<Uri>,
    /// Type name of the set, e.g. `Collection(Model.Order)`.
    pub type_name: Option<String>,
    /// Inline count (response-only).
    pub count: Option<i64>,
    /// Next page link (response-only).
    pub next_page_link: Option<Uri>,
    /// Instance annotations on the set.
    pub instance_annotations: Vec<InstanceAnnotation>,
    /// Context-URL hint used when no model is supplied.
    pub serialization_info: Option<SerializationInfo>,
}

impl ResourceSet {
    /// Creates an empty resource set.
    #[must_use]
    pub fn new() -> Self {
        ResourceSet::default()
    }

    /// Sets the set id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<Uri>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the inline count.
    #[must_use]
    pub fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the next page link.
    #[must_use]
    pub fn with_next_page_link(mut self, link: impl Into<Uri>) -> Self {
        self.next_page_link = Some(link.into());
        self
    }

    /// Appends an instance annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: InstanceAnnotation) -> Self {
        self.instance_annotations.push(annotation);
        self
    }

    /// Sets the serialization hint for model-free context URLs.
    #[must_use]
    pub fn with_serialization_info(mut self, info: SerializationInfo) -> Self {
        self.serialization_info = Some(info);
        self
    }
}

/// A navigation or association link from a resource to related resources.
///
/// The cardinality (`is_collection`) governs what content the link may contain: a
/// singleton link holds at most one resource or one entity reference link; a
/// collection link holds a resource set and/or entity reference links. Unset
/// cardinality is only permitted when a model can infer it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedResourceInfo {
    /// Link name; must be non-empty.
    pub name: String,
    /// `Some(true)` for collection-valued, `Some(false)` for singleton, `None` unset.
    pub is_collection: Option<bool>,
    /// Navigation link URL. Required by URI-bearing formats, optional in JSON.
    pub url: Option<Uri>,
    /// Association link URL.
    pub association_link_url: Option<Uri>,
}

impl NestedResourceInfo {
    /// Creates a nested resource info with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        NestedResourceInfo {
            name: name.into(),
            is_collection: None,
            url: None,
            association_link_url: None,
        }
    }

    /// Sets the cardinality.
    #[must_use]
    pub fn collection(mut self, is_collection: bool) -> Self {
        self.is_collection = Some(is_collection);
        self
    }

    /// Sets the navigation link URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<Uri>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the association link URL.
    #[must_use]
    pub fn with_association_link_url(mut self, url: impl Into<Uri>) -> Self {
        self.association_link_url = Some(url.into());
        self
    }
}

/// A bare URI reference to a related resource, used for `$ref`-style binding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityReferenceLink {
    /// The referenced URL. Writing a link without a URL is an argument error.
    pub url: Option<Uri>,
    /// Instance annotations on the link.
    pub instance_annotations: Vec<InstanceAnnotation>,
}

impl EntityReferenceLink {
    /// Creates an entity reference link to the given URL.
    pub fn new(url: impl Into<Uri>) -> Self {
        EntityReferenceLink {
            url: Some(url.into()),
            instance_annotations: Vec::new(),
        }
    }

    /// Appends an instance annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: InstanceAnnotation) -> Self {
        self.instance_annotations.push(annotation);
        self
    }
}

/// An ordered collection of entity reference links with optional paging data.
///
/// Top-level writes of this payload kind are response-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityReferenceLinks {
    /// Inline count.
    pub count: Option<i64>,
    /// Next page link.
    pub next_page_link: Option<Uri>,
    /// The links, in write order.
    pub links: Vec<EntityReferenceLink>,
}

impl EntityReferenceLinks {
    /// Creates a collection from a list of links.
    #[must_use]
    pub fn new(links: Vec<EntityReferenceLink>) -> Self {
        EntityReferenceLinks {
            count: None,
            next_page_link: None,
            links,
        }
    }

    /// Sets the inline count.
    #[must_use]
    pub fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the next page link.
    #[must_use]
    pub fn with_next_page_link(mut self, link: impl Into<Uri>) -> Self {
        self.next_page_link = Some(link.into());
        self
    }
}

/// A top-level error payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ODataError {
    /// Service-defined error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Optional nested inner error chain.
    pub inner_error: Option<InnerError>,
    /// Instance annotations on the error.
    pub instance_annotations: Vec<InstanceAnnotation>,
}

impl ODataError {
    /// Creates an error payload from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        ODataError {
            code: code.into(),
            message: message.into(),
            inner_error: None,
            instance_annotations: Vec::new(),
        }
    }

    /// Sets the inner error.
    #[must_use]
    pub fn with_inner_error(mut self, inner: InnerError) -> Self {
        self.inner_error = Some(inner);
        self
    }
}

/// Debugging detail nested inside an error payload.
///
/// Inner errors chain via `inner_error`; the chain depth is bounded by
/// [`crate::WriterSettings::max_inner_error_depth`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InnerError {
    /// Debugging message.
    pub message: Option<String>,
    /// Exception/error type name.
    pub type_name: Option<String>,
    /// Stack trace text.
    pub stack_trace: Option<String>,
    /// The next inner error in the chain.
    pub inner_error: Option<Box<InnerError>>,
}

impl InnerError {
    /// Creates an inner error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        InnerError {
            message: Some(message.into()),
            ..InnerError::default()
        }
    }

    /// Sets the type name.
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Sets the stack trace.
    #[must_use]
    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    /// Sets the next inner error in the chain.
    #[must_use]
    pub fn with_inner_error(mut self, inner: InnerError) -> Self {
        self.inner_error = Some(Box::new(inner));
        self
    }

    /// Returns the length of the chain rooted at this inner error.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.inner_error.as_deref().map_or(0, InnerError::depth)
    }
}

/// One entity-set or singleton descriptor in a service document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDocumentElement {
    /// Element name; must be set when writing JSON.
    pub name: Option<String>,
    /// Element URL.
    pub url: Option<Uri>,
    /// Human-readable title.
    pub title: Option<String>,
}

impl ServiceDocumentElement {
    /// Creates a descriptor from a name and URL.
    pub fn new(name: impl Into<String>, url: impl Into<Uri>) -> Self {
        ServiceDocumentElement {
            name: Some(name.into()),
            url: Some(url.into()),
            title: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// The service document: entity sets and singletons exposed by a service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDocument {
    /// Entity-set descriptors, in write order.
    pub entity_sets: Vec<ServiceDocumentElement>,
    /// Singleton descriptors, in write order.
    pub singletons: Vec<ServiceDocumentElement>,
}

impl ServiceDocument {
    /// Creates an empty service document.
    #[must_use]
    pub fn new() -> Self {
        ServiceDocument::default()
    }

    /// Appends an entity-set descriptor.
    #[must_use]
    pub fn with_entity_set(mut self, element: ServiceDocumentElement) -> Self {
        self.entity_sets.push(element);
        self
    }

    /// Appends a singleton descriptor.
    #[must_use]
    pub fn with_singleton(mut self, element: ServiceDocumentElement) -> Self {
        self.singletons.push(element);
        self
    }
}

/// Tagged union over every payload kind the writer accepts.
///
/// Nestable kinds (`Resource`, `NullResource`, `ResourceSet`, `NestedResourceInfo`) flow
/// through `write_start`/`write_end`; the remaining kinds are single-shot top-level
/// payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// A single entity instance.
    Resource(Resource),
    /// A null entity, writable as nested-link content.
    NullResource,
    /// A resource set.
    ResourceSet(ResourceSet),
    /// A navigation/association link.
    NestedResourceInfo(NestedResourceInfo),
    /// A single entity reference link.
    EntityReferenceLink(EntityReferenceLink),
    /// A collection of entity reference links.
    EntityReferenceLinks(EntityReferenceLinks),
    /// A top-level error payload.
    Error(ODataError),
    /// A service document.
    ServiceDocument(ServiceDocument),
    /// A top-level property payload.
    Property(Property),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_error_depth() {
        let chain = InnerError::new("outer")
            .with_inner_error(InnerError::new("middle").with_inner_error(InnerError::new("leaf")));
        assert_eq!(chain.depth(), 3);
        assert_eq!(InnerError::new("only").depth(), 1);
    }

    #[test]
    fn test_resource_builder_preserves_property_order() {
        let resource = Resource::new()
            .with_property("Z", Value::Integer(1))
            .with_property("A", Value::Integer(2));
        let names: Vec<&str> = resource.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Z", "A"]);
    }
}
