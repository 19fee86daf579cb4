//! Property values: primitives, collections, complex values and stream references.

use crate::uri::Uri;

/// A structural property: a name and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Property value.
    pub value: Value,
}

impl Property {
    /// Creates a property from a name and value.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Property {
            name: name.into(),
            value,
        }
    }
}

/// A property value.
///
/// Primitive values map directly onto JSON scalars. Collections and complex values
/// carry an optional type name used both for validation against a model and for the
/// `@odata.type` property annotation. Stream values reference out-of-band binary
/// content via their links.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON `null`.
    Null,
    /// A boolean.
    Boolean(bool),
    /// A signed integer (Edm.Int32 / Edm.Int64 range).
    Integer(i64),
    /// A floating point number (Edm.Double).
    Double(f64),
    /// A string.
    String(String),
    /// A collection of values of a single item type.
    Collection(CollectionValue),
    /// A complex (structured, non-entity) value.
    Complex(ComplexValue),
    /// A named stream property value.
    Stream(StreamReference),
}

impl Value {
    /// The type name stated on the value, when it carries one.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Value::Collection(c) => c.type_name.as_deref(),
            Value::Complex(c) => c.type_name.as_deref(),
            _ => None,
        }
    }
}

/// A collection value: a stated item type plus the items.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionValue {
    /// Collection type name, e.g. `Collection(Edm.String)`.
    pub type_name: Option<String>,
    /// The items, in write order.
    pub items: Vec<Value>,
}

impl CollectionValue {
    /// Creates a collection from its items.
    #[must_use]
    pub fn new(items: Vec<Value>) -> Self {
        CollectionValue {
            type_name: None,
            items,
        }
    }

    /// Sets the collection type name.
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

/// A complex (structured, non-entity) value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexValue {
    /// Complex type name.
    pub type_name: Option<String>,
    /// Properties of the complex value, in write order.
    pub properties: Vec<Property>,
}

impl ComplexValue {
    /// Creates an empty complex value.
    #[must_use]
    pub fn new() -> Self {
        ComplexValue::default()
    }

    /// Sets the type name.
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Appends a property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.push(Property::new(name, value));
        self
    }
}

/// A reference to binary stream content: the default stream of a media link entry or
/// the value of a named stream property.
///
/// At least one of `read_link`/`edit_link` must be set; an `etag` requires an
/// `edit_link`; a `content_type`, when present, must be non-empty. The default stream
/// additionally requires `read_link` and `content_type` to be set together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamReference {
    /// Link the stream content can be read from.
    pub read_link: Option<Uri>,
    /// Link the stream content can be written to.
    pub edit_link: Option<Uri>,
    /// Media type of the stream content.
    pub content_type: Option<String>,
    /// ETag of the stream content.
    pub etag: Option<String>,
}

impl StreamReference {
    /// Creates an empty stream reference.
    #[must_use]
    pub fn new() -> Self {
        StreamReference::default()
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

    /// Sets the content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the ETag.
    #[must_use]
    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }
}
