//! Minimal in-memory EDM metadata model.
//!
//! The writer validates payloads against an optional metadata model. This module
//! provides the model surface the validator consumes: named types with a kind, an
//! open-type flag, a media-link-entry flag, declared structural properties and
//! declared navigation properties, plus entity-set and singleton lookups.
//!
//! The built-in `Edm.*` primitive types are registered on every model, and
//! `Collection(T)` type names are understood structurally (see
//! [`crate::edm::collection_item_type`]).
//!
//! # Usage Examples
//!
//! ```rust
//! use jsonlight::edm::{EdmModel, EdmType};
//!
//! let model = EdmModel::new()
//!     .with_type(
//!         EdmType::entity("Model.Order")
//!             .with_property("Id", "Edm.Int32")
//!             .with_navigation("Customer", "Model.Customer", false),
//!     )
//!     .with_entity_set("Orders", "Model.Order");
//! assert!(model.find_type("Model.Order").is_some());
//! assert!(model.find_type("Edm.String").is_some());
//! ```

use std::collections::HashMap;

use strum::Display;

/// The kind of an EDM type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EdmTypeKind {
    /// An entity type.
    Entity,
    /// A complex (structured, non-entity) type.
    Complex,
    /// A primitive type.
    Primitive,
    /// A binary stream type (`Edm.Stream`).
    Stream,
    /// A collection type (`Collection(T)`).
    Collection,
}

/// A declared structural property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdmProperty {
    /// Property name.
    pub name: String,
    /// Declared type name.
    pub type_name: String,
}

impl EdmProperty {
    /// Returns `true` when the property is declared as a stream property.
    #[must_use]
    pub fn is_stream(&self) -> bool {
        self.type_name == "Edm.Stream"
    }
}

/// A declared navigation property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdmNavigationProperty {
    /// Property name.
    pub name: String,
    /// Entity type on the far side of the navigation.
    pub target_type: String,
    /// `true` for collection-valued navigations.
    pub is_collection: bool,
}

/// A named type declared in the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdmType {
    /// Fully qualified type name.
    pub name: String,
    /// The type's kind.
    pub kind: EdmTypeKind,
    /// `true` when the type admits undeclared structural properties.
    pub is_open: bool,
    /// `true` when instances are media link entries (carry a default stream).
    pub has_stream: bool,
    /// Declared structural properties.
    pub properties: Vec<EdmProperty>,
    /// Declared navigation properties.
    pub navigation_properties: Vec<EdmNavigationProperty>,
}

impl EdmType {
    fn named(name: impl Into<String>, kind: EdmTypeKind) -> Self {
        EdmType {
            name: name.into(),
            kind,
            is_open: false,
            has_stream: false,
            properties: Vec::new(),
            navigation_properties: Vec::new(),
        }
    }

    /// Declares a new entity type.
    pub fn entity(name: impl Into<String>) -> Self {
        EdmType::named(name, EdmTypeKind::Entity)
    }

    /// Declares a new complex type.
    pub fn complex(name: impl Into<String>) -> Self {
        EdmType::named(name, EdmTypeKind::Complex)
    }

    /// Marks the type as open.
    #[must_use]
    pub fn open(mut self) -> Self {
        self.is_open = true;
        self
    }

    /// Marks the type as a media link entry.
    #[must_use]
    pub fn media_link_entry(mut self) -> Self {
        self.has_stream = true;
        self
    }

    /// Declares a structural property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.properties.push(EdmProperty {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    /// Declares a navigation property.
    #[must_use]
    pub fn with_navigation(
        mut self,
        name: impl Into<String>,
        target_type: impl Into<String>,
        is_collection: bool,
    ) -> Self {
        self.navigation_properties.push(EdmNavigationProperty {
            name: name.into(),
            target_type: target_type.into(),
            is_collection,
        });
        self
    }

    /// Looks up a declared structural property by name.
    #[must_use]
    pub fn find_property(&self, name: &str) -> Option<&EdmProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Looks up a declared navigation property by name.
    #[must_use]
    pub fn find_navigation(&self, name: &str) -> Option<&EdmNavigationProperty> {
        self.navigation_properties.iter().find(|p| p.name == name)
    }
}

/// An entity set or singleton declared in the model's container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdmEntitySet {
    /// Entity set name.
    pub name: String,
    /// Element entity type name.
    pub element_type: String,
}

/// An in-memory EDM model: named types plus container elements.
///
/// Every model carries the built-in `Edm.*` primitives.
#[derive(Debug, Clone, Default)]
pub struct EdmModel {
    types: HashMap<String, EdmType>,
    entity_sets: HashMap<String, EdmEntitySet>,
    singletons: HashMap<String, EdmEntitySet>,
}

const PRIMITIVE_TYPES: &[&str] = &[
    "Edm.Binary",
    "Edm.Boolean",
    "Edm.Byte",
    "Edm.DateTimeOffset",
    "Edm.Decimal",
    "Edm.Double",
    "Edm.Guid",
    "Edm.Int16",
    "Edm.Int32",
    "Edm.Int64",
    "Edm.SByte",
    "Edm.Single",
    "Edm.String",
    "Edm.TimeOfDay",
];

impl EdmModel {
    /// Creates a model containing only the built-in primitive types.
    #[must_use]
    pub fn new() -> Self {
        let mut types = HashMap::new();
        for name in PRIMITIVE_TYPES {
            types.insert(
                (*name).to_string(),
                EdmType::named(*name, EdmTypeKind::Primitive),
            );
        }
        types.insert(
            "Edm.Stream".to_string(),
            EdmType::named("Edm.Stream", EdmTypeKind::Stream),
        );
        EdmModel {
            types,
            entity_sets: HashMap::new(),
            singletons: HashMap::new(),
        }
    }

    /// Declares a type in the model.
    #[must_use]
    pub fn with_type(mut self, edm_type: EdmType) -> Self {
        self.types.insert(edm_type.name.clone(), edm_type);
        self
    }

    /// Declares an entity set.
    #[must_use]
    pub fn with_entity_set(
        mut self,
        name: impl Into<String>,
        element_type: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.entity_sets.insert(
            name.clone(),
            EdmEntitySet {
                name,
                element_type: element_type.into(),
            },
        );
        self
    }

    /// Declares a singleton.
    #[must_use]
    pub fn with_singleton(
        mut self,
        name: impl Into<String>,
        element_type: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.singletons.insert(
            name.clone(),
            EdmEntitySet {
                name,
                element_type: element_type.into(),
            },
        );
        self
    }

    /// Looks up a declared (or built-in primitive) type by name.
    ///
    /// Collection type names are not looked up directly; use
    /// [`collection_item_type`] to peel them first.
    #[must_use]
    pub fn find_type(&self, name: &str) -> Option<&EdmType> {
        self.types.get(name)
    }

    /// Looks up an entity set by name.
    #[must_use]
    pub fn find_entity_set(&self, name: &str) -> Option<&EdmEntitySet> {
        self.entity_sets.get(name)
    }

    /// Looks up a singleton by name.
    #[must_use]
    pub fn find_singleton(&self, name: &str) -> Option<&EdmEntitySet> {
        self.singletons.get(name)
    }
}

/// Peels `Collection(T)` syntax, returning the item type name `T`.
///
/// Returns `None` for non-collection type names.
#[must_use]
pub fn collection_item_type(type_name: &str) -> Option<&str> {
    type_name
        .strip_prefix("Collection(")
        .and_then(|rest| rest.strip_suffix(')'))
}
