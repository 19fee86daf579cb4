//! # jsonlight Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! jsonlight library. Import this module to get quick access to the essential types for
//! writing JSON Light payloads.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all jsonlight operations
pub use crate::Error;

/// The result type used throughout jsonlight
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The payload writer state machine
pub use crate::writer::{Writer, WriterState};

/// Writer configuration
pub use crate::settings::{AnnotationFilter, WriterSettings};

// ================================================================================================
// Payload Object Model
// ================================================================================================

/// The payload items the writer accepts
pub use crate::model::{
    EntityReferenceLink, EntityReferenceLinks, InnerError, InstanceAnnotation, Item,
    NestedResourceInfo, ODataError, Resource, ResourceSet, SerializationInfo, ServiceDocument,
    ServiceDocumentElement,
};

/// Property values
pub use crate::model::{CollectionValue, ComplexValue, Property, StreamReference, Value};

// ================================================================================================
// Metadata Model
// ================================================================================================

/// The EDM metadata model used for validation
pub use crate::edm::{EdmEntitySet, EdmModel, EdmNavigationProperty, EdmProperty, EdmType, EdmTypeKind};

// ================================================================================================
// URIs
// ================================================================================================

/// URI newtype and resolution policy
pub use crate::uri::{Uri, UriEnforcement, UrlResolver};
