use thiserror::Error;

use crate::writer::WriterState;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers every failure mode of the writer pipeline: URI resolution, metadata
/// validation, writer state transitions, request/response mode violations, recursion limits,
/// and caller argument errors. Each variant preserves the original message-template identity
/// so that callers can assert on structured errors rather than parsing message strings.
///
/// # Error Categories
///
/// ## URI Resolution Errors
/// - [`Error::RelativeUriWithoutBaseUri`] - Relative URI with no configured base URI
/// - [`Error::InvalidBaseUri`] - Configured base URI is not absolute
///
/// ## Metadata Validation Errors
/// - [`Error::UnrecognizedTypeName`] - Type name does not resolve in the model
/// - [`Error::TypeNameMustNotBeEmpty`] - Empty string supplied as a type name
/// - [`Error::MissingTypeNameWithMetadata`] - Model-bound payload without a type name
/// - [`Error::IncorrectTypeKind`] / [`Error::IncorrectTypeKindNoTypeName`] - Kind mismatches
/// - [`Error::PropertyDoesNotExistOnType`] - Undeclared property on a closed type
/// - [`Error::NavigationPropertyExpected`] / [`Error::OpenNavigationProperty`] - Bad link names
///
/// ## Writer State Errors
/// - [`Error::InvalidStateTransition`] - Illegal call in the current writer state
/// - [`Error::FromErrorState`] - Any call after the writer entered its terminal Error state
///
/// ## Mode Violations
/// - [`Error::QueryCountInRequest`], [`Error::NextPageLinkInRequest`],
///   [`Error::ServiceDocumentInRequest`], [`Error::ErrorInRequest`],
///   [`Error::EntityReferenceLinksInRequestNotAllowed`],
///   [`Error::EntityReferenceLinkInResponse`], [`Error::DeferredLinkInRequest`]
///
/// # Examples
///
/// ```rust
/// use jsonlight::{Error, model::Resource, writer::Writer, WriterSettings};
///
/// let mut out = Vec::new();
/// let mut writer = Writer::new(&mut out, WriterSettings::response())?;
/// let result = writer.write_start_resource(Resource::new().with_type_name(""));
/// assert!(matches!(result, Err(Error::TypeNameMustNotBeEmpty)));
/// # Ok::<(), jsonlight::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    // URI resolution errors
    /// A relative URI was written while no base URI was configured.
    ///
    /// Raised for any URI-valued field that is not absolute when the writer settings
    /// carry no `base_uri` and no custom resolver produced a result. The associated
    /// value is the offending URI in its original string form.
    #[error("The relative URI '{0}' cannot be written because no base URI is configured")]
    RelativeUriWithoutBaseUri(String),

    /// The configured base URI is itself relative.
    ///
    /// Base URIs must be absolute; this is checked once, when the writer is
    /// constructed, so that every later resolution can rely on it.
    #[error("The base URI '{0}' must be an absolute URI")]
    InvalidBaseUri(String),

    // Metadata validation errors
    /// A type name did not resolve to any type declared in the model.
    #[error("A type with the name '{0}' could not be found in the model")]
    UnrecognizedTypeName(String),

    /// An empty string was supplied where a type name is required.
    #[error("An empty type name was found; the type name must not be empty")]
    TypeNameMustNotBeEmpty,

    /// A model is available but the payload item carries no type name.
    ///
    /// When writing against metadata, non-open structured values must state their
    /// type so the writer can validate properties against the declared shape.
    #[error("A type name was not provided for an instance of a model-bound type")]
    MissingTypeNameWithMetadata,

    /// The declared kind of the named type does not match the kind of the value.
    #[error("The type '{type_name}' has kind '{actual}', but the kind '{expected}' was expected")]
    IncorrectTypeKind {
        /// Name of the type whose kind was checked.
        type_name: String,
        /// The kind required by the payload position.
        expected: String,
        /// The kind the type is actually declared with.
        actual: String,
    },

    /// A value of the wrong kind was found in a position with a known expected kind,
    /// and the value carries no type name to report.
    #[error("A value with kind '{actual}' was found where kind '{expected}' was expected")]
    IncorrectTypeKindNoTypeName {
        /// The kind required by the payload position.
        expected: String,
        /// The kind of the value that was found.
        actual: String,
    },

    /// A property declared as a stream was written with a non-stream value, or vice versa.
    #[error("The property '{0}' is a stream property, but its value is not a stream reference (or the reverse)")]
    MismatchPropertyKindForStreamProperty(String),

    /// A property not declared on a closed (non-open) type was written.
    #[error("The property '{property}' does not exist on type '{type_name}'")]
    PropertyDoesNotExistOnType {
        /// Name of the undeclared property.
        property: String,
        /// Name of the closed type it was written against.
        type_name: String,
    },

    /// A nested resource info name resolved to a declared property that is not a
    /// navigation property.
    #[error("The property '{property}' on type '{type_name}' is of kind '{kind}'; a navigation property is required")]
    NavigationPropertyExpected {
        /// Name used by the nested resource info.
        property: String,
        /// The owning type.
        type_name: String,
        /// The kind of the structural property that was found instead.
        kind: String,
    },

    /// A nested resource info name is undeclared on an open type.
    ///
    /// Open types admit undeclared structural properties but never undeclared
    /// navigation properties.
    #[error("The open type '{type_name}' does not declare a navigation property named '{property}'")]
    OpenNavigationProperty {
        /// Name used by the nested resource info.
        property: String,
        /// The open type it was written against.
        type_name: String,
    },

    /// A collection item has a kind incompatible with the collection's expected item kind.
    #[error("An item of kind '{actual}' was found in a collection expecting items of kind '{expected}'")]
    IncompatibleItemTypeKind {
        /// The expected item kind.
        expected: String,
        /// The kind of the offending item.
        actual: String,
    },

    /// A collection item has a type name different from the collection's expected item type.
    #[error("An item of type '{actual}' was found in a collection expecting items of type '{expected}'")]
    IncompatibleItemTypeName {
        /// The expected item type name.
        expected: String,
        /// The type name of the offending item.
        actual: String,
    },

    /// A media resource (default stream) was written for a type that is not a media
    /// link entry.
    #[error("The resource of type '{0}' has a media resource, but the type is not a media link entry")]
    ResourceWithMediaResourceAndNonMleType(String),

    /// A media-link-entry type was written without a media resource.
    #[error("The resource of type '{0}' is a media link entry, but no media resource was provided")]
    ResourceWithoutMediaResourceAndMleType(String),

    /// A stream reference carries neither a read link nor an edit link.
    #[error("The stream reference for '{0}' must have at least one of a read link or an edit link")]
    StreamReferenceMustHaveEditLinkOrReadLink(String),

    /// A stream reference carries an ETag but no edit link.
    #[error("The stream reference for '{0}' has an ETag but no edit link")]
    StreamReferenceEtagWithoutEditLink(String),

    /// A stream reference carries an empty content type.
    #[error("The stream reference for '{0}' has an empty content type")]
    StreamReferenceEmptyContentType(String),

    /// The default stream has a content type but no read link.
    #[error("The default stream has a content type but no read link; both must be set together")]
    DefaultStreamWithContentTypeWithoutReadLink,

    /// The default stream has a read link but no content type.
    #[error("The default stream has a read link but no content type; both must be set together")]
    DefaultStreamWithReadLinkWithoutContentType,

    // Writer state errors
    /// An illegal transition was attempted on the writer state machine.
    ///
    /// Both the current and the requested state are named, e.g. writing a resource
    /// set directly inside a resource set reports `ResourceSet` for both.
    #[error("Cannot transition from state '{from}' to state '{to}'")]
    InvalidStateTransition {
        /// The state the writer is currently in.
        from: WriterState,
        /// The state the attempted call would have entered.
        to: WriterState,
    },

    /// A call was made after the writer entered its terminal Error state.
    ///
    /// Once any write fails, the writer is poisoned and the output stream must be
    /// abandoned; no further writes are permitted.
    #[error("The writer is in the Error state; no further writes are permitted")]
    FromErrorState,

    /// An entity reference link was written as nested-link content in a response.
    ///
    /// Entity reference links under a nested resource info are a request-only
    /// construct ($ref-style binding).
    #[error("An entity reference link cannot be written as nested content in a response")]
    EntityReferenceLinkInResponse,

    /// A nested resource info in a request has no content.
    ///
    /// Deferred links are a response concept; a request must bind or expand every
    /// link it writes.
    #[error("The nested resource info '{0}' in a request payload must specify content")]
    DeferredLinkInRequest(String),

    /// More than one content item was written under a single nested resource info.
    #[error("Multiple content items were written for the nested resource info '{0}'")]
    MultipleItemsInNestedResourceInfoWithContent(String),

    /// A nested resource info requires a URL in the current format but none was set.
    #[error("The nested resource info '{0}' must specify a URL")]
    NavigationLinkMustSpecifyUrl(String),

    /// A nested resource info's collection/singleton cardinality could not be determined.
    ///
    /// `is_collection` may only be left unset when a model can infer it.
    #[error("The nested resource info '{0}' must specify whether it is a collection")]
    NavigationLinkMustSpecifyIsCollection(String),

    /// A resource set content mismatches a singleton nested resource info.
    #[error("The nested resource info '{0}' has IsCollection=false and cannot contain a resource set")]
    SingletonNestedResourceInfoWithResourceSet(String),

    /// A bare resource was written directly under a collection nested resource info.
    #[error("The nested resource info '{0}' has IsCollection=true and cannot directly contain a resource")]
    CollectionNestedResourceInfoWithResource(String),

    /// An entity reference link was written without a URL.
    #[error("An entity reference link must specify a URL")]
    EntityReferenceLinkUrlMustNotBeNull,

    // Request/response mode violations
    /// A resource set count was written in a request payload.
    #[error("A count value cannot be written in a request payload")]
    QueryCountInRequest,

    /// A next page link was written in a request payload.
    #[error("The next page link '{0}' cannot be written in a request payload")]
    NextPageLinkInRequest(String),

    /// A top-level entity reference link collection was written in a request payload.
    #[error("A top-level entity reference link collection cannot be written in a request payload")]
    EntityReferenceLinksInRequestNotAllowed,

    /// A service document was written in a request payload.
    #[error("A service document cannot be written in a request payload")]
    ServiceDocumentInRequest,

    /// A top-level error payload was written in a request payload.
    #[error("An error payload cannot be written in a request payload")]
    ErrorInRequest,

    // Limits
    /// Recursion limit reached.
    ///
    /// Raised both for resource/nested-resource-info nesting beyond
    /// `max_nesting_depth` and for inner-error chains beyond
    /// `max_inner_error_depth`. The associated value is the limit that was hit.
    #[error("Reached the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    // Argument errors
    /// A required argument was null, empty, or otherwise missing.
    ///
    /// The associated value names the offending argument.
    #[error("The argument '{0}' must not be null or empty")]
    ArgumentNull(&'static str),

    // I/O and external errors
    /// I/O error from the underlying output stream.
    #[error("{0}")]
    IoError(#[from] std::io::Error),

    /// Error from the serde_json layer while rendering a scalar value.
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),
}
