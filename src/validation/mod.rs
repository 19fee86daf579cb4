//! Metadata-aware payload validation.
//!
//! This module checks payload items against an optional EDM model before anything is
//! serialized: type names must resolve and match the kind required by their position,
//! closed types reject undeclared properties, navigation names must resolve to declared
//! navigation properties, media resources must be consistent with the media-link-entry
//! flag, and stream references must carry a usable link combination.
//!
//! The validators are pure functions over `(item, context)`; the writer state machine
//! invokes them at each `write_start` / single-shot call and transitions to its terminal
//! Error state when any of them fails.
//!
//! # Key Components
//!
//! - [`crate::validation::ValidationContext`] - borrowed model + settings bundle
//! - [`crate::validation::validate_resource`] - entry validation (type, properties, streams)
//! - [`crate::validation::validate_nested_resource_info`] - navigation link validation
//! - [`crate::validation::CollectionItemValidator`] - per-item collection type checking

mod collection;
mod resource;

pub use collection::CollectionItemValidator;
pub use resource::{
    validate_nested_resource_info, validate_resource, validate_stream_reference,
    validate_top_level_property,
};

use crate::edm::EdmModel;
use crate::model::{EntityReferenceLink, ODataError, ServiceDocument};
use crate::settings::WriterSettings;
use crate::{Error, Result};

/// Borrowed validation context: the optional model plus the writer settings.
///
/// The model lifetime `'m` is independent of the settings lifetime `'s` so that types
/// resolved during validation can outlive the settings borrow.
#[derive(Clone, Copy)]
pub struct ValidationContext<'m, 's> {
    /// The metadata model, when the writer is model-bound.
    pub model: Option<&'m EdmModel>,
    /// The writer's settings.
    pub settings: &'s WriterSettings,
}

/// Validates an error payload's inner-error chain depth.
///
/// # Errors
///
/// Returns [`Error::RecursionLimit`] when the chain is deeper than `max_depth`.
pub fn validate_error(error: &ODataError, max_depth: usize) -> Result<()> {
    if let Some(inner) = &error.inner_error {
        if inner.depth() > max_depth {
            return Err(Error::RecursionLimit(max_depth));
        }
    }
    Ok(())
}

/// Validates an entity reference link, which must carry a URL.
///
/// # Errors
///
/// Returns [`Error::EntityReferenceLinkUrlMustNotBeNull`] when the URL is unset.
pub fn validate_entity_reference_link(link: &EntityReferenceLink) -> Result<()> {
    if link.url.is_none() {
        return Err(Error::EntityReferenceLinkUrlMustNotBeNull);
    }
    Ok(())
}

/// Validates a service document: every descriptor must be named.
///
/// # Errors
///
/// Returns [`Error::ArgumentNull`] for a descriptor with no name.
pub fn validate_service_document(document: &ServiceDocument) -> Result<()> {
    for element in document.entity_sets.iter().chain(&document.singletons) {
        match &element.name {
            Some(name) if !name.is_empty() => {}
            _ => return Err(Error::ArgumentNull("service document element name")),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InnerError, ServiceDocumentElement};

    #[test]
    fn test_inner_error_depth_limit() {
        let error = ODataError::new("code", "message").with_inner_error(
            InnerError::new("a").with_inner_error(InnerError::new("b").with_inner_error(InnerError::new("c"))),
        );
        assert!(validate_error(&error, 3).is_ok());
        assert!(matches!(validate_error(&error, 2), Err(Error::RecursionLimit(2))));
        assert!(validate_error(&ODataError::new("code", "message"), 0).is_ok());
    }

    #[test]
    fn test_entity_reference_link_requires_url() {
        let link = EntityReferenceLink::default();
        assert!(matches!(
            validate_entity_reference_link(&link),
            Err(Error::EntityReferenceLinkUrlMustNotBeNull)
        ));
        assert!(validate_entity_reference_link(&EntityReferenceLink::new("http://odata.org/x")).is_ok());
    }

    #[test]
    fn test_service_document_requires_names() {
        let unnamed = ServiceDocument::new().with_entity_set(ServiceDocumentElement {
            name: None,
            url: Some("Orders".into()),
            title: None,
        });
        assert!(matches!(
            validate_service_document(&unnamed),
            Err(Error::ArgumentNull("service document element name"))
        ));

        let named = ServiceDocument::new()
            .with_entity_set(ServiceDocumentElement::new("Orders", "Orders"))
            .with_singleton(ServiceDocumentElement::new("Me", "Me"));
        assert!(validate_service_document(&named).is_ok());
    }
}
