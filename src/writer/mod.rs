//! The JSON Light payload writer.
//!
//! [`Writer`] is the single entry point for producing a payload. It runs a state machine
//! over a stack of open scopes: `write_start` calls open a scope (resource, resource set
//! or nested resource info), `write_end` closes the innermost one, and the single-shot
//! methods (`write_error`, `write_service_document`, `write_property`, the entity
//! reference link methods) produce a complete payload in one call. Every write validates
//! its item first and only then hands it to the serializer, so an error never leaves
//! partially validated text in the output.
//!
//! Errors are terminal. The first failing call moves the writer into its `Error` state
//! and every subsequent call, including `finish`, fails with
//! [`crate::Error::FromErrorState`]; the output stream written so far must be discarded.
//!
//! # Key Components
//!
//! - [`crate::writer::Writer`] - the state machine over an output sink
//! - [`crate::writer::WriterState`] - observable states, named in transition errors
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use jsonlight::model::{Resource, Value};
//! use jsonlight::settings::WriterSettings;
//! use jsonlight::writer::Writer;
//!
//! # fn main() -> jsonlight::Result<()> {
//! let mut out = Vec::new();
//! let settings = WriterSettings::response()
//!     .with_metadata_document_uri("http://odata.org/svc/$metadata");
//! let mut writer = Writer::new(&mut out, settings)?;
//! writer.write_start_resource(
//!     Resource::new()
//!         .with_type_name("Model.Order")
//!         .with_id("http://odata.org/svc/Orders(1)")
//!         .with_property("Id", Value::Integer(1)),
//! )?;
//! writer.write_end()?;
//! writer.finish()?;
//! # Ok(())
//! # }
//! ```

mod state;

pub use state::WriterState;

use std::io::Write;

use crate::edm::{EdmModel, EdmType};
use crate::json::PayloadSerializer;
use crate::model::{
    EntityReferenceLink, EntityReferenceLinks, Item, NestedResourceInfo, ODataError, Property,
    Resource, ResourceSet, SerializationInfo, ServiceDocument,
};
use crate::settings::WriterSettings;
use crate::uri::{Uri, UriEnforcement};
use crate::validation::{self, ValidationContext};
use crate::{Error, Result};

/// One open nesting level of the payload.
enum Scope<'a> {
    ResourceSet {
        top_level: bool,
        nested_name: Option<String>,
        element_type: Option<&'a EdmType>,
        next_link_written: bool,
        pending_next_link: Option<Uri>,
    },
    Resource {
        edm_type: Option<&'a EdmType>,
    },
    NullResource,
    NestedResourceInfo {
        link: NestedResourceInfo,
        /// Cardinality after falling back to the model's declaration.
        effective_collection: Option<bool>,
        target_type: Option<&'a EdmType>,
        has_expanded: bool,
        /// Entity reference link URLs collected for `Name@odata.bind`.
        bind_urls: Vec<Uri>,
    },
}

/// Streaming JSON Light payload writer.
///
/// A writer produces exactly one payload. Nestable payloads are driven with the
/// `write_start_*` / [`Writer::write_end`] pairs; single-shot payloads complete the
/// writer in one call. [`Writer::finish`] checks that the payload was closed and
/// flushes the sink.
///
/// The optional model (see [`Writer::with_model`]) turns on metadata validation:
/// stated type names must resolve, closed types reject undeclared properties, and
/// navigation link cardinality is inferred from the declaration when the caller
/// leaves it unset.
pub struct Writer<'a, W: Write> {
    serializer: PayloadSerializer<W>,
    model: Option<&'a EdmModel>,
    navigation_source: Option<String>,
    scopes: Vec<Scope<'a>>,
    completed: bool,
    poisoned: bool,
}

impl<'a, W: Write> Writer<'a, W> {
    /// Creates a writer over the given sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBaseUri`] when the settings carry a relative base or
    /// metadata document URI.
    pub fn new(out: W, settings: WriterSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Writer {
            serializer: PayloadSerializer::new(out, settings),
            model: None,
            navigation_source: None,
            scopes: Vec::new(),
            completed: false,
            poisoned: false,
        })
    }

    /// Binds a metadata model; payload items are validated against it.
    #[must_use]
    pub fn with_model(mut self, model: &'a EdmModel) -> Self {
        self.model = Some(model);
        self
    }

    /// Names the entity set or singleton the payload belongs to.
    ///
    /// The name feeds the `@odata.context` fragment and, when a model is bound,
    /// supplies the expected type of top-level resources.
    #[must_use]
    pub fn with_navigation_source(mut self, name: impl Into<String>) -> Self {
        self.navigation_source = Some(name.into());
        self
    }

    /// The writer's current state.
    #[must_use]
    pub fn state(&self) -> WriterState {
        if self.poisoned {
            return WriterState::Error;
        }
        match self.scopes.last() {
            None if self.completed => WriterState::Completed,
            None => WriterState::Start,
            Some(Scope::ResourceSet { .. }) => WriterState::ResourceSet,
            Some(Scope::Resource { .. }) => WriterState::Resource,
            Some(Scope::NullResource) => WriterState::NullResource,
            Some(Scope::NestedResourceInfo {
                has_expanded,
                bind_urls,
                ..
            }) => {
                if *has_expanded || !bind_urls.is_empty() {
                    WriterState::NestedResourceInfoWithContent
                } else {
                    WriterState::NestedResourceInfo
                }
            }
        }
    }

    /// Starts writing any payload item.
    ///
    /// Nestable items must be paired with [`Writer::write_end`]; the remaining kinds
    /// complete the payload immediately.
    ///
    /// # Errors
    ///
    /// See the individual `write_*` methods.
    pub fn write_start(&mut self, item: Item) -> Result<()> {
        match item {
            Item::Resource(resource) => self.write_start_resource(resource),
            Item::NullResource => self.write_null_resource(),
            Item::ResourceSet(set) => self.write_start_resource_set(set),
            Item::NestedResourceInfo(link) => self.write_start_nested_resource_info(link),
            Item::EntityReferenceLink(link) => self.write_entity_reference_link(link),
            Item::EntityReferenceLinks(links) => self.write_entity_reference_links(&links),
            Item::Error(error) => self.write_error(&error),
            Item::ServiceDocument(document) => self.write_service_document(&document),
            Item::Property(property) => self.write_property(&property),
        }
    }

    /// Starts a resource, either top-level, as a resource set element, or as the
    /// content of a singleton nested resource info.
    ///
    /// # Errors
    ///
    /// Fails with a transition error from an illegal state, with
    /// [`Error::RecursionLimit`] past the configured nesting depth, with
    /// [`Error::CollectionNestedResourceInfoWithResource`] under a collection link,
    /// with [`Error::MultipleItemsInNestedResourceInfoWithContent`] when the link
    /// already has content, and with the metadata validation errors on [`Error`].
    pub fn write_start_resource(&mut self, resource: Resource) -> Result<()> {
        self.guard(|w| w.start_resource(resource))
    }

    /// Writes a null resource as the content of a singleton nested resource info.
    /// Must be paired with [`Writer::write_end`] like any other resource.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ArgumentNull`] at the top level and with a transition
    /// error anywhere other than under a nested resource info.
    pub fn write_null_resource(&mut self) -> Result<()> {
        self.guard(|w| w.start_null_resource())
    }

    /// Starts a resource set, either top-level or as the content of a collection
    /// nested resource info.
    ///
    /// # Errors
    ///
    /// Fails with a transition error from an illegal state (including directly inside
    /// another resource set), with [`Error::QueryCountInRequest`] /
    /// [`Error::NextPageLinkInRequest`] in requests, and with
    /// [`Error::SingletonNestedResourceInfoWithResourceSet`] under a singleton link.
    pub fn write_start_resource_set(&mut self, set: ResourceSet) -> Result<()> {
        self.guard(|w| w.start_resource_set(set))
    }

    /// Starts a nested resource info inside the currently open resource.
    ///
    /// # Errors
    ///
    /// Fails with a transition error outside a resource and with the navigation
    /// validation errors on [`Error`].
    pub fn write_start_nested_resource_info(&mut self, link: NestedResourceInfo) -> Result<()> {
        self.guard(|w| w.start_nested_resource_info(link))
    }

    /// Closes the innermost open scope.
    ///
    /// # Errors
    ///
    /// Fails with a transition error when nothing is open and with
    /// [`Error::DeferredLinkInRequest`] when a request-mode nested resource info is
    /// closed without content.
    pub fn write_end(&mut self) -> Result<()> {
        self.guard(|w| w.end())
    }

    /// Writes an entity reference link: a complete `$ref` payload at the top level,
    /// or a pending `Name@odata.bind` entry under a nested resource info in a request.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::EntityReferenceLinkUrlMustNotBeNull`] for a link without a
    /// URL, with [`Error::EntityReferenceLinkInResponse`] when nested in a response,
    /// and with [`Error::NavigationLinkMustSpecifyIsCollection`] when the link's
    /// cardinality cannot be determined.
    pub fn write_entity_reference_link(&mut self, link: EntityReferenceLink) -> Result<()> {
        self.guard(|w| w.entity_reference_link(link))
    }

    /// Writes a complete `Collection($ref)` payload.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::EntityReferenceLinksInRequestNotAllowed`] in requests and
    /// with [`Error::EntityReferenceLinkUrlMustNotBeNull`] for a link without a URL.
    pub fn write_entity_reference_links(&mut self, links: &EntityReferenceLinks) -> Result<()> {
        self.guard(|w| {
            w.require_start()?;
            if w.serializer.settings().is_request {
                return Err(Error::EntityReferenceLinksInRequestNotAllowed);
            }
            for link in &links.links {
                validation::validate_entity_reference_link(link)?;
            }
            w.serializer
                .entity_reference_links_begin(links.count, links.next_page_link.as_ref())?;
            for link in &links.links {
                w.serializer.entity_reference_links_item(link)?;
            }
            w.serializer.entity_reference_links_end(None)?;
            w.completed = true;
            Ok(())
        })
    }

    /// Writes a `Collection($ref)` payload from a link stream, asking `next_link` for
    /// the next page link only after the links have been enumerated. The links are
    /// serialized as they are pulled; nothing is buffered.
    ///
    /// # Errors
    ///
    /// Same as [`Writer::write_entity_reference_links`]; a link failing validation
    /// mid-stream poisons the writer.
    pub fn write_entity_reference_links_streamed<I, F>(
        &mut self,
        count: Option<i64>,
        links: I,
        next_link: F,
    ) -> Result<()>
    where
        I: IntoIterator<Item = EntityReferenceLink>,
        F: FnOnce() -> Option<Uri>,
    {
        self.guard(|w| {
            w.require_start()?;
            if w.serializer.settings().is_request {
                return Err(Error::EntityReferenceLinksInRequestNotAllowed);
            }
            w.serializer.entity_reference_links_begin(count, None)?;
            for link in links {
                validation::validate_entity_reference_link(&link)?;
                w.serializer.entity_reference_links_item(&link)?;
            }
            let late = next_link();
            w.serializer.entity_reference_links_end(late.as_ref())?;
            w.completed = true;
            Ok(())
        })
    }

    /// Supplies the next page link of the currently open resource set. Valid at any
    /// point while the set is open; the link is emitted after the `value` array when
    /// the set closes.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NextPageLinkInRequest`] in requests and with a transition
    /// error when the innermost scope is not a resource set.
    pub fn set_next_page_link(&mut self, link: impl Into<Uri>) -> Result<()> {
        let link = link.into();
        self.guard(|w| {
            if w.serializer.settings().is_request {
                return Err(Error::NextPageLinkInRequest(link.to_string()));
            }
            let state = w.state();
            match w.scopes.last_mut() {
                Some(Scope::ResourceSet {
                    pending_next_link, ..
                }) => {
                    *pending_next_link = Some(link);
                    Ok(())
                }
                _ => Err(Error::InvalidStateTransition {
                    from: state,
                    to: WriterState::ResourceSet,
                }),
            }
        })
    }

    /// Writes a complete top-level error payload.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ErrorInRequest`] in requests and with
    /// [`Error::RecursionLimit`] when the inner-error chain exceeds the configured
    /// depth.
    pub fn write_error(&mut self, error: &ODataError) -> Result<()> {
        self.guard(|w| {
            w.require_start()?;
            if w.serializer.settings().is_request {
                return Err(Error::ErrorInRequest);
            }
            validation::validate_error(error, w.serializer.settings().max_inner_error_depth)?;
            w.serializer.error(error)?;
            w.completed = true;
            Ok(())
        })
    }

    /// Writes a complete service document payload.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ServiceDocumentInRequest`] in requests and with
    /// [`Error::ArgumentNull`] for an unnamed element.
    pub fn write_service_document(&mut self, document: &ServiceDocument) -> Result<()> {
        self.guard(|w| {
            w.require_start()?;
            if w.serializer.settings().is_request {
                return Err(Error::ServiceDocumentInRequest);
            }
            validation::validate_service_document(document)?;
            w.serializer.service_document(document)?;
            w.completed = true;
            Ok(())
        })
    }

    /// Writes a complete top-level property payload.
    ///
    /// # Errors
    ///
    /// Fails with a transition error when a payload is already in progress and with
    /// the value-hygiene errors on [`Error`].
    pub fn write_property(&mut self, property: &Property) -> Result<()> {
        self.guard(|w| {
            w.require_start()?;
            let ctx = ValidationContext {
                model: w.model,
                settings: w.serializer.settings(),
            };
            validation::validate_top_level_property(ctx, property)?;
            let fragment = property.value.type_name().map(str::to_string);
            w.serializer.property(property, fragment.as_deref())?;
            w.completed = true;
            Ok(())
        })
    }

    /// Completes the payload, flushing the sink when stream disposal is enabled.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::FromErrorState`] after any failed write and with a
    /// transition error while scopes are still open.
    pub fn finish(&mut self) -> Result<()> {
        self.guard(|w| {
            if !w.completed {
                return Err(w.transition_error(WriterState::Completed));
            }
            if w.serializer.settings().enable_message_stream_disposal {
                w.serializer.flush()?;
            }
            Ok(())
        })
    }

    /// Runs one write, refusing poisoned writers and poisoning on failure.
    fn guard(&mut self, f: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        if self.poisoned {
            return Err(Error::FromErrorState);
        }
        let result = f(self);
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    fn transition_error(&self, to: WriterState) -> Error {
        Error::InvalidStateTransition {
            from: self.state(),
            to,
        }
    }

    fn require_start(&self) -> Result<()> {
        if !self.scopes.is_empty() || self.completed {
            return Err(self.transition_error(WriterState::Completed));
        }
        Ok(())
    }

    fn validation_ctx(&self) -> ValidationContext<'a, '_> {
        ValidationContext {
            model: self.model,
            settings: self.serializer.settings(),
        }
    }

    /// The entity type of the writer's navigation source, when both are known.
    fn navigation_source_type(&self) -> Option<&'a EdmType> {
        let model = self.model?;
        let source = self.navigation_source.as_deref()?;
        let set = model
            .find_entity_set(source)
            .or_else(|| model.find_singleton(source))?;
        model.find_type(&set.element_type)
    }

    fn context_source(&self, info: Option<&SerializationInfo>) -> Option<String> {
        self.navigation_source
            .clone()
            .or_else(|| info.map(|info| info.navigation_source_name.clone()))
    }

    fn start_resource(&mut self, resource: Resource) -> Result<()> {
        let mut nested_name = None;
        let expected = match self.scopes.last() {
            None => {
                if self.completed {
                    return Err(self.transition_error(WriterState::Resource));
                }
                self.navigation_source_type()
            }
            Some(Scope::ResourceSet { element_type, .. }) => *element_type,
            Some(Scope::NestedResourceInfo {
                link,
                effective_collection,
                target_type,
                has_expanded,
                bind_urls,
            }) => {
                if *has_expanded || !bind_urls.is_empty() {
                    return Err(Error::MultipleItemsInNestedResourceInfoWithContent(
                        link.name.clone(),
                    ));
                }
                if *effective_collection == Some(true) {
                    return Err(Error::CollectionNestedResourceInfoWithResource(
                        link.name.clone(),
                    ));
                }
                nested_name = Some(link.name.clone());
                *target_type
            }
            Some(_) => return Err(self.transition_error(WriterState::Resource)),
        };

        let max_depth = self.serializer.settings().max_nesting_depth;
        if max_depth > 0 {
            let depth = self
                .scopes
                .iter()
                .filter(|scope| matches!(scope, Scope::Resource { .. }))
                .count();
            if depth + 1 > max_depth {
                return Err(Error::RecursionLimit(max_depth));
            }
        }

        let resolved = validation::validate_resource(self.validation_ctx(), &resource, expected)?;

        let top_level = self.scopes.is_empty();
        if let Some(name) = &nested_name {
            if let Some(Scope::NestedResourceInfo { has_expanded, .. }) = self.scopes.last_mut() {
                *has_expanded = true;
            }
            self.serializer.nested_content_key(name)?;
        }

        // `@odata.type` appears only when the stated type adds information over the
        // type the payload position already implies
        let expected_name = expected.map(|ty| ty.name.as_str()).or_else(|| {
            resource
                .serialization_info
                .as_ref()
                .and_then(|info| info.navigation_source_entity_type.as_deref())
        });
        let type_annotation = match (resource.type_name.as_deref(), expected_name) {
            (Some(stated), Some(expected)) if stated == expected => None,
            (stated, _) => stated,
        };

        let fragment = if top_level {
            self.context_source(resource.serialization_info.as_ref())
                .map(|source| format!("{source}/$entity"))
        } else {
            None
        };
        self.serializer
            .resource_begin(&resource, fragment.as_deref(), type_annotation, top_level)?;
        self.scopes.push(Scope::Resource { edm_type: resolved });
        Ok(())
    }

    fn start_null_resource(&mut self) -> Result<()> {
        let name = match self.scopes.last() {
            Some(Scope::NestedResourceInfo {
                link,
                effective_collection,
                has_expanded,
                bind_urls,
                ..
            }) => {
                if *has_expanded || !bind_urls.is_empty() {
                    return Err(Error::MultipleItemsInNestedResourceInfoWithContent(
                        link.name.clone(),
                    ));
                }
                if *effective_collection == Some(true) {
                    return Err(Error::CollectionNestedResourceInfoWithResource(
                        link.name.clone(),
                    ));
                }
                link.name.clone()
            }
            None if !self.completed => return Err(Error::ArgumentNull("resource")),
            _ => return Err(self.transition_error(WriterState::NullResource)),
        };
        if let Some(Scope::NestedResourceInfo { has_expanded, .. }) = self.scopes.last_mut() {
            *has_expanded = true;
        }
        self.serializer.nested_content_key(&name)?;
        self.serializer.null_resource()?;
        self.scopes.push(Scope::NullResource);
        Ok(())
    }

    fn start_resource_set(&mut self, set: ResourceSet) -> Result<()> {
        let (top_level, nested_name, element_type) = match self.scopes.last() {
            None => {
                if self.completed {
                    return Err(self.transition_error(WriterState::ResourceSet));
                }
                (true, None, self.navigation_source_type())
            }
            Some(Scope::NestedResourceInfo {
                link,
                effective_collection,
                target_type,
                has_expanded,
                ..
            }) => {
                if *has_expanded {
                    return Err(Error::MultipleItemsInNestedResourceInfoWithContent(
                        link.name.clone(),
                    ));
                }
                if *effective_collection == Some(false) {
                    return Err(Error::SingletonNestedResourceInfoWithResourceSet(
                        link.name.clone(),
                    ));
                }
                (false, Some(link.name.clone()), *target_type)
            }
            Some(_) => return Err(self.transition_error(WriterState::ResourceSet)),
        };

        if self.serializer.settings().is_request {
            if set.count.is_some() {
                return Err(Error::QueryCountInRequest);
            }
            if let Some(link) = &set.next_page_link {
                return Err(Error::NextPageLinkInRequest(link.to_string()));
            }
        }

        if let Some(name) = &nested_name {
            if let Some(Scope::NestedResourceInfo { has_expanded, .. }) = self.scopes.last_mut() {
                *has_expanded = true;
            }
            if let Some(count) = set.count {
                self.serializer.nested_count(name, count)?;
            }
            self.serializer
                .nested_annotations(name, &set.instance_annotations)?;
            self.serializer.nested_content_key(name)?;
        }

        let fragment = if top_level {
            self.context_source(set.serialization_info.as_ref())
        } else {
            None
        };
        let next_link_written = self.serializer.resource_set_begin(
            fragment.as_deref(),
            set.count,
            set.next_page_link.as_ref(),
            &set.instance_annotations,
            top_level,
        )?;
        // a nested set's next link always trails the array as Name@odata.nextLink
        let pending_next_link = if top_level { None } else { set.next_page_link };
        self.scopes.push(Scope::ResourceSet {
            top_level,
            nested_name,
            element_type,
            next_link_written,
            pending_next_link,
        });
        Ok(())
    }

    fn start_nested_resource_info(&mut self, link: NestedResourceInfo) -> Result<()> {
        let owner = match self.scopes.last() {
            Some(Scope::Resource { edm_type }) => *edm_type,
            _ => return Err(self.transition_error(WriterState::NestedResourceInfo)),
        };
        let effective_collection = validation::validate_nested_resource_info(
            self.validation_ctx(),
            &link,
            owner,
            UriEnforcement::JsonPermissive,
        )?;
        let target_type = self.nested_target_type(owner, &link.name);
        self.serializer.nested_info_annotations(&link)?;
        self.scopes.push(Scope::NestedResourceInfo {
            link,
            effective_collection,
            target_type,
            has_expanded: false,
            bind_urls: Vec::new(),
        });
        Ok(())
    }

    fn nested_target_type(&self, owner: Option<&'a EdmType>, name: &str) -> Option<&'a EdmType> {
        let model = self.model?;
        let navigation = owner?.find_navigation(name)?;
        model.find_type(&navigation.target_type)
    }

    fn entity_reference_link(&mut self, link: EntityReferenceLink) -> Result<()> {
        match self.scopes.last() {
            None => {
                if self.completed {
                    return Err(self.transition_error(WriterState::EntityReferenceLink));
                }
                validation::validate_entity_reference_link(&link)?;
                self.serializer.entity_reference_link(&link)?;
                self.completed = true;
                Ok(())
            }
            Some(Scope::NestedResourceInfo { .. }) => self.nested_entity_reference_link(link),
            Some(_) => Err(self.transition_error(WriterState::EntityReferenceLink)),
        }
    }

    fn nested_entity_reference_link(&mut self, link: EntityReferenceLink) -> Result<()> {
        if !self.serializer.settings().is_request {
            return Err(Error::EntityReferenceLinkInResponse);
        }
        let Some(url) = link.url else {
            return Err(Error::EntityReferenceLinkUrlMustNotBeNull);
        };
        if let Some(Scope::NestedResourceInfo {
            link: nested,
            effective_collection,
            has_expanded,
            bind_urls,
            ..
        }) = self.scopes.last_mut()
        {
            let Some(collection) = *effective_collection else {
                return Err(Error::NavigationLinkMustSpecifyIsCollection(
                    nested.name.clone(),
                ));
            };
            if !collection && (*has_expanded || !bind_urls.is_empty()) {
                return Err(Error::MultipleItemsInNestedResourceInfoWithContent(
                    nested.name.clone(),
                ));
            }
            bind_urls.push(url);
        }
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        let Some(scope) = self.scopes.pop() else {
            return Err(self.transition_error(WriterState::Completed));
        };
        match scope {
            Scope::Resource { .. } => self.serializer.resource_end()?,
            Scope::NullResource => {}
            Scope::ResourceSet {
                top_level,
                nested_name,
                next_link_written,
                pending_next_link,
                ..
            } => {
                let late = if next_link_written {
                    None
                } else {
                    pending_next_link
                };
                self.serializer
                    .resource_set_end(late.as_ref(), nested_name.as_deref(), top_level)?;
            }
            Scope::NestedResourceInfo {
                link,
                effective_collection,
                has_expanded,
                bind_urls,
                ..
            } => {
                if self.serializer.settings().is_request && !has_expanded && bind_urls.is_empty() {
                    return Err(Error::DeferredLinkInRequest(link.name));
                }
                if !bind_urls.is_empty() {
                    self.serializer.bind_links(
                        &link.name,
                        &bind_urls,
                        effective_collection == Some(true),
                    )?;
                }
            }
        }
        if self.scopes.is_empty() {
            self.completed = true;
        }
        Ok(())
    }
}
