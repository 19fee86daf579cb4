//! Payload-level JSON Light rendering.
//!
//! The serializer consumes state-machine-validated nodes in the exact order the writer
//! produces them and renders JSON Light text. Control information uses the `@odata.*`
//! annotation names (`@odata.context`, `@odata.id`, `@odata.etag`, edit/read links,
//! media links) and property-scoped annotations use the `Name@odata.*` convention
//! (`Name@odata.navigationLink`, `Name@odata.associationLink`, `Name@odata.bind`,
//! `Name@odata.type`, `Name@odata.count`, `Name@odata.nextLink`).
//!
//! Every URI-valued field goes through the writer's URI resolution policy with the
//! JSON format's permissive enforcement: relative URIs are resolved against the base
//! URI when one is configured and written verbatim otherwise.

use std::io::Write;

use crate::json::text::JsonTextWriter;
use crate::model::{
    EntityReferenceLink, InnerError, InstanceAnnotation, NestedResourceInfo, ODataError,
    Property, Resource, ServiceDocument, ServiceDocumentElement, StreamReference, Value,
};
use crate::settings::WriterSettings;
use crate::uri::{Uri, UriEnforcement};
use crate::Result;

/// Renders validated payload nodes as JSON Light text.
///
/// The serializer is driven by [`crate::writer::Writer`]; it performs no validation of
/// its own and assumes the node order it receives is legal.
pub struct PayloadSerializer<W: Write> {
    json: JsonTextWriter<W>,
    settings: WriterSettings,
}

impl<W: Write> PayloadSerializer<W> {
    /// Creates a serializer over the given sink with the writer's settings.
    pub fn new(out: W, settings: WriterSettings) -> Self {
        PayloadSerializer {
            json: JsonTextWriter::new(out, settings.indent),
            settings,
        }
    }

    /// The writer settings this serializer was constructed with.
    pub fn settings(&self) -> &WriterSettings {
        &self.settings
    }

    fn resolve(&self, uri: &Uri) -> Result<Uri> {
        self.settings.resolve_uri(uri, UriEnforcement::JsonPermissive)
    }

    fn write_context(&mut self, fragment: Option<&str>) -> Result<()> {
        let Some(metadata) = &self.settings.metadata_document_uri else {
            return Ok(());
        };
        let value = match fragment {
            Some(fragment) => format!("{metadata}#{fragment}"),
            None => metadata.to_string(),
        };
        self.json.name("@odata.context")?;
        self.json.string(&value)
    }

    fn write_uri_annotation(&mut self, name: &str, uri: &Uri) -> Result<()> {
        let resolved = self.resolve(uri)?;
        self.json.name(name)?;
        self.json.string(resolved.as_str())
    }

    fn write_instance_annotations(&mut self, annotations: &[InstanceAnnotation]) -> Result<()> {
        for annotation in annotations {
            if self.settings.annotation_filter.should_include(&annotation.name) {
                self.json.name(&format!("@{}", annotation.name))?;
                self.write_value(&annotation.value)?;
            }
        }
        Ok(())
    }

    /// Opens a resource object and writes its control annotations and properties.
    ///
    /// Nested resource infos are appended afterwards by the writer; the object stays
    /// open until [`PayloadSerializer::resource_end`].
    pub fn resource_begin(
        &mut self,
        resource: &Resource,
        context_fragment: Option<&str>,
        type_annotation: Option<&str>,
        top_level: bool,
    ) -> Result<()> {
        self.json.start_object()?;
        if top_level {
            self.write_context(context_fragment)?;
        }
        if let Some(type_name) = type_annotation {
            self.json.name("@odata.type")?;
            self.json.string(&format!("#{type_name}"))?;
        }
        if let Some(id) = &resource.id {
            self.write_uri_annotation("@odata.id", id)?;
        }
        if let Some(etag) = &resource.etag {
            self.json.name("@odata.etag")?;
            self.json.string(etag)?;
        }
        if let Some(edit_link) = &resource.edit_link {
            self.write_uri_annotation("@odata.editLink", edit_link)?;
        }
        if let Some(read_link) = &resource.read_link {
            self.write_uri_annotation("@odata.readLink", read_link)?;
        }
        if let Some(media) = &resource.media_resource {
            self.write_stream_annotations("@odata", media)?;
        }
        self.write_instance_annotations(&resource.instance_annotations)?;
        for property in &resource.properties {
            self.write_property(property)?;
        }
        Ok(())
    }

    /// Closes the current resource object.
    pub fn resource_end(&mut self) -> Result<()> {
        self.json.end_object()
    }

    /// Writes `null` in a nested singleton content position.
    pub fn null_resource(&mut self) -> Result<()> {
        self.json.null()
    }

    fn write_stream_annotations(&mut self, prefix: &str, stream: &StreamReference) -> Result<()> {
        if let Some(read_link) = &stream.read_link {
            self.write_uri_annotation(&format!("{prefix}.mediaReadLink"), read_link)?;
        }
        if let Some(edit_link) = &stream.edit_link {
            self.write_uri_annotation(&format!("{prefix}.mediaEditLink"), edit_link)?;
        }
        if let Some(content_type) = &stream.content_type {
            self.json.name(&format!("{prefix}.mediaContentType"))?;
            self.json.string(content_type)?;
        }
        if let Some(etag) = &stream.etag {
            self.json.name(&format!("{prefix}.mediaETag"))?;
            self.json.string(etag)?;
        }
        Ok(())
    }

    fn write_property(&mut self, property: &Property) -> Result<()> {
        match &property.value {
            Value::Stream(stream) => {
                // named stream properties surface only as media annotations
                self.write_stream_annotations(&format!("{}@odata", property.name), stream)
            }
            value => {
                if let Some(type_name) = value.type_name() {
                    self.json.name(&format!("{}@odata.type", property.name))?;
                    self.json.string(&format!("#{type_name}"))?;
                }
                self.json.name(&property.name)?;
                self.write_value_body(value)
            }
        }
    }

    fn write_value(&mut self, value: &Value) -> Result<()> {
        self.write_value_body(value)
    }

    // renders the value itself; any @odata.type property annotation is the caller's job
    fn write_value_body(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.json.null(),
            Value::Boolean(b) => self.json.boolean(*b),
            Value::Integer(i) => self.json.integer(*i),
            Value::Double(d) => self.json.double(*d),
            Value::String(s) => self.json.string(s),
            Value::Collection(collection) => {
                self.json.start_array()?;
                for item in &collection.items {
                    self.write_value_body(item)?;
                }
                self.json.end_array()
            }
            Value::Complex(complex) => {
                self.json.start_object()?;
                for property in &complex.properties {
                    self.write_property(property)?;
                }
                self.json.end_object()
            }
            Value::Stream(stream) => {
                // stream values are annotation-only; in a bare value position there is
                // nothing to render
                let _ = stream;
                self.json.null()
            }
        }
    }

    /// Opens a resource set. For a top-level set this opens the payload object, writes
    /// the context, count and (when already known) next link, and opens the `value`
    /// array; for a nested set it opens the bare array. Returns whether the next link
    /// was emitted up front.
    pub fn resource_set_begin(
        &mut self,
        context_fragment: Option<&str>,
        count: Option<i64>,
        next_page_link: Option<&Uri>,
        annotations: &[InstanceAnnotation],
        top_level: bool,
    ) -> Result<bool> {
        let mut next_link_written = false;
        if top_level {
            self.json.start_object()?;
            self.write_context(context_fragment)?;
            if let Some(count) = count {
                self.json.name("@odata.count")?;
                self.json.integer(count)?;
            }
            if let Some(link) = next_page_link {
                self.write_uri_annotation("@odata.nextLink", link)?;
                next_link_written = true;
            }
            self.write_instance_annotations(annotations)?;
            self.json.name("value")?;
        }
        self.json.start_array()?;
        Ok(next_link_written)
    }

    /// Closes a resource set, appending a next link that only became known after the
    /// contained resources were enumerated.
    pub fn resource_set_end(
        &mut self,
        late_next_link: Option<&Uri>,
        nested_name: Option<&str>,
        top_level: bool,
    ) -> Result<()> {
        self.json.end_array()?;
        if let Some(link) = late_next_link {
            let name = match nested_name {
                Some(name) => format!("{name}@odata.nextLink"),
                None => "@odata.nextLink".to_string(),
            };
            self.write_uri_annotation(&name, link)?;
        }
        if top_level {
            self.json.end_object()?;
        }
        Ok(())
    }

    /// Writes the navigation and association link annotations for a nested resource
    /// info. Emitted when the scope opens, before any content.
    pub fn nested_info_annotations(&mut self, link: &NestedResourceInfo) -> Result<()> {
        if let Some(url) = &link.url {
            self.write_uri_annotation(&format!("{}@odata.navigationLink", link.name), url)?;
        }
        if let Some(url) = &link.association_link_url {
            self.write_uri_annotation(&format!("{}@odata.associationLink", link.name), url)?;
        }
        Ok(())
    }

    /// Writes the member name introducing nested-link content.
    pub fn nested_content_key(&mut self, name: &str) -> Result<()> {
        self.json.name(name)
    }

    /// Writes the `Name@odata.count` annotation for a nested resource set.
    pub fn nested_count(&mut self, name: &str, count: i64) -> Result<()> {
        self.json.name(&format!("{name}@odata.count"))?;
        self.json.integer(count)
    }

    /// Writes property-scoped instance annotations (`Name@term`) for nested-link
    /// content, subject to the annotation filter.
    pub fn nested_annotations(
        &mut self,
        name: &str,
        annotations: &[InstanceAnnotation],
    ) -> Result<()> {
        for annotation in annotations {
            if self.settings.annotation_filter.should_include(&annotation.name) {
                self.json.name(&format!("{name}@{}", annotation.name))?;
                self.write_value(&annotation.value)?;
            }
        }
        Ok(())
    }

    /// Writes the `Name@odata.bind` annotation carrying entity reference links
    /// collected under a nested resource info in a request.
    pub fn bind_links(&mut self, name: &str, urls: &[Uri], collection: bool) -> Result<()> {
        self.json.name(&format!("{name}@odata.bind"))?;
        if collection {
            self.json.start_array()?;
            for url in urls {
                let resolved = self.resolve(url)?;
                self.json.string(resolved.as_str())?;
            }
            self.json.end_array()
        } else {
            // a singleton bind writes the single URL directly
            let resolved = self.resolve(&urls[0])?;
            self.json.string(resolved.as_str())
        }
    }

    /// Writes a top-level single entity reference link payload.
    pub fn entity_reference_link(&mut self, link: &EntityReferenceLink) -> Result<()> {
        self.json.start_object()?;
        self.write_context(Some("$ref"))?;
        if let Some(url) = &link.url {
            let resolved = self.resolve(url)?;
            self.json.name("url")?;
            self.json.string(resolved.as_str())?;
        }
        self.write_instance_annotations(&link.instance_annotations)?;
        self.json.end_object()
    }

    /// Opens a top-level entity reference link collection payload. Returns whether the
    /// next link was emitted up front.
    pub fn entity_reference_links_begin(
        &mut self,
        count: Option<i64>,
        next_page_link: Option<&Uri>,
    ) -> Result<bool> {
        self.json.start_object()?;
        self.write_context(Some("Collection($ref)"))?;
        if let Some(count) = count {
            self.json.name("@odata.count")?;
            self.json.integer(count)?;
        }
        let mut next_link_written = false;
        if let Some(link) = next_page_link {
            self.write_uri_annotation("@odata.nextLink", link)?;
            next_link_written = true;
        }
        self.json.name("value")?;
        self.json.start_array()?;
        Ok(next_link_written)
    }

    /// Writes one `{url}` element of an entity reference link collection.
    pub fn entity_reference_links_item(&mut self, link: &EntityReferenceLink) -> Result<()> {
        self.json.start_object()?;
        if let Some(url) = &link.url {
            let resolved = self.resolve(url)?;
            self.json.name("url")?;
            self.json.string(resolved.as_str())?;
        }
        self.write_instance_annotations(&link.instance_annotations)?;
        self.json.end_object()
    }

    /// Closes an entity reference link collection, appending a post-enumeration next
    /// link when one surfaced.
    pub fn entity_reference_links_end(&mut self, late_next_link: Option<&Uri>) -> Result<()> {
        self.json.end_array()?;
        if let Some(link) = late_next_link {
            self.write_uri_annotation("@odata.nextLink", link)?;
        }
        self.json.end_object()
    }

    /// Writes a top-level error payload with its inner-error chain.
    pub fn error(&mut self, error: &ODataError) -> Result<()> {
        self.json.start_object()?;
        self.json.name("error")?;
        self.json.start_object()?;
        self.json.name("code")?;
        self.json.string(&error.code)?;
        self.json.name("message")?;
        self.json.string(&error.message)?;
        self.write_instance_annotations(&error.instance_annotations)?;
        if let Some(inner) = &error.inner_error {
            self.json.name("innererror")?;
            self.write_inner_error(inner)?;
        }
        self.json.end_object()?;
        self.json.end_object()
    }

    fn write_inner_error(&mut self, inner: &InnerError) -> Result<()> {
        self.json.start_object()?;
        if let Some(message) = &inner.message {
            self.json.name("message")?;
            self.json.string(message)?;
        }
        if let Some(type_name) = &inner.type_name {
            self.json.name("type")?;
            self.json.string(type_name)?;
        }
        if let Some(stack_trace) = &inner.stack_trace {
            self.json.name("stacktrace")?;
            self.json.string(stack_trace)?;
        }
        if let Some(nested) = &inner.inner_error {
            self.json.name("internalexception")?;
            self.write_inner_error(nested)?;
        }
        self.json.end_object()
    }

    /// Writes a service document payload.
    pub fn service_document(&mut self, document: &ServiceDocument) -> Result<()> {
        self.json.start_object()?;
        self.write_context(None)?;
        self.json.name("value")?;
        self.json.start_array()?;
        for element in &document.entity_sets {
            self.service_document_element(element, false)?;
        }
        for element in &document.singletons {
            self.service_document_element(element, true)?;
        }
        self.json.end_array()?;
        self.json.end_object()
    }

    fn service_document_element(
        &mut self,
        element: &ServiceDocumentElement,
        singleton: bool,
    ) -> Result<()> {
        self.json.start_object()?;
        if let Some(name) = &element.name {
            self.json.name("name")?;
            self.json.string(name)?;
        }
        if let Some(title) = &element.title {
            self.json.name("title")?;
            self.json.string(title)?;
        }
        if let Some(url) = &element.url {
            let resolved = self.resolve(url)?;
            self.json.name("url")?;
            self.json.string(resolved.as_str())?;
        }
        if singleton {
            self.json.name("kind")?;
            self.json.string("Singleton")?;
        }
        self.json.end_object()
    }

    /// Writes a top-level property payload.
    pub fn property(&mut self, property: &Property, context_fragment: Option<&str>) -> Result<()> {
        self.json.start_object()?;
        self.write_context(context_fragment)?;
        if let Some(type_name) = property.value.type_name() {
            self.json.name("value@odata.type")?;
            self.json.string(&format!("#{type_name}"))?;
        }
        self.json.name("value")?;
        self.write_value_body(&property.value)?;
        self.json.end_object()
    }

    /// Flushes the underlying output stream.
    pub fn flush(&mut self) -> Result<()> {
        self.json.flush()
    }
}
