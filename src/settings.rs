//! Writer configuration.
//!
//! This module provides [`crate::settings::WriterSettings`], the single immutable
//! configuration bag constructed once per writer and passed by reference into every
//! component (URI resolution, validation, serialization). There is no ambient or
//! global configuration: everything the writer consults lives here.
//!
//! # Key Components
//!
//! - [`crate::settings::WriterSettings`] - configuration for one writer instance
//! - [`crate::settings::AnnotationFilter`] - which instance annotations are written
//!
//! # Usage Examples
//!
//! ```rust
//! use jsonlight::{uri::Uri, AnnotationFilter, WriterSettings};
//!
//! let settings = WriterSettings::response()
//!     .with_base_uri(Uri::new("http://odata.org/svc/"))
//!     .with_metadata_document_uri(Uri::new("http://odata.org/svc/$metadata"))
//!     .with_annotation_filter(AnnotationFilter::from_pattern("*"));
//! assert!(!settings.is_request);
//! ```

use crate::uri::{self, Uri, UriEnforcement, UrlResolver};
use crate::Result;

/// Filter deciding which instance annotations are written to the payload.
///
/// The default excludes every annotation. The pattern `"*"` includes all; otherwise a
/// comma-separated list of exact names and `namespace.*` prefixes is matched against
/// the annotation name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnnotationFilter {
    /// Exclude all instance annotations (the default).
    #[default]
    None,
    /// Include all instance annotations.
    All,
    /// Include annotations matching any of the listed exact names or `prefix.*` patterns.
    Patterns(Vec<String>),
}

impl AnnotationFilter {
    /// Parses a filter from its string form: `"*"`, or a comma-separated pattern list.
    #[must_use]
    pub fn from_pattern(pattern: &str) -> Self {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return AnnotationFilter::None;
        }
        if pattern == "*" {
            return AnnotationFilter::All;
        }
        AnnotationFilter::Patterns(
            pattern
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        )
    }

    /// Returns `true` when an annotation with the given name should be written.
    #[must_use]
    pub fn should_include(&self, name: &str) -> bool {
        match self {
            AnnotationFilter::None => false,
            AnnotationFilter::All => true,
            AnnotationFilter::Patterns(patterns) => patterns.iter().any(|p| {
                p == name
                    || p.strip_suffix(".*")
                        .is_some_and(|prefix| name.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('.')))
            }),
        }
    }
}

/// Configuration for one writer instance.
///
/// Constructed once, validated at writer construction (the base URI, if set, must be
/// absolute) and immutable for the writer's lifetime.
pub struct WriterSettings {
    /// Base URI used to resolve relative payload URIs. Must be absolute when set.
    pub base_uri: Option<Uri>,
    /// Metadata document URI used to compute `@odata.context` values. When unset,
    /// context annotations are omitted.
    pub metadata_document_uri: Option<Uri>,
    /// `true` when writing a request message, `false` for a response.
    pub is_request: bool,
    /// Maximum depth of resource / nested-resource-info nesting. `0` means unlimited.
    pub max_nesting_depth: usize,
    /// Maximum depth of the inner-error chain in an error payload.
    pub max_inner_error_depth: usize,
    /// Emit indented output (two-space indentation) instead of compact output.
    pub indent: bool,
    /// Flush the output stream when the writer finishes.
    pub enable_message_stream_disposal: bool,
    /// Custom URL resolver consulted before the built-in resolution rules.
    pub url_resolver: Option<UrlResolver>,
    /// Which instance annotations are written.
    pub annotation_filter: AnnotationFilter,
}

impl Default for WriterSettings {
    fn default() -> Self {
        WriterSettings {
            base_uri: None,
            metadata_document_uri: None,
            is_request: false,
            max_nesting_depth: 0,
            max_inner_error_depth: 100,
            indent: false,
            enable_message_stream_disposal: true,
            url_resolver: None,
            annotation_filter: AnnotationFilter::None,
        }
    }
}

impl WriterSettings {
    /// Settings for writing a response message (the default).
    #[must_use]
    pub fn response() -> Self {
        WriterSettings::default()
    }

    /// Settings for writing a request message.
    #[must_use]
    pub fn request() -> Self {
        WriterSettings {
            is_request: true,
            ..WriterSettings::default()
        }
    }

    /// Sets the base URI used to resolve relative payload URIs.
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<Uri>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Sets the metadata document URI used for `@odata.context` values.
    #[must_use]
    pub fn with_metadata_document_uri(mut self, uri: impl Into<Uri>) -> Self {
        self.metadata_document_uri = Some(uri.into());
        self
    }

    /// Sets the maximum resource nesting depth (`0` = unlimited).
    #[must_use]
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Sets the maximum inner-error chain depth.
    #[must_use]
    pub fn with_max_inner_error_depth(mut self, depth: usize) -> Self {
        self.max_inner_error_depth = depth;
        self
    }

    /// Enables indented output.
    #[must_use]
    pub fn with_indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the custom URL resolver callback.
    #[must_use]
    pub fn with_url_resolver(mut self, resolver: UrlResolver) -> Self {
        self.url_resolver = Some(resolver);
        self
    }

    /// Sets the instance annotation filter.
    #[must_use]
    pub fn with_annotation_filter(mut self, filter: AnnotationFilter) -> Self {
        self.annotation_filter = filter;
        self
    }

    /// Validates the settings; called once at writer construction.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBaseUri`] when a relative base URI is configured.
    pub fn validate(&self) -> Result<()> {
        if let Some(base) = &self.base_uri {
            uri::validate_base_uri(base)?;
        }
        if let Some(meta) = &self.metadata_document_uri {
            uri::validate_base_uri(meta)?;
        }
        Ok(())
    }

    /// Resolves a payload URI against these settings.
    ///
    /// # Errors
    ///
    /// See [`crate::uri::resolve`].
    pub fn resolve_uri(&self, value: &Uri, enforcement: UriEnforcement) -> Result<Uri> {
        uri::resolve(
            value,
            self.base_uri.as_ref(),
            self.url_resolver.as_ref(),
            enforcement,
        )
    }
}

impl std::fmt::Debug for WriterSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterSettings")
            .field("base_uri", &self.base_uri)
            .field("metadata_document_uri", &self.metadata_document_uri)
            .field("is_request", &self.is_request)
            .field("max_nesting_depth", &self.max_nesting_depth)
            .field("max_inner_error_depth", &self.max_inner_error_depth)
            .field("indent", &self.indent)
            .field(
                "enable_message_stream_disposal",
                &self.enable_message_stream_disposal,
            )
            .field("url_resolver", &self.url_resolver.as_ref().map(|_| ".."))
            .field("annotation_filter", &self.annotation_filter)
            .finish()
    }
}
