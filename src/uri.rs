//! URI representation and resolution policy for payload URLs.
//!
//! This module provides the [`crate::uri::Uri`] type, a thin wrapper over the original
//! string form of a URI, together with the resolution policy applied to every URI-valued
//! field the writer emits. The policy decides whether a URI is written absolute, relative,
//! or rejected, given the configured base URI and an optional custom resolver callback.
//!
//! # Architecture
//!
//! Resolution is a pure function of `(uri, base, resolver, enforcement)`:
//!
//! 1. A custom resolver, when configured, is consulted first and its non-`None` result is
//!    used verbatim. The resolver is invoked exactly once per URI value written.
//! 2. An absolute URI passes through unchanged.
//! 3. A relative URI is combined with the base URI when one is configured.
//! 4. A relative URI without a base fails under [`UriEnforcement::Strict`]; the JSON
//!    format writes the literal relative string instead ([`UriEnforcement::JsonPermissive`]).
//!
//! The original string form is preserved throughout: no normalization, percent-encoding,
//! or case folding is applied, since the wire output must be byte-for-byte stable.
//!
//! # Key Components
//!
//! - [`crate::uri::Uri`] - URI value preserving its original string form
//! - [`crate::uri::UriEnforcement`] - strict vs. JSON-permissive relative-URI handling
//! - [`crate::uri::resolve`] - the resolution policy entry point

use crate::{Error, Result};

/// A URI value preserving its original string form.
///
/// The writer never re-encodes or normalizes URIs; equality and resolver matching are
/// by original-string comparison. Absoluteness is determined by the presence of an
/// RFC 3986 scheme prefix.
///
/// # Examples
///
/// ```rust
/// use jsonlight::uri::Uri;
///
/// assert!(Uri::new("http://odata.org/link").is_absolute());
/// assert!(!Uri::new("Orders(1)").is_absolute());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri(String);

impl Uri {
    /// Creates a URI from its string form.
    pub fn new(value: impl Into<String>) -> Self {
        Uri(value.into())
    }

    /// Returns the original string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the URI carries an RFC 3986 scheme (`ALPHA *( ALPHA / DIGIT
    /// / "+" / "-" / "." ) ":"`).
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        let bytes = self.0.as_bytes();
        let Some(colon) = self.0.find(':') else {
            return false;
        };
        if colon == 0 || !bytes[0].is_ascii_alphabetic() {
            return false;
        }
        bytes[1..colon]
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
    }

    /// Combines an absolute base URI with a relative reference.
    ///
    /// Handles the reference forms that occur in OData payloads: network-path (`//h/p`),
    /// absolute-path (`/p`), query/fragment-only (`?q`, `#f`) and relative-path
    /// references. The base URI must be absolute.
    #[must_use]
    pub fn join(base: &Uri, relative: &Uri) -> Uri {
        let rel = relative.as_str();
        if rel.is_empty() {
            return base.clone();
        }
        if relative.is_absolute() {
            return relative.clone();
        }

        let base_str = base.as_str();
        // scheme always present on an absolute base
        let scheme_end = base_str.find(':').unwrap_or(0);
        let after_scheme = &base_str[scheme_end + 1..];

        if let Some(stripped) = rel.strip_prefix("//") {
            return Uri::new(format!("{}://{}", &base_str[..scheme_end], stripped));
        }

        let (authority, path_and_rest) = if let Some(rest) = after_scheme.strip_prefix("//") {
            let end = rest
                .find(|c| matches!(c, '/' | '?' | '#'))
                .unwrap_or(rest.len());
            (&rest[..end], &rest[end..])
        } else {
            ("", after_scheme)
        };
        let prefix_len = base_str.len() - path_and_rest.len();
        let prefix = &base_str[..prefix_len];

        // drop query and fragment from the base path before merging
        let path_end = path_and_rest
            .find(|c| matches!(c, '?' | '#'))
            .unwrap_or(path_and_rest.len());
        let path = &path_and_rest[..path_end];

        if rel.starts_with('/') {
            return Uri::new(format!("{prefix}{rel}"));
        }
        if rel.starts_with('?') || rel.starts_with('#') {
            return Uri::new(format!("{prefix}{path}{rel}"));
        }

        let _ = authority;
        match path.rfind('/') {
            Some(slash) => Uri::new(format!("{prefix}{}{rel}", &path[..=slash])),
            None => Uri::new(format!("{prefix}/{rel}")),
        }
    }
}

impl std::fmt::Display for Uri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Uri {
    fn from(value: &str) -> Self {
        Uri::new(value)
    }
}

impl From<String> for Uri {
    fn from(value: String) -> Self {
        Uri(value)
    }
}

/// Relative-URI handling mode for [`resolve`].
///
/// The legacy URI-bearing format rejects relative URIs outright when no base URI is
/// configured; the JSON format writes the literal relative string in that case. The
/// asymmetry is preserved from the original protocol behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriEnforcement {
    /// Relative URI without a base URI is an error.
    Strict,
    /// Relative URI without a base URI is written verbatim.
    JsonPermissive,
}

/// Callback consulted before the built-in resolution rules.
///
/// Invoked with `(base_uri, uri)`; a `Some` result is used verbatim, absolute or not.
pub type UrlResolver = Box<dyn Fn(Option<&Uri>, &Uri) -> Option<Uri> + Send + Sync>;

/// Validates a configured base URI, which must be absolute.
///
/// # Errors
///
/// Returns [`Error::InvalidBaseUri`] when the base URI is relative.
pub fn validate_base_uri(base: &Uri) -> Result<()> {
    if base.is_absolute() {
        Ok(())
    } else {
        Err(Error::InvalidBaseUri(base.as_str().to_string()))
    }
}

/// Resolves a URI-valued payload field according to the writer's resolution policy.
///
/// The custom resolver, when present, is consulted exactly once per call; its non-`None`
/// result wins. Otherwise absolute URIs pass through, relative URIs are joined with the
/// base URI, and a relative URI with no base either fails (strict) or passes through
/// verbatim (JSON-permissive).
///
/// # Errors
///
/// Returns [`Error::RelativeUriWithoutBaseUri`] for a relative URI with no base URI and
/// no resolver result under [`UriEnforcement::Strict`].
pub fn resolve(
    uri: &Uri,
    base: Option<&Uri>,
    resolver: Option<&UrlResolver>,
    enforcement: UriEnforcement,
) -> Result<Uri> {
    if let Some(resolver) = resolver {
        if let Some(resolved) = resolver(base, uri) {
            return Ok(resolved);
        }
    }
    if uri.is_absolute() {
        return Ok(uri.clone());
    }
    match (base, enforcement) {
        (Some(base), _) => Ok(Uri::join(base, uri)),
        (None, UriEnforcement::JsonPermissive) => Ok(uri.clone()),
        (None, UriEnforcement::Strict) => {
            Err(Error::RelativeUriWithoutBaseUri(uri.as_str().to_string()))
        }
    }
}
