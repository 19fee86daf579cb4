// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # jsonlight
//!
//! A streaming writer for OData JSON Light payloads.
//!
//! `jsonlight` serializes entities ("resources"), entity collections ("resource sets"),
//! navigation links, entity reference links, errors, service documents and top-level
//! properties as JSON Light text. Payloads are written incrementally through a strict
//! state machine, so arbitrarily large collections stream without buffering, and every
//! item is validated against an optional EDM metadata model before a single byte of it
//! reaches the output.
//!
//! ## Features
//!
//! - **Streaming output** - payloads are emitted as they are written, never buffered
//! - **Strict state machine** - illegal write orders fail before touching the output
//! - **Metadata validation** - stated type names, declared properties, navigation
//!   cardinality and media resources are checked against an [`edm::EdmModel`]
//! - **Request/response asymmetry** - count, next links, errors and entity reference
//!   link collections are response-only; `@odata.bind` links are request-only
//! - **URI resolution** - relative URIs resolve against a base URI, with an optional
//!   caller-supplied resolver hook
//!
//! ## Quick Start
//!
//! Add `jsonlight` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! jsonlight = "0.2"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust,no_run
//! use jsonlight::prelude::*;
//!
//! let mut out = Vec::new();
//! let settings = WriterSettings::response()
//!     .with_metadata_document_uri("http://odata.org/svc/$metadata");
//! let mut writer = Writer::new(&mut out, settings)?;
//! writer.write_start_resource_set(ResourceSet::new().with_count(2))?;
//! writer.write_start_resource(Resource::new().with_property("Id", Value::Integer(1)))?;
//! writer.write_end()?;
//! writer.write_end()?;
//! writer.finish()?;
//! # Ok::<(), jsonlight::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `jsonlight` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`model`] - The payload object model handed to the writer
//! - [`edm`] - A minimal EDM metadata model for validation
//! - [`writer`] - The state machine driving payload production
//! - [`validation`] - Metadata and hygiene checks run before serialization
//! - [`json`] - JSON text emission and the JSON Light annotation conventions
//! - [`settings`] - Writer configuration, including URI resolution
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Writer errors are terminal:
//! after any failed write the writer refuses further calls with
//! [`Error::FromErrorState`] and the partially written output must be discarded.
//!
//! ```rust,no_run
//! use jsonlight::{model::Resource, settings::WriterSettings, writer::Writer, Error};
//!
//! let mut out = Vec::new();
//! let mut writer = Writer::new(&mut out, WriterSettings::response())?;
//! match writer.write_start_resource(Resource::new().with_type_name("")) {
//!     Err(Error::TypeNameMustNotBeEmpty) => println!("type names must be non-empty"),
//!     other => println!("{other:?}"),
//! }
//! # Ok::<(), jsonlight::Error>(())
//! ```

pub(crate) mod error;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust,no_run
/// use jsonlight::prelude::*;
///
/// let mut out = Vec::new();
/// let mut writer = Writer::new(&mut out, WriterSettings::response())?;
/// writer.write_start_resource(Resource::new())?;
/// writer.write_end()?;
/// writer.finish()?;
/// # Ok::<(), jsonlight::Error>(())
/// ```
pub mod prelude;

/// The payload object model.
///
/// Plain data types describing what gets written: [`model::Resource`],
/// [`model::ResourceSet`], [`model::NestedResourceInfo`], entity reference links,
/// errors, service documents and property values. The writer consumes these by value;
/// they carry no serialization logic of their own.
pub mod model;

/// A minimal EDM metadata model.
///
/// [`edm::EdmModel`] holds named entity, complex and primitive types plus the entity
/// sets and singletons of the container. Binding a model to the writer enables
/// metadata validation and navigation cardinality inference.
pub mod edm;

/// URI handling: absolute/relative classification, reference resolution and the
/// format-dependent enforcement policy for relative URIs without a base.
pub mod uri;

/// Writer configuration: request/response mode, base and metadata document URIs,
/// nesting limits, indentation and the instance annotation filter.
pub mod settings;

/// Payload validation against the metadata model and the model-free hygiene rules.
pub mod validation;

/// JSON text emission and JSON Light payload rendering.
pub mod json;

/// The payload writer state machine.
///
/// [`writer::Writer`] is the main entry point of the crate. See the module
/// documentation for the write protocol and a usage example.
pub mod writer;

pub use error::Error;
pub use settings::{AnnotationFilter, WriterSettings};
pub use writer::{Writer, WriterState};

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
