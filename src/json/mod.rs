//! JSON Light serialization.
//!
//! Two layers: [`crate::json::text::JsonTextWriter`] owns raw JSON text emission
//! (punctuation, indentation, escaping), and [`crate::json::payload::PayloadSerializer`]
//! renders validated payload nodes with the `@odata.*` control and property annotation
//! conventions of the JSON Light format.

pub mod payload;
pub mod text;

pub use payload::PayloadSerializer;
pub use text::JsonTextWriter;
