//! Low-level streaming JSON text writer.
//!
//! This module provides [`crate::json::text::JsonTextWriter`], a cursor-style emitter for
//! JSON text over any [`std::io::Write`] sink. It owns structural punctuation (commas,
//! braces, brackets, colons) and optional two-space indentation, while delegating string
//! escaping and number formatting to `serde_json` so scalar rendering matches the
//! ecosystem exactly.
//!
//! Output is byte-for-byte deterministic for a fixed call sequence; the payload layer
//! above relies on this for baseline-string comparisons.
//!
//! # Usage Examples
//!
//! ```rust
//! use jsonlight::json::text::JsonTextWriter;
//!
//! let mut out = Vec::new();
//! let mut json = JsonTextWriter::new(&mut out, false);
//! json.start_object()?;
//! json.name("value")?;
//! json.string("a\"b")?;
//! json.end_object()?;
//! drop(json);
//! assert_eq!(out, br#"{"value":"a\"b"}"#);
//! # Ok::<(), jsonlight::Error>(())
//! ```

use std::io::Write;

use crate::Result;

/// Streaming JSON text emitter with comma and indentation management.
///
/// Calls must form a valid JSON document: containers are opened and closed in a
/// balanced fashion and every `name` is followed by exactly one value or container.
/// The writer does not verify this; the payload layer above drives it from an
/// already-validated node sequence.
pub struct JsonTextWriter<W: Write> {
    out: W,
    indent: bool,
    // one entry per open container: whether it already holds an element
    containers: Vec<bool>,
    after_name: bool,
}

impl<W: Write> JsonTextWriter<W> {
    /// Creates a writer over the given sink. `indent` enables two-space indentation.
    pub fn new(out: W, indent: bool) -> Self {
        JsonTextWriter {
            out,
            indent,
            containers: Vec::new(),
            after_name: false,
        }
    }

    fn newline_and_indent(&mut self, depth: usize) -> Result<()> {
        self.out.write_all(b"\n")?;
        for _ in 0..depth {
            self.out.write_all(b"  ")?;
        }
        Ok(())
    }

    fn before_element(&mut self) -> Result<()> {
        if self.after_name {
            self.after_name = false;
            return Ok(());
        }
        if let Some(has_elements) = self.containers.last_mut() {
            let first = !*has_elements;
            *has_elements = true;
            if !first {
                self.out.write_all(b",")?;
            }
            if self.indent {
                let depth = self.containers.len();
                self.newline_and_indent(depth)?;
            }
        }
        Ok(())
    }

    /// Opens a JSON object.
    pub fn start_object(&mut self) -> Result<()> {
        self.before_element()?;
        self.out.write_all(b"{")?;
        self.containers.push(false);
        Ok(())
    }

    /// Closes the current JSON object.
    pub fn end_object(&mut self) -> Result<()> {
        let had_elements = self.containers.pop().unwrap_or(false);
        if self.indent && had_elements {
            let depth = self.containers.len();
            self.newline_and_indent(depth)?;
        }
        self.out.write_all(b"}")?;
        Ok(())
    }

    /// Opens a JSON array.
    pub fn start_array(&mut self) -> Result<()> {
        self.before_element()?;
        self.out.write_all(b"[")?;
        self.containers.push(false);
        Ok(())
    }

    /// Closes the current JSON array.
    pub fn end_array(&mut self) -> Result<()> {
        let had_elements = self.containers.pop().unwrap_or(false);
        if self.indent && had_elements {
            let depth = self.containers.len();
            self.newline_and_indent(depth)?;
        }
        self.out.write_all(b"]")?;
        Ok(())
    }

    /// Writes an object member name.
    pub fn name(&mut self, name: &str) -> Result<()> {
        self.before_element()?;
        serde_json::to_writer(&mut self.out, name)?;
        self.out.write_all(b":")?;
        if self.indent {
            self.out.write_all(b" ")?;
        }
        self.after_name = true;
        Ok(())
    }

    /// Writes a string value.
    pub fn string(&mut self, value: &str) -> Result<()> {
        self.before_element()?;
        serde_json::to_writer(&mut self.out, value)?;
        Ok(())
    }

    /// Writes an integer value.
    pub fn integer(&mut self, value: i64) -> Result<()> {
        self.before_element()?;
        serde_json::to_writer(&mut self.out, &value)?;
        Ok(())
    }

    /// Writes a floating point value.
    pub fn double(&mut self, value: f64) -> Result<()> {
        self.before_element()?;
        serde_json::to_writer(&mut self.out, &value)?;
        Ok(())
    }

    /// Writes a boolean value.
    pub fn boolean(&mut self, value: bool) -> Result<()> {
        self.before_element()?;
        self.out.write_all(if value { b"true" } else { b"false" })?;
        Ok(())
    }

    /// Writes a `null` value.
    pub fn null(&mut self) -> Result<()> {
        self.before_element()?;
        self.out.write_all(b"null")?;
        Ok(())
    }

    /// Flushes the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
