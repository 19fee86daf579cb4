//! Collection item type checking.

use crate::edm::{collection_item_type, EdmModel, EdmTypeKind};
use crate::model::Value;
use crate::{Error, Result};

/// The payload kind of a value, or `None` for `null` (which matches any kind).
pub(crate) fn payload_kind(value: &Value) -> Option<EdmTypeKind> {
    match value {
        Value::Null => None,
        Value::Boolean(_) | Value::Integer(_) | Value::Double(_) | Value::String(_) => {
            Some(EdmTypeKind::Primitive)
        }
        Value::Collection(_) => Some(EdmTypeKind::Collection),
        Value::Complex(_) => Some(EdmTypeKind::Complex),
        Value::Stream(_) => Some(EdmTypeKind::Stream),
    }
}

fn kind_of_type_name(model: Option<&EdmModel>, name: &str) -> Option<EdmTypeKind> {
    if collection_item_type(name).is_some() {
        return Some(EdmTypeKind::Collection);
    }
    if let Some(model) = model {
        if let Some(ty) = model.find_type(name) {
            return Some(ty.kind);
        }
    }
    name.starts_with("Edm.").then_some(EdmTypeKind::Primitive)
}

/// Validates that every item of a collection matches the collection's item type, by
/// kind and by name.
///
/// When no item type is declared or stated, the first item fixes the expectation and
/// every later item is checked against it. The first mismatch wins and reports the
/// offending pair.
pub struct CollectionItemValidator<'a> {
    model: Option<&'a EdmModel>,
    expected_name: Option<String>,
    expected_kind: Option<EdmTypeKind>,
}

impl<'a> CollectionItemValidator<'a> {
    /// Creates a validator for a collection with the given declared item type, if any.
    #[must_use]
    pub fn new(model: Option<&'a EdmModel>, expected_item_type: Option<&str>) -> Self {
        let expected_kind = expected_item_type.and_then(|name| kind_of_type_name(model, name));
        CollectionItemValidator {
            model,
            expected_name: expected_item_type.map(str::to_string),
            expected_kind,
        }
    }

    /// Validates one item against the expectation established so far.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleItemTypeKind`] or [`Error::IncompatibleItemTypeName`]
    /// on the first mismatching item.
    pub fn validate_item(&mut self, item: &Value) -> Result<()> {
        let Some(actual_kind) = payload_kind(item) else {
            return Ok(()); // null matches any item type
        };
        if let Some(expected_kind) = self.expected_kind {
            if actual_kind != expected_kind {
                return Err(Error::IncompatibleItemTypeKind {
                    expected: expected_kind.to_string(),
                    actual: actual_kind.to_string(),
                });
            }
        } else {
            self.expected_kind = Some(actual_kind);
        }

        if let Some(stated) = item.type_name() {
            match &self.expected_name {
                Some(expected) if expected != stated => {
                    return Err(Error::IncompatibleItemTypeName {
                        expected: expected.clone(),
                        actual: stated.to_string(),
                    });
                }
                Some(_) => {}
                None => {
                    self.expected_name = Some(stated.to_string());
                    if self.expected_kind.is_none() {
                        self.expected_kind = kind_of_type_name(self.model, stated);
                    }
                }
            }
        }
        Ok(())
    }
}
