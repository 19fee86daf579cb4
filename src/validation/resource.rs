//! Resource, property and navigation-link validation rules.

use crate::edm::{collection_item_type, EdmModel, EdmType, EdmTypeKind};
use crate::model::{ComplexValue, NestedResourceInfo, Property, Resource, StreamReference, Value};
use crate::uri::UriEnforcement;
use crate::validation::collection::payload_kind as value_kind;
use crate::validation::{CollectionItemValidator, ValidationContext};
use crate::{Error, Result};

fn resolve_named_type<'a>(model: &'a EdmModel, name: &str) -> Result<&'a EdmType> {
    if name.is_empty() {
        return Err(Error::TypeNameMustNotBeEmpty);
    }
    model
        .find_type(name)
        .ok_or_else(|| Error::UnrecognizedTypeName(name.to_string()))
}

fn declared_kind(model: &EdmModel, type_name: &str) -> Result<EdmTypeKind> {
    if let Some(item) = collection_item_type(type_name) {
        // the item type must itself resolve
        resolve_named_type(model, item)?;
        return Ok(EdmTypeKind::Collection);
    }
    Ok(resolve_named_type(model, type_name)?.kind)
}

fn kind_mismatch(value: &Value, expected: EdmTypeKind, actual: EdmTypeKind) -> Error {
    match value.type_name() {
        Some(stated) => Error::IncorrectTypeKind {
            type_name: stated.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        },
        None => Error::IncorrectTypeKindNoTypeName {
            expected: expected.to_string(),
            actual: actual.to_string(),
        },
    }
}

/// Validates a resource against the model, returning its resolved entity type.
///
/// `expected_type` is the type implied by the payload position (entity set element
/// type or navigation target); it is used when the resource states no type name of
/// its own. Without a model, only structural hygiene (empty type names, stream link
/// combinations) is checked.
///
/// # Errors
///
/// See the type-name, property-existence and media-resource rules on [`Error`].
pub fn validate_resource<'m>(
    ctx: ValidationContext<'m, '_>,
    resource: &Resource,
    expected_type: Option<&'m EdmType>,
) -> Result<Option<&'m EdmType>> {
    let resolved = match (&resource.type_name, ctx.model) {
        (Some(name), Some(model)) => {
            let ty = resolve_named_type(model, name)?;
            if ty.kind != EdmTypeKind::Entity {
                return Err(Error::IncorrectTypeKind {
                    type_name: name.clone(),
                    expected: EdmTypeKind::Entity.to_string(),
                    actual: ty.kind.to_string(),
                });
            }
            Some(ty)
        }
        (Some(name), None) => {
            if name.is_empty() {
                return Err(Error::TypeNameMustNotBeEmpty);
            }
            None
        }
        (None, Some(_)) => match expected_type {
            Some(ty) => Some(ty),
            None => return Err(Error::MissingTypeNameWithMetadata),
        },
        (None, None) => None,
    };

    if let Some(ty) = resolved {
        if resource.media_resource.is_some() && !ty.has_stream {
            return Err(Error::ResourceWithMediaResourceAndNonMleType(ty.name.clone()));
        }
        if resource.media_resource.is_none() && ty.has_stream {
            return Err(Error::ResourceWithoutMediaResourceAndMleType(ty.name.clone()));
        }
    }
    if let Some(stream) = &resource.media_resource {
        validate_stream_reference(stream, "default", true)?;
    }

    for property in &resource.properties {
        validate_property(ctx, resolved, property)?;
    }
    Ok(resolved)
}

/// Validates a top-level property payload.
///
/// The property has no owning type, so only the model-free hygiene rules apply.
///
/// # Errors
///
/// Returns the value-hygiene errors documented on [`Error`].
pub fn validate_top_level_property(ctx: ValidationContext<'_, '_>, property: &Property) -> Result<()> {
    validate_property(ctx, None, property)
}

fn validate_property(
    ctx: ValidationContext<'_, '_>,
    owner: Option<&EdmType>,
    property: &Property,
) -> Result<()> {
    let (Some(owner), Some(model)) = (owner, ctx.model) else {
        return validate_value_hygiene(&property.value);
    };

    match owner.find_property(&property.name) {
        Some(declared) => {
            let is_stream_value = matches!(property.value, Value::Stream(_));
            if declared.is_stream() != is_stream_value && !matches!(property.value, Value::Null) {
                return Err(Error::MismatchPropertyKindForStreamProperty(
                    property.name.clone(),
                ));
            }
            if let Value::Stream(stream) = &property.value {
                return validate_stream_reference(stream, &property.name, false);
            }

            let expected = declared_kind(model, &declared.type_name)?;
            if let Some(actual) = value_kind(&property.value) {
                if actual != expected {
                    return Err(kind_mismatch(&property.value, expected, actual));
                }
            }
            match &property.value {
                Value::Complex(complex) => {
                    let declared_type = resolve_named_type(model, &declared.type_name)?;
                    validate_complex(ctx, complex, Some(declared_type))
                }
                Value::Collection(collection) => {
                    let declared_item = collection_item_type(&declared.type_name);
                    let mut validator = CollectionItemValidator::new(ctx.model, declared_item);
                    for item in &collection.items {
                        validator.validate_item(item)?;
                        if let Value::Complex(complex) = item {
                            let item_type = declared_item
                                .map(|name| resolve_named_type(model, name))
                                .transpose()?;
                            validate_complex(ctx, complex, item_type)?;
                        }
                    }
                    Ok(())
                }
                _ => Ok(()),
            }
        }
        None if owner.is_open => validate_open_property(ctx, property),
        None => Err(Error::PropertyDoesNotExistOnType {
            property: property.name.clone(),
            type_name: owner.name.clone(),
        }),
    }
}

/// Open types accept undeclared structural properties, but structured values must state
/// a resolvable type name when metadata is present.
fn validate_open_property(ctx: ValidationContext<'_, '_>, property: &Property) -> Result<()> {
    let Some(model) = ctx.model else {
        return validate_value_hygiene(&property.value);
    };
    match &property.value {
        Value::Complex(complex) => match &complex.type_name {
            Some(name) => {
                let ty = resolve_named_type(model, name)?;
                if ty.kind != EdmTypeKind::Complex {
                    return Err(kind_mismatch(
                        &property.value,
                        EdmTypeKind::Complex,
                        ty.kind,
                    ));
                }
                validate_complex(ctx, complex, Some(ty))
            }
            None => Err(Error::MissingTypeNameWithMetadata),
        },
        Value::Collection(collection) => match &collection.type_name {
            Some(name) => {
                let item = collection_item_type(name)
                    .ok_or_else(|| Error::UnrecognizedTypeName(name.clone()))?;
                resolve_named_type(model, item)?;
                let mut validator = CollectionItemValidator::new(ctx.model, Some(item));
                for value in &collection.items {
                    validator.validate_item(value)?;
                }
                Ok(())
            }
            None => Err(Error::MissingTypeNameWithMetadata),
        },
        Value::Stream(stream) => validate_stream_reference(stream, &property.name, false),
        _ => Ok(()),
    }
}

fn validate_complex(
    ctx: ValidationContext<'_, '_>,
    complex: &ComplexValue,
    expected: Option<&EdmType>,
) -> Result<()> {
    let resolved = match (&complex.type_name, ctx.model) {
        (Some(name), Some(model)) => {
            let ty = resolve_named_type(model, name)?;
            if ty.kind != EdmTypeKind::Complex {
                return Err(Error::IncorrectTypeKind {
                    type_name: name.clone(),
                    expected: EdmTypeKind::Complex.to_string(),
                    actual: ty.kind.to_string(),
                });
            }
            Some(ty)
        }
        (Some(name), None) => {
            if name.is_empty() {
                return Err(Error::TypeNameMustNotBeEmpty);
            }
            None
        }
        (None, Some(_)) => match expected {
            Some(ty) => Some(ty),
            None => return Err(Error::MissingTypeNameWithMetadata),
        },
        (None, None) => None,
    };
    for property in &complex.properties {
        validate_property(ctx, resolved, property)?;
    }
    Ok(())
}

/// Model-free checks: stated type names must not be empty, stream references must be
/// well formed.
fn validate_value_hygiene(value: &Value) -> Result<()> {
    match value {
        Value::Complex(complex) => {
            if complex.type_name.as_deref() == Some("") {
                return Err(Error::TypeNameMustNotBeEmpty);
            }
            for property in &complex.properties {
                validate_value_hygiene(&property.value)?;
            }
            Ok(())
        }
        Value::Collection(collection) => {
            if collection.type_name.as_deref() == Some("") {
                return Err(Error::TypeNameMustNotBeEmpty);
            }
            for item in &collection.items {
                validate_value_hygiene(item)?;
            }
            Ok(())
        }
        Value::Stream(stream) => validate_stream_reference(stream, "stream property", false),
        _ => Ok(()),
    }
}

/// Validates a stream reference's link combination.
///
/// Every stream reference needs at least one of a read link or an edit link; an ETag
/// requires an edit link; a content type must be non-empty. The default stream of a
/// media link entry additionally requires read link and content type to be set
/// together.
///
/// # Errors
///
/// See the `StreamReference*` and `DefaultStream*` variants on [`Error`].
pub fn validate_stream_reference(
    stream: &StreamReference,
    name: &str,
    is_default: bool,
) -> Result<()> {
    if stream.read_link.is_none() && stream.edit_link.is_none() {
        return Err(Error::StreamReferenceMustHaveEditLinkOrReadLink(
            name.to_string(),
        ));
    }
    if stream.etag.is_some() && stream.edit_link.is_none() {
        return Err(Error::StreamReferenceEtagWithoutEditLink(name.to_string()));
    }
    if stream.content_type.as_deref() == Some("") {
        return Err(Error::StreamReferenceEmptyContentType(name.to_string()));
    }
    if is_default {
        if stream.content_type.is_some() && stream.read_link.is_none() {
            return Err(Error::DefaultStreamWithContentTypeWithoutReadLink);
        }
        if stream.read_link.is_some() && stream.content_type.is_none() {
            return Err(Error::DefaultStreamWithReadLinkWithoutContentType);
        }
    }
    Ok(())
}

/// Validates a nested resource info against its owner type, returning the effective
/// cardinality (explicit `is_collection`, or the one inferred from the model).
///
/// Under [`UriEnforcement::Strict`] the link must also carry a URL; the JSON format
/// imposes no URL requirement.
///
/// # Errors
///
/// See the navigation-property and `NavigationLinkMustSpecifyUrl` rules on [`Error`].
pub fn validate_nested_resource_info(
    ctx: ValidationContext<'_, '_>,
    link: &NestedResourceInfo,
    owner: Option<&EdmType>,
    enforcement: UriEnforcement,
) -> Result<Option<bool>> {
    if link.name.is_empty() {
        return Err(Error::ArgumentNull("nested resource info name"));
    }
    if enforcement == UriEnforcement::Strict && link.url.is_none() {
        return Err(Error::NavigationLinkMustSpecifyUrl(link.name.clone()));
    }

    let mut inferred = None;
    if let (Some(owner), Some(model)) = (owner, ctx.model) {
        if let Some(nav) = owner.find_navigation(&link.name) {
            inferred = Some(nav.is_collection);
        } else if let Some(declared) = owner.find_property(&link.name) {
            let kind = if declared.is_stream() {
                EdmTypeKind::Stream.to_string()
            } else {
                declared_kind(model, &declared.type_name)?.to_string()
            };
            return Err(Error::NavigationPropertyExpected {
                property: link.name.clone(),
                type_name: owner.name.clone(),
                kind,
            });
        } else if owner.is_open {
            return Err(Error::OpenNavigationProperty {
                property: link.name.clone(),
                type_name: owner.name.clone(),
            });
        } else {
            return Err(Error::PropertyDoesNotExistOnType {
                property: link.name.clone(),
                type_name: owner.name.clone(),
            });
        }
    }
    Ok(link.is_collection.or(inferred))
}
