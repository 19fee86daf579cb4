//! Integration tests for the writer's state machine and validation rules.
//!
//! Covers the rejection matrix: illegal transitions, nesting depth limits, the
//! request/response asymmetries, metadata validation failures, and the terminal
//! error state after any failed write.

use jsonlight::prelude::*;

fn writer(settings: WriterSettings, out: &mut Vec<u8>) -> Writer<'_, &mut Vec<u8>> {
    Writer::new(out, settings).expect("settings are valid")
}

fn sample_model() -> EdmModel {
    EdmModel::new()
        .with_type(
            EdmType::entity("Model.Order")
                .with_property("Id", "Edm.Int64")
                .with_navigation("Items", "Model.OrderLine", true)
                .with_navigation("Customer", "Model.Customer", false),
        )
        .with_type(EdmType::entity("Model.OrderLine").with_property("Sku", "Edm.String"))
        .with_type(EdmType::entity("Model.Customer").with_property("Name", "Edm.String"))
        .with_type(EdmType::complex("Model.Address").with_property("City", "Edm.String"))
        .with_entity_set("Orders", "Model.Order")
}

#[test]
fn test_resource_set_directly_in_resource_set() {
    let mut out = Vec::new();
    let mut w = writer(WriterSettings::response(), &mut out);
    w.write_start_resource_set(ResourceSet::new()).unwrap();
    let error = w.write_start_resource_set(ResourceSet::new()).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Cannot transition from state 'ResourceSet' to state 'ResourceSet'"
    );
}

#[test]
fn test_nested_info_requires_an_open_resource() {
    let mut out = Vec::new();
    let mut w = writer(WriterSettings::response(), &mut out);
    w.write_start_resource_set(ResourceSet::new()).unwrap();
    assert!(matches!(
        w.write_start_nested_resource_info(NestedResourceInfo::new("Items").collection(true)),
        Err(Error::InvalidStateTransition { .. })
    ));
}

#[test]
fn test_depth_limit_is_enforced_at_the_boundary() {
    // limit 3: three resources on the stack are fine, the fourth is rejected
    let settings = WriterSettings::response().with_max_nesting_depth(3);
    let mut out = Vec::new();
    let mut w = writer(settings, &mut out);
    for _ in 0..3 {
        w.write_start_resource(Resource::new()).unwrap();
        w.write_start_nested_resource_info(NestedResourceInfo::new("Customer").collection(false))
            .unwrap();
    }
    assert!(matches!(
        w.write_start_resource(Resource::new()),
        Err(Error::RecursionLimit(3))
    ));
}

#[test]
fn test_zero_depth_limit_means_unlimited() {
    let settings = WriterSettings::response().with_max_nesting_depth(0);
    let mut out = Vec::new();
    let mut w = writer(settings, &mut out);
    for _ in 0..64 {
        w.write_start_resource(Resource::new()).unwrap();
        w.write_start_nested_resource_info(NestedResourceInfo::new("Customer").collection(false))
            .unwrap();
    }
    w.write_start_resource(Resource::new()).unwrap();
}

#[test]
fn test_failed_write_is_terminal() {
    let mut out = Vec::new();
    let mut w = writer(WriterSettings::response(), &mut out);
    w.write_start_resource(Resource::new()).unwrap();
    assert!(w
        .write_start_resource_set(ResourceSet::new())
        .is_err());
    assert_eq!(w.state(), WriterState::Error);
    assert!(matches!(w.write_end(), Err(Error::FromErrorState)));
    assert!(matches!(w.finish(), Err(Error::FromErrorState)));
}

#[test]
fn test_request_rejections() {
    let mut out = Vec::new();
    let mut w = writer(WriterSettings::request(), &mut out);
    assert!(matches!(
        w.write_error(&ODataError::new("code", "message")),
        Err(Error::ErrorInRequest)
    ));

    let mut out = Vec::new();
    let mut w = writer(WriterSettings::request(), &mut out);
    assert!(matches!(
        w.write_service_document(&ServiceDocument::new()),
        Err(Error::ServiceDocumentInRequest)
    ));

    let mut out = Vec::new();
    let mut w = writer(WriterSettings::request(), &mut out);
    assert!(matches!(
        w.write_entity_reference_links(&EntityReferenceLinks::new(vec![])),
        Err(Error::EntityReferenceLinksInRequestNotAllowed)
    ));

    let mut out = Vec::new();
    let mut w = writer(WriterSettings::request(), &mut out);
    assert!(matches!(
        w.write_start_resource_set(ResourceSet::new().with_count(1)),
        Err(Error::QueryCountInRequest)
    ));

    let mut out = Vec::new();
    let mut w = writer(WriterSettings::request(), &mut out);
    w.write_start_resource_set(ResourceSet::new()).unwrap();
    assert!(matches!(
        w.set_next_page_link("http://odata.org/next"),
        Err(Error::NextPageLinkInRequest(_))
    ));
}

#[test]
fn test_response_rejects_nested_entity_reference_links() {
    let mut out = Vec::new();
    let mut w = writer(WriterSettings::response(), &mut out);
    w.write_start_resource(Resource::new()).unwrap();
    w.write_start_nested_resource_info(NestedResourceInfo::new("Items").collection(true))
        .unwrap();
    assert!(matches!(
        w.write_entity_reference_link(EntityReferenceLink::new("http://odata.org/Items(1)")),
        Err(Error::EntityReferenceLinkInResponse)
    ));
}

#[test]
fn test_binding_requires_known_cardinality() {
    // IsCollection may stay unset only when the model can supply it; without a
    // model the nested reference link cannot be rendered and must fail
    let mut out = Vec::new();
    let mut w = writer(WriterSettings::request(), &mut out);
    w.write_start_resource(Resource::new()).unwrap();
    w.write_start_nested_resource_info(NestedResourceInfo::new("Items"))
        .unwrap();
    assert!(matches!(
        w.write_entity_reference_link(EntityReferenceLink::new("http://odata.org/Items(1)")),
        Err(Error::NavigationLinkMustSpecifyIsCollection(name)) if name == "Items"
    ));
    assert_eq!(w.state(), WriterState::Error);
}

#[test]
fn test_request_rejects_deferred_nested_link() {
    let mut out = Vec::new();
    let mut w = writer(WriterSettings::request(), &mut out);
    w.write_start_resource(Resource::new()).unwrap();
    w.write_start_nested_resource_info(NestedResourceInfo::new("Items").collection(true))
        .unwrap();
    assert!(matches!(
        w.write_end(),
        Err(Error::DeferredLinkInRequest(name)) if name == "Items"
    ));
}

#[test]
fn test_singleton_link_rejects_second_content_item() {
    let mut out = Vec::new();
    let mut w = writer(WriterSettings::response(), &mut out);
    w.write_start_resource(Resource::new()).unwrap();
    w.write_start_nested_resource_info(NestedResourceInfo::new("Customer").collection(false))
        .unwrap();
    w.write_start_resource(Resource::new()).unwrap();
    w.write_end().unwrap();
    assert!(matches!(
        w.write_null_resource(),
        Err(Error::MultipleItemsInNestedResourceInfoWithContent(name)) if name == "Customer"
    ));
}

#[test]
fn test_collection_link_rejects_single_resource() {
    let mut out = Vec::new();
    let mut w = writer(WriterSettings::response(), &mut out);
    w.write_start_resource(Resource::new()).unwrap();
    w.write_start_nested_resource_info(NestedResourceInfo::new("Items").collection(true))
        .unwrap();
    assert!(matches!(
        w.write_start_resource(Resource::new()),
        Err(Error::CollectionNestedResourceInfoWithResource(name)) if name == "Items"
    ));
}

#[test]
fn test_singleton_link_rejects_resource_set() {
    let mut out = Vec::new();
    let mut w = writer(WriterSettings::response(), &mut out);
    w.write_start_resource(Resource::new()).unwrap();
    w.write_start_nested_resource_info(NestedResourceInfo::new("Customer").collection(false))
        .unwrap();
    assert!(matches!(
        w.write_start_resource_set(ResourceSet::new()),
        Err(Error::SingletonNestedResourceInfoWithResourceSet(name)) if name == "Customer"
    ));
}

#[test]
fn test_top_level_null_resource_is_an_argument_error() {
    let mut out = Vec::new();
    let mut w = writer(WriterSettings::response(), &mut out);
    assert!(matches!(
        w.write_null_resource(),
        Err(Error::ArgumentNull("resource"))
    ));
}

#[test]
fn test_unknown_type_name_with_model() {
    let model = sample_model();
    let mut out = Vec::new();
    let mut w = Writer::new(&mut out, WriterSettings::response())
        .unwrap()
        .with_model(&model);
    assert!(matches!(
        w.write_start_resource(Resource::new().with_type_name("Model.DoesNotExist")),
        Err(Error::UnrecognizedTypeName(name)) if name == "Model.DoesNotExist"
    ));
}

#[test]
fn test_complex_type_name_on_a_resource() {
    let model = sample_model();
    let mut out = Vec::new();
    let mut w = Writer::new(&mut out, WriterSettings::response())
        .unwrap()
        .with_model(&model);
    assert!(matches!(
        w.write_start_resource(Resource::new().with_type_name("Model.Address")),
        Err(Error::IncorrectTypeKind { .. })
    ));
}

#[test]
fn test_missing_type_name_without_position_type() {
    let model = sample_model();
    let mut out = Vec::new();
    let mut w = Writer::new(&mut out, WriterSettings::response())
        .unwrap()
        .with_model(&model);
    assert!(matches!(
        w.write_start_resource(Resource::new()),
        Err(Error::MissingTypeNameWithMetadata)
    ));
}

#[test]
fn test_undeclared_property_on_closed_type() {
    let model = sample_model();
    let mut out = Vec::new();
    let mut w = Writer::new(&mut out, WriterSettings::response())
        .unwrap()
        .with_model(&model)
        .with_navigation_source("Orders");
    assert!(matches!(
        w.write_start_resource(Resource::new().with_property("Bogus", Value::Integer(1))),
        Err(Error::PropertyDoesNotExistOnType { property, type_name })
            if property == "Bogus" && type_name == "Model.Order"
    ));
}

#[test]
fn test_structural_property_used_as_navigation() {
    let model = sample_model();
    let mut out = Vec::new();
    let mut w = Writer::new(&mut out, WriterSettings::response())
        .unwrap()
        .with_model(&model)
        .with_navigation_source("Orders");
    w.write_start_resource(Resource::new()).unwrap();
    assert!(matches!(
        w.write_start_nested_resource_info(NestedResourceInfo::new("Id")),
        Err(Error::NavigationPropertyExpected { .. })
    ));
}

#[test]
fn test_navigation_cardinality_is_inferred_from_the_model() {
    let model = sample_model();
    let mut out = Vec::new();
    let mut w = Writer::new(&mut out, WriterSettings::response())
        .unwrap()
        .with_model(&model)
        .with_navigation_source("Orders");
    w.write_start_resource(Resource::new()).unwrap();
    // "Items" is declared collection-valued; no explicit cardinality needed
    w.write_start_nested_resource_info(NestedResourceInfo::new("Items"))
        .unwrap();
    assert!(matches!(
        w.write_start_resource(
            Resource::new().with_type_name("Model.OrderLine")
        ),
        Err(Error::CollectionNestedResourceInfoWithResource(name)) if name == "Items"
    ));
}

#[test]
fn test_nested_resources_are_validated_against_the_navigation_target() {
    let model = sample_model();
    let mut out = Vec::new();
    let mut w = Writer::new(&mut out, WriterSettings::response())
        .unwrap()
        .with_model(&model)
        .with_navigation_source("Orders");
    w.write_start_resource(Resource::new()).unwrap();
    w.write_start_nested_resource_info(NestedResourceInfo::new("Items"))
        .unwrap();
    w.write_start_resource_set(ResourceSet::new()).unwrap();
    // no stated type: the element type comes from the navigation declaration
    assert!(matches!(
        w.write_start_resource(Resource::new().with_property("Bogus", Value::Integer(1))),
        Err(Error::PropertyDoesNotExistOnType { type_name, .. })
            if type_name == "Model.OrderLine"
    ));
}

#[test]
fn test_inner_error_depth_limit() {
    let settings = WriterSettings::response().with_max_inner_error_depth(2);
    let mut out = Vec::new();
    let mut w = writer(settings, &mut out);
    let error = ODataError::new("code", "message").with_inner_error(
        InnerError::new("a")
            .with_inner_error(InnerError::new("b").with_inner_error(InnerError::new("c"))),
    );
    assert!(matches!(
        w.write_error(&error),
        Err(Error::RecursionLimit(2))
    ));
}

#[test]
fn test_finish_before_completion() {
    let mut out = Vec::new();
    let mut w = writer(WriterSettings::response(), &mut out);
    w.write_start_resource_set(ResourceSet::new()).unwrap();
    assert!(matches!(
        w.finish(),
        Err(Error::InvalidStateTransition { .. })
    ));
}

#[test]
fn test_second_payload_after_completion() {
    let mut out = Vec::new();
    let mut w = writer(WriterSettings::response(), &mut out);
    w.write_start_resource(Resource::new()).unwrap();
    w.write_end().unwrap();
    assert_eq!(w.state(), WriterState::Completed);
    assert!(w.write_start_resource(Resource::new()).is_err());
}
