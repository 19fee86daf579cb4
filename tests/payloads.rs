//! Integration tests asserting byte-for-byte payload baselines.
//!
//! Each test drives the writer through a realistic call sequence and compares the
//! produced text against the expected JSON Light document, including annotation
//! ordering and context URL fragments.

use jsonlight::prelude::*;

fn response() -> WriterSettings {
    WriterSettings::response().with_metadata_document_uri("http://odata.org/svc/$metadata")
}

fn write_payload(
    settings: WriterSettings,
    f: impl FnOnce(&mut Writer<'_, &mut Vec<u8>>) -> Result<()>,
) -> Result<String> {
    let mut out = Vec::new();
    let mut writer = Writer::new(&mut out, settings)?;
    f(&mut writer)?;
    writer.finish()?;
    Ok(String::from_utf8(out).expect("writer output is UTF-8"))
}

#[test]
fn test_top_level_entry_with_control_annotations() -> Result<()> {
    let text = write_payload(response(), |w| {
        w.write_start_resource(
            Resource::new()
                .with_type_name("Model.Order")
                .with_serialization_info(
                    SerializationInfo::new("Orders").with_entity_type("Model.Order"),
                )
                .with_id("http://odata.org/svc/Orders(1)")
                .with_etag(r#"W/"1""#)
                .with_edit_link("http://odata.org/svc/Orders(1)")
                .with_property("Id", Value::Integer(1))
                .with_property("Total", Value::Double(12.5)),
        )?;
        w.write_end()
    })?;
    assert_eq!(
        text,
        concat!(
            r#"{"@odata.context":"http://odata.org/svc/$metadata#Orders/$entity","#,
            r#""@odata.id":"http://odata.org/svc/Orders(1)","@odata.etag":"W/\"1\"","#,
            r#""@odata.editLink":"http://odata.org/svc/Orders(1)","Id":1,"Total":12.5}"#
        )
    );
    Ok(())
}

#[test]
fn test_feed_with_count_and_upfront_next_link() -> Result<()> {
    let text = write_payload(response(), |w| {
        w.write_start_resource_set(
            ResourceSet::new()
                .with_serialization_info(SerializationInfo::new("Orders"))
                .with_count(3)
                .with_next_page_link("http://odata.org/svc/Orders?$skiptoken=2"),
        )?;
        w.write_start_resource(Resource::new().with_property("Id", Value::Integer(1)))?;
        w.write_end()?;
        w.write_start_resource(Resource::new().with_property("Id", Value::Integer(2)))?;
        w.write_end()?;
        w.write_end()
    })?;
    assert_eq!(
        text,
        concat!(
            r#"{"@odata.context":"http://odata.org/svc/$metadata#Orders","@odata.count":3,"#,
            r#""@odata.nextLink":"http://odata.org/svc/Orders?$skiptoken=2","#,
            r#""value":[{"Id":1},{"Id":2}]}"#
        )
    );
    Ok(())
}

#[test]
fn test_feed_with_post_enumeration_next_link() -> Result<()> {
    let text = write_payload(response(), |w| {
        w.write_start_resource_set(
            ResourceSet::new()
                .with_serialization_info(SerializationInfo::new("Orders"))
                .with_count(2),
        )?;
        w.write_start_resource(Resource::new().with_property("Id", Value::Integer(1)))?;
        w.write_end()?;
        w.set_next_page_link("http://odata.org/svc/Orders?$skiptoken=1")?;
        w.write_end()
    })?;
    assert_eq!(
        text,
        concat!(
            r#"{"@odata.context":"http://odata.org/svc/$metadata#Orders","@odata.count":2,"#,
            r#""value":[{"Id":1}],"#,
            r#""@odata.nextLink":"http://odata.org/svc/Orders?$skiptoken=1"}"#
        )
    );
    Ok(())
}

#[test]
fn test_expanded_collection_with_nested_count() -> Result<()> {
    let text = write_payload(WriterSettings::response(), |w| {
        w.write_start_resource(Resource::new().with_property("Id", Value::Integer(1)))?;
        w.write_start_nested_resource_info(
            NestedResourceInfo::new("Items")
                .collection(true)
                .with_url("http://odata.org/svc/Orders(1)/Items")
                .with_association_link_url("http://odata.org/svc/Orders(1)/Items/$ref"),
        )?;
        w.write_start_resource_set(ResourceSet::new().with_count(2))?;
        w.write_start_resource(Resource::new().with_property("Sku", Value::String("A".into())))?;
        w.write_end()?;
        w.write_end()?;
        w.write_end()?;
        w.write_end()
    })?;
    assert_eq!(
        text,
        concat!(
            r#"{"Id":1,"#,
            r#""Items@odata.navigationLink":"http://odata.org/svc/Orders(1)/Items","#,
            r#""Items@odata.associationLink":"http://odata.org/svc/Orders(1)/Items/$ref","#,
            r#""Items@odata.count":2,"Items":[{"Sku":"A"}]}"#
        )
    );
    Ok(())
}

#[test]
fn test_expanded_singleton_entry() -> Result<()> {
    let text = write_payload(WriterSettings::response(), |w| {
        w.write_start_resource(Resource::new().with_property("Id", Value::Integer(1)))?;
        w.write_start_nested_resource_info(NestedResourceInfo::new("Customer").collection(false))?;
        w.write_start_resource(Resource::new().with_property("Name", Value::String("Ada".into())))?;
        w.write_end()?;
        w.write_end()?;
        w.write_end()
    })?;
    assert_eq!(text, r#"{"Id":1,"Customer":{"Name":"Ada"}}"#);
    Ok(())
}

#[test]
fn test_nested_set_next_link_trails_the_array() -> Result<()> {
    let text = write_payload(WriterSettings::response(), |w| {
        w.write_start_resource(Resource::new())?;
        w.write_start_nested_resource_info(NestedResourceInfo::new("Items").collection(true))?;
        w.write_start_resource_set(
            ResourceSet::new().with_next_page_link("http://odata.org/svc/Orders(1)/Items?$skiptoken=9"),
        )?;
        w.write_end()?;
        w.write_end()?;
        w.write_end()
    })?;
    assert_eq!(
        text,
        r#"{"Items":[],"Items@odata.nextLink":"http://odata.org/svc/Orders(1)/Items?$skiptoken=9"}"#
    );
    Ok(())
}

#[test]
fn test_media_link_entry_and_named_stream() -> Result<()> {
    let text = write_payload(WriterSettings::response(), |w| {
        w.write_start_resource(
            Resource::new()
                .with_media_resource(
                    StreamReference::new()
                        .with_read_link("http://odata.org/svc/Photos(1)/$value")
                        .with_edit_link("http://odata.org/svc/Photos(1)/$value")
                        .with_content_type("image/jpeg")
                        .with_etag(r#"W/"m""#),
                )
                .with_property("Id", Value::Integer(1))
                .with_property(
                    "Thumbnail",
                    Value::Stream(
                        StreamReference::new()
                            .with_read_link("http://odata.org/svc/Photos(1)/Thumbnail")
                            .with_content_type("image/png"),
                    ),
                ),
        )?;
        w.write_end()
    })?;
    assert_eq!(
        text,
        concat!(
            r#"{"@odata.mediaReadLink":"http://odata.org/svc/Photos(1)/$value","#,
            r#""@odata.mediaEditLink":"http://odata.org/svc/Photos(1)/$value","#,
            r#""@odata.mediaContentType":"image/jpeg","@odata.mediaETag":"W/\"m\"","#,
            r#""Id":1,"#,
            r#""Thumbnail@odata.mediaReadLink":"http://odata.org/svc/Photos(1)/Thumbnail","#,
            r#""Thumbnail@odata.mediaContentType":"image/png"}"#
        )
    );
    Ok(())
}

#[test]
fn test_instance_annotations_follow_the_filter() -> Result<()> {
    let settings = WriterSettings::response()
        .with_annotation_filter(AnnotationFilter::from_pattern("custom.*"));
    let text = write_payload(settings, |w| {
        w.write_start_resource(
            Resource::new()
                .with_annotation(InstanceAnnotation::new("custom.rating", Value::Integer(5)))
                .with_annotation(InstanceAnnotation::new("other.internal", Value::Boolean(true)))
                .with_property("Id", Value::Integer(1)),
        )?;
        w.write_end()
    })?;
    assert_eq!(text, r#"{"@custom.rating":5,"Id":1}"#);
    Ok(())
}

#[test]
fn test_nested_set_annotations_are_property_scoped() -> Result<()> {
    let settings = WriterSettings::response()
        .with_annotation_filter(AnnotationFilter::from_pattern("custom.*"));
    let text = write_payload(settings, |w| {
        w.write_start_resource(Resource::new())?;
        w.write_start_nested_resource_info(NestedResourceInfo::new("Items").collection(true))?;
        w.write_start_resource_set(
            ResourceSet::new()
                .with_annotation(InstanceAnnotation::new(
                    "custom.source",
                    Value::String("cache".into()),
                ))
                .with_annotation(InstanceAnnotation::new("other.internal", Value::Boolean(true))),
        )?;
        w.write_end()?;
        w.write_end()?;
        w.write_end()
    })?;
    assert_eq!(text, r#"{"Items@custom.source":"cache","Items":[]}"#);
    Ok(())
}

#[test]
fn test_entity_reference_links_payload() -> Result<()> {
    let links = EntityReferenceLinks::new(vec![
        EntityReferenceLink::new("http://odata.org/svc/Orders(1)"),
        EntityReferenceLink::new("http://odata.org/svc/Orders(2)"),
    ])
    .with_count(2)
    .with_next_page_link("http://odata.org/svc/Orders/$ref?$skiptoken=2");

    let text = write_payload(response(), |w| {
        w.write_start(Item::EntityReferenceLinks(links))
    })?;
    assert_eq!(
        text,
        concat!(
            r#"{"@odata.context":"http://odata.org/svc/$metadata#Collection($ref)","#,
            r#""@odata.count":2,"#,
            r#""@odata.nextLink":"http://odata.org/svc/Orders/$ref?$skiptoken=2","#,
            r#""value":[{"url":"http://odata.org/svc/Orders(1)"},{"url":"http://odata.org/svc/Orders(2)"}]}"#
        )
    );
    Ok(())
}

#[test]
fn test_service_document_with_titles() -> Result<()> {
    let document = ServiceDocument::new()
        .with_entity_set(ServiceDocumentElement::new("Orders", "Orders").with_title("All orders"))
        .with_singleton(ServiceDocumentElement::new("Me", "Me"));
    let text = write_payload(response(), |w| w.write_service_document(&document))?;
    assert_eq!(
        text,
        concat!(
            r#"{"@odata.context":"http://odata.org/svc/$metadata","#,
            r#""value":[{"name":"Orders","title":"All orders","url":"Orders"},"#,
            r#"{"name":"Me","url":"Me","kind":"Singleton"}]}"#
        )
    );
    Ok(())
}

#[test]
fn test_top_level_property_payload() -> Result<()> {
    let text = write_payload(response(), |w| {
        w.write_property(&Property::new("Color", Value::String("red".into())))
    })?;
    assert_eq!(
        text,
        r#"{"@odata.context":"http://odata.org/svc/$metadata","value":"red"}"#
    );
    Ok(())
}

#[test]
fn test_indented_output() -> Result<()> {
    let settings = WriterSettings::response().with_indent(true);
    let text = write_payload(settings, |w| {
        w.write_start_resource(Resource::new().with_property("Id", Value::Integer(1)))?;
        w.write_end()
    })?;
    assert_eq!(text, "{\n  \"Id\": 1\n}");
    Ok(())
}

#[test]
fn test_model_bound_entry_gets_type_annotation_when_it_adds_information() -> Result<()> {
    let model = EdmModel::new()
        .with_type(EdmType::entity("Model.Order").with_property("Id", "Edm.Int64"))
        .with_type(EdmType::entity("Model.PremiumOrder").with_property("Id", "Edm.Int64"))
        .with_entity_set("Orders", "Model.Order");

    let mut out = Vec::new();
    let mut writer = Writer::new(&mut out, response())?
        .with_model(&model)
        .with_navigation_source("Orders");
    writer.write_start_resource(
        Resource::new()
            .with_type_name("Model.PremiumOrder")
            .with_property("Id", Value::Integer(1)),
    )?;
    writer.write_end()?;
    writer.finish()?;
    assert_eq!(
        String::from_utf8(out).expect("writer output is UTF-8"),
        concat!(
            r#"{"@odata.context":"http://odata.org/svc/$metadata#Orders/$entity","#,
            r##""@odata.type":"#Model.PremiumOrder","Id":1}"##
        )
    );
    Ok(())
}
