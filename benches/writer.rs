#![allow(unused)]
extern crate jsonlight;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use jsonlight::prelude::*;
use std::hint::black_box;

fn sample_resource(id: i64) -> Resource {
    Resource::new()
        .with_id(format!("http://odata.org/svc/Orders({id})"))
        .with_etag(format!(r#"W/"{id}""#))
        .with_property("Id", Value::Integer(id))
        .with_property("Note", Value::String("expedited shipping requested".into()))
        .with_property("Total", Value::Double(199.99))
}

/// Benchmark writing a feed of plain entries.
///
/// This measures the full pipeline per entry: state transitions, model-free
/// validation, URI resolution and JSON text emission.
fn bench_write_feed(c: &mut Criterion) {
    const ENTRIES: usize = 1_000;

    let mut group = c.benchmark_group("write_feed");
    group.throughput(Throughput::Elements(ENTRIES as u64));
    group.bench_function("plain_entries", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(128 * ENTRIES);
            let settings = WriterSettings::response()
                .with_metadata_document_uri("http://odata.org/svc/$metadata");
            let mut writer = Writer::new(&mut out, settings).unwrap();
            writer
                .write_start_resource_set(
                    ResourceSet::new().with_serialization_info(SerializationInfo::new("Orders")),
                )
                .unwrap();
            for id in 0..ENTRIES as i64 {
                writer.write_start_resource(sample_resource(id)).unwrap();
                writer.write_end().unwrap();
            }
            writer.write_end().unwrap();
            writer.finish().unwrap();
            black_box(out)
        });
    });
    group.finish();
}

/// Benchmark writing entries with expanded navigation content, with and without a
/// bound metadata model, to isolate the validation cost.
fn bench_write_expanded(c: &mut Criterion) {
    const ENTRIES: usize = 200;

    let model = EdmModel::new()
        .with_type(
            EdmType::entity("Model.Order")
                .with_property("Id", "Edm.Int64")
                .with_property("Note", "Edm.String")
                .with_property("Total", "Edm.Double")
                .with_navigation("Items", "Model.OrderLine", true),
        )
        .with_type(
            EdmType::entity("Model.OrderLine")
                .with_property("Sku", "Edm.String")
                .with_property("Quantity", "Edm.Int64"),
        )
        .with_entity_set("Orders", "Model.Order");

    let write = |model: Option<&EdmModel>| {
        let mut out = Vec::with_capacity(512 * ENTRIES);
        let settings = WriterSettings::response()
            .with_metadata_document_uri("http://odata.org/svc/$metadata");
        let mut writer = Writer::new(&mut out, settings).unwrap();
        if let Some(model) = model {
            writer = writer.with_model(model).with_navigation_source("Orders");
        }
        writer
            .write_start_resource_set(
                ResourceSet::new().with_serialization_info(SerializationInfo::new("Orders")),
            )
            .unwrap();
        for id in 0..ENTRIES as i64 {
            let mut resource = sample_resource(id);
            if model.is_some() {
                resource = resource.with_type_name("Model.Order");
            }
            writer.write_start_resource(resource).unwrap();
            writer
                .write_start_nested_resource_info(NestedResourceInfo::new("Items").collection(true))
                .unwrap();
            writer.write_start_resource_set(ResourceSet::new()).unwrap();
            for line in 0..4 {
                let mut item = Resource::new()
                    .with_property("Sku", Value::String(format!("SKU-{id}-{line}")))
                    .with_property("Quantity", Value::Integer(line));
                if model.is_some() {
                    item = item.with_type_name("Model.OrderLine");
                }
                writer.write_start_resource(item).unwrap();
                writer.write_end().unwrap();
            }
            writer.write_end().unwrap();
            writer.write_end().unwrap();
            writer.write_end().unwrap();
        }
        writer.write_end().unwrap();
        writer.finish().unwrap();
        out
    };

    let mut group = c.benchmark_group("write_expanded");
    group.throughput(Throughput::Elements(ENTRIES as u64));
    group.bench_function("without_model", |b| {
        b.iter(|| black_box(write(None)));
    });
    group.bench_function("with_model", |b| {
        b.iter(|| black_box(write(Some(&model))));
    });
    group.finish();
}

criterion_group!(benches, bench_write_feed, bench_write_expanded);
criterion_main!(benches);
