use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cim_domain_mirror::{
    Capability, DescriptorMirrorFactory, DescriptorTable, DomainMirrorFactory, DomainModel,
    FieldDescriptor, MessageLinks, MethodDescriptor, TypeDescriptor, TypeRef,
};

/// One aggregate per context holding a chain of `depth` entities, the last of
/// which publishes the context's event.
fn descriptors(contexts: usize, depth: usize) -> Vec<TypeDescriptor> {
    let mut descriptors = Vec::new();
    for c in 0..contexts {
        let package = format!("bench.ctx{c}");
        let event = format!("{package}.Happened");
        descriptors.push(TypeDescriptor::new(&event).with_capability(Capability::DomainEvent));

        for d in 0..depth {
            let mut entity = TypeDescriptor::new(format!("{package}.Part{d}"))
                .with_capability(Capability::Entity)
                .with_field(FieldDescriptor::new(
                    "back",
                    TypeRef::named(format!("{package}.Part0")),
                ));
            if d + 1 < depth {
                entity = entity.with_field(FieldDescriptor::new(
                    "next",
                    TypeRef::list(TypeRef::named(format!("{package}.Part{}", d + 1))),
                ));
            } else {
                entity = entity.with_method(MethodDescriptor::new("raise").publishing(&event));
            }
            descriptors.push(entity);
        }

        descriptors.push(
            TypeDescriptor::new(format!("{package}.Root"))
                .with_capability(Capability::AggregateRoot)
                .with_field(FieldDescriptor::new(
                    "head",
                    TypeRef::named(format!("{package}.Part0")),
                )),
        );
        descriptors.push(
            TypeDescriptor::new(format!("{package}.RootRepository"))
                .with_capability(Capability::Repository)
                .managing(format!("{package}.Root")),
        );
    }
    descriptors
}

fn factory(contexts: usize, depth: usize) -> DescriptorMirrorFactory {
    let table =
        DescriptorTable::from_descriptors(descriptors(contexts, depth)).expect("valid descriptors");
    let packages: Vec<String> = (0..contexts).map(|c| format!("bench.ctx{c}")).collect();
    DescriptorMirrorFactory::new(table, packages)
}

fn model(contexts: usize, depth: usize) -> DomainModel {
    let factory = factory(contexts, depth);
    DomainModel::assemble(
        factory.type_mirrors().expect("mirrors build"),
        factory.bounded_context_packages(),
    )
}

fn benchmark_mirror_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("mirror_building");
    for contexts in [10, 50, 200] {
        let factory = factory(contexts, 5);
        group.bench_with_input(BenchmarkId::from_parameter(contexts), &factory, |b, factory| {
            b.iter(|| black_box(factory.type_mirrors().expect("mirrors build")));
        });
    }
    group.finish();
}

fn benchmark_deep_publishes(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_publishes");
    for depth in [4, 16, 64] {
        let model = model(1, depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &model, |b, model| {
            let root = model.aggregate_root_mirror_for("bench.ctx0.Root").expect("root");
            let event = model.domain_event_mirror_for("bench.ctx0.Happened").expect("event");
            b.iter(|| black_box(root.publishes(&event)));
        });
    }
    group.finish();
}

fn benchmark_bounded_context_scan(c: &mut Criterion) {
    let model = model(200, 5);
    c.bench_function("bounded_context_aggregate_roots", |b| {
        b.iter(|| {
            let context = model.bounded_context("bench.ctx100").expect("context");
            black_box(context.aggregate_roots().len())
        });
    });
    c.bench_function("repository_for_aggregate", |b| {
        b.iter(|| black_box(model.repository_mirror_for("bench.ctx199.Root").is_ok()));
    });
}

criterion_group!(
    benches,
    benchmark_mirror_building,
    benchmark_deep_publishes,
    benchmark_bounded_context_scan
);
criterion_main!(benches);
