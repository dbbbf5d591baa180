use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use pathroute::attributes::AttributeEncoding;
use pathroute::pattern::CompilerRegistry;
use pathroute::prefix::IdPrefixListener;
use pathroute::route::RouteEntry;
use pathroute::storage::{MemoryRouteStore, RouteStore};

fn example_routes() -> &'static [(&'static str, &'static str)] {
    &[
        ("zoo", "/animals/{id}"),
        ("toys", "/{animal_id}/{toy_id}"),
        ("habitats", "/{category}/{id}/sections/{section_id}"),
        ("inventory", "/{warehouse_id}/feeds/{feed_id}/items/{item_id}"),
        ("complex", "/{a}/{b}/{c}/{d}/{e}/{f}/{g}/{h}/{i}"),
    ]
}

fn build_store() -> MemoryRouteStore {
    let mut store = MemoryRouteStore::new(AttributeEncoding::ParallelArrays)
        .with_listener(IdPrefixListener::new("/cms/routes"));
    for (name, variable) in example_routes() {
        let mut entry = RouteEntry::new();
        entry.set_position("/cms/routes", name).expect("position");
        entry.set_variable_pattern(*variable);
        entry.set_default("_controller", "bench:show");
        store.persist(&mut entry).expect("persist");
    }
    store
}

fn bench_load_and_compile(c: &mut Criterion) {
    let store = build_store();
    let compilers = CompilerRegistry::new();
    c.bench_function("load_and_compile", |b| {
        b.iter(|| {
            for mut entry in store.load_all().expect("load") {
                black_box(entry.compile(&compilers).expect("compile"));
            }
        })
    });
}

fn bench_cached_match(c: &mut Criterion) {
    let store = build_store();
    let compilers = CompilerRegistry::new();
    let mut entries = store.load_all().expect("load");
    let test_paths = [
        "/zoo/animals/123",
        "/toys/123/456",
        "/habitats/cats/123/sections/5",
        "/inventory/1/feeds/2/items/3",
        "/complex/1/2/3/4/5/6/7/8/9",
    ];
    c.bench_function("cached_match", |b| {
        b.iter(|| {
            for path in test_paths.iter() {
                for entry in entries.iter_mut() {
                    let compiled = entry.compile(&compilers).expect("compile");
                    if let Some(params) = compiled.matches(path) {
                        black_box(&params);
                        break;
                    }
                }
            }
        })
    });
}

criterion_group!(benches, bench_load_and_compile, bench_cached_match);
criterion_main!(benches);
