use assembly_core::{MemberKind, assembly_group_config, assembly_metadata_config, merger};
use assembly_model::ConfigValue;
use assembly_test_utils::{group_seed, meta_seed, releases_fixture};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn merger_benchmark(c: &mut Criterion) {
    let releases = releases_fixture();
    let overlay = releases
        .assembly("ART_7")
        .and_then(|view| view.field("rhcos"))
        .cloned()
        .unwrap_or_default();
    let base = ConfigValue::from(serde_json::json!({
        "dependencies": {"rpms": [{"el8": "base-1-1.el8"}]},
        "machine-os-content": {"images": {"aarch64": "quay.io/rhcos:aarch64"}}
    }));

    c.bench_function("merge::merger (rhcos stanza)", |b| {
        b.iter(|| merger(black_box(&overlay), black_box(&base)).unwrap())
    });
}

fn chain_benchmark(c: &mut Criterion) {
    let releases = releases_fixture();
    let group = group_seed();
    let meta = meta_seed();

    c.bench_function("resolve::assembly_group_config (5 deep)", |b| {
        b.iter(|| assembly_group_config(black_box(&releases), Some("ART_6"), black_box(&group)).unwrap())
    });

    c.bench_function("resolve::assembly_metadata_config (wildcard)", |b| {
        b.iter(|| {
            assembly_metadata_config(
                black_box(&releases),
                Some("ART_6"),
                MemberKind::Rpm,
                "openshift-kuryr",
                black_box(&meta),
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, merger_benchmark, chain_benchmark);
criterion_main!(benches);
