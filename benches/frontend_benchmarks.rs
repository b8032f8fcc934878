// Copyright 2025 Cowboy AI, LLC.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cim_frontend::{split_keys, Config, Context, Frontend, Registry};
use serde_json::json;

fn bench_split_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_keys");

    let inputs = [
        ("plain", "code,-position,+ctime"),
        ("function", r#"-sort:index.text:relevance("de","test(\"\")"),+code"#),
        ("mixed", r#"sort:fn("a,b)",1),-x,position,-product.ctime,sort:price("EUR",1)"#),
    ];

    for (name, raw) in inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), raw, |b, raw| {
            b.iter(|| split_keys(black_box(Some(raw))))
        });
    }

    group.finish();
}

fn frontend() -> Frontend {
    let registry = Registry::builder()
        .with_builtin_decorators()
        .and_then(|b| b.add_standard("product"))
        .expect("registry builds")
        .build();
    Frontend::new(registry)
}

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("create");
    let ctx = Context::new(
        Config::new().with("controller/frontend/common/decorators/default", json!(["Limit", "Log"])),
    );

    let cached = frontend();
    group.bench_function("cached", |b| {
        b.iter(|| cached.create(black_box(&ctx), "product", None))
    });

    let uncached = frontend();
    uncached.cache(false);
    group.bench_function("uncached", |b| {
        b.iter(|| uncached.create(black_box(&ctx), "product", None))
    });

    group.finish();
}

fn bench_accumulate(c: &mut Criterion) {
    let frontend = frontend();
    let ctx = Context::new(Config::new());

    c.bench_function("accumulate", |b| {
        b.iter(|| {
            let mut handle = frontend.create(&ctx, "product", None).expect("product resolves");
            handle
                .compare("==", "product.status", 1)
                .and_then(|h| h.compare("=~", "product.code", "dem"))
                .and_then(|h| h.sort(Some("-position,code")))
                .expect("expressions apply");
            black_box(handle.state().combined())
        })
    });
}

criterion_group!(benches, bench_split_keys, bench_create, bench_accumulate);
criterion_main!(benches);
