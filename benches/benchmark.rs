// Model build and query latency on a synthetic catalog
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use recx_catalog::{ModelConfig, ProductRecord, RecommendationModel};

const CATEGORIES: &[&str] = &[
    "Computers&Accessories|Cables",
    "Computers&Accessories|Mice",
    "Electronics|Televisions",
    "Electronics|Headphones",
    "Home&Kitchen|Appliances",
];

fn generate_catalog(size: usize) -> Vec<ProductRecord> {
    let mut rng = rand::rng();
    (0..size)
        .map(|i| {
            let price: u32 = rng.random_range(99..50_000);
            let rating: f32 = rng.random_range(1.0..5.0);
            let count: u32 = rng.random_range(0..400_000);
            ProductRecord::new(
                format!("P{:06}", i),
                format!("Product {}", i),
                CATEGORIES[rng.random_range(0..CATEGORIES.len())],
                format!("₹{}", price),
                format!("₹{}", price * 2),
                format!("{:.1}", rating),
                count.to_string(),
            )
        })
        .collect()
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(20);

    for size in [1_000, 10_000].iter() {
        let records = generate_catalog(*size);
        group.bench_with_input(BenchmarkId::new("model", size), size, |b, _| {
            b.iter(|| {
                let model =
                    RecommendationModel::from_records(records.clone(), &ModelConfig::default())
                        .unwrap();
                black_box(model.len())
            });
        });
    }

    group.finish();
}

fn benchmark_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");

    for size in [1_000, 10_000, 50_000].iter() {
        let model =
            RecommendationModel::from_records(generate_catalog(*size), &ModelConfig::default())
                .unwrap();
        let mut rng = rand::rng();

        group.bench_with_input(BenchmarkId::new("by_position", size), size, |b, &size| {
            b.iter(|| {
                let position = rng.random_range(0..size) as i64;
                black_box(model.recommend_by_position(position).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_recommend);
criterion_main!(benches);
