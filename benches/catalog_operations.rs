use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

use commerce_rs::models::{CreateProductRequest, Product, ProductFilters};
use commerce_rs::repositories::{InMemoryProductRepository, ProductRepository, StaticAnalyticsRepository};
use commerce_rs::services::{AnalyticsService, ProductService};

const CATEGORIES: [&str; 4] = ["Electronics", "Footwear", "Books", "Home Appliances"];

fn request(i: usize) -> CreateProductRequest {
    CreateProductRequest {
        name: format!("Benchmark Product {}", i),
        description: Some(format!("Description for benchmark product {}", i)),
        price: dec!(10.99),
        category: Some(CATEGORIES[i % CATEGORIES.len()].to_string()),
        stock: 100,
    }
}

/// Returns the populated store and the ids in insertion order
fn populated(rt: &Runtime, size: usize) -> (Arc<InMemoryProductRepository>, Vec<String>) {
    let repository = Arc::new(InMemoryProductRepository::new());
    let ids = rt.block_on(async {
        let mut ids = Vec::with_capacity(size);
        for i in 0..size {
            let product = repository.create(Product::new(request(i))).await.unwrap();
            ids.push(product.id);
        }
        ids
    });
    (repository, ids)
}

fn bench_list_by_category(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("catalog_list_by_category");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));

    for dataset_size in [100, 1000, 10_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("dataset_size", dataset_size),
            dataset_size,
            |b, &size| {
                let (repository, _) = populated(&rt, size);
                let service = ProductService::new(repository);

                b.iter(|| {
                    rt.block_on(async {
                        let filters = ProductFilters {
                            category: Some("Footwear".to_string()),
                            skip: 10,
                            limit: 50,
                        };
                        black_box(service.list_products(filters).await.unwrap())
                    })
                });
            },
        );
    }
    group.finish();
}

fn bench_get_by_id(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let (repository, ids) = populated(&rt, 1000);
    let service = ProductService::new(repository);
    let id = ids[ids.len() / 2].clone();

    let mut group = c.benchmark_group("catalog_get_by_id");
    group.sample_size(200);

    group.bench_function("single_lookup", |b| {
        b.iter(|| rt.block_on(async { black_box(service.get_product(&id).await.unwrap()) }));
    });
    group.finish();
}

fn bench_adjust_stock(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let (repository, ids) = populated(&rt, 1000);
    let service = ProductService::new(repository);
    let id = ids[0].clone();

    c.bench_function("catalog_adjust_stock", |b| {
        // Alternating deltas keep the stock level stable
        let mut delta = 1;
        b.iter(|| {
            delta = -delta;
            rt.block_on(async { black_box(service.adjust_stock(&id, delta).await.unwrap()) })
        });
    });
}

fn bench_delete(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    c.bench_function("catalog_delete_from_1000", |b| {
        b.iter_batched(
            || populated(&rt, 1000),
            |(repository, ids)| {
                rt.block_on(async { black_box(repository.delete(&ids[0]).await.unwrap()) })
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_top_products(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let service = AnalyticsService::new(Arc::new(StaticAnalyticsRepository::with_sample_data()));

    c.bench_function("analytics_top_products", |b| {
        b.iter(|| rt.block_on(async { black_box(service.top_products(2).await.unwrap()) }));
    });
}

criterion_group!(
    benches,
    bench_list_by_category,
    bench_get_by_id,
    bench_adjust_stock,
    bench_delete,
    bench_top_products
);
criterion_main!(benches);
