use admin_router::router::RouteMatcher;
use admin_router::{constant_routes, NavigationService};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// Lookup cost by path shape against the live, fully granted engine
fn bench_resolve(c: &mut Criterion) {
    let service = NavigationService::admin();
    service.grant(&["admin"]);
    let router = service.router();

    let mut group = c.benchmark_group("resolve");
    for path in [
        "/users/list",
        "/",
        "/redirect/goods/category",
        "/unknown/deep/path",
        "/orders/list?tab=refunds#top",
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(path), path, |b, path| {
            b.iter(|| router.resolve(black_box(path)))
        });
    }
    group.finish();
}

/// Compiling the constant routes, i.e. the work done by one reset
fn bench_reset(c: &mut Criterion) {
    let service = NavigationService::admin();
    c.bench_function("reset_router", |b| b.iter(|| service.reset_router()));
    c.bench_function("compile_constant_routes", |b| {
        b.iter(|| RouteMatcher::new(black_box(constant_routes())))
    });
}

criterion_group!(benches, bench_resolve, bench_reset);
criterion_main!(benches);
