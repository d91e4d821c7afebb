use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rs2_seq::pipe::{self, PipeExt};
use rs2_seq::*;
use tokio::runtime::Runtime;

fn bench_basic_operations(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("basic_operations");

    for size in [1_000i64, 10_000, 100_000].iter() {
        group.bench_with_input(BenchmarkId::new("map_filter", size), size, |b, &size| {
            b.to_async(&rt).iter(|| async move {
                let doubled = map(|x: i64| black_box(x * 2), from_iter(0..size));
                let result = to_vec(filter(|x: &i64| black_box(x % 4 == 0), doubled)).await;
                black_box(result)
            });
        });

        group.bench_with_input(BenchmarkId::new("fold", size), size, |b, &size| {
            b.to_async(&rt).iter(|| async move {
                let result = fold(0i64, |acc, x: i64| black_box(acc + x), from_iter(0..size)).await;
                black_box(result)
            });
        });

        group.bench_with_input(BenchmarkId::new("zip", size), size, |b, &size| {
            b.to_async(&rt).iter(|| async move {
                let result = count(zip(from_iter(0..size), from_iter(0..size))).await;
                black_box(result)
            });
        });
    }

    group.finish();
}

fn bench_async_operations(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("async_operations");

    for size in [1_000i64, 10_000].iter() {
        group.bench_with_input(BenchmarkId::new("map_async", size), size, |b, &size| {
            b.to_async(&rt).iter(|| async move {
                let result = to_vec(map_async(
                    |x: i64| async move {
                        tokio::task::yield_now().await;
                        black_box(x * 2)
                    },
                    from_iter(0..size),
                ))
                .await;
                black_box(result)
            });
        });

        group.bench_with_input(BenchmarkId::new("flat_map", size), size, |b, &size| {
            b.to_async(&rt).iter(|| async move {
                let result = count(flat_map(|x: i64| vec![x, x + 1], from_iter(0..size))).await;
                black_box(result)
            });
        });
    }

    group.finish();
}

fn bench_subject(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("subject");

    for consumers in [1usize, 4, 16].iter() {
        group.bench_with_input(
            BenchmarkId::new("push_10k", consumers),
            consumers,
            |b, &consumers| {
                b.to_async(&rt).iter(|| async move {
                    let subject = Subject::new();
                    let totals: Vec<_> = (0..consumers)
                        .map(|_| fold(0u64, |acc, x: u64| acc + x, subject.clone()))
                        .collect();

                    for x in 0..10_000u64 {
                        let _ = subject.push(x);
                    }
                    let _ = subject.complete();

                    black_box(futures::future::join_all(totals).await)
                });
            },
        );
    }

    group.finish();
}

fn bench_pipes(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("pipes");

    let pipeline = pipe::map(|x: i64| x + 1)
        .compose(pipe::filter(|x: &i64| x % 3 == 0))
        .compose(pipe::fold(0i64, |acc, x: i64| acc + x));

    group.bench_function("composed_pipe_10k", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(pipeline.run(from_iter(0..10_000i64)).await) });
    });

    let summing = pipe::collect_by(|x: i64| (x % 10, x))
        .apply(CollectOptions::new().merge(|a: i64, b: i64, _key: &i64| a + b));

    group.bench_function("collect_by_10k", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(summing.run(from_iter(0..10_000i64)).await) });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_basic_operations,
    bench_async_operations,
    bench_subject,
    bench_pipes
);
criterion_main!(benches);
