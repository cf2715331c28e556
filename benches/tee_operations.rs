use aiter_stream::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use futures_util::future::join_all;
use futures_util::stream::StreamExt;
use tokio::runtime::Runtime;

fn bench_tee_fan_out(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("tee_fan_out");

    for outputs in [2usize, 4, 16].iter() {
        // Outputs drained one after another: every element is buffered for the laggards
        group.bench_with_input(
            BenchmarkId::new("sequential_drain", outputs),
            outputs,
            |b, &outputs| {
                b.to_async(&rt).iter(|| async move {
                    let mut total = 0usize;
                    for output in tee(from_iter(0..10_000u64), outputs) {
                        total += output.count().await;
                    }
                    black_box(total)
                });
            },
        );

        // Outputs drained concurrently: queues stay short
        group.bench_with_input(
            BenchmarkId::new("concurrent_drain", outputs),
            outputs,
            |b, &outputs| {
                b.to_async(&rt).iter(|| async move {
                    let drains = tee(from_iter(0..10_000u64), outputs)
                        .into_iter()
                        .map(|output| output.fold(0u64, |acc, x| async move { acc + x }));
                    black_box(join_all(drains).await)
                });
            },
        );
    }

    group.finish();
}

fn bench_tee_vs_clone(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("tee_vs_clone");

    group.bench_function("tee_strings", |b| {
        b.to_async(&rt).iter(|| async {
            let source = map(from_iter(0..5_000), |x, _| format!("item-{}", x));
            let lengths = join_all(
                tee(source, 3)
                    .into_iter()
                    .map(|output| output.map(|s| s.len()).collect::<Vec<_>>()),
            )
            .await;
            black_box(lengths)
        });
    });

    group.bench_function("materialise_then_clone", |b| {
        b.to_async(&rt).iter(|| async {
            let items = to_vec(map(from_iter(0..5_000), |x, _| format!("item-{}", x))).await;
            let lengths: Vec<Vec<usize>> = (0..3)
                .map(|_| items.clone().into_iter().map(|s| s.len()).collect())
                .collect();
            black_box(lengths)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_tee_fan_out, bench_tee_vs_clone);
criterion_main!(benches);
