//! Time every (backend, operation) pair under both antialias settings
//!
//! One benchmark group per antialias value. Setup runs once before each
//! group, so every measurement in a group sees the same styles and the same
//! context smoothing mode on every backend.
//!
//! ```bash
//! cargo bench -p strokebench --bench strokes
//! STROKEBENCH_PIXEL_OFFSET=half cargo bench -p strokebench --bench strokes
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_strokes(c: &mut Criterion) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut harness = match strokebench::default_harness() {
        Ok(harness) => harness,
        Err(e) => panic!("cannot build the harness: {}", e),
    };

    for antialias in [true, false] {
        if let Err(e) = harness.setup(antialias) {
            panic!("setup antialias={} failed: {}", antialias, e);
        }

        let mut group = c.benchmark_group(format!("antialias={}", antialias));
        for entry in harness.entries() {
            group.bench_function(
                BenchmarkId::new(entry.backend_name(), entry.operation().name()),
                |b| b.iter(|| harness.run(black_box(entry))),
            );
        }
        group.finish();
    }
}

criterion_group!(benches, bench_strokes);
criterion_main!(benches);
