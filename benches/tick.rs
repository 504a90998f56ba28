//! Criterion benchmarks for the counter engine hot paths.
//!
//! Run with:
//!   cargo bench
//!
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tickboard_core::{next_value, required_digits, CounterRegistry, CounterSession, SeedContext};
use tickboard_sources::builtin_counters;

fn bench_next_value(c: &mut Criterion) {
    c.bench_function("next_value", |b| {
        let mut value = 8_000_000_000.0;
        let mut jitter = 0.0;
        b.iter(|| {
            jitter = (jitter + 0.37) % 1.0;
            value = next_value(black_box(value), black_box(2.8), true, jitter);
        });
    });
}

fn bench_required_digits(c: &mut Criterion) {
    let mut group = c.benchmark_group("required_digits");
    for value in [0.0, 999.0, 134_928.0, 8_061_876_001.0, 99_999_999_990.0] {
        group.bench_function(format!("{}", value), |b| {
            b.iter(|| required_digits(black_box(value)));
        });
    }
    group.finish();
}

fn bench_manual_tick(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let counters = builtin_counters(&mut rng, &SeedContext::default());
    let registry = match CounterRegistry::new(counters) {
        Ok(registry) => registry,
        Err(e) => panic!("built-in counters are invalid: {}", e),
    };
    let session = CounterSession::new(registry, Box::new(StdRng::seed_from_u64(7)));

    c.bench_function("session_tick", |b| {
        b.iter(|| black_box(session.tick()));
    });
}

criterion_group!(benches, bench_next_value, bench_required_digits, bench_manual_tick);
criterion_main!(benches);
