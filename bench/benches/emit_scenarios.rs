//! Emitter scenario benchmarks using Criterion.
//!
//! These benchmarks measure realistic workloads:
//! - Fan-out (many channels, mixed priorities, partial cancellation)
//! - Churn (handlers registered and removed every frame)

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rusty_emitter::Emitter;
use rusty_emitter_bench::{
    events::{PriorityMix, Tick, populate},
    memory::measure_memory,
    scenarios::{ChurnConfig, ChurnScenario, FanOutConfig, FanOutScenario, Scenario},
};

#[cfg(feature = "memory_profiling")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

// =============================================================================
// Fan-out Benchmarks
// =============================================================================

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario/fan_out");

    for handlers in [8, 32, 128] {
        let config = FanOutConfig {
            handlers_per_channel: handlers,
            ..Default::default()
        };
        group.throughput(Throughput::Elements(config.emits_per_frame as u64));

        group.bench_with_input(BenchmarkId::new("frame", handlers), &config, |b, config| {
            let mut scenario = FanOutScenario::with_config(config.clone());
            scenario.setup();

            b.iter(|| {
                scenario.update();
            });

            black_box(scenario.total_hits);
            scenario.teardown();
        });
    }

    group.finish();
}

// =============================================================================
// Churn Benchmarks
// =============================================================================

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario/churn");

    for batch in [16, 128, 512] {
        group.throughput(Throughput::Elements(batch as u64));

        group.bench_with_input(BenchmarkId::new("frame", batch), &batch, |b, &n| {
            let mut scenario = ChurnScenario::with_config(ChurnConfig {
                batch_size: n,
                ..Default::default()
            });
            scenario.setup();

            b.iter(|| {
                scenario.update();
            });

            black_box(scenario.total_hits);
            scenario.teardown();
        });
    }

    group.finish();
}

// =============================================================================
// Memory Report
// =============================================================================

fn report_memory(_c: &mut Criterion) {
    let count = 10_000;
    let (emitter, stats) = measure_memory(|| {
        let emitter = Emitter::<Tick>::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        populate(&emitter, "memory", count, PriorityMix::Random, &mut rng);
        emitter
    });

    println!(
        "registry memory: {} ({:.1} bytes/handler)",
        stats,
        stats.bytes_per_handler(count)
    );
    black_box(emitter);
}

criterion_group!(benches, bench_fan_out, bench_churn, report_memory);
criterion_main!(benches);
