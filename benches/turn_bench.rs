//! Turn throughput benchmarks

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use global_dominion::ai::PolicyKind;
use global_dominion::core::config::SimulationConfig;
use global_dominion::simulation::Simulation;

fn bench_advance_turn(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance_turn");

    for policy in PolicyKind::ALL {
        let mut config = SimulationConfig::default();
        config.ai.default_policy = policy;
        config.ai.action_probability = 1.0;

        group.bench_function(policy.name(), |b| {
            b.iter_batched(
                || Simulation::seeded(config.clone(), 42).expect("default config is valid"),
                |mut sim| {
                    for _ in 0..40 {
                        black_box(sim.advance_turn());
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_available_decisions(c: &mut Criterion) {
    let sim = Simulation::seeded(SimulationConfig::default(), 42).expect("default config is valid");
    let ids: Vec<_> = sim.countries().iter().map(|c| c.id.clone()).collect();

    c.bench_function("available_decisions", |b| {
        b.iter(|| {
            for id in &ids {
                black_box(sim.available_decisions(id));
            }
        })
    });
}

criterion_group!(benches, bench_advance_turn, bench_available_decisions);
criterion_main!(benches);
