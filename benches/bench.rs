use criterion::{Criterion, criterion_group, criterion_main};
use sat_features::sat::assignment::VecAssignment;
use sat_features::sat::extract::FeatureExtractor;
use sat_features::sat::literal::{Literal, PackedLiteral};
use sat_features::sat::state::State;
use smallvec::SmallVec;
use std::hint::black_box;
use std::time::Duration;

type BenchState = State<PackedLiteral, SmallVec<[PackedLiteral; 8]>, VecAssignment>;

/// Builds a pseudo-random formula mixing all three clause representations,
/// with some runtime signals set so the second pass has work to do.
fn random_state(num_vars: usize, num_clauses: usize, seed: u64) -> BenchState {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut state = BenchState::new(num_vars);

    for _ in 0..num_clauses {
        let len = 2 + rng.usize(0..5);
        let mut clause: Vec<PackedLiteral> = Vec::with_capacity(len);

        while clause.len() < len {
            let var = rng.u32(0..num_vars as u32);
            if clause.iter().any(|l| l.variable() == var) {
                continue;
            }
            clause.push(PackedLiteral::new(var, rng.bool()));
        }

        state.add_clause(&clause);
    }

    for _ in 0..num_clauses {
        state.vsids.bump(rng.u32(0..num_vars as u32));
    }
    for clause in &mut state.long_clauses {
        clause.bump_activity(rng.f64());
        clause.lbd = rng.u32(2..10);
    }

    state
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");
    group.measurement_time(Duration::from_secs(10));

    for (num_vars, num_clauses) in [(100, 400), (1_000, 4_000), (10_000, 40_000)] {
        let state = random_state(num_vars, num_clauses, 42);

        group.bench_function(format!("{num_vars}v_{num_clauses}c"), |b| {
            b.iter(|| {
                let mut extractor = FeatureExtractor::new(black_box(&state));
                black_box(extractor.extract())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
