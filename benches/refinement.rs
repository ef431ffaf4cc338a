//! Performance measurement for heat-bath refinement sweeps

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use dominoshuffle::algorithm::glauber::GlauberRefiner;
use dominoshuffle::algorithm::probability::extract;
use dominoshuffle::algorithm::recursion::rescale;
use dominoshuffle::algorithm::shuffle::generate;
use dominoshuffle::spatial::weights::WeightMatrix;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

/// Measures one full sweep over an order-16 tiling
fn bench_sweep(c: &mut Criterion) {
    let Ok(weights) = WeightMatrix::two_periodic(16, 0.5, 1.5) else {
        return;
    };
    let tables = extract(&rescale(&weights));
    let mut rng = StdRng::seed_from_u64(12345);
    let Ok(tiling) = generate(&tables, &mut rng) else {
        return;
    };
    let refiner = GlauberRefiner::new(&weights);

    c.bench_function("glauber_sweep", |b| {
        b.iter_batched(
            || (tiling.clone(), StdRng::seed_from_u64(67890)),
            |(mut tiling, mut rng)| {
                let flips = refiner.sweep(&mut tiling, &mut rng);
                black_box((tiling, flips))
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
