//! Benchmarks for the per-stage field moments and rate assembly.
//!
//! Run with: `cargo bench --bench field_moments_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vlasov_dg::{
    CellIndex, DGCoefficients, FieldMoments, FluxContext, GridConfig, PhaseSpaceGrid, Shape,
    compute_rates_into,
};

fn perturbed_state(grid: &PhaseSpaceGrid) -> DGCoefficients {
    let mut u = DGCoefficients::for_grid(grid);
    for k in CellIndex::iter(grid.n_cells()) {
        let c = grid.decode(k);
        let phase = grid.x_center(c.i);
        u.set(k, Shape::Constant, 0.01 * (1.0 + 0.1 * phase.cos()));
        u.set(k, Shape::X, 0.001 * phase.sin());
        u.set(k, Shape::Closure, 0.001);
    }
    u
}

/// Benchmark field moment computation for increasing velocity resolution.
fn bench_field_moments(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_moments");

    for nv in [4, 8, 16] {
        let grid = PhaseSpaceGrid::new(&GridConfig::new(32, nv, 4.0, 4.0)).unwrap();
        let u = perturbed_state(&grid);
        group.bench_with_input(BenchmarkId::new("nv", nv), &nv, |b, _| {
            b.iter(|| black_box(FieldMoments::compute(black_box(&u), &grid)))
        });
    }

    group.finish();
}

/// Benchmark rate assembly with moments already known.
fn bench_rates(c: &mut Criterion) {
    let mut group = c.benchmark_group("rate_assembly");

    for nv in [4, 8] {
        let grid = PhaseSpaceGrid::new(&GridConfig::new(32, nv, 4.0, 4.0)).unwrap();
        let u = perturbed_state(&grid);
        let moments = FieldMoments::compute(&u, &grid);
        let ctx = FluxContext::new(&u, &grid, &moments);
        let mut out = vec![0.0; grid.n_cells() * 6];

        group.bench_with_input(BenchmarkId::new("serial", nv), &nv, |b, _| {
            b.iter(|| {
                compute_rates_into(&ctx, 0..grid.n_cells(), &mut out);
                black_box(&out);
            })
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", nv), &nv, |b, _| {
            b.iter(|| {
                vlasov_dg::solver::compute_rates_into_parallel(&ctx, 0..grid.n_cells(), &mut out);
                black_box(&out);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_field_moments, bench_rates);
criterion_main!(benches);
