//! Benchmarks for a full RK3 step.
//!
//! Run with: `cargo bench --bench rk3_bench`
//!
//! Compares the single-process step with the partitioned integrator.

use std::thread;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vlasov_dg::{
    CellIndex, ChannelExchange, DGCoefficients, GridConfig, PhaseSpaceGrid, Rk3Integrator,
    SerialExchange, Shape, VlasovOperator, compute_rates, ssp_rk3_step,
};

const DT: f64 = 0.01;

fn initial_state(grid: &PhaseSpaceGrid) -> DGCoefficients {
    let mut u = DGCoefficients::for_grid(grid);
    for k in CellIndex::iter(grid.n_cells()) {
        let c = grid.decode(k);
        let v = grid.v_center(c.j1);
        u.set(k, Shape::Constant, 0.01 * (-0.5 * v * v).exp());
        u.set(k, Shape::X, 0.001 * grid.x_center(c.i).sin());
    }
    u
}

fn bench_single_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("rk3_single_process");
    group.sample_size(20);

    for nx in [16, 32] {
        let grid = PhaseSpaceGrid::new(&GridConfig::new(nx, 8, 4.0, 4.0)).unwrap();

        group.bench_with_input(BenchmarkId::new("ssp_rk3_step", nx), &nx, |b, _| {
            let mut u = initial_state(&grid);
            b.iter(|| {
                ssp_rk3_step(&mut u, |s| compute_rates(s, &grid), DT);
                black_box(&u);
            })
        });

        group.bench_with_input(BenchmarkId::new("integrator", nx), &nx, |b, _| {
            let mut u = initial_state(&grid);
            let operator = VlasovOperator::new(grid.clone());
            let mut rk = Rk3Integrator::new(grid.clone(), DT, SerialExchange, operator).unwrap();
            b.iter(|| {
                rk.step(&mut u).unwrap();
                black_box(&u);
            })
        });
    }

    group.finish();
}

/// Ten steps on P worker threads, including thread start-up.
fn bench_partitioned(c: &mut Criterion) {
    let mut group = c.benchmark_group("rk3_partitioned");
    group.sample_size(10);

    let grid = PhaseSpaceGrid::new(&GridConfig::new(32, 8, 4.0, 4.0)).unwrap();
    for n_partitions in [1, 2, 4] {
        group.bench_with_input(
            BenchmarkId::new("workers", n_partitions),
            &n_partitions,
            |b, &n| {
                b.iter(|| {
                    thread::scope(|s| {
                        for exchange in ChannelExchange::group(n) {
                            let grid = &grid;
                            s.spawn(move || {
                                let mut u = initial_state(grid);
                                let operator = VlasovOperator::new(grid.clone());
                                let mut rk =
                                    Rk3Integrator::new(grid.clone(), DT, exchange, operator)
                                        .unwrap();
                                for _ in 0..10 {
                                    rk.step(&mut u).unwrap();
                                }
                                black_box(u);
                            });
                        }
                    })
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_single_process, bench_partitioned);
criterion_main!(benches);
