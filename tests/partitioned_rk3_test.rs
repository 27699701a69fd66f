//! Partitioned RK3 against the single-process path.
//!
//! Workers run on scoped threads and exchange chunks through channels; after
//! every step each of them must hold exactly the state a single partition
//! produces.

use std::f64::consts::PI;
use std::thread;

use vlasov_dg::{
    CellIndex, ChannelExchange, DGCoefficients, GridConfig, PhaseSpaceGrid, Rk3Integrator,
    SerialExchange, Shape, VlasovOperator, compute_rates, ssp_rk3_step,
};

const DT: f64 = 0.02;
const N_STEPS: usize = 3;

fn grid() -> PhaseSpaceGrid {
    PhaseSpaceGrid::new(&GridConfig::new(4, 4, 4.0, 3.0)).unwrap()
}

/// Maxwellian in velocity with a density perturbation in x.
fn initial_state(grid: &PhaseSpaceGrid) -> DGCoefficients {
    let mut u = DGCoefficients::for_grid(grid);
    let k_x = 2.0 * PI / grid.lx();
    for k in CellIndex::iter(grid.n_cells()) {
        let c = grid.decode(k);
        let x = grid.x_center(c.i);
        let v2: f64 = [c.j1, c.j2, c.j3]
            .iter()
            .map(|&j| grid.v_center(j).powi(2))
            .sum();
        let f = (-0.5 * v2).exp() / (2.0 * PI).powf(1.5) * (1.0 + 0.1 * (k_x * x).cos());
        u.set(k, Shape::Constant, f);
        u.set(k, Shape::X, -0.1 * f * (k_x * x).sin());
        u.set(k, Shape::V1, -0.05 * f * grid.v_center(c.j1));
    }
    u
}

fn run_serial(grid: &PhaseSpaceGrid) -> DGCoefficients {
    let mut u = initial_state(grid);
    let operator = VlasovOperator::new(grid.clone());
    let mut rk = Rk3Integrator::new(grid.clone(), DT, SerialExchange, operator).unwrap();
    for _ in 0..N_STEPS {
        rk.step(&mut u).unwrap();
    }
    u
}

fn run_partitioned(grid: &PhaseSpaceGrid, n_partitions: usize) -> Vec<DGCoefficients> {
    let group = ChannelExchange::group(n_partitions);
    thread::scope(|s| {
        let handles: Vec<_> = group
            .into_iter()
            .map(|exchange| {
                s.spawn(move || {
                    let mut u = initial_state(grid);
                    let operator = VlasovOperator::new(grid.clone());
                    let mut rk = Rk3Integrator::new(grid.clone(), DT, exchange, operator).unwrap();
                    for _ in 0..N_STEPS {
                        rk.step(&mut u).unwrap();
                    }
                    assert!(rk.operator().moments().is_some());
                    u
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

#[test]
fn test_serial_integrator_matches_reference_step() {
    let g = grid();
    let mut reference = initial_state(&g);
    for _ in 0..N_STEPS {
        ssp_rk3_step(&mut reference, |s| compute_rates(s, &g), DT);
    }
    assert_eq!(run_serial(&g), reference);
}

#[test]
fn test_partitions_reproduce_single_process() {
    let g = grid();
    let serial = run_serial(&g);
    assert!(serial.max_abs() > 0.0);

    for n_partitions in [1, 2, 4] {
        let results = run_partitioned(&g, n_partitions);
        assert_eq!(results.len(), n_partitions);
        for (rank, u) in results.iter().enumerate() {
            assert_eq!(
                u, &serial,
                "rank {} of {} diverged from the single-process state",
                rank, n_partitions
            );
        }
    }
}
