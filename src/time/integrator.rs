//! Partitioned SSP-RK3 integrator.
//!
//! Each worker evaluates rates for its own chunk of cells only, combines them
//! into its chunk of the next stage, and exchanges chunks with every other
//! worker before the next stage reads the full state. The stages are those of
//! [`ssp_rk3_step`](super::ssp_rk3_step), so a single partition reproduces it
//! bit for bit.

use thiserror::Error;
use tracing::{debug, info};

use super::exchange::{ExchangeError, StateExchange};
use crate::basis::N_SHAPES;
use crate::mesh::{ConfigError, Partition, PhaseSpaceGrid, validate_dt};
use crate::solver::{DGCoefficients, RateOperator};

/// Failure of a time step.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StepError {
    /// The state does not fit the grid.
    #[error("invalid state: {0}")]
    Config(#[from] ConfigError),

    /// A stage exchange failed; the run cannot continue.
    #[error("stage exchange failed: {0}")]
    Exchange(#[from] ExchangeError),
}

/// One worker's view of the RK3 time loop.
#[derive(Debug)]
pub struct Rk3Integrator<X, R> {
    grid: PhaseSpaceGrid,
    dt: f64,
    partition: Partition,
    exchange: X,
    operator: R,
    /// Full state after stages 1 and 2
    stage: DGCoefficients,
    /// Rates of this worker's cells
    rates: Vec<f64>,
    /// This worker's chunk of the next stage
    local: Vec<f64>,
    steps: u64,
}

impl<X: StateExchange, R: RateOperator> Rk3Integrator<X, R> {
    /// Set up a worker for the partition selected by `exchange`.
    pub fn new(
        grid: PhaseSpaceGrid,
        dt: f64,
        exchange: X,
        operator: R,
    ) -> Result<Self, ConfigError> {
        let dt = validate_dt(dt)?;
        let partition = Partition::new(
            grid.n_cells(),
            grid.size_v(),
            exchange.rank(),
            exchange.n_partitions(),
        )?;

        info!(
            rank = partition.rank(),
            n_partitions = partition.n_partitions(),
            chunk_cells = partition.chunk_cells(),
            nx = grid.nx(),
            nv = grid.nv(),
            dt,
            "RK3 integrator ready"
        );

        let chunk = partition.chunk_cells() * N_SHAPES;
        Ok(Self {
            stage: DGCoefficients::for_grid(&grid),
            rates: vec![0.0; chunk],
            local: vec![0.0; chunk],
            grid,
            dt,
            partition,
            exchange,
            operator,
            steps: 0,
        })
    }

    /// Time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Cells owned by this worker.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Rate operator, e.g. to read the field moments of the last stage.
    pub fn operator(&self) -> &R {
        &self.operator
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Advance the full state `u` by one step.
    ///
    /// Every worker must call this with the same `u`; on return each holds
    /// the same advanced state.
    pub fn step(&mut self, u: &mut DGCoefficients) -> Result<(), StepError> {
        u.check_grid(&self.grid)?;
        let cells = self.partition.cell_range();
        let lo = cells.start * N_SHAPES;
        let dt = self.dt;

        // Stage 1: u1 = u + dt * L(u)
        self.operator.evaluate(u, cells.clone(), &mut self.rates);
        for (m, out) in self.local.iter_mut().enumerate() {
            *out = u.data[lo + m] + dt * self.rates[m];
        }
        self.exchange.all_gather(&self.local, &mut self.stage)?;

        // Stage 2: u2 = 3/4 * u + 1/4 * u1 + 1/4 * dt * L(u1)
        self.operator.evaluate(&self.stage, cells.clone(), &mut self.rates);
        for (m, out) in self.local.iter_mut().enumerate() {
            *out = 0.75 * u.data[lo + m] + 0.25 * self.stage.data[lo + m]
                + 0.25 * dt * self.rates[m];
        }
        self.exchange.all_gather(&self.local, &mut self.stage)?;

        // Stage 3: u_new = 1/3 * u + 2/3 * u2 + 2/3 * dt * L(u2)
        self.operator.evaluate(&self.stage, cells, &mut self.rates);
        for (m, out) in self.local.iter_mut().enumerate() {
            *out = u.data[lo + m] * (1.0 / 3.0)
                + 2.0 / 3.0 * self.stage.data[lo + m]
                + 2.0 / 3.0 * dt * self.rates[m];
        }
        self.exchange.all_gather(&self.local, u)?;

        self.steps += 1;
        debug!(rank = self.partition.rank(), step = self.steps, "RK3 step done");
        Ok(())
    }
}
