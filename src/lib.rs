//! # vlasov-dg
//!
//! A Discontinuous Galerkin transport operator for the 1D-3V Vlasov-Poisson
//! system with a periodic space axis and walled velocity axes.
//!
//! This crate provides the core building blocks:
//! - The six-shape local basis and its mass-matrix projection
//! - Uniform phase-space grid, cell indexing, and partitioning
//! - Self-consistent electric field moments and potential
//! - Volume terms and upwind fluxes in space and velocity
//! - Time integration (SSP-RK3), single-process or partitioned across workers
//! - Potential/density profile output for diagnostics
//!
//! # Example
//!
//! ```
//! use vlasov_dg::{
//!     DGCoefficients, GridConfig, PhaseSpaceGrid, Rk3Integrator, SerialExchange, Shape,
//!     VlasovOperator,
//! };
//!
//! let grid = PhaseSpaceGrid::new(&GridConfig::new(8, 4, 4.0, 2.0))?;
//! let mut u = DGCoefficients::for_grid(&grid);
//! for k in vlasov_dg::CellIndex::iter(grid.n_cells()) {
//!     u.set(k, Shape::Constant, 0.01);
//! }
//!
//! let operator = VlasovOperator::new(grid.clone());
//! let mut rk = Rk3Integrator::new(grid, 0.01, SerialExchange, operator)?;
//! rk.step(&mut u)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod basis;
pub mod field;
pub mod flux;
pub mod io;
pub mod mesh;
pub mod solver;
pub mod time;
pub mod types;

// Re-export main types for convenience
pub use basis::{N_SHAPES, Shape, ShapeVector, project_rates};
pub use field::{
    CellSums, ChargeProfile, FieldMoments, cell_integrated_field, cell_integrated_field_1st,
    cell_integrated_field_2nd, cumulative_density, density, field_constant, potential_at,
};
pub use flux::{FluxContext, space_flux, space_volume, velocity_flux, velocity_volume};
pub use io::{ProfileError, ProfileSample, sample_profile, write_profile};
pub use mesh::{ConfigError, GridConfig, Partition, PhaseCell, PhaseSpaceGrid};
pub use solver::{
    CellCoeffs, DGCoefficients, RateOperator, VlasovOperator, cell_rates, compute_rates,
    compute_rates_into,
};
pub use time::{
    ChannelExchange, ExchangeError, Rk3Integrator, SerialExchange, StateExchange, StepError,
    ssp_rk3_step,
};
pub use types::{CellIndex, VelocityIndex};
