//! DG solver components.
//!
//! # Submodules
//!
//! - [`core`]: Coefficient storage for the phase-space distribution
//! - [`rhs`]: Rate assembly from the transport terms

pub mod core;
pub mod rhs;

pub use core::{CellCoeffs, DGCoefficients};

pub use rhs::{RateOperator, VlasovOperator, cell_rates, compute_rates, compute_rates_into};

#[cfg(feature = "parallel")]
pub use rhs::compute_rates_into_parallel;
