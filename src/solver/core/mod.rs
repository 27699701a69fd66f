//! Core state container for the phase-space DG discretization.
//!
//! - [`DGCoefficients`]: flat six-coefficient-per-cell storage
//! - [`CellCoeffs`]: named view of one cell's coefficients

mod coefficients;

pub use coefficients::{CellCoeffs, DGCoefficients};
