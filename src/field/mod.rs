//! Electrostatic field derived from the charge density.
//!
//! Provides:
//! - Local and cell-averaged density
//! - The field constant C_E and cumulative densities
//! - Closed-form cell integrals of E against 1, ξ and ξ²
//! - The potential φ

mod context;
pub mod moments;
mod potential;

pub use context::{CellSums, ChargeProfile, FieldMoments};
pub use moments::{
    SpaceCellSums, cell_integrated_cumulative_density, cell_integrated_cumulative_density_1st,
    cell_integrated_field, cell_integrated_field_1st, cell_integrated_field_2nd,
    cumulative_density, density, density_cell_average, field_constant,
};
pub use potential::{potential_at, potential_from_sums};
