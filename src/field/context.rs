//! Per-stage field context.
//!
//! Everything the flux assembler needs from the field is computed once per
//! RK stage from the stage's input state and carried in a [`FieldMoments`]
//! value. Construction order is fixed by the types: [`CellSums`] →
//! [`ChargeProfile`] (C_E and the cumulative densities) → the cell field
//! integrals, the last of which borrow the charge profile.

use super::moments::{SpaceCellSums, field_integral, field_integral_1st, field_integral_2nd};
use crate::mesh::PhaseSpaceGrid;
use crate::solver::DGCoefficients;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Velocity-summed coefficients of every space cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellSums {
    cells: Vec<SpaceCellSums>,
}

impl CellSums {
    /// Sum the state over velocity for every space cell.
    pub fn compute(u: &DGCoefficients, grid: &PhaseSpaceGrid) -> Self {
        #[cfg(feature = "parallel")]
        let cells = (0..grid.nx())
            .into_par_iter()
            .map(|i| SpaceCellSums::compute(u, grid, i))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let cells = (0..grid.nx())
            .map(|i| SpaceCellSums::compute(u, grid, i))
            .collect();

        Self { cells }
    }

    /// Sums for space cells `0..=last` only.
    pub fn compute_through(u: &DGCoefficients, grid: &PhaseSpaceGrid, last: usize) -> Self {
        let cells = (0..=last)
            .map(|i| SpaceCellSums::compute(u, grid, i))
            .collect();
        Self { cells }
    }

    /// Sums of space cell `i`.
    #[inline]
    pub fn get(&self, i: usize) -> &SpaceCellSums {
        &self.cells[i]
    }

    /// Number of space cells covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if no cells are covered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Field constant and cumulative densities of one state.
#[derive(Clone, Debug, PartialEq)]
pub struct ChargeProfile {
    field_constant: f64,
    cumulative: Vec<f64>,
}

impl ChargeProfile {
    /// Build from per-cell sums with a left-exclusive running prefix.
    pub fn from_sums(sums: &CellSums, grid: &PhaseSpaceGrid) -> Self {
        let dx = grid.dx();
        let scalev = grid.scalev();

        let mut cumulative = Vec::with_capacity(sums.len());
        let mut prefix = 0.0;
        let mut pair_sum = 0.0;
        for i in 0..sums.len() {
            let s = sums.get(i);
            cumulative.push(prefix * dx * scalev);
            pair_sum += prefix + s.half_cell_charge();
            prefix += s.average;
        }

        let field_constant = 0.5 * grid.lx() - pair_sum * scalev * dx * dx / grid.lx();

        Self {
            field_constant,
            cumulative,
        }
    }

    /// Build directly from a state.
    pub fn compute(u: &DGCoefficients, grid: &PhaseSpaceGrid) -> Self {
        Self::from_sums(&CellSums::compute(u, grid), grid)
    }

    /// C_E.
    #[inline]
    pub fn field_constant(&self) -> f64 {
        self.field_constant
    }

    /// ∫_0^{x_{i-1/2}} ρ dx.
    #[inline]
    pub fn cumulative(&self, i: usize) -> f64 {
        self.cumulative[i]
    }
}

/// Field quantities consumed by the flux assembler for one stage.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldMoments {
    charge: ChargeProfile,
    int_e: Vec<f64>,
    int_e1: Vec<f64>,
    int_e2: Vec<f64>,
}

impl FieldMoments {
    /// Compute every per-cell field scalar of `u`.
    pub fn compute(u: &DGCoefficients, grid: &PhaseSpaceGrid) -> Self {
        let sums = CellSums::compute(u, grid);
        let charge = ChargeProfile::from_sums(&sums, grid);
        Self::from_parts(&sums, charge, grid)
    }

    /// Assemble from sums and the charge profile of the same state.
    pub fn from_parts(sums: &CellSums, charge: ChargeProfile, grid: &PhaseSpaceGrid) -> Self {
        let nx = sums.len();
        let mut int_e = Vec::with_capacity(nx);
        let mut int_e1 = Vec::with_capacity(nx);
        let mut int_e2 = Vec::with_capacity(nx);
        for i in 0..nx {
            let s = sums.get(i);
            int_e.push(field_integral(s, &charge, grid, i));
            int_e1.push(field_integral_1st(s, grid));
            int_e2.push(field_integral_2nd(s, &charge, grid, i));
        }
        Self {
            charge,
            int_e,
            int_e1,
            int_e2,
        }
    }

    /// C_E.
    #[inline]
    pub fn field_constant(&self) -> f64 {
        self.charge.field_constant()
    }

    /// Charge profile the moments were built from.
    #[inline]
    pub fn charge(&self) -> &ChargeProfile {
        &self.charge
    }

    /// ∫_{I_i} E dx.
    #[inline]
    pub fn int_e(&self, i: usize) -> f64 {
        self.int_e[i]
    }

    /// ∫_{I_i} E ξ dx.
    #[inline]
    pub fn int_e1(&self, i: usize) -> f64 {
        self.int_e1[i]
    }

    /// ∫_{I_i} E ξ² dx.
    #[inline]
    pub fn int_e2(&self, i: usize) -> f64 {
        self.int_e2[i]
    }
}
