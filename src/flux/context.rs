//! Inputs shared by every flux kernel during one stage.

use crate::field::FieldMoments;
use crate::mesh::{PhaseCell, PhaseSpaceGrid};
use crate::solver::{CellCoeffs, DGCoefficients};

/// Stage state, grid, and the field moments of that same state.
#[derive(Clone, Copy, Debug)]
pub struct FluxContext<'a> {
    /// Full state at the stage (every partition's cells)
    pub state: &'a DGCoefficients,
    /// Phase-space grid
    pub grid: &'a PhaseSpaceGrid,
    /// Field moments computed from `state`
    pub moments: &'a FieldMoments,
}

impl<'a> FluxContext<'a> {
    /// Bundle the inputs of one stage.
    #[inline]
    pub fn new(
        state: &'a DGCoefficients,
        grid: &'a PhaseSpaceGrid,
        moments: &'a FieldMoments,
    ) -> Self {
        Self {
            state,
            grid,
            moments,
        }
    }

    /// Coefficients of a cell given by per-axis coordinates.
    #[inline]
    pub fn coeffs(&self, cell: PhaseCell) -> CellCoeffs {
        self.state.cell(self.grid.encode(cell))
    }
}
