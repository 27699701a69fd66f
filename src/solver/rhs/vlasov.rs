//! Rate assembly for the Vlasov-Poisson system.
//!
//! For every cell k the weak-form residual is
//!
//! tp = I1 - I2 - I3 + I5
//!
//! (space volume, velocity volume, space flux, velocity flux), projected onto
//! the basis through the inverse mass matrix.

use std::ops::Range;

use tracing::debug;

use crate::basis::{N_SHAPES, ShapeVector, project_rates};
use crate::field::FieldMoments;
use crate::flux::{FluxContext, space_flux, space_volume, velocity_flux, velocity_volume};
use crate::mesh::PhaseSpaceGrid;
use crate::solver::DGCoefficients;
use crate::types::CellIndex;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Something that turns a full state into rates for a range of cells.
///
/// `out` holds the rates of `cells` only, six per cell in storage order.
/// Implementations must not write outside `out`.
pub trait RateOperator {
    /// Compute dU/dt for `cells` from the full `state`.
    fn evaluate(&mut self, state: &DGCoefficients, cells: Range<usize>, out: &mut [f64]);
}

/// Rates of a single cell.
#[inline]
pub fn cell_rates(ctx: &FluxContext<'_>, k: CellIndex) -> ShapeVector {
    let i1 = space_volume(ctx, k);
    let i2 = velocity_volume(ctx, k);
    let i3 = space_flux(ctx, k);
    let i5 = velocity_flux(ctx, k);

    let mut tp = [0.0; N_SHAPES];
    for l in 0..N_SHAPES {
        tp[l] = i1[l] - i2[l] - i3[l] + i5[l];
    }
    project_rates(&tp, ctx.grid.cell_volume())
}

/// Rates of `cells`, written to `out` in order.
///
/// # Panics
///
/// Panics if `out` does not hold exactly six values per cell.
pub fn compute_rates_into(ctx: &FluxContext<'_>, cells: Range<usize>, out: &mut [f64]) {
    assert_eq!(out.len(), cells.len() * N_SHAPES);
    for (k, rates) in cells.zip(out.chunks_exact_mut(N_SHAPES)) {
        rates.copy_from_slice(&cell_rates(ctx, CellIndex::new(k)));
    }
}

/// Parallel version of [`compute_rates_into`].
///
/// Every cell is independent once the field moments are known, so the result
/// is bit-identical to the serial path.
#[cfg(feature = "parallel")]
pub fn compute_rates_into_parallel(ctx: &FluxContext<'_>, cells: Range<usize>, out: &mut [f64]) {
    assert_eq!(out.len(), cells.len() * N_SHAPES);
    let start = cells.start;
    out.par_chunks_exact_mut(N_SHAPES)
        .enumerate()
        .for_each(|(offset, rates)| {
            rates.copy_from_slice(&cell_rates(ctx, CellIndex::new(start + offset)));
        });
}

/// dU/dt for the whole domain.
pub fn compute_rates(u: &DGCoefficients, grid: &PhaseSpaceGrid) -> DGCoefficients {
    let moments = FieldMoments::compute(u, grid);
    let ctx = FluxContext::new(u, grid, &moments);
    let mut out = DGCoefficients::for_grid(grid);
    compute_rates_into(&ctx, 0..grid.n_cells(), &mut out.data);
    out
}

/// Vlasov-Poisson transport with a self-consistent field.
///
/// The field moments are recomputed from the state on every call and kept
/// afterwards, so after a time step they describe the last sub-stage input.
#[derive(Clone, Debug)]
pub struct VlasovOperator {
    grid: PhaseSpaceGrid,
    moments: Option<FieldMoments>,
}

impl VlasovOperator {
    /// Create an operator on a grid.
    pub fn new(grid: PhaseSpaceGrid) -> Self {
        Self {
            grid,
            moments: None,
        }
    }

    /// Grid the operator works on.
    pub fn grid(&self) -> &PhaseSpaceGrid {
        &self.grid
    }

    /// Field moments of the most recent evaluation.
    pub fn moments(&self) -> Option<&FieldMoments> {
        self.moments.as_ref()
    }
}

impl RateOperator for VlasovOperator {
    fn evaluate(&mut self, state: &DGCoefficients, cells: Range<usize>, out: &mut [f64]) {
        let moments = FieldMoments::compute(state, &self.grid);
        debug!(
            field_constant = moments.field_constant(),
            first_cell = cells.start,
            n_cells = cells.len(),
            "evaluating rates"
        );

        let ctx = FluxContext::new(state, &self.grid, &moments);

        #[cfg(feature = "parallel")]
        compute_rates_into_parallel(&ctx, cells, out);

        #[cfg(not(feature = "parallel"))]
        compute_rates_into(&ctx, cells, out);

        self.moments = Some(moments);
    }
}
