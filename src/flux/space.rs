//! Upwind flux through the space faces of a cell.
//!
//! The trace at a face is taken from the upwind side: for v1 < 0 information
//! arrives from the right, so both faces of cell i read the left edge of the
//! cell to their right (the right neighbour wraps periodically). For v1 ≥ 0
//! both faces read the right edge of the cell to their left.

use super::context::FluxContext;
use crate::basis::ShapeVector;
use crate::basis::shape::{CLOSURE_MEAN, CLOSURE_NORM, CLOSURE_V1_MOMENT, LINEAR_NORM};
use crate::solver::CellCoeffs;
use crate::types::CellIndex;

/// Cell expansion restricted to one of its x faces.
#[derive(Clone, Copy, Debug, Default)]
struct SpaceTrace {
    mean: f64,
    v1: f64,
    v2: f64,
    v3: f64,
    closure: f64,
}

impl SpaceTrace {
    /// Trace at ξ = side/2.
    #[inline]
    fn at_face(c: CellCoeffs, side: f64) -> Self {
        Self {
            mean: c.mean + 0.5 * side * c.x_slope,
            v1: c.v1_slope,
            v2: c.v2_slope,
            v3: c.v3_slope,
            closure: c.closure,
        }
    }
}

/// ∫ v1 f̂ φ_l over the right face minus the same over the left face.
pub fn space_flux(ctx: &FluxContext<'_>, k: CellIndex) -> ShapeVector {
    let grid = ctx.grid;
    let cell = grid.decode(k);

    let (right, left) = if grid.is_negative_velocity(cell.j1) {
        let neighbour = cell.with_space(grid.right_of(cell.i));
        (
            SpaceTrace::at_face(ctx.coeffs(neighbour), -1.0),
            SpaceTrace::at_face(ctx.coeffs(cell), -1.0),
        )
    } else {
        let neighbour = cell.with_space(grid.left_of(cell.i));
        (
            SpaceTrace::at_face(ctx.coeffs(cell), 1.0),
            SpaceTrace::at_face(ctx.coeffs(neighbour), 1.0),
        )
    };

    let v = grid.v_center(cell.j1);
    let dv = grid.dv();
    let dv3 = grid.scalev();

    let d_mean = right.mean - left.mean;
    let d_v1 = right.v1 - left.v1;
    let d_closure = right.closure - left.closure;

    // φ1 is +1/2 on the right face and -1/2 on the left one
    let s_mean = right.mean + left.mean;
    let s_v1 = right.v1 + left.v1;
    let s_closure = right.closure + left.closure;

    [
        dv3 * (d_mean * v + d_v1 * dv * LINEAR_NORM + d_closure * v * CLOSURE_MEAN),
        0.5 * dv3 * (s_mean * v + s_v1 * dv * LINEAR_NORM + s_closure * v * CLOSURE_MEAN),
        dv3 * ((d_mean * dv + d_v1 * v) * LINEAR_NORM + d_closure * dv * CLOSURE_V1_MOMENT),
        (right.v2 - left.v2) * v * dv3 * LINEAR_NORM,
        (right.v3 - left.v3) * v * dv3 * LINEAR_NORM,
        dv3 * (d_mean * v * CLOSURE_MEAN
            + d_v1 * dv * CLOSURE_V1_MOMENT
            + d_closure * v * CLOSURE_NORM),
    ]
}
