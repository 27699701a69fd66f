//! Upwind flux through the v1 faces of a cell.
//!
//! The sign of the cell-integrated field ∫_{I_i} E dx selects the upwind side.
//! When it is positive both faces of cell j1 read the bottom edge of the cell
//! above them; otherwise they read the top edge of the cell below. Velocity
//! space has hard walls: the top face of j1 = Nv-1 and the bottom face of
//! j1 = 0 carry no flux, whichever way the field points.

use super::context::FluxContext;
use crate::basis::ShapeVector;
use crate::basis::shape::{CLOSURE_FACE_MEAN, CLOSURE_FACE_NORM, LINEAR_NORM};
use crate::solver::CellCoeffs;
use crate::types::CellIndex;

/// Cell expansion restricted to one of its v1 faces.
#[derive(Clone, Copy, Debug, Default)]
struct VelocityTrace {
    /// Face value integrated over (η2, η3), closure included
    value: f64,
    /// Face value without the closure shape
    edge: f64,
    x_slope: f64,
    v2: f64,
    v3: f64,
    closure: f64,
}

impl VelocityTrace {
    /// Trace at η1 = side/2.
    #[inline]
    fn at_face(c: CellCoeffs, side: f64) -> Self {
        let edge = c.mean + 0.5 * side * c.v1_slope;
        Self {
            value: edge + c.closure * CLOSURE_FACE_MEAN,
            edge,
            x_slope: c.x_slope,
            v2: c.v2_slope,
            v3: c.v3_slope,
            closure: c.closure,
        }
    }
}

/// ∫ E f̂ φ_l over the top face minus the same over the bottom face.
pub fn velocity_flux(ctx: &FluxContext<'_>, k: CellIndex) -> ShapeVector {
    let grid = ctx.grid;
    let cell = grid.decode(k);
    let i = cell.i;

    let e = ctx.moments.int_e(i);
    let e1 = ctx.moments.int_e1(i);
    let e2 = ctx.moments.int_e2(i);

    let has_top = cell.j1 + 1 < grid.nv();
    let has_bottom = cell.j1 > 0;

    let (top, bottom) = if e > 0.0 {
        (
            has_top.then(|| VelocityTrace::at_face(ctx.coeffs(cell.with_j1(cell.j1 + 1)), -1.0)),
            has_bottom.then(|| VelocityTrace::at_face(ctx.coeffs(cell), -1.0)),
        )
    } else {
        (
            has_top.then(|| VelocityTrace::at_face(ctx.coeffs(cell), 1.0)),
            has_bottom.then(|| VelocityTrace::at_face(ctx.coeffs(cell.with_j1(cell.j1 - 1)), 1.0)),
        )
    };
    let t = top.unwrap_or_default();
    let b = bottom.unwrap_or_default();

    let dv2 = grid.dv() * grid.dv();
    let d_value = t.value - b.value;
    let d_x = t.x_slope - b.x_slope;

    [
        dv2 * (d_value * e + d_x * e1),
        dv2 * (d_value * e1 + d_x * e2),
        // φ2 is +1/2 on the top face and -1/2 on the bottom one
        0.5 * dv2 * ((t.value + b.value) * e + (t.x_slope + b.x_slope) * e1),
        (t.v2 - b.v2) * e * dv2 * LINEAR_NORM,
        (t.v3 - b.v3) * e * dv2 * LINEAR_NORM,
        dv2 * (((t.edge - b.edge) * CLOSURE_FACE_MEAN + (t.closure - b.closure) * CLOSURE_FACE_NORM)
            * e
            + d_x * e1 * CLOSURE_FACE_MEAN),
    ]
}
