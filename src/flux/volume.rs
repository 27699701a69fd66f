//! Volume terms of the weak form.
//!
//! With v1 = v_{j1} + Δv η1 and E depending on x only, both volume integrals
//! reduce to a single non-zero entry per shape that has a derivative in the
//! transported direction.

use super::context::FluxContext;
use crate::basis::ShapeVector;
use crate::basis::shape::{CLOSURE_MEAN, LINEAR_NORM};
use crate::types::CellIndex;

/// ∫ v1 f ∂φ_l/∂x over the cell.
///
/// Only φ1 depends on x, so every other entry is zero.
pub fn space_volume(ctx: &FluxContext<'_>, k: CellIndex) -> ShapeVector {
    let grid = ctx.grid;
    let cell = grid.decode(k);
    let c = ctx.state.cell(k);
    let v = grid.v_center(cell.j1);

    let mut out = [0.0; 6];
    out[1] = grid.scalev()
        * (v * c.mean + grid.dv() * c.v1_slope * LINEAR_NORM + c.closure * v * CLOSURE_MEAN);
    out
}

/// ∫ E f ∂φ_l/∂v1 over the cell.
///
/// φ2 = η1 gives the field against the cell's x profile; φ5 contributes
/// through ∂(η1²)/∂v1 = 2η1/Δv, which only sees the v1 slope.
pub fn velocity_volume(ctx: &FluxContext<'_>, k: CellIndex) -> ShapeVector {
    let grid = ctx.grid;
    let i = grid.decode(k).i;
    let c = ctx.state.cell(k);
    let dv = grid.dv();
    let int_e = ctx.moments.int_e(i);

    let mut out = [0.0; 6];
    out[2] = grid.scalev() * (c.average() * int_e + c.x_slope * ctx.moments.int_e1(i)) / dv;
    out[5] = c.v1_slope * dv * dv * int_e / 6.0;
    out
}
