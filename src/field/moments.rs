//! Density and field integrals over space cells.
//!
//! The electric field is E(x) = x - C_E - ∫_0^x ρ(z) dz on the periodic
//! domain, where the linear ramp is the uniform neutralizing background and
//! C_E is fixed by requiring ∫_0^Lx E dx = 0. Inside space cell i, with
//! y = x - x_i,
//!
//! ρ(x) = Δv³ (a_i + b_i y/Δx),   a_i = Σ_j (c0 + c5/4),   b_i = Σ_j c1,
//!
//! so every integral of E against 1, y/Δx and (y/Δx)² over the cell has a
//! closed form in a_i, b_i, C_E and the cumulative density up to the cell's
//! left edge.

use super::context::ChargeProfile;
use crate::mesh::PhaseSpaceGrid;
use crate::solver::DGCoefficients;
use crate::types::VelocityIndex;

/// Velocity-summed coefficients of one space cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpaceCellSums {
    /// Σ_j (c0 + c5/4): cell-averaged density before the Δv³ factor
    pub average: f64,
    /// Σ_j c1: density slope before the Δv³ factor
    pub x_slope: f64,
}

impl SpaceCellSums {
    /// Sum over every velocity cell of space cell `i`.
    pub fn compute(u: &DGCoefficients, grid: &PhaseSpaceGrid, i: usize) -> Self {
        let mut sums = Self::default();
        for j in VelocityIndex::iter(grid.size_v()) {
            let c = u.cell(grid.cell_at(i, j));
            sums.average += c.average();
            sums.x_slope += c.x_slope;
        }
        sums
    }

    /// ∫_{I_i} ∫_{x_{i-1/2}}^x ρ(z) dz dx in units of Δx²·Δv³.
    #[inline]
    pub(crate) fn half_cell_charge(&self) -> f64 {
        0.5 * self.average - self.x_slope / 12.0
    }
}

/// Local density ρ(x) for `x` inside space cell `i`.
pub fn density(u: &DGCoefficients, grid: &PhaseSpaceGrid, x: f64, i: usize) -> f64 {
    let sums = SpaceCellSums::compute(u, grid, i);
    density_from_sums(&sums, grid, x, i)
}

pub(crate) fn density_from_sums(
    sums: &SpaceCellSums,
    grid: &PhaseSpaceGrid,
    x: f64,
    i: usize,
) -> f64 {
    let xi = (x - grid.x_center(i)) / grid.dx();
    grid.scalev() * (sums.average + sums.x_slope * xi)
}

/// Cell-averaged density of space cell `i`.
pub fn density_cell_average(u: &DGCoefficients, grid: &PhaseSpaceGrid, i: usize) -> f64 {
    grid.scalev() * SpaceCellSums::compute(u, grid, i).average
}

/// Field constant C_E enforcing global neutrality.
///
/// C_E = Lx/2 - Δx²Δv³/Lx · Σ_q [Σ_{m<q} a_m + a_q/2 - b_q/12]
pub fn field_constant(u: &DGCoefficients, grid: &PhaseSpaceGrid) -> f64 {
    ChargeProfile::compute(u, grid).field_constant()
}

/// ∫_0^{x_{i-1/2}} ρ dx: the charge in every space cell strictly left of `i`.
pub fn cumulative_density(u: &DGCoefficients, grid: &PhaseSpaceGrid, i: usize) -> f64 {
    let mut sum = 0.0;
    for m in 0..i {
        sum += SpaceCellSums::compute(u, grid, m).average;
    }
    sum * grid.dx() * grid.scalev()
}

/// ∫_{I_i} [∫_{x_{i-1/2}}^x ρ(z) dz] dx.
pub fn cell_integrated_cumulative_density(
    u: &DGCoefficients,
    grid: &PhaseSpaceGrid,
    i: usize,
) -> f64 {
    let sums = SpaceCellSums::compute(u, grid, i);
    sums.half_cell_charge() * grid.dx() * grid.dx() * grid.scalev()
}

/// ∫_{I_i} (x - x_i)/Δx · [∫_{x_{i-1/2}}^x ρ(z) dz] dx.
pub fn cell_integrated_cumulative_density_1st(
    u: &DGCoefficients,
    grid: &PhaseSpaceGrid,
    i: usize,
) -> f64 {
    let sums = SpaceCellSums::compute(u, grid, i);
    sums.average / 12.0 * grid.dx() * grid.dx() * grid.scalev()
}

/// ∫_{I_i} E dx.
pub fn cell_integrated_field(
    u: &DGCoefficients,
    grid: &PhaseSpaceGrid,
    charge: &ChargeProfile,
    i: usize,
) -> f64 {
    let sums = SpaceCellSums::compute(u, grid, i);
    field_integral(&sums, charge, grid, i)
}

/// ∫_{I_i} E (x - x_i)/Δx dx.
pub fn cell_integrated_field_1st(u: &DGCoefficients, grid: &PhaseSpaceGrid, i: usize) -> f64 {
    let sums = SpaceCellSums::compute(u, grid, i);
    field_integral_1st(&sums, grid)
}

/// ∫_{I_i} E [(x - x_i)/Δx]² dx.
///
/// Needs the cumulative density at the cell's left edge and C_E for the same
/// state, which is why it takes a [`ChargeProfile`].
pub fn cell_integrated_field_2nd(
    u: &DGCoefficients,
    grid: &PhaseSpaceGrid,
    charge: &ChargeProfile,
    i: usize,
) -> f64 {
    let sums = SpaceCellSums::compute(u, grid, i);
    field_integral_2nd(&sums, charge, grid, i)
}

pub(crate) fn field_integral(
    sums: &SpaceCellSums,
    charge: &ChargeProfile,
    grid: &PhaseSpaceGrid,
    i: usize,
) -> f64 {
    let dx = grid.dx();
    (grid.x_center(i) - charge.field_constant() - charge.cumulative(i)) * dx
        - sums.half_cell_charge() * dx * dx * grid.scalev()
}

pub(crate) fn field_integral_1st(sums: &SpaceCellSums, grid: &PhaseSpaceGrid) -> f64 {
    let dx = grid.dx();
    (1.0 - grid.scalev() * sums.average) * dx * dx / 12.0
}

pub(crate) fn field_integral_2nd(
    sums: &SpaceCellSums,
    charge: &ChargeProfile,
    grid: &PhaseSpaceGrid,
    i: usize,
) -> f64 {
    let dx = grid.dx();
    let s = grid.scalev();
    let c1 = sums.average;
    let c2 = sums.x_slope * dx / 2.0;

    (-charge.cumulative(i) - charge.field_constant() + s * (c1 * grid.x_left(i) + 0.25 * c2))
        * dx
        / 12.0
        + (1.0 - s * c1) * dx * grid.x_center(i) / 12.0
        - s * c2 * dx / 80.0
}
