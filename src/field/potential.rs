//! Electrostatic potential.
//!
//! φ(x) = Δv³ ∫_0^x ∫_0^y ρ̂(z) dz dy - x²/2 - C_E x, with ρ̂ the density
//! before the Δv³ factor, so that φ'' = ρ - 1. φ is continuous across cell
//! edges.

use super::context::CellSums;
use crate::mesh::PhaseSpaceGrid;
use crate::solver::DGCoefficients;

/// φ(x) for `x` in space cell `i`, given the field constant of `u`.
pub fn potential_at(u: &DGCoefficients, grid: &PhaseSpaceGrid, ce: f64, x: f64, i: usize) -> f64 {
    let sums = CellSums::compute_through(u, grid, i);
    potential_from_sums(&sums, grid, ce, x, i)
}

/// φ(x) for `x` in space cell `i` from precomputed sums covering cells `0..=i`.
pub fn potential_from_sums(
    sums: &CellSums,
    grid: &PhaseSpaceGrid,
    ce: f64,
    x: f64,
    i: usize,
) -> f64 {
    let dx = grid.dx();

    // Whole cells to the left: Σ_{m<i} [Σ_{q<m} a_q + a_m/2 - b_m/12] Δx²
    let mut prefix = 0.0;
    let mut whole = 0.0;
    for m in 0..i {
        let s = sums.get(m);
        whole += prefix + s.half_cell_charge();
        prefix += s.average;
    }
    let whole = whole * dx * dx;

    let x_diff = x - grid.x_left(i);
    let x_mid = x - grid.x_center(i);
    let linear = prefix * dx * x_diff;

    // ∫_{x_{i-1/2}}^x ∫_{x_{i-1/2}}^y (z - x_i)/Δx dz dy
    let slope_kernel = x_mid * x_mid * x_mid / (6.0 * dx) - dx * x_mid / 8.0 - dx * dx / 24.0;
    let own = sums.get(i);
    let local = own.average * x_diff * x_diff / 2.0 + own.x_slope * slope_kernel;

    (whole + linear + local) * grid.scalev() - x * x / 2.0 - ce * x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basis::Shape;
    use crate::field::density;
    use crate::field::moments::field_constant;
    use crate::mesh::GridConfig;
    use crate::types::CellIndex;

    fn setup() -> (PhaseSpaceGrid, DGCoefficients) {
        let g = PhaseSpaceGrid::new(&GridConfig::new(5, 2, 2.0, 1.0)).unwrap();
        let mut u = DGCoefficients::for_grid(&g);
        for k in CellIndex::iter(g.n_cells()) {
            let cell = g.decode(k);
            u.set(k, Shape::Constant, 0.2 + 0.1 * cell.i as f64);
            u.set(k, Shape::X, 0.05 * (cell.i as f64 - 2.0));
            u.set(k, Shape::Closure, 0.04);
        }
        (g, u)
    }

    #[test]
    fn test_empty_state_potential() {
        let g = PhaseSpaceGrid::new(&GridConfig::new(4, 2, 2.0, 1.0)).unwrap();
        let u = DGCoefficients::for_grid(&g);
        let ce = field_constant(&u, &g);
        assert!((ce - 1.0).abs() < 1e-15);
        for (x, i) in [(0.1, 0), (0.9, 1), (1.7, 3)] {
            let phi = potential_at(&u, &g, ce, x, i);
            assert!((phi - (-x * x / 2.0 - x)).abs() < 1e-14);
        }
    }

    #[test]
    fn test_potential_is_continuous_across_edges() {
        let (g, u) = setup();
        let ce = field_constant(&u, &g);
        for i in 0..g.nx() - 1 {
            let edge = g.x_left(i + 1);
            let from_left = potential_at(&u, &g, ce, edge, i);
            let from_right = potential_at(&u, &g, ce, edge, i + 1);
            assert!(
                (from_left - from_right).abs() < 1e-13,
                "jump at edge {}: {} vs {}",
                i + 1,
                from_left,
                from_right
            );
        }
    }

    #[test]
    fn test_potential_curvature_tracks_density() {
        let (g, u) = setup();
        let ce = field_constant(&u, &g);
        let i = 2;
        let x = g.x_center(i) + 0.1 * g.dx();
        let h = 1e-3;
        let curvature = (potential_at(&u, &g, ce, x + h, i) - 2.0 * potential_at(&u, &g, ce, x, i)
            + potential_at(&u, &g, ce, x - h, i))
            / (h * h);
        let expected = density(&u, &g, x, i) - 1.0;
        assert!((curvature - expected).abs() < 1e-5, "{} vs {}", curvature, expected);
    }
}
