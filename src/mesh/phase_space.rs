//! Uniform 1D-3V phase-space grid.
//!
//! Space is periodic on `[0, Lx)`; each velocity axis covers `[-Lv, Lv]` with
//! hard walls. Cells are numbered `k = i·Nv³ + j1·Nv² + j2·Nv + j3`.

use super::config::{ConfigError, GridConfig};
use crate::types::{CellIndex, VelocityIndex};

/// Phase-space cell in per-axis coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PhaseCell {
    /// Space index in `[0, Nx)`
    pub i: usize,
    /// First velocity index in `[0, Nv)`
    pub j1: usize,
    /// Second velocity index in `[0, Nv)`
    pub j2: usize,
    /// Third velocity index in `[0, Nv)`
    pub j3: usize,
}

impl PhaseCell {
    /// Same velocity cell, different space cell.
    #[inline]
    pub fn with_space(self, i: usize) -> Self {
        Self { i, ..self }
    }

    /// Same space cell and (j2, j3), different first velocity index.
    #[inline]
    pub fn with_j1(self, j1: usize) -> Self {
        Self { j1, ..self }
    }
}

/// Uniform phase-space grid with derived spacings.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseSpaceGrid {
    nx: usize,
    nv: usize,
    lx: f64,
    lv: f64,
    dx: f64,
    dv: f64,
    size_v: usize,
    scalev: f64,
}

impl PhaseSpaceGrid {
    /// Build the grid from a validated configuration.
    pub fn new(config: &GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let dx = config.lx / config.nx as f64;
        let dv = 2.0 * config.lv / config.nv as f64;

        Ok(Self {
            nx: config.nx,
            nv: config.nv,
            lx: config.lx,
            lv: config.lv,
            dx,
            dv,
            size_v: config.nv * config.nv * config.nv,
            scalev: dv * dv * dv,
        })
    }

    /// Number of space cells.
    #[inline]
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of velocity cells per dimension.
    #[inline]
    pub fn nv(&self) -> usize {
        self.nv
    }

    /// Space domain length.
    #[inline]
    pub fn lx(&self) -> f64 {
        self.lx
    }

    /// Velocity half-extent.
    #[inline]
    pub fn lv(&self) -> f64 {
        self.lv
    }

    /// Space cell width.
    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Velocity cell width (same on every axis).
    #[inline]
    pub fn dv(&self) -> f64 {
        self.dv
    }

    /// Velocity cells per space cell (Nv³).
    #[inline]
    pub fn size_v(&self) -> usize {
        self.size_v
    }

    /// Velocity cell volume Δv³.
    #[inline]
    pub fn scalev(&self) -> f64 {
        self.scalev
    }

    /// Physical volume of one phase-space cell.
    #[inline]
    pub fn cell_volume(&self) -> f64 {
        self.dx * self.scalev
    }

    /// Total number of phase-space cells.
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.nx * self.size_v
    }

    /// x-coordinate at fractional space index `m` (cell centre for integer `m`).
    ///
    /// `grid_x(i as f64 - 0.5)` is the left edge of cell `i`.
    #[inline]
    pub fn grid_x(&self, m: f64) -> f64 {
        (m + 0.5) * self.dx
    }

    /// Velocity coordinate at fractional index `m` along one axis.
    #[inline]
    pub fn grid_v(&self, m: f64) -> f64 {
        -self.lv + (m + 0.5) * self.dv
    }

    /// Centre of space cell `i`.
    #[inline]
    pub fn x_center(&self, i: usize) -> f64 {
        self.grid_x(i as f64)
    }

    /// Left edge of space cell `i`.
    #[inline]
    pub fn x_left(&self, i: usize) -> f64 {
        self.grid_x(i as f64 - 0.5)
    }

    /// Centre of velocity cell `j` along one axis.
    #[inline]
    pub fn v_center(&self, j: usize) -> f64 {
        self.grid_v(j as f64)
    }

    /// Map a possibly out-of-range space index onto `[0, Nx)`.
    ///
    /// Only the one-cell overhang on either side is meaningful: `-1` maps to
    /// `Nx - 1` and `Nx` maps to `0`.
    ///
    /// # Panics
    ///
    /// Panics for any index further out, which no flux stencil produces.
    #[inline]
    pub fn wrap_space(&self, i: isize) -> usize {
        let nx = self.nx as isize;
        let wrapped = if i == -1 {
            nx - 1
        } else if i == nx {
            0
        } else {
            i
        };
        assert!(
            (0..nx).contains(&wrapped),
            "space index {} outside periodic stencil of {} cells",
            i,
            self.nx
        );
        wrapped as usize
    }

    /// Periodic right neighbour of space cell `i`.
    #[inline]
    pub fn right_of(&self, i: usize) -> usize {
        self.wrap_space(i as isize + 1)
    }

    /// Periodic left neighbour of space cell `i`.
    #[inline]
    pub fn left_of(&self, i: usize) -> usize {
        self.wrap_space(i as isize - 1)
    }

    /// Composite velocity index of a cell.
    #[inline]
    pub fn velocity_index(&self, cell: PhaseCell) -> VelocityIndex {
        VelocityIndex::new(cell.j1 * self.nv * self.nv + cell.j2 * self.nv + cell.j3)
    }

    /// Global index of a cell.
    #[inline]
    pub fn encode(&self, cell: PhaseCell) -> CellIndex {
        CellIndex::new(cell.i * self.size_v + self.velocity_index(cell).get())
    }

    /// Global index of velocity cell `j` inside space cell `i`.
    #[inline]
    pub fn cell_at(&self, i: usize, j: VelocityIndex) -> CellIndex {
        CellIndex::new(i * self.size_v + j.get())
    }

    /// Recover per-axis coordinates from a global index.
    ///
    /// # Panics
    ///
    /// Panics if `k` is not a cell of this grid.
    #[inline]
    pub fn decode(&self, k: CellIndex) -> PhaseCell {
        let k = k.get();
        assert!(
            k < self.n_cells(),
            "cell index {} out of range for {} cells",
            k,
            self.n_cells()
        );
        let nv = self.nv;
        let j_mod = k % self.size_v;
        let j3 = j_mod % nv;
        let j2 = ((j_mod - j3) % (nv * nv)) / nv;
        let j1 = (j_mod - j3 - j2 * nv) / (nv * nv);
        let i = (k - j_mod) / self.size_v;
        PhaseCell { i, j1, j2, j3 }
    }

    /// Whether velocity index `j1` lies in the negative half of the axis.
    ///
    /// The middle cell of an odd `Nv` counts as non-negative.
    #[inline]
    pub fn is_negative_velocity(&self, j1: usize) -> bool {
        j1 < self.nv / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(nx: usize, nv: usize) -> PhaseSpaceGrid {
        PhaseSpaceGrid::new(&GridConfig::new(nx, nv, 2.0, 3.0)).unwrap()
    }

    #[test]
    fn test_derived_spacings() {
        let g = grid(8, 6);
        assert!((g.dx() - 0.25).abs() < 1e-15);
        assert!((g.dv() - 1.0).abs() < 1e-15);
        assert_eq!(g.size_v(), 216);
        assert_eq!(g.n_cells(), 8 * 216);
        assert!((g.scalev() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_coordinates() {
        let g = grid(8, 6);
        assert!((g.x_center(0) - 0.125).abs() < 1e-15);
        assert!((g.x_left(0)).abs() < 1e-15);
        assert!((g.x_left(8) - g.lx()).abs() < 1e-14);
        assert!((g.v_center(0) + 2.5).abs() < 1e-15);
        assert!((g.v_center(5) - 2.5).abs() < 1e-15);
    }

    #[test]
    fn test_decode_inverts_encode_for_every_cell() {
        for (nx, nv) in [(3, 4), (5, 3), (1, 1)] {
            let g = grid(nx, nv);
            for k in CellIndex::iter(g.n_cells()) {
                let cell = g.decode(k);
                assert!(cell.i < nx && cell.j1 < nv && cell.j2 < nv && cell.j3 < nv);
                assert_eq!(g.encode(cell), k, "decode/encode mismatch at {}", k);
            }
        }
    }

    #[test]
    fn test_decode_layout() {
        let g = grid(3, 4);
        let cell = g.decode(CellIndex::new(2 * 64 + 3 * 16 + 1 * 4 + 2));
        assert_eq!(
            cell,
            PhaseCell {
                i: 2,
                j1: 3,
                j2: 1,
                j3: 2
            }
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_decode_out_of_range_panics() {
        let g = grid(2, 2);
        g.decode(CellIndex::new(16));
    }

    #[test]
    fn test_periodic_wrap() {
        let g = grid(5, 2);
        assert_eq!(g.wrap_space(5), 0);
        assert_eq!(g.wrap_space(-1), 4);
        assert_eq!(g.wrap_space(3), 3);
        assert_eq!(g.right_of(4), 0);
        assert_eq!(g.left_of(0), 4);
        assert_eq!(g.right_of(1), 2);
    }

    #[test]
    #[should_panic(expected = "periodic stencil")]
    fn test_wrap_beyond_stencil_panics() {
        let g = grid(5, 2);
        g.wrap_space(6);
    }

    #[test]
    fn test_velocity_sign_split() {
        let g = grid(2, 4);
        assert!(g.is_negative_velocity(1));
        assert!(!g.is_negative_velocity(2));

        let odd = grid(2, 5);
        assert!(odd.is_negative_velocity(1));
        assert!(!odd.is_negative_velocity(2));
        assert!(odd.v_center(2).abs() < 1e-15);
    }
}
