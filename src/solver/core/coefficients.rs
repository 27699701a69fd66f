//! DG coefficient storage for the phase-space distribution.

use crate::basis::{N_SHAPES, Shape, shape::CLOSURE_MEAN};
use crate::mesh::{ConfigError, PhaseSpaceGrid};
use crate::types::CellIndex;

/// The six coefficients of one cell, by name.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellCoeffs {
    /// Constant term
    pub mean: f64,
    /// Linear in x
    pub x_slope: f64,
    /// Linear in v1
    pub v1_slope: f64,
    /// Linear in v2
    pub v2_slope: f64,
    /// Linear in v3
    pub v3_slope: f64,
    /// |v|² closure
    pub closure: f64,
}

impl CellCoeffs {
    /// Cell average of the expansion (∫ f over the cell divided by its volume).
    #[inline]
    pub fn average(&self) -> f64 {
        self.mean + CLOSURE_MEAN * self.closure
    }

    /// Coefficients in storage order.
    #[inline]
    pub fn to_array(self) -> [f64; N_SHAPES] {
        [
            self.mean,
            self.x_slope,
            self.v1_slope,
            self.v2_slope,
            self.v3_slope,
            self.closure,
        ]
    }
}

/// Coefficient storage for the whole phase space.
///
/// Stores coefficients contiguously with layout [n_cells, 6]:
/// `data[k * 6 + l]` is shape `l` of cell `k`.
#[derive(Clone, Debug, PartialEq)]
pub struct DGCoefficients {
    /// Flat coefficients
    pub data: Vec<f64>,
    /// Number of phase-space cells
    pub n_cells: usize,
}

impl DGCoefficients {
    /// Create zero-initialized storage.
    pub fn new(n_cells: usize) -> Self {
        Self {
            data: vec![0.0; n_cells * N_SHAPES],
            n_cells,
        }
    }

    /// Zero storage sized for a grid.
    pub fn for_grid(grid: &PhaseSpaceGrid) -> Self {
        Self::new(grid.n_cells())
    }

    /// Wrap an existing flat array.
    pub fn from_vec(data: Vec<f64>) -> Result<Self, ConfigError> {
        if data.len() % N_SHAPES != 0 {
            return Err(ConfigError::PartialRecord { len: data.len() });
        }
        let n_cells = data.len() / N_SHAPES;
        Ok(Self { data, n_cells })
    }

    /// Check that this state matches a grid.
    pub fn check_grid(&self, grid: &PhaseSpaceGrid) -> Result<(), ConfigError> {
        let expected = grid.n_cells() * N_SHAPES;
        if self.data.len() != expected {
            return Err(ConfigError::StateSize {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Coefficient of `shape` in cell `k`.
    #[inline]
    pub fn get(&self, k: CellIndex, shape: Shape) -> f64 {
        self.data[k.get() * N_SHAPES + shape.index()]
    }

    /// Set the coefficient of `shape` in cell `k`.
    #[inline]
    pub fn set(&mut self, k: CellIndex, shape: Shape, value: f64) {
        self.data[k.get() * N_SHAPES + shape.index()] = value;
    }

    /// Raw coefficients of cell `k`.
    #[inline]
    pub fn element(&self, k: CellIndex) -> &[f64] {
        let start = k.get() * N_SHAPES;
        &self.data[start..start + N_SHAPES]
    }

    /// Mutable raw coefficients of cell `k`.
    #[inline]
    pub fn element_mut(&mut self, k: CellIndex) -> &mut [f64] {
        let start = k.get() * N_SHAPES;
        &mut self.data[start..start + N_SHAPES]
    }

    /// Named view of cell `k`.
    #[inline]
    pub fn cell(&self, k: CellIndex) -> CellCoeffs {
        let c = self.element(k);
        CellCoeffs {
            mean: c[0],
            x_slope: c[1],
            v1_slope: c[2],
            v2_slope: c[3],
            v3_slope: c[4],
            closure: c[5],
        }
    }

    /// Overwrite cell `k`.
    #[inline]
    pub fn set_cell(&mut self, k: CellIndex, coeffs: CellCoeffs) {
        self.element_mut(k).copy_from_slice(&coeffs.to_array());
    }

    /// Scale all values by a constant.
    pub fn scale(&mut self, c: f64) {
        for v in &mut self.data {
            *v *= c;
        }
    }

    /// Add c * other to self (axpy operation).
    pub fn axpy(&mut self, c: f64, other: &DGCoefficients) {
        assert_eq!(self.data.len(), other.data.len());
        for (a, b) in self.data.iter_mut().zip(other.data.iter()) {
            *a += c * *b;
        }
    }

    /// Get maximum absolute value.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().map(|&x| x.abs()).fold(0.0, f64::max)
    }

    /// ∫ f dx dv over the whole phase space.
    pub fn total_mass(&self, grid: &PhaseSpaceGrid) -> f64 {
        let sum: f64 = CellIndex::iter(self.n_cells)
            .map(|k| self.cell(k).average())
            .sum();
        sum * grid.cell_volume()
    }
}
