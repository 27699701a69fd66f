//! Grid configuration and setup-time validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::basis::N_SHAPES;

/// Setup errors. All of these are configuration inconsistencies that must be
/// rejected before the first stage runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A cell count was zero.
    #[error("{name} must be at least 1, got 0")]
    ZeroCells { name: &'static str },

    /// A domain extent was zero, negative or not finite.
    #[error("{name} must be finite and positive, got {value}")]
    InvalidExtent { name: &'static str, value: f64 },

    /// The time step was zero, negative or not finite.
    #[error("time step must be finite and positive, got {0}")]
    InvalidTimeStep(f64),

    /// The cell count cannot be split into equal contiguous chunks.
    #[error("{n_cells} cells cannot be split evenly across {n_partitions} partitions")]
    UnevenPartition { n_cells: usize, n_partitions: usize },

    /// A chunk that does not start and end on a space-cell boundary.
    #[error("chunk of {chunk_cells} cells does not hold whole space cells of {size_v}")]
    MisalignedPartition { chunk_cells: usize, size_v: usize },

    /// The coefficient count of the grid does not fit in `usize`.
    #[error("grid of {nx} x {nv}^3 cells is too large to index")]
    GridTooLarge { nx: usize, nv: usize },

    /// A rank outside `[0, n_partitions)`.
    #[error("rank {rank} out of range for {n_partitions} partitions")]
    InvalidRank { rank: usize, n_partitions: usize },

    /// A coefficient array of the wrong length for the grid.
    #[error("state holds {actual} coefficients, grid requires {expected}")]
    StateSize { expected: usize, actual: usize },

    /// A flat array that ends partway through a cell.
    #[error("{len} coefficients do not form whole cells of six")]
    PartialRecord { len: usize },
}

/// Grid parameters supplied by the setup collaborator.
///
/// `lx` is the length of the periodic space domain `[0, lx)`; `lv` is the
/// half-extent of each velocity axis `[-lv, lv]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of space cells.
    pub nx: usize,
    /// Number of velocity cells per velocity dimension.
    pub nv: usize,
    /// Space domain length.
    pub lx: f64,
    /// Velocity half-extent.
    pub lv: f64,
}

impl GridConfig {
    /// Create a configuration.
    pub fn new(nx: usize, nv: usize, lx: f64, lv: f64) -> Self {
        Self { nx, nv, lx, lv }
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nx == 0 {
            return Err(ConfigError::ZeroCells { name: "nx" });
        }
        if self.nv == 0 {
            return Err(ConfigError::ZeroCells { name: "nv" });
        }
        if !(self.lx.is_finite() && self.lx > 0.0) {
            return Err(ConfigError::InvalidExtent {
                name: "lx",
                value: self.lx,
            });
        }
        if !(self.lv.is_finite() && self.lv > 0.0) {
            return Err(ConfigError::InvalidExtent {
                name: "lv",
                value: self.lv,
            });
        }
        let n_values = self
            .nv
            .checked_mul(self.nv)
            .and_then(|n| n.checked_mul(self.nv))
            .and_then(|n| n.checked_mul(self.nx))
            .and_then(|n| n.checked_mul(N_SHAPES));
        if n_values.is_none() {
            return Err(ConfigError::GridTooLarge {
                nx: self.nx,
                nv: self.nv,
            });
        }
        Ok(())
    }
}

/// Validate a time step.
pub fn validate_dt(dt: f64) -> Result<f64, ConfigError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(dt)
    } else {
        Err(ConfigError::InvalidTimeStep(dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        assert!(GridConfig::new(8, 4, 4.0 * std::f64::consts::PI, 5.0).validate().is_ok());
    }

    #[test]
    fn test_zero_counts_rejected() {
        assert_eq!(
            GridConfig::new(0, 4, 1.0, 1.0).validate(),
            Err(ConfigError::ZeroCells { name: "nx" })
        );
        assert_eq!(
            GridConfig::new(4, 0, 1.0, 1.0).validate(),
            Err(ConfigError::ZeroCells { name: "nv" })
        );
    }

    #[test]
    fn test_bad_extents_rejected() {
        assert!(matches!(
            GridConfig::new(4, 4, 0.0, 1.0).validate(),
            Err(ConfigError::InvalidExtent { name: "lx", .. })
        ));
        assert!(matches!(
            GridConfig::new(4, 4, 1.0, f64::NAN).validate(),
            Err(ConfigError::InvalidExtent { name: "lv", .. })
        ));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        assert_eq!(
            GridConfig::new(2, 1 << 22, 1.0, 1.0).validate(),
            Err(ConfigError::GridTooLarge { nx: 2, nv: 1 << 22 })
        );
        assert!(matches!(
            GridConfig::new(usize::MAX, 2, 1.0, 1.0).validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
        assert!(GridConfig::new(1 << 4, 1 << 6, 1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_time_step_validation() {
        assert_eq!(validate_dt(0.01), Ok(0.01));
        assert_eq!(validate_dt(0.0), Err(ConfigError::InvalidTimeStep(0.0)));
        assert!(validate_dt(f64::INFINITY).is_err());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{ "nx": 16, "nv": 8, "lx": 12.5, "lv": 5.25 }"#;
        let config: GridConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, GridConfig::new(16, 8, 12.5, 5.25));
        assert!(config.validate().is_ok());
    }
}
