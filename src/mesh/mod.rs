//! Phase-space mesh representation.
//!
//! Provides:
//! - Grid configuration with setup-time validation
//! - The uniform 1D-3V phase-space grid with periodic space wrap
//! - Contiguous partitioning of cells across workers

mod config;
mod partition;
mod phase_space;

pub use config::{ConfigError, GridConfig, validate_dt};
pub use partition::Partition;
pub use phase_space::{PhaseCell, PhaseSpaceGrid};
