//! Potential and density profiles for diagnostics.
//!
//! Each space cell is sampled at equally spaced points starting at its left
//! edge. A sample carries the potential, the density, and the density
//! normalized by the Maxwellian factor √(2πT).
//!
//! # File Format
//!
//! ```text
//! # columns: x phi rho rho_normalized
//! 0 -0 1 0.42052441
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::field::moments::density_from_sums;
use crate::field::{CellSums, potential_from_sums};
use crate::mesh::PhaseSpaceGrid;
use crate::solver::DGCoefficients;

/// Error type for profile sampling and output.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// I/O error while writing.
    #[error("profile I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A sampling parameter out of range.
    #[error("invalid profile parameter: {0}")]
    InvalidParameter(String),
}

/// One point of a profile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfileSample {
    /// Position
    pub x: f64,
    /// Potential φ(x)
    pub potential: f64,
    /// Density ρ(x)
    pub density: f64,
    /// ρ(x) / √(2πT)
    pub normalized_density: f64,
}

/// Sample φ and ρ of `u` across the whole space domain.
///
/// `ce` must be the field constant of `u`.
pub fn sample_profile(
    u: &DGCoefficients,
    grid: &PhaseSpaceGrid,
    ce: f64,
    samples_per_cell: usize,
    temperature: f64,
) -> Result<Vec<ProfileSample>, ProfileError> {
    if samples_per_cell == 0 {
        return Err(ProfileError::InvalidParameter(
            "samples_per_cell must be at least 1".to_string(),
        ));
    }
    if !(temperature.is_finite() && temperature > 0.0) {
        return Err(ProfileError::InvalidParameter(format!(
            "temperature must be finite and positive, got {}",
            temperature
        )));
    }

    let sums = CellSums::compute(u, grid);
    let norm = (2.0 * std::f64::consts::PI * temperature).sqrt();
    let step = grid.dx() / samples_per_cell as f64;

    let mut samples = Vec::with_capacity(grid.nx() * samples_per_cell);
    for i in 0..grid.nx() {
        let x0 = grid.x_left(i);
        for n in 0..samples_per_cell {
            let x = x0 + n as f64 * step;
            let density = density_from_sums(sums.get(i), grid, x, i);
            samples.push(ProfileSample {
                x,
                potential: potential_from_sums(&sums, grid, ce, x, i),
                density,
                normalized_density: density / norm,
            });
        }
    }
    Ok(samples)
}

/// Write samples as whitespace-separated columns, one line per sample.
pub fn write_profile<W: Write>(writer: W, samples: &[ProfileSample]) -> Result<(), ProfileError> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "# columns: x phi rho rho_normalized")?;
    for s in samples {
        writeln!(
            writer,
            "{} {} {} {}",
            s.x, s.potential, s.density, s.normalized_density
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write samples to a file.
pub fn write_profile_file<P: AsRef<Path>>(
    path: P,
    samples: &[ProfileSample],
) -> Result<(), ProfileError> {
    write_profile(File::create(path)?, samples)
}
