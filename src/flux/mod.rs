//! Weak-form transport terms of one phase-space cell.
//!
//! Provides the four integrals the rate of every cell is assembled from:
//! - [`space_volume`]: ∫ v1 f ∂φ/∂x
//! - [`velocity_volume`]: ∫ E f ∂φ/∂v1
//! - [`space_flux`]: upwind flux through the x faces (periodic)
//! - [`velocity_flux`]: upwind flux through the v1 faces (hard walls)
//!
//! All four read the stage state through a [`FluxContext`], which also
//! carries the field moments of that state.

mod context;
mod space;
mod velocity;
mod volume;

pub use context::FluxContext;
pub use space::space_flux;
pub use velocity::velocity_flux;
pub use volume::{space_volume, velocity_volume};
