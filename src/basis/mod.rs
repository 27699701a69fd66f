//! Local basis of a phase-space cell.
//!
//! Six shapes per cell: constant, linear in x, linear in each velocity
//! component, and a quadratic |v|² closure shape. See [`shape`] for the exact
//! definitions and the integrals every flux formula is built from.

pub mod shape;

pub use shape::{N_SHAPES, Shape, ShapeVector, project_rates};
