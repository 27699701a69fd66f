//! Strongly-typed index types for safer APIs.
//!
//! Cell and velocity indices are derived from each other by integer
//! arithmetic; keeping them as distinct newtypes prevents passing a composite
//! velocity index where a global cell index is expected.

mod indices;

pub use indices::{CellIndex, VelocityIndex};
