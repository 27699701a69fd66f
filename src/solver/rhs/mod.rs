//! Right-hand side computation for the DG discretization.
//!
//! Computes the semi-discrete rates dU/dt of the Vlasov-Poisson system, either
//! for the whole domain or for one partition's range of cells.

mod vlasov;

pub use vlasov::{RateOperator, VlasovOperator, cell_rates, compute_rates, compute_rates_into};

#[cfg(feature = "parallel")]
pub use vlasov::compute_rates_into_parallel;
