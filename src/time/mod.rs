//! Time integration methods.
//!
//! - [`ssp_rk3_step`]: single-process SSP-RK3 on a full state
//! - [`Rk3Integrator`]: the same scheme split across partitions, with a
//!   [`StateExchange`] synchronizing the full state after every stage

mod exchange;
mod integrator;
mod ssp_rk3;

pub use exchange::{ChannelExchange, ExchangeError, SerialExchange, StateExchange};
pub use integrator::{Rk3Integrator, StepError};
pub use ssp_rk3::ssp_rk3_step;
