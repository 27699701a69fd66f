//! Strong Stability Preserving Runge-Kutta time integration.
//!
//! SSP-RK3 (Shu-Osher form) is optimal for hyperbolic conservation laws.
//! This is the single-process path; [`Rk3Integrator`](super::Rk3Integrator)
//! runs the same stages across partitions.

use crate::solver::DGCoefficients;

/// Perform one step of SSP-RK3 time integration.
///
/// The Shu-Osher form:
/// u1 = u + dt * L(u)
/// u2 = 3/4 * u + 1/4 * u1 + 1/4 * dt * L(u1)
/// u_new = 1/3 * u + 2/3 * u2 + 2/3 * dt * L(u2)
///
/// # Arguments
/// * `u` - Coefficients to update (modified in place)
/// * `rhs_fn` - Function that computes the rates given the coefficients
/// * `dt` - Time step
pub fn ssp_rk3_step<F>(u: &mut DGCoefficients, mut rhs_fn: F, dt: f64)
where
    F: FnMut(&DGCoefficients) -> DGCoefficients,
{
    // Stage 1: u1 = u + dt * L(u)
    let l_u = rhs_fn(u);
    let mut u1 = u.clone();
    u1.axpy(dt, &l_u);

    // Stage 2: u2 = 3/4 * u + 1/4 * u1 + 1/4 * dt * L(u1)
    let l_u1 = rhs_fn(&u1);
    let mut u2 = u.clone();
    u2.scale(0.75);
    u2.axpy(0.25, &u1);
    u2.axpy(0.25 * dt, &l_u1);

    // Stage 3: u_new = 1/3 * u + 2/3 * u2 + 2/3 * dt * L(u2)
    let l_u2 = rhs_fn(&u2);
    u.scale(1.0 / 3.0);
    u.axpy(2.0 / 3.0, &u2);
    u.axpy(2.0 / 3.0 * dt, &l_u2);
}
