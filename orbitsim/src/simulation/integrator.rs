//! Fixed-step time integration for the star/planet system
//!
//! One scheme only: semi-implicit Euler, velocity first
//! and then position with the updated velocity. It is cheap and keeps orbits
//! bounded, at the cost of a small phase drift; the ordering shapes long runs
//! and must not be swapped.

use crate::error::SimResult;
use crate::simulation::states::Body;

/// Advance every body by `dt` using the forces already accumulated on it.
///
/// Bodies are advanced in order; the first failure (zero mass) is returned
/// and the remaining bodies are left untouched.
pub fn semi_implicit_euler(bodies: &mut [Body], dt: f64) -> SimResult<()> {
    for b in bodies.iter_mut() {
        b.integrate(dt)?;
    }
    Ok(())
}
