//! Trajectory sampling without disturbing the live system
//!
//! `System::sample_positions` steps the system forward at a fixed rate and
//! records an owned [`Snapshot`] after every step. Positions and velocities
//! are saved up front and put back by a drop guard, so the system is returned
//! as found on every exit path, including a failed step.

use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::simulation::states::{BodyMetadata, NVec3};
use crate::simulation::system::System;

/// One body's state at a sample instant. Owns all of its data.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySnapshot {
    pub name: String,
    pub position: NVec3,
    pub metadata: BodyMetadata,
}

/// Every body's state at time `t`, in system order
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub t: f64,
    pub bodies: Vec<BodySnapshot>,
}

impl Snapshot {
    fn capture(system: &System, t: f64) -> Self {
        let bodies = system
            .bodies()
            .iter()
            .map(|b| BodySnapshot {
                name: b.name.clone(),
                position: b.position,
                metadata: b.metadata.clone(),
            })
            .collect();
        Self { t, bodies }
    }
}

/// Puts saved positions/velocities back and clears forces when dropped
struct RestoreGuard<'a> {
    system: &'a mut System,
    saved: Vec<(NVec3, NVec3)>,
}

impl<'a> RestoreGuard<'a> {
    fn new(system: &'a mut System) -> Self {
        let saved = system.bodies.iter().map(|b| (b.position, b.velocity)).collect();
        Self { system, saved }
    }
}

impl Drop for RestoreGuard<'_> {
    fn drop(&mut self) {
        for (b, (position, velocity)) in self.system.bodies.iter_mut().zip(&self.saved) {
            b.position = *position;
            b.velocity = *velocity;
            b.reset_force();
        }
    }
}

/// Largest number of steps a single sampling request may take
pub const MAX_SAMPLE_STEPS: usize = 10_000_000;

/// Number of steps taken for a sampling request: `ceil(duration * rate)`.
///
/// Fails when the product is not finite or exceeds [`MAX_SAMPLE_STEPS`].
pub fn step_count(duration: f64, sample_rate_hz: f64) -> SimResult<usize> {
    let steps = (duration * sample_rate_hz).ceil();
    if !steps.is_finite() || steps > MAX_SAMPLE_STEPS as f64 {
        return Err(SimError::InvalidArgument(format!(
            "duration * sample_rate_hz = {steps} exceeds the limit of {MAX_SAMPLE_STEPS} steps"
        )));
    }
    Ok(steps as usize)
}

impl System {
    /// Sample every body's position over `duration` at `sample_rate_hz`.
    ///
    /// Returns `ceil(duration * sample_rate_hz) + 1` snapshots, the first at
    /// `t = 0` before any step and the k-th at `t = k / sample_rate_hz`.
    /// A system without bodies yields an empty list.
    ///
    /// The system is left exactly as found (forces cleared), whether sampling
    /// succeeds or fails, so repeated calls with no `step` in between return
    /// identical results.
    pub fn sample_positions(&mut self, duration: f64, sample_rate_hz: f64) -> SimResult<Vec<Snapshot>> {
        if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
            return Err(SimError::InvalidArgument(format!(
                "sample_rate_hz must be positive, got {sample_rate_hz}"
            )));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(SimError::InvalidArgument(format!(
                "duration must be positive, got {duration}"
            )));
        }
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let dt = 1.0 / sample_rate_hz;
        let steps = step_count(duration, sample_rate_hz)?;
        debug!(system = %self.name, bodies = self.len(), steps, dt, "sampling positions");

        let mut guard = RestoreGuard::new(self);
        let mut samples = Vec::new();
        samples.push(Snapshot::capture(guard.system, 0.0));

        for k in 1..=steps {
            guard.system.step(dt)?;
            samples.push(Snapshot::capture(guard.system, k as f64 * dt));
        }

        Ok(samples)
    }
}
