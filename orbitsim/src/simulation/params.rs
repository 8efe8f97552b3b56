//! Numerical and physical parameters for the simulation
//!
//! `Parameters` is handed to a `System` at construction:
//! - gravitational constant `g`
//! - star mass amplification `star_mass_scale` (used when building scenarios)
//! - culling `cutoff` for planet-planet interactions
//!
//! The cutoff drops mutual gravity between two non-primary bodies further
//! apart than `cutoff`. It is an approximation traded for speed and has to be
//! chosen explicitly; `f64::INFINITY` turns culling off.

use std::f64::consts::TAU;

use crate::error::{SimError, SimResult};

/// Game-unit gravitational constant, tuned so orbits render at a readable scale
pub const SIM_G: f64 = 0.01;
/// Star mass amplification for game units
pub const STAR_MASS_SCALE: f64 = 100.0;
/// Default planet-planet interaction radius in game units
pub const DEFAULT_CUTOFF: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub star_mass_scale: f64, // multiplier applied to massMs
    pub cutoff: f64, // planet-planet culling distance
}

impl Parameters {
    pub fn new(g: f64, star_mass_scale: f64, cutoff: f64) -> Self {
        Self { g, star_mass_scale, cutoff }
    }

    /// AU / day / solar-mass units: a planet at 1 AU around a 1 Ms star
    /// completes one orbit in 365.25 days. No culling.
    pub fn astronomical() -> Self {
        Self {
            g: (TAU / 365.25).powi(2),
            star_mass_scale: 1.0,
            cutoff: f64::INFINITY,
        }
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn validate(&self) -> SimResult<()> {
        if !self.g.is_finite() || self.g < 0.0 {
            return Err(SimError::InvalidArgument(format!(
                "gravitational constant must be finite and non-negative, got {}",
                self.g
            )));
        }
        if !self.star_mass_scale.is_finite() || self.star_mass_scale <= 0.0 {
            return Err(SimError::InvalidArgument(format!(
                "star_mass_scale must be positive, got {}",
                self.star_mass_scale
            )));
        }
        // NaN fails this comparison too
        if !(self.cutoff > 0.0) {
            return Err(SimError::InvalidArgument(format!(
                "cutoff must be positive, got {}",
                self.cutoff
            )));
        }
        Ok(())
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: SIM_G,
            star_mass_scale: STAR_MASS_SCALE,
            cutoff: DEFAULT_CUTOFF,
        }
    }
}
