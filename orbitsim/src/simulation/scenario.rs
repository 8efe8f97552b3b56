//! Build runnable scenarios from configuration and shape their output
//!
//! Takes a [`SystemConfig`] (star + planets) and produces the initial body
//! list of a `System`:
//! - the star sits at the origin, at rest, hidden from the output
//! - each planet starts at its configured position, `[aAU, 0, 0]` by default
//! - without an explicit velocity a planet gets the circular-orbit speed
//!   `sqrt(G * M_star / r)`, perpendicular to its radius vector and scaled by
//!   `1 - 0.5 * ellipticity`
//!
//! Sampled snapshots are then flattened into a [`Trajectory`], the only thing
//! rendering and sonification layers see: per-sample `(x, y)` arrays aligned
//! with one planet metadata list.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::configuration::config::{PlanetConfig, ScenarioConfig, SystemConfig};
use crate::error::{SimError, SimResult};
use crate::simulation::params::Parameters;
use crate::simulation::sampler::Snapshot;
use crate::simulation::states::{Body, BodyKind, BodyMetadata, NVec3};
use crate::simulation::system::System;

/// Upper bound for planet ellipticity
pub const MAX_ELLIPTICITY: f64 = 0.95;

const DEFAULT_STAR_NAME: &str = "Star";
const STAR_COLOR: &str = "#ffffcc";
const STAR_RADIUS: f64 = 12.0;
const DEFAULT_COLOR: &str = "#ffffff";
const DEFAULT_RADIUS: f64 = 5.0;

/// Kepler's third law around a one solar mass star
pub fn period_days(a_au: f64) -> f64 {
    365.25 * a_au.powf(1.5)
}

/// Initial velocity for a planet at `position` around a star of `star_mass`.
///
/// Tangential (counter-clockwise in the xy plane) circular speed, reduced by
/// half the clamped ellipticity. A planet on the z axis gets no velocity.
pub fn orbital_velocity(position: &NVec3, star_mass: f64, g: f64, ellipticity: f64) -> NVec3 {
    let r = position.x.hypot(position.y);
    if r == 0.0 {
        return NVec3::zeros();
    }
    let speed = (g * star_mass / r).sqrt() * (1.0 - 0.5 * ellipticity.clamp(0.0, MAX_ELLIPTICITY));
    NVec3::new(-position.y / r, position.x / r, 0.0) * speed
}

/// Star first, then planets in configuration order
pub fn initial_bodies(cfg: &SystemConfig, parameters: &Parameters) -> Vec<Body> {
    let star_mass = cfg.star.mass_ms * parameters.star_mass_scale;
    let star_name = cfg.star.name.clone().unwrap_or_else(|| DEFAULT_STAR_NAME.to_string());

    let star_meta = BodyMetadata::new(BodyKind::Star)
        .with_display("color", STAR_COLOR)
        .with_display("radius", STAR_RADIUS);

    let mut bodies = Vec::with_capacity(cfg.planets.len() + 1);
    bodies.push(Body::new(star_name, star_mass, NVec3::zeros(), NVec3::zeros(), star_meta));

    for planet in &cfg.planets {
        bodies.push(planet_body(planet, star_mass, parameters.g));
    }

    bodies
}

fn planet_body(planet: &PlanetConfig, star_mass: f64, g: f64) -> Body {
    let position = match planet.position {
        Some(p) => NVec3::from(p),
        None => NVec3::new(planet.a_au, 0.0, 0.0),
    };

    let velocity = match planet.velocity {
        Some(v) => NVec3::from(v),
        None => {
            let e = planet.ellipticity.unwrap_or(0.0);
            if !(0.0..=MAX_ELLIPTICITY).contains(&e) {
                warn!(planet = %planet.name, ellipticity = e, max = MAX_ELLIPTICITY, "ellipticity out of range, clamped");
            }
            if position.x.hypot(position.y) == 0.0 {
                warn!(planet = %planet.name, "planet at the star's axis starts at rest");
            }
            orbital_velocity(&position, star_mass, g, e)
        }
    };

    let mut metadata = BodyMetadata::new(planet.kind.into());
    metadata.a_au = Some(planet.a_au);
    metadata.display = planet.extra.clone();
    if let Some(color) = &planet.color {
        metadata.display.insert("color".into(), color.clone().into());
    }
    if let Some(radius) = planet.radius {
        metadata.display.insert("radius".into(), radius.into());
    }

    Body::new(planet.name.clone(), planet.mass, position, velocity, metadata)
}

/// Build a ready-to-run system from configuration
pub fn build_system(name: &str, cfg: &SystemConfig, parameters: Parameters) -> SimResult<System> {
    let bodies = initial_bodies(cfg, &parameters);
    debug!(system = name, bodies = bodies.len(), g = parameters.g, cutoff = parameters.cutoff, "built system");
    System::with_bodies(name, parameters, bodies)
}

/// Display and physical attributes of one output planet
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlanetInfo {
    pub name: String,
    pub kind: BodyKind,
    pub color: String,
    pub radius: f64,
    pub mass: f64,
    #[serde(rename = "aAU")]
    pub a_au: f64,
}

/// Visible positions at one instant, indexed like `Trajectory::planets`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sample {
    pub t: f64,
    pub positions: Vec<[f64; 2]>,
}

/// Output contract consumed by rendering and sonification
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    pub samples: Vec<Sample>,
    pub planets: Vec<PlanetInfo>,
}

impl Trajectory {
    /// Flatten snapshots of `system` into the output contract.
    ///
    /// Only visible bodies are kept. `system` must be in the state the
    /// snapshots started from (it is, right after `sample_positions`).
    pub fn from_snapshots(system: &System, snapshots: &[Snapshot]) -> Self {
        let planets = system
            .bodies()
            .iter()
            .filter(|b| b.metadata.visible)
            .map(|b| PlanetInfo {
                name: b.name.clone(),
                kind: b.kind(),
                color: b.metadata.color().unwrap_or(DEFAULT_COLOR).to_string(),
                radius: b.metadata.radius().unwrap_or(DEFAULT_RADIUS),
                mass: b.mass,
                a_au: b.metadata.a_au.unwrap_or_else(|| b.position.x.hypot(b.position.y)),
            })
            .collect();

        let samples = snapshots
            .iter()
            .map(|s| Sample {
                t: s.t,
                positions: s
                    .bodies
                    .iter()
                    .filter(|b| b.metadata.visible)
                    .map(|b| [b.position.x, b.position.y])
                    .collect(),
            })
            .collect();

        Self { samples, planets }
    }
}

/// A system together with how long and how finely to sample it
pub struct Scenario {
    pub system: System,
    pub duration_sec: f64,
    pub dt_sec: f64,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        if !cfg.dt_sec.is_finite() || cfg.dt_sec <= 0.0 {
            return Err(SimError::InvalidArgument(format!("dtSec must be positive, got {}", cfg.dt_sec)));
        }

        let parameters = Parameters::from(cfg.parameters);
        let system = build_system("User system", &cfg.system, parameters)?;

        Ok(Self {
            system,
            duration_sec: cfg.duration_sec,
            dt_sec: cfg.dt_sec,
        })
    }

    /// Sample the scenario; the system is left as it was built
    pub fn run(&mut self) -> SimResult<Trajectory> {
        let snapshots = self.system.sample_positions(self.duration_sec, 1.0 / self.dt_sec)?;
        Ok(Trajectory::from_snapshots(&self.system, &snapshots))
    }
}

/// Build, sample and flatten in one go
pub fn samples_for_system(cfg: &SystemConfig, parameters: Parameters, duration_sec: f64, dt_sec: f64) -> SimResult<Trajectory> {
    if !dt_sec.is_finite() || dt_sec <= 0.0 {
        return Err(SimError::InvalidArgument(format!("dtSec must be positive, got {dt_sec}")));
    }
    let mut system = build_system("User system", cfg, parameters)?;
    let snapshots = system.sample_positions(duration_sec, 1.0 / dt_sec)?;
    Ok(Trajectory::from_snapshots(&system, &snapshots))
}
