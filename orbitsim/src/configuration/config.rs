//! Configuration types for loading star/planet scenarios.
//!
//! A thin, `serde`-deserializable description of a run:
//!
//! - [`ParametersConfig`] – physical constants and the culling cutoff
//! - [`StarConfig`]       – the central star
//! - [`PlanetConfig`]     – initial state and display attributes per planet
//! - [`SystemConfig`]     – star plus planets, the input of scenario building
//! - [`ScenarioConfig`]   – top-level wrapper adding sampling settings
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   G: 0.01                 # gravitational constant (game units)
//!   star_mass_scale: 100.0  # massMs multiplier
//!   cutoff: 2.0             # planet-planet culling distance, .inf disables
//!
//! durationSec: 30.0
//! dtSec: 0.05
//!
//! star:
//!   massMs: 1.0
//!
//! planets:
//!   - name: Terra
//!     kind: rocky
//!     aAU: 1.0
//!     mass: 1.0
//!     color: "#4cafef"
//!     radius: 6
//!   - name: Jove
//!     kind: gas
//!     aAU: 2.5
//!     mass: 5.0
//!     ellipticity: 0.2
//!     position: [0.0, 2.5, 0.0]
//! ```
//!
//! Vectors are fixed 3-element arrays; any other length fails to parse.
//! The same types accept the camelCase JSON the frontend sends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::simulation::params::{Parameters, SIM_G, STAR_MASS_SCALE};
use crate::simulation::states::BodyKind;

/// Planet category accepted in input. Stars are never configured as planets
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlanetKind {
    Rocky,
    Gas,
}

impl From<PlanetKind> for BodyKind {
    fn from(kind: PlanetKind) -> Self {
        match kind {
            PlanetKind::Rocky => BodyKind::Rocky,
            PlanetKind::Gas => BodyKind::Gas,
        }
    }
}

/// Physical constants for a run. `cutoff` has no default on purpose
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ParametersConfig {
    #[serde(rename = "G", default = "default_g")]
    pub g: f64, // gravitational constant
    #[serde(default = "default_star_mass_scale")]
    pub star_mass_scale: f64, // massMs multiplier
    pub cutoff: f64, // planet-planet culling distance
}

fn default_g() -> f64 {
    SIM_G
}

fn default_star_mass_scale() -> f64 {
    STAR_MASS_SCALE
}

impl From<ParametersConfig> for Parameters {
    fn from(cfg: ParametersConfig) -> Self {
        Parameters::new(cfg.g, cfg.star_mass_scale, cfg.cutoff)
    }
}

/// The central star
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StarConfig {
    #[serde(rename = "massMs")]
    pub mass_ms: f64, // mass in solar masses, before star_mass_scale
    #[serde(default)]
    pub name: Option<String>,
}

/// Initial state of a single planet
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlanetConfig {
    pub name: String,
    pub kind: PlanetKind,
    #[serde(rename = "aAU")]
    pub a_au: f64, // orbital distance, default x position
    pub mass: f64,
    #[serde(default)]
    pub position: Option<[f64; 3]>, // overrides [aAU, 0, 0]
    #[serde(default)]
    pub velocity: Option<[f64; 3]>, // overrides the circular-orbit velocity
    #[serde(default)]
    pub ellipticity: Option<f64>, // clamped to [0, 0.95]
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub radius: Option<f64>, // display radius
    /// Any other cosmetic attribute, passed through to metadata
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A star and its planets
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SystemConfig {
    pub star: StarConfig,
    #[serde(default)]
    pub planets: Vec<PlanetConfig>,
}

/// Top-level scenario loaded from YAML
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig,
    #[serde(rename = "durationSec")]
    pub duration_sec: f64,
    #[serde(rename = "dtSec")]
    pub dt_sec: f64,
    #[serde(flatten)]
    pub system: SystemConfig,
}
