//! Core state types for the star/planet simulation.
//!
//! Defines the mutable point mass (`Body`) and its typed metadata:
//! - `BodyKind` is the physical tag (star, rocky, gas) the engine matches on
//! - `BodyMetadata` keeps the tag, visibility and the cosmetic display map
//!
//! Positions and velocities are always 3-vectors (`NVec3`); z is carried
//! through integration even though today's scenarios stay in the xy plane.

use std::collections::BTreeMap;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

pub type NVec3 = Vector3<f64>;

/// Physical category of a body
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    Rocky,
    Gas,
}

/// Descriptive data attached to a body.
///
/// `kind` and `visible` are the only fields the engine and the output
/// contract look at. Everything purely cosmetic (color, radius, labels, ...)
/// lives in `display` and is passed through untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BodyMetadata {
    pub kind: BodyKind,
    pub visible: bool,
    pub a_au: Option<f64>, // configured orbital distance, if any
    pub display: BTreeMap<String, serde_json::Value>,
}

impl BodyMetadata {
    pub fn new(kind: BodyKind) -> Self {
        Self {
            kind,
            visible: kind != BodyKind::Star,
            a_au: None,
            display: BTreeMap::new(),
        }
    }

    /// Builder-style helper for cosmetic attributes
    pub fn with_display(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.display.insert(key.into(), value.into());
        self
    }

    pub fn color(&self) -> Option<&str> {
        self.display.get("color").and_then(|v| v.as_str())
    }

    pub fn radius(&self) -> Option<f64> {
        self.display.get("radius").and_then(|v| v.as_f64())
    }
}

/// A single point mass tracked by a `System`
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String, // unique within a System (caller's responsibility)
    pub mass: f64,
    pub position: NVec3,
    pub velocity: NVec3,
    pub force: NVec3, // accumulated over one step, reset by compute_gravity
    pub metadata: BodyMetadata,
}

impl Body {
    pub fn new(name: impl Into<String>, mass: f64, position: NVec3, velocity: NVec3, metadata: BodyMetadata) -> Self {
        Self {
            name: name.into(),
            mass,
            position,
            velocity,
            force: NVec3::zeros(),
            metadata,
        }
    }

    pub fn kind(&self) -> BodyKind {
        self.metadata.kind
    }

    pub fn reset_force(&mut self) {
        self.force = NVec3::zeros();
    }

    pub fn apply_force(&mut self, f: NVec3) {
        self.force += f;
    }

    /// `force / mass`
    pub fn acceleration(&self) -> SimResult<NVec3> {
        if self.mass == 0.0 {
            return Err(SimError::InvalidState(format!(
                "cannot integrate body '{}' with zero mass",
                self.name
            )));
        }
        Ok(self.force / self.mass)
    }

    /// Semi-implicit Euler: kick the velocity, then drift with the new velocity
    pub fn integrate(&mut self, dt: f64) -> SimResult<()> {
        let a = self.acceleration()?;
        self.velocity += a * dt;
        self.position += self.velocity * dt;
        Ok(())
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).norm()
    }

    pub fn momentum(&self) -> NVec3 {
        self.velocity * self.mass
    }
}
