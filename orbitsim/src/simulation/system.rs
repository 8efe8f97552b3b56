//! Main container for a star/planet system
//!
//! `System` owns the ordered body list, the run parameters and the force
//! terms built from them. It is nothing more than the current physical
//! state; the only way to advance it is `step`.
//!
//! Calls take `&mut self`, so a caller has to serialize access; the engine
//! itself does no locking.

use tracing::trace;

use crate::error::SimResult;
use crate::simulation::forces::{CulledGravity, ForceSet, PrimaryGravity};
use crate::simulation::integrator::semi_implicit_euler;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyKind, BodyMetadata, NVec3};

pub struct System {
    pub name: String,
    pub(crate) bodies: Vec<Body>,
    parameters: Parameters,
    forces: ForceSet,
}

impl System {
    /// Empty system. Fails when `parameters` are out of range.
    pub fn new(name: impl Into<String>, parameters: Parameters) -> SimResult<Self> {
        parameters.validate()?;

        // star pairs first, then culled planet pairs
        let forces = ForceSet::new()
            .with(PrimaryGravity { g: parameters.g })
            .with(CulledGravity { g: parameters.g, cutoff: parameters.cutoff });

        Ok(Self {
            name: name.into(),
            bodies: Vec::new(),
            parameters,
            forces,
        })
    }

    /// System populated from an initial body list, order preserved
    pub fn with_bodies<I>(name: impl Into<String>, parameters: Parameters, bodies: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = Body>,
    {
        let mut system = Self::new(name, parameters)?;
        system.add_bodies(bodies);
        Ok(system)
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn add_body(
        &mut self,
        name: impl Into<String>,
        mass: f64,
        position: NVec3,
        velocity: NVec3,
        metadata: BodyMetadata,
    ) -> &mut Body {
        self.bodies.push(Body::new(name, mass, position, velocity, metadata));
        let last = self.bodies.len() - 1;
        &mut self.bodies[last]
    }

    pub fn add_bodies<I>(&mut self, bodies: I)
    where
        I: IntoIterator<Item = Body>,
    {
        self.bodies.extend(bodies);
    }

    /// Remove every body called `name`; returns how many were removed
    pub fn remove_body(&mut self, name: &str) -> usize {
        let before = self.bodies.len();
        self.bodies.retain(|b| b.name != name);
        before - self.bodies.len()
    }

    pub fn get_body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn get_body_mut(&mut self, name: &str) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.name == name)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    pub fn total_momentum(&self) -> NVec3 {
        self.bodies.iter().fold(NVec3::zeros(), |acc, b| acc + b.momentum())
    }

    /// Index of the primary body: the first star, if any
    pub fn primary_index(&self) -> Option<usize> {
        self.bodies.iter().position(|b| b.kind() == BodyKind::Star)
    }

    /// Reset every force and accumulate this step's gravity
    pub fn compute_gravity(&mut self) {
        let primary = self.primary_index();
        self.forces.accumulate_forces(&mut self.bodies, primary);
    }

    /// Compute gravity, then advance every body by `dt`
    pub fn step(&mut self, dt: f64) -> SimResult<()> {
        if self.bodies.is_empty() {
            return Ok(());
        }
        self.compute_gravity();
        semi_implicit_euler(&mut self.bodies, dt)?;
        trace!(system = %self.name, dt, "stepped");
        Ok(())
    }
}
