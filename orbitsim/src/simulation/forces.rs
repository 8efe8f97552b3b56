//! Force contributors for the star/planet engine
//!
//! Gravity is split into two ordered terms:
//! - [`PrimaryGravity`]: the star against every other body, never culled
//! - [`CulledGravity`]: planet against planet, only within the cutoff radius
//!
//! Both are collected in a [`ForceSet`], which resets every body's force and
//! then runs its terms in insertion order.

use crate::simulation::spatial::SpatialIndex;
use crate::simulation::states::{Body, NVec3};

/// Gravitational force on `a` due to `b`.
///
/// `F = G * ma * mb / r²`, pointing from `a` towards `b`. Collocated bodies
/// give zero instead of a singularity.
pub fn pairwise_force(a: &Body, b: &Body, g: f64) -> NVec3 {
    let r = b.position - a.position;
    let dist = r.norm();
    if dist == 0.0 {
        return NVec3::zeros();
    }
    let magnitude = g * a.mass * b.mass / (dist * dist);
    r * (magnitude / dist)
}

/// Apply the mutual force between bodies `i` and `j`, equal and opposite
pub fn apply_pair(bodies: &mut [Body], i: usize, j: usize, g: f64) {
    let f = pairwise_force(&bodies[i], &bodies[j], g);
    bodies[i].apply_force(f);
    bodies[j].apply_force(-f);
}

/// Trait for force sources acting on a body list.
/// Implementations add their contribution into each body's accumulated force
pub trait ForceTerm {
    fn apply(&self, bodies: &mut [Body], primary: Option<usize>);
}

/// Ordered collection of force terms
pub struct ForceSet {
    terms: Vec<Box<dyn ForceTerm + Send + Sync>>,
}

impl ForceSet {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Append a force term; terms run in the order they were added
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ForceTerm + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Zero every accumulated force, then add every term's contribution
    pub fn accumulate_forces(&self, bodies: &mut [Body], primary: Option<usize>) {
        for b in bodies.iter_mut() {
            b.reset_force();
        }
        for term in &self.terms {
            term.apply(bodies, primary);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Exact star <-> body gravity.
///
/// The star dominates the dynamics, so this pair is evaluated for every body
/// regardless of distance. Does nothing without a primary.
pub struct PrimaryGravity {
    pub g: f64,
}

impl ForceTerm for PrimaryGravity {
    fn apply(&self, bodies: &mut [Body], primary: Option<usize>) {
        let Some(star) = primary else {
            return;
        };
        for other in 0..bodies.len() {
            if other != star {
                apply_pair(bodies, star, other, self.g);
            }
        }
    }
}

/// Body <-> body gravity among non-primary bodies, truncated at `cutoff`.
///
/// Pairs further apart than `cutoff` contribute nothing. This is not
/// physically exact: it drops weak long-range pulls to avoid the full
/// `O(N²)` sweep. An infinite cutoff keeps every pair.
///
/// Each step rebuilds a [`SpatialIndex`] from the current positions, queries
/// the cube of side `2 * cutoff` around each body, and keeps candidates with
/// a higher index (so each unordered pair is seen once) that pass the exact
/// distance test.
pub struct CulledGravity {
    pub g: f64,
    pub cutoff: f64,
}

impl ForceTerm for CulledGravity {
    fn apply(&self, bodies: &mut [Body], primary: Option<usize>) {
        let members: Vec<usize> = (0..bodies.len()).filter(|&i| Some(i) != primary).collect();
        if members.len() < 2 {
            return;
        }

        let index = SpatialIndex::build(bodies, members.iter().copied());
        let mut candidates = Vec::new();

        for &i in &members {
            let center = bodies[i].position;
            index.query_around(&center, self.cutoff, &mut candidates);

            for &j in candidates.iter().filter(|&&j| j > i) {
                if bodies[i].distance_to(&bodies[j]) <= self.cutoff {
                    apply_pair(bodies, i, j, self.g);
                }
            }
        }
    }
}
