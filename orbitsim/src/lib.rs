pub mod error;
pub mod simulation;
pub mod configuration;

pub use error::{SimError, SimResult};

pub use simulation::states::{Body, BodyKind, BodyMetadata, NVec3};
pub use simulation::params::Parameters;
pub use simulation::spatial::SpatialIndex;
pub use simulation::forces::{pairwise_force, ForceSet, ForceTerm, PrimaryGravity, CulledGravity};
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::system::System;
pub use simulation::sampler::{Snapshot, BodySnapshot};
pub use simulation::scenario::{Scenario, Trajectory, Sample, PlanetInfo, build_system, samples_for_system, period_days};

pub use configuration::config::{ScenarioConfig, SystemConfig, StarConfig, PlanetConfig, PlanetKind, ParametersConfig};
