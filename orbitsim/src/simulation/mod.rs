pub mod states;
pub mod params;
pub mod spatial;
pub mod forces;
pub mod integrator;
pub mod system;
pub mod sampler;
pub mod scenario;
