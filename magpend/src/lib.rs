pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::{Result, SimError};

pub use simulation::states::{NVec2, State, Trajectory};
pub use simulation::magnets::MagnetSet;
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::forces::{force_field, Acceleration, CentralRestoring, MagnetRing, PendulumField};
pub use simulation::integrator::{simulate, simulate_batch, simulate_with, step, step_in_place, SimulationRun, Termination};
pub use simulation::scenario::Scenario;
pub use simulation::basin::{BasinCell, BasinGrid, BasinMap, ZoomPath};

pub use configuration::config::{MagnetConfig, ParametersConfig, EngineConfig, PendulumConfig, BasinConfig, ScenarioConfig};

pub use visualization::basin_png::save_png;

pub use benchmark::benchmark::{bench_force_field, bench_simulate, bench_basin_curve};
