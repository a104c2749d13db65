pub mod config;
pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use config::SimulationConfig;
pub use constants::*;
pub use control::environment::{CelestialBody, EnvironmentClass, EnvironmentConfig};
pub use control::events::{CutoffReason, Debris, FlightEvent, LandingOutcome};
pub use control::guidance::LandingGuidance;
pub use control::propulsion::EngineConfig;
pub use control::rocket::{FlightPhase, RocketState};
pub use control::simulator::FlightSimulator;
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::Aerodynamics;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{ChartMetric, FlightSnapshot, Telemetry};

// Re-export commonly used utilities
pub use utils::vector2d::Vector2D;
