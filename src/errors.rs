use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Launch rejected: rocket is already in flight")]
    FlightInProgress,

    #[error("Degenerate guidance: {0}")]
    DegenerateGuidance(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for SimulationError {
    fn from(err: toml::de::Error) -> Self {
        SimulationError::Config(err.to_string())
    }
}

impl From<std::io::Error> for SimulationError {
    fn from(err: std::io::Error) -> Self {
        SimulationError::Config(err.to_string())
    }
}
