use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArgumentError {
    #[error("Both --x and --y must be provided together, or neither.")]
    PartialCoordinates,
    #[error("clicks must be at least 1, got {0}")]
    InvalidClicks(i32),
    #[error("interval must be a non-negative number of seconds, got {0}")]
    InvalidInterval(f64),
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("input backend unavailable: {0}")]
    Unavailable(String),
    #[error("failed to post {0} event")]
    EventFailed(&'static str),
    #[error("fail-safe triggered: pointer moved to screen corner ({x}, {y})")]
    FailSafe { x: i32, y: i32 },
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("command timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),
    #[error("{0}")]
    CommandFailed(String),
    #[error("Failed to get position")]
    Parse,
    #[error("{0}")]
    MalformedRequest(String),
}

impl From<ArgumentError> for BridgeError {
    fn from(err: ArgumentError) -> Self {
        BridgeError::MalformedRequest(err.to_string())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::MalformedRequest(format!("invalid click request: {}", err))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
