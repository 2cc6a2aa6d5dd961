use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum MonitorError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Worker count {requested} out of range (0..{max})")]
    WorkerCountOutOfRange { requested: usize, max: usize },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Unknown sensor source: {0}")]
    UnknownSensorSource(String),

    #[error("Unknown output format: {0}")]
    UnknownOutputFormat(String),

    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MonitorError>;
