//! Error types for framectl

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Profile rejected: {0}")]
    ProfileRejected(#[from] openframe_profile::ProfileError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid script line {line}: {reason}")]
    InvalidScript { line: usize, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Scheduler error: {0}")]
    SchedulerError(#[from] openframe_scheduler::SchedulerError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::ProfileRejected(_) => 3,
            CliError::InvalidConfiguration(_)
            | CliError::YamlError(_)
            | CliError::SchedulerError(_) => 4,
            CliError::InvalidScript { .. } | CliError::JsonError(_) => 5,
            CliError::IoError(_) => 1,
        }
    }
}
