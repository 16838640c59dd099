use miette::{Diagnostic, Result};
use thiserror::Error;

use crate::schedule::editor::ValidationError;

/// Main error type for the crate
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Schedule validation failed: {0}")]
    #[diagnostic(code(aukiolo::validation))]
    Validation(#[from] ValidationError),

    #[error("Environment error: {0}")]
    #[diagnostic(code(aukiolo::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(aukiolo::config))]
    Config(String),

    #[error("Schedule store error: {0}")]
    #[diagnostic(code(aukiolo::store))]
    Store(String),

    #[error("Schedule service error: {0}")]
    #[diagnostic(code(aukiolo::schedule))]
    Schedule(String),

    #[error(transparent)]
    #[diagnostic(code(aukiolo::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(aukiolo::serialization))]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type ScheduleResult<T> = Result<T, Error>;

/// Helper to create environment errors
#[allow(dead_code)]
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create store errors
pub fn store_error(message: &str) -> Error {
    Error::Store(message.to_string())
}

/// Helper to create schedule service errors
pub fn schedule_error(message: &str) -> Error {
    Error::Schedule(message.to_string())
}
