//! Error types for orage-agent
//!
//! This module defines the error types used throughout the application.
//! We use `thiserror` for ergonomic error definitions and `anyhow` for
//! error propagation in application code.

use thiserror::Error;

/// Main error type for orage-agent operations
#[derive(Error, Debug)]
pub enum AgentError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bus transport errors (connection, name acquisition, export)
    #[error("Bus error: {0}")]
    Bus(String),

    /// Wake-monitor backend errors
    #[error("Monitor error: {0}")]
    Monitor(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid state errors
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias using AgentError
pub type Result<T> = std::result::Result<T, AgentError>;

impl From<toml::de::Error> for AgentError {
    fn from(err: toml::de::Error) -> Self {
        AgentError::Config(err.to_string())
    }
}

impl From<zbus::Error> for AgentError {
    fn from(err: zbus::Error) -> Self {
        AgentError::Bus(err.to_string())
    }
}

impl From<zbus::fdo::Error> for AgentError {
    fn from(err: zbus::fdo::Error) -> Self {
        AgentError::Bus(err.to_string())
    }
}
