//! Configuration validation functions
//!
//! This module provides validation for configuration fields: the requested
//! well-known bus name and the wake-backend priority list.

use crate::error::{AgentError, Result};
use crate::wake::WakeBackendKind;

/// Validate a well-known bus name (dot-separated elements, valid characters)
pub fn validate_bus_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(AgentError::Config(
            "Well-known bus name cannot be empty".to_string(),
        ));
    }

    if name.len() > 255 {
        return Err(AgentError::Config(format!(
            "Bus name '{}' exceeds maximum length of 255 characters",
            name
        )));
    }

    if !name.contains('.') {
        return Err(AgentError::Config(format!(
            "Bus name '{}' must contain at least two dot-separated elements",
            name
        )));
    }

    for element in name.split('.') {
        if element.is_empty() {
            return Err(AgentError::Config(format!(
                "Bus name '{}' contains an empty element",
                name
            )));
        }
        if element.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(AgentError::Config(format!(
                "Bus name element '{}' must not start with a digit",
                element
            )));
        }
        if !element
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(AgentError::Config(format!(
                "Bus name element '{}' contains invalid characters",
                element
            )));
        }
    }

    Ok(())
}

/// Validate the wake-backend list (non-empty entries, no duplicates)
pub fn validate_backends(backends: &[WakeBackendKind]) -> Result<()> {
    for (i, backend) in backends.iter().enumerate() {
        if backends[..i].contains(backend) {
            return Err(AgentError::Config(format!(
                "Wake backend '{}' listed more than once",
                backend
            )));
        }
    }
    Ok(())
}
