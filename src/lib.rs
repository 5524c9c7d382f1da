//! orage-agent: D-Bus remote-control and suspend/resume agent for Orage
//!
//! This library exposes the Orage calendar's remote-control surface on the
//! session bus and watches the system bus for host suspend/resume
//! transitions, so that reminders can be re-evaluated after a wake-up.
//!
//! # Architecture
//!
//! The agent runs as a standalone daemon next to the calendar application.
//! External processes drive calendar import/export and foreign-calendar
//! operations through the exported `org.xfce.orage` service; the agent
//! translates each boolean domain result into a D-Bus reply or error. Wake
//! monitoring attaches to the first available system service (logind, then
//! ConsoleKit) and fans resume notifications out to registered observers.
//!
//! # Modules
//!
//! - `config`: Configuration parsing and management
//! - `calendar`: Delegate boundary for calendar domain operations
//! - `control`: Exported control service and request translation
//! - `bus`: Session-bus name acquisition and service export
//! - `wake`: Suspend/resume backends, monitor factory, observer registry
//! - `error`: Error types and handling

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bus;
pub mod calendar;
pub mod config;
pub mod control;
pub mod error;
pub mod wake;

// Re-export commonly used types
pub use error::{AgentError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
