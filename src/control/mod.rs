//! Remote-control surface for external applications
//!
//! This module provides the exported bus service through which external
//! processes drive calendar import/export and foreign-calendar operations.

mod api;
mod handler;
mod service;

pub use api::{ControlReply, ControlRequest, FileError};
pub use handler::ControlHandler;
pub use service::ControlService;
