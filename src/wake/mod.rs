//! Suspend/resume monitoring
//!
//! Detects host sleep/wake transitions through a priority-ordered table of
//! system services and notifies registered observers when the host resumes.
//! Attachment is attempted once at startup; if every backend fails the
//! feature degrades silently and no wake notifications ever fire.

mod backend;
mod descriptor;
mod factory;
mod observers;

pub use backend::{ActiveMonitor, MonitorError};
pub use descriptor::{BackendDescriptor, WakeBackendKind, CONSOLEKIT, LOGIND};
pub use factory::MonitorFactory;
pub use observers::{ObserverId, WakeObserverRegistry};
