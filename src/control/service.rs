//! Exported control service object
//!
//! The D-Bus face of the agent: four methods under the `org.xfce.orage`
//! interface, each building a [`ControlRequest`], running it through the
//! [`ControlHandler`], and converting the reply into either an empty method
//! return or a `FileError.Invalid` bus error.

use crate::control::{ControlHandler, ControlRequest, FileError};
use std::sync::Arc;
use tracing::debug;

/// Object exported at the fixed control path
pub struct ControlService {
    handler: Arc<ControlHandler>,
}

impl ControlService {
    /// Create the service around a request handler
    pub fn new(handler: Arc<ControlHandler>) -> Self {
        Self { handler }
    }

    fn dispatch(&self, request: ControlRequest) -> Result<(), FileError> {
        debug!("control request for {}", request.path());
        self.handler.handle(request).into()
    }
}

#[zbus::interface(name = "org.xfce.orage")]
impl ControlService {
    /// Import an ical file into the calendar
    async fn load_file(&self, path: String) -> Result<(), FileError> {
        self.dispatch(ControlRequest::LoadFile { path })
    }

    /// Export calendar content to a file
    async fn export_file(&self, path: String, kind: i32, uids: String) -> Result<(), FileError> {
        self.dispatch(ControlRequest::ExportFile { path, kind, uids })
    }

    /// Register a foreign calendar file
    async fn add_foreign(&self, path: String, mode: bool, name: String) -> Result<(), FileError> {
        self.dispatch(ControlRequest::AddForeign {
            path,
            read_only: mode,
            name,
        })
    }

    /// Unregister a foreign calendar file
    async fn remove_foreign(&self, path: String) -> Result<(), FileError> {
        self.dispatch(ControlRequest::RemoveForeign { path })
    }
}
