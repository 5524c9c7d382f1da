//! Session-bus connection management
//!
//! Requests the agent's well-known name and, once acquired, exports the
//! control service object at the fixed path. Name acquisition happens once
//! at startup; failure is non-fatal and leaves the service unexported, so
//! the host process keeps running without remote-control capability.

use crate::control::{ControlHandler, ControlService};
use crate::error::Result;
use std::sync::Arc;
use tracing::{debug, info};
use zbus::Connection;

/// Well-known name requested on the session bus
pub const WELL_KNOWN_NAME: &str = "org.xfce.orage";

/// Object path the control service is exported at
pub const OBJECT_PATH: &str = "/org/xfce/orage";

/// Owns the session-bus connection and the exported control service
///
/// The service object is exported at most once per process; repeated
/// [`acquire_name`](BusManager::acquire_name) calls while the name is held
/// are no-ops.
pub struct BusManager {
    well_known_name: String,
    connection: Option<Connection>,
}

impl BusManager {
    /// Create a manager that will request `well_known_name`
    pub fn new(well_known_name: impl Into<String>) -> Self {
        Self {
            well_known_name: well_known_name.into(),
            connection: None,
        }
    }

    /// Request the well-known name and export the control service
    ///
    /// On failure (name owned elsewhere, transport unavailable) the caller
    /// logs the error and continues; no retry is attempted.
    pub async fn acquire_name(&mut self, handler: Arc<ControlHandler>) -> Result<()> {
        if self.connection.is_some() {
            debug!("name {} already owned, nothing to do", self.well_known_name);
            return Ok(());
        }

        let builder = zbus::connection::Builder::session()?;
        self.acquire_with(builder, handler).await
    }

    async fn acquire_with(
        &mut self,
        builder: zbus::connection::Builder<'_>,
        handler: Arc<ControlHandler>,
    ) -> Result<()> {
        let service = ControlService::new(handler);
        let connection = builder
            .name(self.well_known_name.clone())?
            .serve_at(OBJECT_PATH, service)?
            .build()
            .await?;

        info!(
            "acquired {}, control service exported at {}",
            self.well_known_name, OBJECT_PATH
        );
        self.connection = Some(connection);
        Ok(())
    }

    /// Whether the control service is currently exported
    pub fn is_exported(&self) -> bool {
        self.connection.is_some()
    }

    /// Release the name and drop the exported service
    pub async fn release(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.graceful_shutdown().await;
            info!("released {}", self.well_known_name);
        }
    }
}
