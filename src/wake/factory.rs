//! Monitor factory
//!
//! Walks the enabled backend descriptors in priority order and returns the
//! first one that attaches. Every failure along the way is an expected
//! outcome: preconditions skip without touching the bus, attach errors move
//! on to the next descriptor, and a fully exhausted table yields no monitor
//! at all, leaving the feature silently degraded.

use crate::wake::{ActiveMonitor, BackendDescriptor, MonitorError, WakeBackendKind, WakeObserverRegistry};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};
use zbus::Connection;

/// Builds at most one [`ActiveMonitor`] from an ordered backend list
pub struct MonitorFactory {
    backends: Vec<&'static BackendDescriptor>,
}

impl MonitorFactory {
    /// Create a factory over the configured backends, order preserved
    pub fn new(kinds: &[WakeBackendKind]) -> Self {
        Self {
            backends: kinds.iter().map(|kind| kind.descriptor()).collect(),
        }
    }

    /// Backend names in the order they will be tried
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|desc| desc.name).collect()
    }

    /// Attach the first available backend
    ///
    /// Returns `None` when no backend attaches; this is a normal outcome,
    /// not an error. There is no retry and no later re-scan: the chosen
    /// backend stays attached until the caller tears it down.
    pub async fn attach(&self, registry: Arc<WakeObserverRegistry>) -> Option<ActiveMonitor> {
        let connection = match Connection::system().await {
            Ok(connection) => connection,
            Err(e) => {
                debug!("system bus unavailable, wake monitoring disabled: {}", e);
                return None;
            }
        };

        let monitor = attach_first(&self.backends, |descriptor| {
            let connection = connection.clone();
            let registry = registry.clone();
            async move { ActiveMonitor::attach(&connection, descriptor, registry).await }
        })
        .await;

        match &monitor {
            Some(monitor) => info!("wake monitor attached via {}", monitor.backend_name()),
            None => debug!("no wake monitor available"),
        }
        monitor
    }
}

/// Try each descriptor in order, returning the first successful attachment
pub(crate) async fn attach_first<M, F, Fut>(
    backends: &[&'static BackendDescriptor],
    mut try_attach: F,
) -> Option<M>
where
    F: FnMut(&'static BackendDescriptor) -> Fut,
    Fut: Future<Output = Result<M, MonitorError>>,
{
    for descriptor in backends.iter().copied() {
        if !(descriptor.precondition)() {
            debug!("{}: precondition not met, skipping", descriptor.name);
            continue;
        }
        match try_attach(descriptor).await {
            Ok(monitor) => return Some(monitor),
            Err(e) => debug!("{}: attach failed: {}", descriptor.name, e),
        }
    }
    None
}
