//! Backend attachment and signal decode
//!
//! Attaching to a backend verifies the service has an owner, builds a proxy
//! for it, and subscribes to its `PrepareForSleep`-shaped signal. The
//! resulting [`ActiveMonitor`] owns the proxy and the subscription as a
//! unit; no partially-initialized state survives a failed attach.

use crate::wake::{BackendDescriptor, WakeObserverRegistry};
use futures_util::{Stream, StreamExt};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};
use zbus::names::BusName;
use zbus::{fdo, Connection, Proxy};

/// Errors raised while attaching a backend
///
/// All of these are expected, non-fatal outcomes during factory iteration;
/// they are logged at debug level and the next descriptor is tried.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// The service's well-known name currently has no owner
    #[error("{0} has no owner on the system bus")]
    NoOwner(String),

    /// Transport failure while connecting or subscribing
    #[error("bus error: {0}")]
    Bus(#[from] zbus::Error),

    /// Failure talking to the bus daemon itself
    #[error("bus daemon error: {0}")]
    Fdo(#[from] fdo::Error),
}

/// A live attachment to exactly one backend
///
/// At most one instance exists process-wide at a time. Dropping or
/// detaching it cancels the dispatch task, which releases the proxy and the
/// signal subscription together.
pub struct ActiveMonitor {
    descriptor: &'static BackendDescriptor,
    task: tokio::task::JoinHandle<()>,
}

impl ActiveMonitor {
    /// Attach to `descriptor` over `connection`
    pub(crate) async fn attach(
        connection: &Connection,
        descriptor: &'static BackendDescriptor,
        registry: Arc<WakeObserverRegistry>,
    ) -> Result<Self, MonitorError> {
        let dbus = fdo::DBusProxy::new(connection).await?;
        let bus_name = BusName::try_from(descriptor.bus_name).map_err(zbus::Error::from)?;
        if !dbus.name_has_owner(bus_name).await? {
            return Err(MonitorError::NoOwner(descriptor.bus_name.to_string()));
        }

        let proxy = Proxy::new(
            connection,
            descriptor.bus_name,
            descriptor.object_path,
            descriptor.interface,
        )
        .await?;
        let stream = proxy.receive_signal(descriptor.signal).await?;

        let task = tokio::spawn(async move {
            // The proxy lives as long as the subscription it backs
            let _proxy = proxy;
            run_dispatch(stream, descriptor, registry).await;
        });

        Ok(Self { descriptor, task })
    }

    /// Build a monitor whose dispatch task consumes an arbitrary stream
    #[cfg(test)]
    fn from_stream<S>(
        stream: S,
        descriptor: &'static BackendDescriptor,
        registry: Arc<WakeObserverRegistry>,
    ) -> Self
    where
        S: Stream<Item = zbus::message::Message> + Unpin + Send + 'static,
    {
        let task = tokio::spawn(run_dispatch(stream, descriptor, registry));
        Self { descriptor, task }
    }

    /// Name of the attached backend
    pub fn backend_name(&self) -> &'static str {
        self.descriptor.name
    }

    /// Tear down the subscription and proxy
    ///
    /// Completes only after the dispatch task has stopped, so a replacement
    /// attach never observes a live subscription from this monitor.
    pub async fn detach(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
        debug!("{} monitor detached", self.descriptor.name);
    }
}

impl Drop for ActiveMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run_dispatch<S>(
    mut stream: S,
    descriptor: &'static BackendDescriptor,
    registry: Arc<WakeObserverRegistry>,
) where
    S: Stream<Item = zbus::message::Message> + Unpin,
{
    while let Some(message) = stream.next().await {
        handle_signal(&message, descriptor, &registry);
    }
    debug!("{} signal stream ended", descriptor.name);
}

/// Decode one incoming signal and dispatch it
///
/// A payload that does not match the descriptor's expected shape is logged
/// and dropped; the dispatcher keeps serving subsequent signals. `true`
/// (about to suspend) is ignored; `false` (resuming) wakes the observers.
fn handle_signal(
    message: &zbus::message::Message,
    descriptor: &BackendDescriptor,
    registry: &WakeObserverRegistry,
) {
    let body = message.body();
    let signature = body.signature().to_string();
    if signature != descriptor.signature {
        error!(
            "malformed {} signal from {}: expected signature '{}', got '{}'",
            descriptor.signal, descriptor.name, descriptor.signature, signature
        );
        return;
    }

    let entering_sleep: bool = match body.deserialize() {
        Ok(value) => value,
        Err(e) => {
            error!(
                "malformed {} signal from {}: {}",
                descriptor.signal, descriptor.name, e
            );
            return;
        }
    };

    if entering_sleep {
        debug!("{}: system preparing for sleep", descriptor.name);
        return;
    }

    info!("{}: system resumed from suspend", descriptor.name);
    registry.emit();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wake::LOGIND;
    use std::sync::Mutex;
    use zbus::message::Message;

    fn sleep_signal<B>(body: &B) -> Message
    where
        B: serde::ser::Serialize + zbus::zvariant::DynamicType,
    {
        Message::signal(
            LOGIND.object_path,
            LOGIND.interface,
            LOGIND.signal,
        )
        .unwrap()
        .build(body)
        .unwrap()
    }

    fn counting_registry() -> (Arc<WakeObserverRegistry>, Arc<Mutex<u32>>) {
        let registry = Arc::new(WakeObserverRegistry::new());
        let count = Arc::new(Mutex::new(0u32));
        let count_cb = count.clone();
        registry.register(move || *count_cb.lock().unwrap() += 1);
        (registry, count)
    }

    #[test]
    fn test_suspend_signal_does_not_emit() {
        let (registry, count) = counting_registry();
        handle_signal(&sleep_signal(&true), &LOGIND, &registry);
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_resume_signal_emits_once_per_observer() {
        let registry = Arc::new(WakeObserverRegistry::new());
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..3 {
            let order = order.clone();
            registry.register(move || order.lock().unwrap().push(i));
        }

        handle_signal(&sleep_signal(&false), &LOGIND, &registry);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_wrong_argument_type_is_dropped() {
        let (registry, count) = counting_registry();
        handle_signal(&sleep_signal(&"not-a-bool"), &LOGIND, &registry);
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_wrong_argument_count_is_dropped() {
        let (registry, count) = counting_registry();
        handle_signal(&sleep_signal(&(true, 42u32)), &LOGIND, &registry);
        handle_signal(&sleep_signal(&()), &LOGIND, &registry);
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_dispatcher_survives_malformed_signal() {
        let (registry, count) = counting_registry();
        handle_signal(&sleep_signal(&(1u8, 2u8)), &LOGIND, &registry);
        // A well-formed resume right after still goes through
        handle_signal(&sleep_signal(&false), &LOGIND, &registry);
        assert_eq!(*count.lock().unwrap(), 1);
    }

    /// Adapts a tokio channel into the message stream the dispatcher runs on
    struct ChannelStream(tokio::sync::mpsc::UnboundedReceiver<Message>);

    impl Stream for ChannelStream {
        type Item = Message;

        fn poll_next(
            self: std::pin::Pin<&mut Self>,
            cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<Option<Message>> {
            self.get_mut().0.poll_recv(cx)
        }
    }

    async fn wait_for_count(count: &Arc<Mutex<u32>>, expected: u32) {
        for _ in 0..200 {
            if *count.lock().unwrap() == expected {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        panic!("timed out waiting for {} wake event(s)", expected);
    }

    #[tokio::test]
    async fn test_detach_leaves_no_live_subscription_before_reattach() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let (registry, count) = counting_registry();

        let monitor = ActiveMonitor::from_stream(ChannelStream(rx), &LOGIND, registry.clone());
        tx.send(sleep_signal(&false)).unwrap();
        wait_for_count(&count, 1).await;

        // detach completes only once the dispatch task has stopped; the
        // stream is disposed with it, so the sender has no receiver left
        monitor.detach().await;
        assert!(tx.send(sleep_signal(&false)).is_err());
        assert_eq!(*count.lock().unwrap(), 1);

        // A replacement attach starts from a clean slate
        let (tx2, rx2) = tokio::sync::mpsc::unbounded_channel();
        let replacement =
            ActiveMonitor::from_stream(ChannelStream(rx2), &LOGIND, registry.clone());
        tx2.send(sleep_signal(&false)).unwrap();
        wait_for_count(&count, 2).await;
        replacement.detach().await;
    }

    #[tokio::test]
    async fn test_drop_disposes_subscription() {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let (registry, count) = counting_registry();

        let monitor = ActiveMonitor::from_stream(ChannelStream(rx), &LOGIND, registry.clone());
        drop(monitor);

        // The abort lands asynchronously; wait for the receiver to go away
        for _ in 0..200 {
            if tx.is_closed() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert!(tx.is_closed());
        assert_eq!(*count.lock().unwrap(), 0);
    }
}
