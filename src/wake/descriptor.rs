//! Backend descriptor table
//!
//! Static descriptions of the system services that can report
//! suspend/resume transitions. The table is read-only and priority-ordered:
//! the platform-native session manager (logind) comes before the legacy
//! alternative (ConsoleKit).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// One candidate system service for sleep/wake reporting
pub struct BackendDescriptor {
    /// Short name used in logs and configuration
    pub name: &'static str,
    /// Well-known bus name of the service
    pub bus_name: &'static str,
    /// Object path carrying the signal
    pub object_path: &'static str,
    /// Interface the signal belongs to
    pub interface: &'static str,
    /// Signal name
    pub signal: &'static str,
    /// Expected body signature of the signal
    pub signature: &'static str,
    /// Cheap runtime check for service presence, evaluated before any
    /// connection attempt
    pub precondition: fn() -> bool,
}

impl fmt::Debug for BackendDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendDescriptor")
            .field("name", &self.name)
            .field("bus_name", &self.bus_name)
            .field("object_path", &self.object_path)
            .field("interface", &self.interface)
            .field("signal", &self.signal)
            .field("signature", &self.signature)
            .finish()
    }
}

/// systemd-logind: `PrepareForSleep(b)` on the system bus
pub static LOGIND: BackendDescriptor = BackendDescriptor {
    name: "logind",
    bus_name: "org.freedesktop.login1",
    object_path: "/org/freedesktop/login1",
    interface: "org.freedesktop.login1.Manager",
    signal: "PrepareForSleep",
    signature: "b",
    precondition: logind_present,
};

/// ConsoleKit: equivalent signal shape, for systems without logind
pub static CONSOLEKIT: BackendDescriptor = BackendDescriptor {
    name: "consolekit",
    bus_name: "org.freedesktop.ConsoleKit",
    object_path: "/org/freedesktop/ConsoleKit/Manager",
    interface: "org.freedesktop.ConsoleKit.Manager",
    signal: "PrepareForSleep",
    signature: "b",
    precondition: always,
};

// systemd leaves this marker directory on every booted system
fn logind_present() -> bool {
    Path::new("/run/systemd/system").is_dir()
}

// ConsoleKit has no reliable runtime marker; the owner check decides
fn always() -> bool {
    true
}

/// Selectable backend variants, in the order configuration lists them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WakeBackendKind {
    /// systemd-logind session manager
    Logind,
    /// legacy ConsoleKit session tracking
    ConsoleKit,
}

impl WakeBackendKind {
    /// The static descriptor for this variant
    pub fn descriptor(&self) -> &'static BackendDescriptor {
        match self {
            WakeBackendKind::Logind => &LOGIND,
            WakeBackendKind::ConsoleKit => &CONSOLEKIT,
        }
    }
}

impl fmt::Display for WakeBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}
