//! Control request and reply types
//!
//! This module defines the protocol-facing data model: one immutable
//! [`ControlRequest`] per incoming call, one [`ControlReply`] per outcome,
//! and the D-Bus error the fault side maps to on the wire.

/// A single incoming remote-control call
///
/// Constructed from the wire arguments and dropped once the reply is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlRequest {
    /// Import an ical file into the calendar
    LoadFile {
        /// Path of the file to import
        path: String,
    },
    /// Export calendar content to a file
    ExportFile {
        /// Target path
        path: String,
        /// Export kind (0 = whole calendar, 1 = named appointments)
        kind: i32,
        /// Comma-separated appointment UIDs
        uids: String,
    },
    /// Register a foreign calendar file
    AddForeign {
        /// Path of the foreign file
        path: String,
        /// Open the file read-only
        read_only: bool,
        /// Display name for the UI
        name: String,
    },
    /// Unregister a foreign calendar file
    RemoveForeign {
        /// Path of the foreign file
        path: String,
    },
}

impl ControlRequest {
    /// The path this request operates on
    pub fn path(&self) -> &str {
        match self {
            ControlRequest::LoadFile { path }
            | ControlRequest::ExportFile { path, .. }
            | ControlRequest::AddForeign { path, .. }
            | ControlRequest::RemoveForeign { path } => path,
        }
    }
}

/// Outcome of a control operation
///
/// The fault domain and code are fixed for the whole operation family
/// (`FileError`/`Invalid`); only the message varies, naming the offending
/// path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlReply {
    /// Operation succeeded; empty reply
    Success,
    /// Operation failed; mapped to a `FileError.Invalid` bus error
    Fault {
        /// Human-readable message containing the offending path
        message: String,
    },
}

impl ControlReply {
    /// Create a fault reply
    pub fn fault(message: impl Into<String>) -> Self {
        ControlReply::Fault {
            message: message.into(),
        }
    }

    /// Whether this reply is a success
    pub fn is_success(&self) -> bool {
        matches!(self, ControlReply::Success)
    }
}

/// Bus-level error returned for failed control operations
///
/// Rendered on the wire as `org.xfce.orage.FileError.Invalid`.
#[derive(Debug, zbus::DBusError)]
#[zbus(prefix = "org.xfce.orage.FileError")]
pub enum FileError {
    /// Transport-level failure surfaced through the same type
    #[zbus(error)]
    ZBus(zbus::Error),
    /// The named file could not be processed
    Invalid(String),
}

impl From<ControlReply> for Result<(), FileError> {
    fn from(reply: ControlReply) -> Self {
        match reply {
            ControlReply::Success => Ok(()),
            ControlReply::Fault { message } => Err(FileError::Invalid(message)),
        }
    }
}
