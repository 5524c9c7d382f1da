//! Delegate boundary for calendar domain operations
//!
//! The control service does not parse or render calendar data itself; it
//! delegates every operation to an implementation of [`CalendarOps`] and
//! only translates the boolean result. Each operation reports plain
//! success/failure with no structured error detail crossing the boundary.

use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// Calendar domain operations consumed by the control service
pub trait CalendarOps: Send + Sync {
    /// Import an ical file into the calendar. Returns `true` on success.
    fn import_file(&self, path: &str) -> bool;

    /// Export calendar content to `path`. `kind` selects whole-calendar (0)
    /// or named-appointments export; `uids` is a comma-separated UID list.
    fn export_file(&self, path: &str, kind: i32, uids: &str) -> bool;

    /// Register a foreign calendar file. `read_only` controls the access
    /// mode; `name` is the display name shown in the UI.
    fn add_foreign_calendar(&self, path: &str, read_only: bool, name: &str) -> bool;

    /// Remove a previously registered foreign calendar file.
    fn remove_foreign_calendar(&self, path: &str) -> bool;
}

/// A registered foreign calendar
#[derive(Debug, Clone, PartialEq, Eq)]
struct ForeignFile {
    path: String,
    read_only: bool,
    name: String,
}

/// Filesystem-backed delegate
///
/// Validates operations against the filesystem and tracks foreign-calendar
/// registrations in memory. Calendar content handling lives in the desktop
/// application; this implementation covers what the agent itself can verify.
pub struct FsCalendar {
    foreign: Mutex<Vec<ForeignFile>>,
}

impl FsCalendar {
    /// Create a new delegate with no registered foreign calendars
    pub fn new() -> Self {
        Self {
            foreign: Mutex::new(Vec::new()),
        }
    }

    /// Number of registered foreign calendars
    pub fn foreign_count(&self) -> usize {
        self.foreign.lock().expect("foreign list lock poisoned").len()
    }

    fn is_readable_file(path: &str) -> bool {
        !path.is_empty() && Path::new(path).is_file()
    }
}

impl Default for FsCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarOps for FsCalendar {
    fn import_file(&self, path: &str) -> bool {
        if !Self::is_readable_file(path) {
            debug!("import rejected, not a readable file: {}", path);
            return false;
        }
        true
    }

    fn export_file(&self, path: &str, kind: i32, uids: &str) -> bool {
        if path.is_empty() || kind < 0 {
            return false;
        }
        // Named-appointment export requires at least one UID
        if kind == 1 && uids.trim().is_empty() {
            return false;
        }
        let target = Path::new(path);
        match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.is_dir(),
            _ => false,
        }
    }

    fn add_foreign_calendar(&self, path: &str, read_only: bool, name: &str) -> bool {
        if !Self::is_readable_file(path) {
            return false;
        }
        let mut foreign = self.foreign.lock().expect("foreign list lock poisoned");
        if foreign.iter().any(|f| f.path == path) {
            debug!("foreign file already registered: {}", path);
            return false;
        }
        foreign.push(ForeignFile {
            path: path.to_string(),
            read_only,
            name: name.to_string(),
        });
        true
    }

    fn remove_foreign_calendar(&self, path: &str) -> bool {
        let mut foreign = self.foreign.lock().expect("foreign list lock poisoned");
        match foreign.iter().position(|f| f.path == path) {
            Some(index) => {
                let removed = foreign.remove(index);
                debug!(
                    "unregistered foreign file '{}' (read_only={})",
                    removed.name, removed.read_only
                );
                true
            }
            None => false,
        }
    }
}
