//! Request translation for the control service
//!
//! This module maps each incoming request to a delegate call and each
//! boolean delegate result to a [`ControlReply`]. It is a pure translation
//! layer: no validation happens here beyond what the delegate performs, and
//! every outcome is logged before the reply is produced.

use crate::calendar::CalendarOps;
use crate::control::{ControlReply, ControlRequest};
use std::sync::Arc;
use tracing::{info, warn};

/// Translates control requests into delegate calls and replies
pub struct ControlHandler {
    calendar: Arc<dyn CalendarOps>,
}

impl ControlHandler {
    /// Create a handler delegating to `calendar`
    pub fn new(calendar: Arc<dyn CalendarOps>) -> Self {
        Self { calendar }
    }

    /// Handle one request, producing exactly one reply
    pub fn handle(&self, request: ControlRequest) -> ControlReply {
        match request {
            ControlRequest::LoadFile { path } => {
                if self.calendar.import_file(&path) {
                    info!("File added {}", path);
                    ControlReply::Success
                } else {
                    warn!("Invalid ical file '{}'", path);
                    ControlReply::fault(format!("Invalid ical file '{}'", path))
                }
            }
            ControlRequest::ExportFile { path, kind, uids } => {
                if self.calendar.export_file(&path, kind, &uids) {
                    info!("file exported: {}", path);
                    ControlReply::Success
                } else {
                    warn!("DBUS file export failed: {}", path);
                    ControlReply::fault(format!("DBUS file export failed: {}", path))
                }
            }
            ControlRequest::AddForeign {
                path,
                read_only,
                name,
            } => {
                if self.calendar.add_foreign_calendar(&path, read_only, &name) {
                    info!("Foreign file added {}", path);
                    ControlReply::Success
                } else {
                    warn!("Foreign file add failed: {}", path);
                    ControlReply::fault(format!("Foreign file add failed: {}", path))
                }
            }
            ControlRequest::RemoveForeign { path } => {
                if self.calendar.remove_foreign_calendar(&path) {
                    info!("Foreign file removed {}", path);
                    ControlReply::Success
                } else {
                    warn!("Foreign file remove failed {}", path);
                    ControlReply::fault(format!("Foreign file remove failed {}", path))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Delegate double with scripted results and call recording
    struct StubCalendar {
        import_result: bool,
        export_result: bool,
        add_result: bool,
        remove_results: Mutex<Vec<bool>>,
        calls: Mutex<Vec<String>>,
    }

    impl StubCalendar {
        fn all(result: bool) -> Self {
            Self {
                import_result: result,
                export_result: result,
                add_result: result,
                remove_results: Mutex::new(vec![result]),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl CalendarOps for StubCalendar {
        fn import_file(&self, path: &str) -> bool {
            self.record(format!("import:{}", path));
            self.import_result
        }

        fn export_file(&self, path: &str, kind: i32, uids: &str) -> bool {
            self.record(format!("export:{}:{}:{}", path, kind, uids));
            self.export_result
        }

        fn add_foreign_calendar(&self, path: &str, read_only: bool, name: &str) -> bool {
            self.record(format!("add:{}:{}:{}", path, read_only, name));
            self.add_result
        }

        fn remove_foreign_calendar(&self, path: &str) -> bool {
            self.record(format!("remove:{}", path));
            let mut results = self.remove_results.lock().unwrap();
            if results.len() > 1 {
                results.remove(0)
            } else {
                results[0]
            }
        }
    }

    fn handler(stub: StubCalendar) -> (ControlHandler, Arc<StubCalendar>) {
        let stub = Arc::new(stub);
        (ControlHandler::new(stub.clone()), stub)
    }

    #[test]
    fn test_load_file_success() {
        let (handler, stub) = handler(StubCalendar::all(true));
        let reply = handler.handle(ControlRequest::LoadFile {
            path: "/tmp/a.ics".to_string(),
        });
        assert_eq!(reply, ControlReply::Success);
        assert_eq!(stub.calls.lock().unwrap().as_slice(), ["import:/tmp/a.ics"]);
    }

    #[test]
    fn test_load_file_failure_names_path() {
        let (handler, _) = handler(StubCalendar::all(false));
        let reply = handler.handle(ControlRequest::LoadFile {
            path: "/tmp/a.ics".to_string(),
        });
        match reply {
            ControlReply::Fault { message } => {
                assert_eq!(message, "Invalid ical file '/tmp/a.ics'")
            }
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_export_file_passes_arguments_through() {
        let (handler, stub) = handler(StubCalendar::all(true));
        let reply = handler.handle(ControlRequest::ExportFile {
            path: "/tmp/b.ics".to_string(),
            kind: 1,
            uids: "uid1,uid2".to_string(),
        });
        assert!(reply.is_success());
        assert_eq!(
            stub.calls.lock().unwrap().as_slice(),
            ["export:/tmp/b.ics:1:uid1,uid2"]
        );
    }

    #[test]
    fn test_export_file_failure_names_path() {
        let (handler, _) = handler(StubCalendar::all(false));
        let reply = handler.handle(ControlRequest::ExportFile {
            path: "/tmp/b.ics".to_string(),
            kind: 1,
            uids: "uid1,uid2".to_string(),
        });
        match reply {
            ControlReply::Fault { message } => assert!(message.contains("/tmp/b.ics")),
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_add_foreign() {
        let (handler, stub) = handler(StubCalendar::all(true));
        let reply = handler.handle(ControlRequest::AddForeign {
            path: "/tmp/f.ics".to_string(),
            read_only: true,
            name: "Holidays".to_string(),
        });
        assert!(reply.is_success());
        assert_eq!(
            stub.calls.lock().unwrap().as_slice(),
            ["add:/tmp/f.ics:true:Holidays"]
        );
    }

    #[test]
    fn test_remove_foreign_failure() {
        let (handler, _) = handler(StubCalendar::all(false));
        let reply = handler.handle(ControlRequest::RemoveForeign {
            path: "/tmp/f.ics".to_string(),
        });
        match reply {
            ControlReply::Fault { message } => {
                assert_eq!(message, "Foreign file remove failed /tmp/f.ics")
            }
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_remove_foreign_twice_is_stateless() {
        // The handler holds no state of its own: each reply is determined by
        // the delegate's result at that moment.
        let stub = StubCalendar {
            import_result: false,
            export_result: false,
            add_result: false,
            remove_results: Mutex::new(vec![true, false]),
            calls: Mutex::new(Vec::new()),
        };
        let (handler, _) = handler(stub);

        let first = handler.handle(ControlRequest::RemoveForeign {
            path: "/tmp/f.ics".to_string(),
        });
        let second = handler.handle(ControlRequest::RemoveForeign {
            path: "/tmp/f.ics".to_string(),
        });

        assert!(first.is_success());
        assert!(!second.is_success());
    }
}
