use crate::logger::Logger;
use crate::severity::Severity;
use parking_lot::Mutex;

/// A single record kept by a [`RecordingLogger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub severity: Severity,
    pub source: Option<String>,
    pub message: String,
}

/// Keeps every record in memory instead of writing it anywhere
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<Record>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the records logged so far
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// Records with exactly the given severity
    pub fn with_severity(&self, severity: Severity) -> Vec<Record> {
        self.records
            .lock()
            .iter()
            .filter(|record| record.severity == severity)
            .cloned()
            .collect()
    }

    /// Checks if any record at or above [`Severity::Error`] was logged
    pub fn has_errors(&self) -> bool {
        self.records.lock().iter().any(|r| r.severity.is_error())
    }

    fn push(&self, severity: Severity, source: Option<&str>, message: &str) {
        self.records.lock().push(Record {
            severity,
            source: source.map(str::to_string),
            message: message.to_string(),
        });
    }
}

impl Logger for RecordingLogger {
    fn log(&self, severity: Severity, message: &str) {
        self.push(severity, None, message)
    }

    fn log_sourced(&self, severity: Severity, source: &str, message: &str) {
        self.push(severity, Some(source), message)
    }
}
