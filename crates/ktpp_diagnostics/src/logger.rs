//! Sinks that diagnostics are written to.
//!
//! A [`Logger`] never reports failure back to its caller. Sinks that do I/O swallow their own
//! errors so that a broken output stream can't abort compilation.

use crate::severity::Severity;
use std::sync::Arc;

mod combined;
mod recording;
mod tracing_logger;
mod writer;

pub use combined::{CombinedLogger, PrefixedLogger};
pub use recording::{Record, RecordingLogger};
pub use tracing_logger::TracingLogger;
pub use writer::WriterLogger;

/// Accepts formatted records, optionally tagged with the component they came from.
///
/// Implementations must be safe to share between threads compiling different units.
pub trait Logger: Send + Sync {
    /// Logs a message
    fn log(&self, severity: Severity, message: &str);

    /// Logs a message tagged with a source
    fn log_sourced(&self, severity: Severity, source: &str, message: &str);
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, severity: Severity, message: &str) {
        (**self).log(severity, message)
    }

    fn log_sourced(&self, severity: Severity, source: &str, message: &str) {
        (**self).log_sourced(severity, source, message)
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn log(&self, severity: Severity, message: &str) {
        (**self).log(severity, message)
    }

    fn log_sourced(&self, severity: Severity, source: &str, message: &str) {
        (**self).log_sourced(severity, source, message)
    }
}
