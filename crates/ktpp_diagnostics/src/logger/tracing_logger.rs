use crate::logger::Logger;
use crate::severity::Severity;
use tracing::{debug, error, info, warn};

/// Forwards records as `tracing` events, so they end up wherever the installed subscriber
/// sends them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => debug!("{message}"),
            Severity::Info => info!("{message}"),
            Severity::Warn => warn!("{message}"),
            Severity::Error => error!("{message}"),
            Severity::Severe => error!(severe = true, "{message}"),
        }
    }

    fn log_sourced(&self, severity: Severity, source: &str, message: &str) {
        match severity {
            Severity::Debug => debug!(source, "{message}"),
            Severity::Info => info!(source, "{message}"),
            Severity::Warn => warn!(source, "{message}"),
            Severity::Error => error!(source, "{message}"),
            Severity::Severe => error!(source, severe = true, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn logs_every_level() {
        for severity in [
            Severity::Debug,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
            Severity::Severe,
        ] {
            TracingLogger.log(severity, "message");
            TracingLogger.log_sourced(severity, "parser", "message");
        }
    }
}
