use crate::logger::Logger;
use crate::severity::Severity;

/// Sends every record to all of its loggers, in order
#[derive(Default)]
pub struct CombinedLogger {
    loggers: Vec<Box<dyn Logger>>,
}

impl CombinedLogger {
    pub fn new<I>(loggers: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Logger>>,
    {
        Self {
            loggers: loggers.into_iter().collect(),
        }
    }

    /// Adds another logger to the end of this one
    pub fn push<L: Logger + 'static>(&mut self, logger: L) {
        self.loggers.push(Box::new(logger));
    }
}

impl Logger for CombinedLogger {
    fn log(&self, severity: Severity, message: &str) {
        for logger in &self.loggers {
            logger.log(severity, message);
        }
    }

    fn log_sourced(&self, severity: Severity, source: &str, message: &str) {
        for logger in &self.loggers {
            logger.log_sourced(severity, source, message);
        }
    }
}

/// Tags every record with a fixed prefix.
///
/// Untagged records get the prefix as their source, and tagged records get `prefix.source`.
pub struct PrefixedLogger<L: Logger> {
    logger: L,
    prefix: String,
}

impl<L: Logger> PrefixedLogger<L> {
    pub fn new(logger: L, prefix: impl Into<String>) -> Self {
        Self {
            logger,
            prefix: prefix.into(),
        }
    }
}

impl<L: Logger> Logger for PrefixedLogger<L> {
    fn log(&self, severity: Severity, message: &str) {
        self.logger.log_sourced(severity, &self.prefix, message)
    }

    fn log_sourced(&self, severity: Severity, source: &str, message: &str) {
        self.logger
            .log_sourced(severity, &format!("{}.{source}", self.prefix), message)
    }
}
