//! Renders spans of source text into messages

use crate::logger::Logger;
use crate::severity::Severity;
use ktpp_tokens::{FileId, TextSpan};
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Holds the text of every registered source file and reports messages pointing into them.
#[derive(Clone)]
pub struct Diagnostics {
    logger: Arc<dyn Logger>,
    sources: HashMap<FileId, Arc<str>>,
}

impl Diagnostics {
    pub fn new<L: Logger + 'static>(logger: L) -> Self {
        Self::with_shared(Arc::new(logger))
    }

    /// Creates diagnostics that report to a logger which may also be used elsewhere
    pub fn with_shared(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger,
            sources: HashMap::new(),
        }
    }

    /// Registers the full text of a source file, replacing any text previously registered for
    /// the same path.
    pub fn add_source(&mut self, path: impl Into<FileId>, text: impl Into<Arc<str>>) {
        self.sources.insert(path.into(), text.into());
    }

    /// Gets the registered text for a file
    pub fn source(&self, path: &FileId) -> Option<&str> {
        self.sources.get(path).map(|s| &**s)
    }

    /// Renders the line a span starts on, a line of carets under the span, and a
    /// `[path:line:col] ` trailer that a message can be appended to.
    ///
    /// If no text was registered for the span's file, only `path:line:col` is returned.
    pub fn highlight(&self, span: &TextSpan) -> String {
        self.render(span).unwrap_or_else(|| span.to_string())
    }

    fn render(&self, span: &TextSpan) -> Option<String> {
        let source = self.sources.get(span.file())?;
        let line = source_line(source, span.line_start())?;

        let column = span.column().min(line.len());
        let line_end = span.line_start() + line.len();
        let carets = span.end().min(line_end).saturating_sub(span.start()).max(1);
        let padding: String = String::from_utf8_lossy(&line.as_bytes()[..column])
            .chars()
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();

        Some(format!("{line}\n{padding}{}\n[{span}] ", "^".repeat(carets)))
    }

    /// Reports a message about a span of source text
    pub fn emit(&self, severity: Severity, message: impl AsRef<str>, span: &TextSpan) {
        self.logger
            .log(severity, &self.annotate(message.as_ref(), span))
    }

    /// Reports a message about a span of source text, tagged with the component reporting it
    pub fn emit_sourced(
        &self,
        severity: Severity,
        source: &str,
        message: impl AsRef<str>,
        span: &TextSpan,
    ) {
        self.logger
            .log_sourced(severity, source, &self.annotate(message.as_ref(), span))
    }

    /// Reports a message that isn't tied to any source text
    pub fn log(&self, severity: Severity, message: impl AsRef<str>) {
        self.logger.log(severity, message.as_ref())
    }

    /// Reports a message that isn't tied to any source text, tagged with a source
    pub fn log_sourced(&self, severity: Severity, source: &str, message: impl AsRef<str>) {
        self.logger.log_sourced(severity, source, message.as_ref())
    }

    fn annotate(&self, message: &str, span: &TextSpan) -> String {
        match self.render(span) {
            Some(highlight) => format!("{highlight}{message}"),
            None => format!("[{span}] {message}"),
        }
    }
}

impl Debug for Diagnostics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("sources", &self.sources.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// The text of the line starting at `line_start`, without its line terminator
fn source_line(source: &str, line_start: usize) -> Option<&str> {
    let rest = source.get(line_start..)?;
    let line = rest.split('\n').next().unwrap_or_default();
    Some(line.strip_suffix('\r').unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::RecordingLogger;
    use test_log::test;

    fn span(line: u32, line_start: usize, start: usize, end: usize) -> TextSpan {
        TextSpan::new(FileId::new("file.ktpp"), line, line_start, start, end)
    }

    #[test]
    fn highlight_points_at_span() {
        let mut diagnostics = Diagnostics::new(RecordingLogger::new());
        diagnostics.add_source("file.ktpp", "var x = 1\nvar y = @\n");
        let highlighted = diagnostics.highlight(&span(2, 10, 18, 19));
        assert_eq!(highlighted, "var y = @\n        ^\n[file.ktpp:2:8] ");
    }

    #[test]
    fn highlight_clips_to_line() {
        let mut diagnostics = Diagnostics::new(RecordingLogger::new());
        diagnostics.add_source("file.ktpp", "\"abc\ndef");
        let highlighted = diagnostics.highlight(&span(1, 0, 0, 8));
        assert_eq!(highlighted, "\"abc\n^^^^\n[file.ktpp:1:0] ");
    }

    #[test]
    fn empty_span_gets_one_caret() {
        let mut diagnostics = Diagnostics::new(RecordingLogger::new());
        diagnostics.add_source("file.ktpp", "fn");
        let highlighted = diagnostics.highlight(&span(1, 0, 2, 2));
        assert_eq!(highlighted, "fn\n  ^\n[file.ktpp:1:2] ");
    }

    #[test]
    fn highlight_without_source() {
        let diagnostics = Diagnostics::new(RecordingLogger::new());
        assert_eq!(diagnostics.highlight(&span(3, 4, 6, 7)), "file.ktpp:3:2");
    }

    #[test]
    fn emit_forwards_to_logger() {
        let logger = Arc::new(RecordingLogger::new());
        let mut diagnostics = Diagnostics::with_shared(logger.clone());
        diagnostics.add_source("file.ktpp", "1e0");
        diagnostics.emit_sourced(
            Severity::Warn,
            "lexer",
            "Number literal with power of 0",
            &span(1, 0, 0, 3),
        );
        diagnostics.emit(Severity::Error, "bad", &span(1, 0, 0, 1));

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].severity, Severity::Warn);
        assert_eq!(records[0].source.as_deref(), Some("lexer"));
        assert_eq!(
            records[0].message,
            "1e0\n^^^\n[file.ktpp:1:0] Number literal with power of 0"
        );
        assert_eq!(records[1].source, None);
    }

    #[test]
    fn emit_without_source_still_reports() {
        let logger = Arc::new(RecordingLogger::new());
        let diagnostics = Diagnostics::with_shared(logger.clone());
        diagnostics.emit(Severity::Error, "lost", &span(1, 0, 0, 1));
        assert_eq!(logger.records()[0].message, "[file.ktpp:1:0] lost");
    }
}
