use crate::logger::Logger;
use crate::severity::Severity;
use owo_colors::{OwoColorize, Style};
use parking_lot::Mutex;
use std::io::{Stderr, Write};

/// Writes records as text to some output stream.
///
/// Each record is written as `[Level ] message`. Lines after the first line of a message are
/// indented so they line up under the first character of the message.
pub struct WriterLogger<W: Write + Send> {
    writer: Mutex<W>,
    min_level: Severity,
    colors: bool,
}

impl<W: Write + Send> WriterLogger<W> {
    pub fn new(writer: W, min_level: Severity, colors: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            min_level,
            colors,
        }
    }

    /// Consumes the logger, giving back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn render(&self, severity: Severity, message: &str, offset: usize) -> String {
        let header = format!("[{severity}] ");
        let indent = format!("\n{}", " ".repeat(header.len() + offset));
        let text = format!("{header}{}", message.split('\n').collect::<Vec<_>>().join(&indent));
        if self.colors {
            text.style(level_style(severity)).to_string()
        } else {
            text
        }
    }

    fn write(&self, severity: Severity, message: &str, offset: usize) {
        if severity < self.min_level {
            return;
        }
        let rendered = self.render(severity, message, offset);
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "{rendered}").and_then(|_| writer.flush());
    }
}

impl WriterLogger<Stderr> {
    /// Creates a logger writing to the standard error stream
    pub fn stderr(min_level: Severity, colors: bool) -> Self {
        Self::new(std::io::stderr(), min_level, colors)
    }
}

impl<W: Write + Send> Logger for WriterLogger<W> {
    fn log(&self, severity: Severity, message: &str) {
        self.write(severity, message, 0)
    }

    fn log_sourced(&self, severity: Severity, source: &str, message: &str) {
        self.write(
            severity,
            &format!("{source}: {message}"),
            source.len() + 2,
        )
    }
}

fn level_style(severity: Severity) -> Style {
    match severity {
        Severity::Debug => Style::new().blue(),
        Severity::Info => Style::new().green(),
        Severity::Warn => Style::new().yellow(),
        Severity::Error => Style::new().bold().red(),
        Severity::Severe => Style::new().bold().magenta(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(logger: WriterLogger<Vec<u8>>) -> String {
        String::from_utf8(logger.into_inner()).unwrap()
    }

    #[test]
    fn writes_header() {
        let logger = WriterLogger::new(vec![], Severity::Debug, false);
        logger.log(Severity::Info, "hello");
        assert_eq!(output(logger), "[Info  ] hello\n");
    }

    #[test]
    fn filters_below_min_level() {
        let logger = WriterLogger::new(vec![], Severity::Warn, false);
        logger.log(Severity::Info, "dropped");
        logger.log(Severity::Error, "kept");
        assert_eq!(output(logger), "[Error ] kept\n");
    }

    #[test]
    fn indents_continuation_lines() {
        let logger = WriterLogger::new(vec![], Severity::Debug, false);
        logger.log(Severity::Warn, "first\nsecond");
        assert_eq!(output(logger), "[Warn  ] first\n         second\n");
    }

    #[test]
    fn sourced_indents_past_source() {
        let logger = WriterLogger::new(vec![], Severity::Debug, false);
        logger.log_sourced(Severity::Error, "lexer", "a\nb");
        assert_eq!(output(logger), "[Error ] lexer: a\n                b\n");
    }

    #[test]
    fn colors_wrap_record() {
        let logger = WriterLogger::new(vec![], Severity::Debug, true);
        logger.log(Severity::Debug, "colored");
        let out = output(logger);
        assert!(out.starts_with("\u{1b}["));
        assert!(out.contains("[Debug ] colored"));
        assert!(out.trim_end().ends_with("\u{1b}[0m"));
    }
}
