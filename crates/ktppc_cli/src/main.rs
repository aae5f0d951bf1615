use crate::args::Args;
use crate::sources::collect_sources;
use clap::Parser;
use ktpp_diagnostics::{CombinedLogger, Diagnostics, Severity, TracingLogger, WriterLogger};
use ktpp_parsing::{lex_source, parse_source};
use ktpp_tokens::{FileId, Spanned};
use owo_colors::{OwoColorize, Stream};
use std::io::{stdin, stdout, BufRead, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::metadata::LevelFilter;
use tracing::{debug, info, trace, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

mod args;
mod sources;

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.logging().log_level_filter())?;
    trace!("starting ktppc with args: {args:?}");
    debug!("ktppc version: {}", env!("CARGO_PKG_VERSION"));

    let colors = !args.no_color && std::io::stderr().is_terminal();
    if args.no_color {
        owo_colors::set_override(false);
    }
    let mut logger = CombinedLogger::default();
    logger.push(WriterLogger::stderr(args.logging().min_severity(), colors));
    if args.logging().trace_diagnostics() {
        logger.push(TracingLogger);
    }
    let mut driver = Driver {
        diagnostics: Diagnostics::new(logger),
        tokens: args.tokens,
        failed: 0,
    };

    if args.paths.is_empty() {
        info!("reading source from standard input");
        driver.run_lines(stdin().lock())?;
    } else {
        let files = collect_sources(&args.paths, &args.extension)?;
        debug!("paths to parse: {files:#?}");
        for file in files {
            driver.run_file(&file)?;
        }
    }

    if driver.failed > 0 {
        let summary = format!("{} source(s) had errors", driver.failed);
        eprintln!(
            "{}",
            summary.if_supports_color(Stream::Stderr, |text| text.red())
        );
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Lexes or parses each unit of source text, printing what was found
struct Driver {
    diagnostics: Diagnostics,
    tokens: bool,
    failed: usize,
}

impl Driver {
    /// Runs each line of `input` as its own source, named `stdin:<line>`
    fn run_lines(&mut self, mut input: impl BufRead) -> eyre::Result<()> {
        let mut line = vec![];
        let mut index = 0;
        loop {
            line.clear();
            if input.read_until(b'\n', &mut line)? == 0 {
                return Ok(());
            }
            index += 1;
            if line.last() == Some(&b'\n') {
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
            }
            self.run(format!("stdin:{index}"), decode(&line))?;
        }
    }

    /// Runs a whole file. A file that can't be read is reported and counted as failed.
    fn run_file(&mut self, file: &Path) -> eyre::Result<()> {
        match std::fs::read(file) {
            Ok(bytes) => self.run(file, decode(&bytes)),
            Err(error) => {
                self.diagnostics.log_sourced(
                    Severity::Error,
                    "driver",
                    format!("could not read {}: {error}", file.display()),
                );
                self.failed += 1;
                Ok(())
            }
        }
    }

    fn run(&mut self, path: impl Into<FileId>, text: String) -> eyre::Result<()> {
        let path = path.into();
        let mut out = stdout().lock();
        if self.tokens {
            let stream = lex_source(&mut self.diagnostics, path.clone(), text);
            if stream.had_error {
                self.failed += 1;
                return Ok(());
            }
            for token in stream.without_eof() {
                writeln!(out, "{}\t{}\t{}", token.span(), token.kind(), token)?;
            }
        } else {
            let output = parse_source(&mut self.diagnostics, path.clone(), text);
            if output.had_error {
                self.failed += 1;
                return Ok(());
            }
            for stmt in &output.statements {
                writeln!(out, "{}\t{}", stmt.span(), stmt.kind_name())?;
            }
        }
        trace!("finished {path}");
        Ok(())
    }
}

/// Decodes source bytes. Malformed UTF-8 becomes U+FFFD, which the lexer rejects as an
/// unexpected character.
fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(error) => {
            warn!(
                "source is not valid UTF-8 after byte {}",
                error.valid_up_to()
            );
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ktpp_diagnostics::{RecordingLogger, Severity};
    use std::fs;
    use std::io::Cursor;
    use std::sync::Arc;
    use tempfile::TempDir;
    use test_log::test;

    fn driver(tokens: bool) -> (Driver, Arc<RecordingLogger>) {
        let logger = Arc::new(RecordingLogger::new());
        let driver = Driver {
            diagnostics: Diagnostics::with_shared(logger.clone()),
            tokens,
            failed: 0,
        };
        (driver, logger)
    }

    #[test]
    fn counts_failed_units() {
        let (mut driver, logger) = driver(false);
        driver.run("stdin:1", "var x = 1".to_string()).unwrap();
        driver.run("stdin:2", "var = 1".to_string()).unwrap();
        driver.run("stdin:3", "\"open".to_string()).unwrap();
        assert_eq!(driver.failed, 2);
        assert_eq!(logger.with_severity(Severity::Error).len(), 2);
    }

    #[test]
    fn each_line_is_its_own_source() {
        let (mut driver, logger) = driver(true);
        driver.run("stdin:1", "a b".to_string()).unwrap();
        driver.run("stdin:2", "@".to_string()).unwrap();
        assert_eq!(driver.failed, 1);
        let errors = logger.with_severity(Severity::Error);
        assert_eq!(errors[0].message, "@\n^\n[stdin:2:1:0] Unexpected character '@'");
    }

    #[test]
    fn malformed_line_does_not_stop_the_rest() {
        let (mut driver, logger) = driver(false);
        driver
            .run_lines(Cursor::new(b"var a = 1\r\nvar b = \xff\nvar c = 3\n".to_vec()))
            .unwrap();
        assert_eq!(driver.failed, 1);
        let errors = logger.with_severity(Severity::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].source.as_deref(), Some("lexer"));
        assert!(errors[0]
            .message
            .ends_with("[stdin:2:1:8] Unexpected character '\u{FFFD}'"));
    }

    #[test]
    fn malformed_file_does_not_stop_the_rest() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.ktpp"), "var a = 1").unwrap();
        fs::write(dir.path().join("b.ktpp"), b"var b = \xff").unwrap();
        fs::write(dir.path().join("c.ktpp"), "var c = @").unwrap();

        let (mut driver, logger) = driver(false);
        for file in collect_sources(&[dir.path()], "ktpp").unwrap() {
            driver.run_file(&file).unwrap();
        }
        assert_eq!(driver.failed, 2);
        let errors = logger.with_severity(Severity::Error);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("Unexpected character '\u{FFFD}'"));
        assert!(errors[1].message.contains("Unexpected character '@'"));
    }

    #[test]
    fn unreadable_file_is_counted() {
        let dir = TempDir::new().unwrap();
        let (mut driver, logger) = driver(false);
        driver.run_file(&dir.path().join("missing.ktpp")).unwrap();
        assert_eq!(driver.failed, 1);
        assert_eq!(
            logger.with_severity(Severity::Error)[0].source.as_deref(),
            Some("driver")
        );
    }
}
