//! the args for running ktppc

use clap::{value_parser, ArgAction};
use ktpp_diagnostics::Severity;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Lexes and parses ktpp source code")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// Source files or directories to parse. Reads standard input line by line if none are given.
    #[clap(value_name = "path", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,
    /// Print the tokens of each source instead of its statements
    #[clap(long)]
    pub tokens: bool,
    /// Never color diagnostics
    #[clap(long)]
    pub no_color: bool,
    /// The extension of source files found when walking directories
    #[clap(long, default_value = "ktpp")]
    pub extension: String,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }
}

/// Common way to set logging levels
#[derive(Debug, Clone, Copy, clap::Args)]
pub struct LoggingArgs {
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action=ArgAction::Count, conflicts_with="quiet")]
    verbose: u8,
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action=ArgAction::Count, conflicts_with="verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used,
    pub fn log_level_filter(&self) -> LevelFilter {
        match self.verbose as i8 - self.quiet as i8 {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            2..=i8::MAX => LevelFilter::TRACE,
        }
    }

    /// The lowest severity of diagnostics that gets printed
    pub fn min_severity(&self) -> Severity {
        if self.quiet > 0 {
            Severity::Error
        } else if self.verbose > 0 {
            Severity::Debug
        } else {
            Severity::Info
        }
    }

    /// Whether diagnostics should also be sent to the tracing subscriber
    pub fn trace_diagnostics(&self) -> bool {
        self.verbose > 1
    }
}
