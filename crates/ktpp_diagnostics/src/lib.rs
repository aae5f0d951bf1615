//! Diagnostics for ktpp source files.
//!
//! [`Diagnostics`] keeps the text of each registered file so that messages about a
//! [`TextSpan`](ktpp_tokens::TextSpan) can show the offending source line. Rendered messages
//! are handed to a [`Logger`].

pub mod diagnostics;
pub mod logger;
pub mod severity;

pub use diagnostics::Diagnostics;
pub use logger::{
    CombinedLogger, Logger, PrefixedLogger, Record, RecordingLogger, TracingLogger, WriterLogger,
};
pub use severity::Severity;
