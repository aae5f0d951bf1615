//! The abstract syntax tree of a ktpp program.
//!
//! Nodes own their children and are never modified once the parser has built them.

use ktpp_tokens::{Spanned, TextSpan};

pub mod expr;
pub mod stmt;
pub mod types;

pub use expr::*;
pub use stmt::*;
pub use types::*;

/// The span from the start of `first` to the end of `last`
pub(crate) fn span_between(first: &impl Spanned, last: &impl Spanned) -> TextSpan {
    let first = first.span();
    first.join(&last.span()).unwrap_or(first)
}
