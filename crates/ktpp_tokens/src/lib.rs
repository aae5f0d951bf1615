//! Tokens and source spans for ktpp source files.
//!
//! Tokens are produced once by the lexer and never modified afterwards. Every token carries a
//! [`TextSpan`](spanned::TextSpan) which the diagnostics use to point back into the source text.

pub mod spanned;
pub mod tables;
pub mod token;

pub use spanned::{FileId, Spanned, TextSpan};
pub use token::{KeywordKind, LiteralKind, LiteralValue, OperatorKind, OtherKind, Token, TokenKind};
