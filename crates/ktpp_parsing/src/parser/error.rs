use ktpp_tokens::{Spanned, TextSpan, Token};
use thiserror::Error;

/// Represents an error occurring during parsing
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ErrorKind,
    /// The token the parser was looking at
    pub token: Token,
    /// Where the error is reported. Usually the span of `token`.
    pub span: TextSpan,
}

impl ParseError {
    /// Creates a new error at a token
    pub fn new(kind: ErrorKind, token: Token) -> Self {
        let span = token.span();
        Self { kind, token, span }
    }

    /// Points this error at some other part of the source
    pub fn with_span(mut self, span: TextSpan) -> Self {
        self.span = span;
        self
    }
}

/// [ParseError] kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("{0}")]
    Expected(&'static str),
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Invalid assignment target.")]
    InvalidAssignmentTarget,
    #[error("Comparison operators can't be chained.")]
    ChainedComparison,
    #[error("Default case already exists.")]
    DuplicateDefaultCase,
    #[error("{reason}")]
    IllegalStatement { reason: String },
}

impl ErrorKind {
    pub fn illegal_statement(reason: impl AsRef<str>) -> Self {
        Self::IllegalStatement {
            reason: reason.as_ref().to_string(),
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
