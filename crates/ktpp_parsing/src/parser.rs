//! Recursive descent parser turning a [`TokenStream`] into statements

use crate::lexer::TokenStream;
use ktpp_ast::Stmt;
use ktpp_diagnostics::{Diagnostics, Severity};
use ktpp_tokens::{KeywordKind, OperatorKind, Spanned, TextSpan, Token, TokenKind};
use tracing::{debug, trace};

mod error;
mod expr;
mod stmt;
mod types;

pub use error::{ErrorKind, ParseError, ParseResult};

/// The tag parser diagnostics are reported under
pub const PARSER_SOURCE: &str = "parser";

/// Keywords that may start a declaration, where parsing resumes after an error
const SYNC_KEYWORDS: [KeywordKind; 8] = [
    KeywordKind::Class,
    KeywordKind::Fn,
    KeywordKind::Var,
    KeywordKind::For,
    KeywordKind::If,
    KeywordKind::Switch,
    KeywordKind::While,
    KeywordKind::Return,
];

/// Parses the tokens of a single file.
///
/// Syntax errors are reported to the diagnostics as they are found. After an error the parser
/// skips to the start of the next declaration and carries on, so [`Parser::parse`] always
/// returns every declaration that parsed successfully.
#[derive(Debug)]
pub struct Parser<'d> {
    tokens: Vec<Token>,
    current: usize,
    diagnostics: &'d Diagnostics,
    had_error: bool,
    /// Set when the token stream is incomplete, so errors caused by the missing tail aren't
    /// reported on top of the lexical error.
    quiet: bool,
    /// `>>` tokens split into two `>` tokens, with the original token
    splits: Vec<(usize, Token)>,
}

/// A saved parser position that speculative parsing can return to
#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    current: usize,
    splits: usize,
}

impl<'d> Parser<'d> {
    /// Creates a new parser
    pub fn new(stream: TokenStream, diagnostics: &'d Diagnostics) -> Self {
        let TokenStream {
            mut tokens,
            had_error,
        } = stream;
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = match tokens.last() {
                Some(last) => last.span().end_span(),
                None => TextSpan::new("<empty>".into(), 1, 0, 0, 0),
            };
            tokens.push(Token::eof(end));
        }
        Self {
            tokens,
            current: 0,
            diagnostics,
            had_error,
            quiet: had_error,
            splits: vec![],
        }
    }

    /// Parses declarations until the end of the token stream
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = vec![];
        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                trace!("parsed {}", stmt.kind_name());
                statements.push(stmt);
            }
        }
        debug!(
            "parsed {} top level statements (errors: {})",
            statements.len(),
            self.had_error
        );
        statements
    }

    /// Checks if any error was found in the token stream
    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Parses one declaration, recovering from a syntax error by skipping to the start of the
    /// next declaration.
    pub(crate) fn declaration(&mut self) -> Option<Stmt> {
        match self.try_declaration() {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                self.report(&error);
                self.synchronize();
                None
            }
        }
    }

    /// Discards tokens until the next one can start a declaration
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if let TokenKind::Keyword(keyword) = self.peek().kind() {
                if SYNC_KEYWORDS.contains(&keyword) {
                    break;
                }
            }
            self.advance();
        }
        trace!("synchronized at {}", self.peek());
    }

    /// Reports an error without stopping the current declaration
    pub(crate) fn report(&mut self, error: &ParseError) {
        self.had_error = true;
        if self.quiet {
            trace!("suppressed {error} after lexical error");
            return;
        }
        self.diagnostics.emit_sourced(
            Severity::Error,
            PARSER_SOURCE,
            error.to_string(),
            &error.span,
        );
    }

    /// Creates an error at the current token
    pub(crate) fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.peek().clone())
    }

    pub(crate) fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    /// Looks ahead of the current token, stopping at the end of file token
    pub(crate) fn peek_at(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.current + offset).min(last)]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    /// Moves past the current token, returning it. Never moves past the end of file token.
    pub(crate) fn advance(&mut self) -> Token {
        if self.is_at_end() {
            return self.peek().clone();
        }
        self.current += 1;
        self.previous().clone()
    }

    pub(crate) fn check(&self, kind: impl Into<TokenKind>) -> bool {
        !self.is_at_end() && self.peek().kind() == kind.into()
    }

    pub(crate) fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|kind| self.check(*kind))
    }

    /// Advances past the current token if it is of the given kind
    pub(crate) fn match_token(&mut self, kind: impl Into<TokenKind>) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Advances past the current token if it is one of the given operators
    pub(crate) fn match_operator(&mut self, operators: &[OperatorKind]) -> Option<Token> {
        match self.peek().kind() {
            TokenKind::Operator(op) if operators.contains(&op) => Some(self.advance()),
            _ => None,
        }
    }

    /// Gets the current token if it is of the given kind, or fails with `message`
    pub(crate) fn consume(
        &mut self,
        kind: impl Into<TokenKind>,
        message: &'static str,
    ) -> ParseResult<Token> {
        self.match_token(kind)
            .ok_or_else(|| self.error(ErrorKind::Expected(message)))
    }

    /// Consumes a `>` closing a generic list. A `>>` is split so that its second half can close
    /// an enclosing list.
    pub(crate) fn match_closing_angle(&mut self) -> Option<Token> {
        if let Some(token) = self.match_token(OperatorKind::Greater) {
            return Some(token);
        }
        if !self.check(OperatorKind::Rsh) {
            return None;
        }
        let original = self.peek().clone();
        let span = original.span();
        let half = |start: usize| {
            let span = TextSpan::new(
                span.file().clone(),
                span.line(),
                span.line_start(),
                start,
                start + 1,
            );
            Token::new(OperatorKind::Greater.into(), ">", span, None)
        };
        self.tokens[self.current] = half(span.start());
        self.tokens.insert(self.current + 1, half(span.start() + 1));
        self.splits.push((self.current, original));
        trace!("split '>>' at {}", span);
        Some(self.advance())
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            current: self.current,
            splits: self.splits.len(),
        }
    }

    /// Returns to a checkpoint, undoing any `>>` splits made since it was taken
    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        while self.splits.len() > checkpoint.splits {
            if let Some((index, original)) = self.splits.pop() {
                self.tokens.remove(index + 1);
                self.tokens[index] = original;
            }
        }
        self.current = checkpoint.current;
    }
}
