//! Responsible for converting the source text of one file into a token stream

use crate::lexer::token_parsing::identifier_len;
use ktpp_diagnostics::{Diagnostics, Severity};
use ktpp_tokens::{tables, FileId, LiteralKind, LiteralValue, TextSpan, Token, TokenKind};
use thiserror::Error;
use tracing::{debug, trace};

mod number;
mod token_parsing;

/// The tag lexer diagnostics are reported under
pub const LEXER_SOURCE: &str = "lexer";

/// Scans the source text of a single file into [`Token`]s.
///
/// The lexer is an iterator of tokens. It does not produce the end of file token itself; use
/// [`Lexer::tokenize`] to get a complete [`TokenStream`]. Every lexical error is reported to the
/// diagnostics before it is returned, and the lexer yields nothing after its first error.
#[derive(Debug)]
pub struct Lexer<'a> {
    file: FileId,
    source: &'a str,
    diagnostics: &'a Diagnostics,
    line: u32,
    line_start: usize,
    start: usize,
    start_line: u32,
    start_line_start: usize,
    current: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over the source text of a file
    pub fn new(file: impl Into<FileId>, source: &'a str, diagnostics: &'a Diagnostics) -> Self {
        Self {
            file: file.into(),
            source,
            diagnostics,
            line: 1,
            line_start: 0,
            start: 0,
            start_line: 1,
            start_line_start: 0,
            current: 0,
            failed: false,
        }
    }

    /// Scans the whole source. The returned stream always ends with exactly one end of file token.
    pub fn tokenize(mut self) -> TokenStream {
        let mut tokens = vec![];
        while let Some(token) = self.next() {
            match token {
                Ok(token) => tokens.push(token),
                Err(e) => {
                    debug!("lexing {} stopped: {e}", self.file);
                    break;
                }
            }
        }
        let end = TextSpan::new(
            self.file.clone(),
            self.line,
            self.line_start,
            self.current,
            self.current,
        );
        tokens.push(Token::eof(end));
        TokenStream {
            tokens,
            had_error: self.failed,
        }
    }

    fn next_token(&mut self) -> LexResult<Option<Token>> {
        loop {
            let Some(c) = self.peek() else {
                return Ok(None);
            };
            if c.is_whitespace() {
                self.advance();
                continue;
            }

            self.start = self.current;
            self.start_line = self.line;
            self.start_line_start = self.line_start;

            if let Some(kind) = self.symbol() {
                return Ok(Some(self.make_token(kind, None)));
            }
            return match c {
                '"' => self.string().map(Some),
                c if c.is_ascii_alphabetic() || c == '_' => Ok(Some(self.identifier())),
                c if c.is_ascii_digit() => self.number().map(Some),
                c => {
                    self.advance();
                    Err(LexingError::UnexpectedChar(c))
                }
            };
        }
    }

    /// Matches the longest operator or punctuation lexeme at the current position
    fn symbol(&mut self) -> Option<TokenKind> {
        let rest = self.rest();
        let mut longest = None;
        for (idx, c) in rest.char_indices() {
            let candidate = &rest[..idx + c.len_utf8()];
            if !tables::is_symbol_prefix(candidate) {
                break;
            }
            if let Some(kind) = tables::lookup_symbol(candidate) {
                longest = Some((kind, candidate.len()));
            }
        }
        let (kind, len) = longest?;
        self.current += len;
        Some(kind)
    }

    fn identifier(&mut self) -> Token {
        let len = identifier_len(self.rest()).unwrap_or(1);
        self.current += len;
        let word = self.lexeme();
        match tables::keyword(word) {
            Some(keyword) => self.make_token(keyword.into(), None),
            None => {
                let literal = LiteralValue::Str(word.to_string());
                self.make_token(LiteralKind::Identifier.into(), literal)
            }
        }
    }

    /// Scans a string literal. The contents are kept verbatim, and an escaped quote does not
    /// end the string.
    fn string(&mut self) -> LexResult<Token> {
        self.advance();
        let contents_start = self.current;
        loop {
            match self.advance() {
                None => return Err(LexingError::UnterminatedString),
                Some('"') => break,
                Some('\\') => {
                    self.advance();
                }
                Some(_) => {}
            }
        }
        let contents = self.source[contents_start..self.current - 1].to_string();
        Ok(self.make_token(LiteralKind::String.into(), LiteralValue::Str(contents)))
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.line_start = self.current;
        }
        Some(c)
    }

    fn rest(&self) -> &'a str {
        &self.source[self.current..]
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    /// The span of the token currently being scanned
    fn span(&self) -> TextSpan {
        TextSpan::new(
            self.file.clone(),
            self.start_line,
            self.start_line_start,
            self.start,
            self.current,
        )
    }

    fn make_token(&self, kind: TokenKind, literal: impl Into<Option<LiteralValue>>) -> Token {
        Token::new(kind, self.lexeme(), self.span(), literal)
    }

    fn report(&self, severity: Severity, message: impl AsRef<str>) {
        self.diagnostics
            .emit_sourced(severity, LEXER_SOURCE, message, &self.span());
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => {
                trace!("lexed {token:?}");
                Some(Ok(token))
            }
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                self.report(Severity::Error, e.to_string());
                Some(Err(e))
            }
        }
    }
}

/// The tokens of a whole file
#[derive(Debug, Clone)]
pub struct TokenStream {
    /// Every token scanned before the first error, followed by the end of file token
    pub tokens: Vec<Token>,
    /// Whether scanning stopped early because of a lexical error
    pub had_error: bool,
}

impl TokenStream {
    /// The tokens without the trailing end of file token
    pub fn without_eof(&self) -> &[Token] {
        match self.tokens.split_last() {
            Some((last, rest)) if last.is_eof() => rest,
            _ => &self.tokens,
        }
    }
}

pub type LexResult<T> = Result<T, LexingError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexingError {
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Invalid float literal")]
    InvalidFloat,
    #[error("Invalid number literal with multiple negatives")]
    MultipleNegatives,
    #[error("Invalid number literal")]
    InvalidNumber,
    #[error("Integer literal is too large")]
    IntegerOverflow,
    #[error("Unexpected character '{}'", .0.escape_debug())]
    UnexpectedChar(char),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ktpp_diagnostics::RecordingLogger;
    use ktpp_tokens::{KeywordKind, OperatorKind, OtherKind};
    use std::sync::Arc;
    use test_log::test;

    fn lex(src: &str) -> (TokenStream, Arc<RecordingLogger>) {
        let logger = Arc::new(RecordingLogger::new());
        let mut diagnostics = Diagnostics::with_shared(logger.clone());
        diagnostics.add_source("test.ktpp", src);
        let stream = Lexer::new("test.ktpp", src, &diagnostics).tokenize();
        (stream, logger)
    }

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).0.tokens.iter().map(Token::kind).collect()
    }

    #[test]
    fn test_lexer() {
        let (stream, _) = lex("var mut x: int = 10\nx += 2");
        assert!(!stream.had_error);
        let lexemes = stream
            .tokens
            .iter()
            .map(|t| t.lexeme().to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            lexemes,
            ["var", "mut", "x", ":", "int", "=", "10", "x", "+=", "2", ""]
        );
    }

    #[test]
    fn arrow_is_one_token() {
        assert_eq!(
            kinds("a->b"),
            [
                TokenKind::IDENTIFIER,
                OtherKind::Arrow.into(),
                TokenKind::IDENTIFIER,
                TokenKind::EOF
            ]
        );
    }

    #[test]
    fn longest_match_backs_off() {
        assert_eq!(
            kinds("**=*"),
            [
                OperatorKind::PowerEq.into(),
                OperatorKind::Star.into(),
                TokenKind::EOF
            ]
        );
        assert_eq!(
            kinds("<<<"),
            [
                OperatorKind::Lsh.into(),
                OperatorKind::Less.into(),
                TokenKind::EOF
            ]
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("while whilst"),
            [
                KeywordKind::While.into(),
                TokenKind::IDENTIFIER,
                TokenKind::EOF
            ]
        );
    }

    #[test]
    fn spans_track_lines() {
        let (stream, _) = lex("a\n  bc");
        let bc = &stream.tokens[1];
        let span = ktpp_tokens::Spanned::span(bc);
        assert_eq!(span.line(), 2);
        assert_eq!(span.column(), 2);
        assert_eq!(span.len(), 2);
    }

    #[test]
    fn string_keeps_escapes_verbatim() {
        let (stream, _) = lex(r#""say \"hi\"\n""#);
        assert_eq!(
            stream.tokens[0].literal(),
            Some(&LiteralValue::Str(r#"say \"hi\"\n"#.to_string()))
        );
    }

    #[test]
    fn multiline_string_starts_on_first_line() {
        let (stream, _) = lex("\"a\nb\" c");
        let string = ktpp_tokens::Spanned::span(&stream.tokens[0]);
        assert_eq!(string.line(), 1);
        let c = ktpp_tokens::Spanned::span(&stream.tokens[1]);
        assert_eq!(c.line(), 2);
        assert_eq!(c.column(), 3);
    }

    #[test]
    fn unexpected_character_stops_lexing() {
        let (stream, logger) = lex("a @ b");
        assert!(stream.had_error);
        assert_eq!(stream.tokens.len(), 2);
        assert!(stream.tokens[1].is_eof());
        let errors = logger.with_severity(Severity::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.ends_with("Unexpected character '@'"));
        assert_eq!(errors[0].source.as_deref(), Some(LEXER_SOURCE));
    }

    #[test]
    fn empty_source_is_just_eof() {
        let (stream, _) = lex("  \n\t ");
        assert_eq!(stream.tokens.len(), 1);
        assert!(stream.without_eof().is_empty());
    }
}
