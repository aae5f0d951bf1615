#![doc = include_str!("../README.md")]

use crate::lexer::{Lexer, TokenStream};
use crate::parser::Parser;
use ktpp_ast::Stmt;
use ktpp_diagnostics::Diagnostics;
use ktpp_tokens::FileId;
use std::sync::Arc;
use tracing::{debug, instrument};

pub mod lexer;
pub mod parser;

/// The result of parsing a whole file
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    /// Every top level statement that parsed successfully, in source order
    pub statements: Vec<Stmt>,
    /// Whether any lexical or syntax error was reported
    pub had_error: bool,
}

/// Registers `text` as the source of `path` and scans it into tokens.
pub fn lex_source(
    diagnostics: &mut Diagnostics,
    path: impl Into<FileId>,
    text: impl Into<Arc<str>>,
) -> TokenStream {
    let path = path.into();
    let text = text.into();
    diagnostics.add_source(path.clone(), text.clone());
    Lexer::new(path, &text, diagnostics).tokenize()
}

/// Registers `text` as the source of `path`, then lexes and parses it.
///
/// Errors are reported through `diagnostics` as they are found. Parsing still runs after a
/// lexical error, over the tokens scanned before it.
#[instrument(skip_all)]
pub fn parse_source(
    diagnostics: &mut Diagnostics,
    path: impl Into<FileId>,
    text: impl Into<Arc<str>>,
) -> ParseOutput {
    let path = path.into();
    let stream = lex_source(diagnostics, path.clone(), text);
    let mut parser = Parser::new(stream, diagnostics);
    let statements = parser.parse();
    let had_error = parser.had_error();
    debug!("parsed {} statements from {path}", statements.len());
    ParseOutput {
        statements,
        had_error,
    }
}
