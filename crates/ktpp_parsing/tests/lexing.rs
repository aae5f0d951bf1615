use ktpp_diagnostics::{Diagnostics, RecordingLogger, Severity};
use ktpp_parsing::lex_source;
use ktpp_parsing::lexer::TokenStream;
use ktpp_tokens::{tables, KeywordKind, LiteralKind, LiteralValue, TokenKind};
use std::sync::Arc;
use strum::IntoEnumIterator;
use test_log::test;

fn lex(src: &str) -> (TokenStream, Arc<RecordingLogger>) {
    let logger = Arc::new(RecordingLogger::new());
    let mut diagnostics = Diagnostics::with_shared(logger.clone());
    let stream = lex_source(&mut diagnostics, "lexing.ktpp", src);
    (stream, logger)
}

#[test]
fn identifiers() {
    for ident in ["a", "_", "_private", "camelCase", "snake_case_2", "Z9", "whilst", "fnord"] {
        let (stream, _) = lex(ident);
        assert!(!stream.had_error);
        let [token] = stream.without_eof() else {
            panic!("{ident:?} is not a single token: {:?}", stream.tokens);
        };
        assert_eq!(token.kind(), TokenKind::IDENTIFIER);
        assert_eq!(token.lexeme(), ident);
        assert_eq!(token.literal(), Some(&LiteralValue::Str(ident.to_string())));
        assert!(stream.tokens.last().unwrap().is_eof());
    }
}

#[test]
fn keywords() {
    for keyword in KeywordKind::iter() {
        let word = keyword.as_ref();
        let (stream, _) = lex(word);
        let [token] = stream.without_eof() else {
            panic!("{word:?} is not a single token");
        };
        assert_eq!(token.kind(), keyword.into());
        assert_eq!(token.lexeme(), word);
        assert_eq!(token.literal(), None);
    }
}

#[test]
fn symbol_round_trip() {
    for (text, kind) in tables::symbols() {
        let (stream, _) = lex(text);
        assert!(!stream.had_error, "{text:?} failed to lex");
        let [token] = stream.without_eof() else {
            panic!("{text:?} is not a single token: {:?}", stream.tokens);
        };
        assert_eq!(token.kind(), kind, "{text:?}");
        assert_eq!(token.lexeme(), text);
    }
}

#[test]
fn strings() {
    let (stream, _) = lex("\"foo\"");
    assert_eq!(stream.tokens[0].kind(), LiteralKind::String.into());
    assert_eq!(
        stream.tokens[0].literal(),
        Some(&LiteralValue::Str("foo".to_string()))
    );

    let (stream, _) = lex("\"\"");
    assert_eq!(
        stream.tokens[0].literal(),
        Some(&LiteralValue::Str(String::new()))
    );
}

#[test]
fn unterminated_string() {
    let (stream, logger) = lex("\"unterminated");
    assert!(stream.had_error);
    assert!(stream.tokens.last().unwrap().is_eof());
    let errors = logger.with_severity(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("Unterminated string"));
}

#[test]
fn numbers() {
    let cases = [
        ("123", LiteralValue::Int(123)),
        ("1_234", LiteralValue::Int(1234)),
        ("1e10", LiteralValue::Int(10_000_000_000)),
        ("123.456", LiteralValue::Float(123.456)),
        ("123e-1", LiteralValue::Float(12.3)),
        ("1_234e-1_0", LiteralValue::Float(1234e-10)),
    ];
    for (src, expected) in cases {
        let (stream, logger) = lex(src);
        assert!(!stream.had_error, "{src:?} failed");
        assert!(logger.records().is_empty(), "{src:?} logged something");
        assert_eq!(stream.tokens[0].literal(), Some(&expected), "{src:?}");
    }
}

#[test]
fn power_of_zero() {
    let (stream, logger) = lex("1e0");
    assert!(!stream.had_error);
    assert_eq!(stream.tokens[0].literal(), Some(&LiteralValue::Int(1)));
    assert!(!logger.has_errors());
    let warnings = logger.with_severity(Severity::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("power of 0"));
}

#[test]
fn errors_are_highlighted() {
    let (_, logger) = lex("var s = \"oops");
    let errors = logger.with_severity(Severity::Error);
    assert_eq!(
        errors[0].message,
        "var s = \"oops\n        ^^^^^\n[lexing.ktpp:1:8] Unterminated string"
    );
}
