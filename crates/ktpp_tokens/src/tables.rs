//! Lookup tables for symbols and keywords

use crate::token::{KeywordKind, OperatorKind, OtherKind, TokenKind};
use itertools::Itertools;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::LazyLock;
use strum::IntoEnumIterator;

static SYMBOLS: LazyLock<HashMap<&'static str, TokenKind>> = LazyLock::new(|| {
    OperatorKind::iter()
        .map(TokenKind::Operator)
        .chain(
            OtherKind::iter()
                .filter(OtherKind::is_punctuation)
                .map(TokenKind::Other),
        )
        .filter_map(|kind| kind.lexeme().map(|lexeme| (lexeme, kind)))
        .collect()
});

static PREFIXES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    SYMBOLS
        .keys()
        .flat_map(|symbol| (1..=symbol.len()).map(move |len| &symbol[..len]))
        .collect()
});

/// Gets the operator or punctuation kind whose lexeme is exactly `symbol`
pub fn lookup_symbol(symbol: &str) -> Option<TokenKind> {
    SYMBOLS.get(symbol).copied()
}

/// Checks if `text` is the start of at least one symbol lexeme
pub fn is_symbol_prefix(text: &str) -> bool {
    PREFIXES.contains(text)
}

/// Gets the keyword for an identifier-like word, if it is reserved
pub fn keyword(word: &str) -> Option<KeywordKind> {
    KeywordKind::from_str(word).ok()
}

/// All symbol lexemes, longest first
pub fn symbols() -> impl Iterator<Item = (&'static str, TokenKind)> {
    SYMBOLS
        .iter()
        .map(|(s, k)| (*s, *k))
        .sorted_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then(a.cmp(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_operators() {
        assert_eq!(lookup_symbol("**="), Some(OperatorKind::PowerEq.into()));
        assert_eq!(lookup_symbol("->"), Some(OtherKind::Arrow.into()));
        assert_eq!(lookup_symbol("<eof>"), None);
        assert_eq!(lookup_symbol("@"), None);
    }

    #[test]
    fn prefixes_cover_partial_symbols() {
        assert!(is_symbol_prefix("*"));
        assert!(is_symbol_prefix("**"));
        assert!(is_symbol_prefix("<<"));
        assert!(!is_symbol_prefix("=>"));
        assert!(!is_symbol_prefix("<e"));
    }

    #[test]
    fn keywords() {
        assert_eq!(keyword("fn"), Some(KeywordKind::Fn));
        assert_eq!(keyword("continue"), Some(KeywordKind::Continue));
        assert_eq!(keyword("const"), None);
        assert_eq!(keyword("function"), None);
    }

    #[test]
    fn symbols_longest_first() {
        let lens = symbols().map(|(s, _)| s.len()).collect::<Vec<_>>();
        assert_eq!(lens.first(), Some(&3));
        assert!(lens.windows(2).all(|w| w[0] >= w[1]));
    }
}
