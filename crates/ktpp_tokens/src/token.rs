//! A lexical token from a source file

use crate::spanned::{Spanned, TextSpan};
use std::fmt::{Debug, Display, Formatter};
use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

/// A lexical token from a source file
#[derive(Clone)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    span: TextSpan,
    literal: Option<LiteralValue>,
}

impl Token {
    /// Creates a new token
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        span: TextSpan,
        literal: impl Into<Option<LiteralValue>>,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
            literal: literal.into(),
        }
    }

    /// Creates the end of file token at a given position
    pub fn eof(span: TextSpan) -> Self {
        Self::new(TokenKind::Other(OtherKind::Eof), "", span, None)
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The source text this token was scanned from
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// The literal value of literal tokens
    pub fn literal(&self) -> Option<&LiteralValue> {
        self.literal.as_ref()
    }

    /// Checks if this is the end of file token
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Other(OtherKind::Eof)
    }

    /// Creates a copy of this token with a different kind and lexeme but the same location.
    pub fn with_kind(&self, kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Self::new(kind, lexeme, self.span.clone(), None)
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{:?}({:?})", self.kind, literal),
            None => write!(f, "{:?}({:?})", self.kind, self.lexeme),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_eof() {
            write!(f, "end of file")
        } else {
            write!(f, "'{}'", self.lexeme)
        }
    }
}

impl Spanned for Token {
    fn span(&self) -> TextSpan {
        self.span.clone()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.lexeme == other.lexeme && self.literal == other.literal
    }
}

/// The value a literal token was scanned to. The type is always known at lex time.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LiteralValue::Int(i) => write!(f, "{i}"),
            LiteralValue::Float(v) => write!(f, "{v:?}"),
            LiteralValue::Str(s) => f.write_str(s),
        }
    }
}

/// The kind for a token, one of four disjoint families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Operator(OperatorKind),
    Keyword(KeywordKind),
    Literal(LiteralKind),
    Other(OtherKind),
}

impl TokenKind {
    pub const EOF: TokenKind = TokenKind::Other(OtherKind::Eof);
    pub const IDENTIFIER: TokenKind = TokenKind::Literal(LiteralKind::Identifier);

    /// The fixed source text of this kind, if there is one.
    pub fn lexeme(&self) -> Option<&'static str> {
        match self {
            TokenKind::Operator(op) => Some(op.into()),
            TokenKind::Keyword(kw) => Some(kw.into()),
            TokenKind::Other(OtherKind::Eof | OtherKind::Bad) => None,
            TokenKind::Other(other) => Some(other.into()),
            TokenKind::Literal(_) => None,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Literal(literal) => write!(f, "{literal}"),
            TokenKind::Other(OtherKind::Eof) => write!(f, "end of file"),
            TokenKind::Other(OtherKind::Bad) => write!(f, "bad token"),
            other => write!(f, "'{}'", other.lexeme().unwrap_or_default()),
        }
    }
}

impl From<OperatorKind> for TokenKind {
    fn from(value: OperatorKind) -> Self {
        TokenKind::Operator(value)
    }
}

impl From<KeywordKind> for TokenKind {
    fn from(value: KeywordKind) -> Self {
        TokenKind::Keyword(value)
    }
}

impl From<LiteralKind> for TokenKind {
    fn from(value: LiteralKind) -> Self {
        TokenKind::Literal(value)
    }
}

impl From<OtherKind> for TokenKind {
    fn from(value: OtherKind) -> Self {
        TokenKind::Other(value)
    }
}

/// Arithmetic, bitwise, relational, logical and assignment operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, IntoStaticStr)]
pub enum OperatorKind {
    // arithmetic
    #[strum(serialize = "**")]
    Power,
    #[strum(serialize = "++")]
    Increment,
    #[strum(serialize = "--")]
    Decrement,
    #[strum(serialize = "*")]
    Star,
    #[strum(serialize = "/")]
    Slash,
    #[strum(serialize = "%")]
    Mod,
    #[strum(serialize = "-")]
    Minus,
    #[strum(serialize = "+")]
    Plus,

    // shifts
    #[strum(serialize = ">>")]
    Rsh,
    #[strum(serialize = "<<")]
    Lsh,

    // relational
    #[strum(serialize = ">")]
    Greater,
    #[strum(serialize = ">=")]
    GreaterEq,
    #[strum(serialize = "<")]
    Less,
    #[strum(serialize = "<=")]
    LessEq,
    #[strum(serialize = "==")]
    EqEq,
    #[strum(serialize = "!=")]
    NotEq,

    // bitwise
    #[strum(serialize = "&")]
    And,
    #[strum(serialize = "^")]
    Xor,
    #[strum(serialize = "|")]
    Or,

    // logical
    #[strum(serialize = "||")]
    LogicOr,
    #[strum(serialize = "&&")]
    LogicAnd,

    // assignment
    #[strum(serialize = "=")]
    Equals,
    #[strum(serialize = "+=")]
    PlusEq,
    #[strum(serialize = "-=")]
    MinusEq,
    #[strum(serialize = "*=")]
    StarEq,
    #[strum(serialize = "/=")]
    SlashEq,
    #[strum(serialize = "**=")]
    PowerEq,
    #[strum(serialize = "%=")]
    ModEq,
    #[strum(serialize = "^=")]
    XorEq,
    #[strum(serialize = "|=")]
    OrEq,
    #[strum(serialize = "&=")]
    AndEq,
    #[strum(serialize = "<<=")]
    LshEq,
    #[strum(serialize = ">>=")]
    RshEq,

    // strictly unary
    #[strum(serialize = "~")]
    Inv,
    #[strum(serialize = "!")]
    Bang,
}

impl OperatorKind {
    /// Checks if this is `=` or one of the compound assignment operators
    pub fn is_assignment(&self) -> bool {
        *self == OperatorKind::Equals || self.compound_base().is_some()
    }

    /// For a compound assignment operator `X=`, gets the binary operator `X`.
    pub fn compound_base(&self) -> Option<OperatorKind> {
        use OperatorKind::*;
        Some(match self {
            PlusEq => Plus,
            MinusEq => Minus,
            StarEq => Star,
            SlashEq => Slash,
            PowerEq => Power,
            ModEq => Mod,
            XorEq => Xor,
            OrEq => Or,
            AndEq => And,
            LshEq => Lsh,
            RshEq => Rsh,
            _ => return None,
        })
    }
}

impl Display for OperatorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Reserved words
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum KeywordKind {
    Var,
    Mut,
    For,
    While,
    Do,
    If,
    Else,
    Fn,
    Class,
    Interface,
    True,
    False,
    Type,
    Switch,
    Async,
    Await,
    Return,
    Break,
    Continue,
    This,
}

impl Display for KeywordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Tokens that carry a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum LiteralKind {
    Int,
    Float,
    Bool,
    String,
    Identifier,
}

impl Display for LiteralKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LiteralKind::Int => "integer literal",
            LiteralKind::Float => "float literal",
            LiteralKind::Bool => "boolean literal",
            LiteralKind::String => "string literal",
            LiteralKind::Identifier => "identifier",
        };
        f.write_str(name)
    }
}

/// Punctuation, plus the end of file marker.
///
/// [`OtherKind::Bad`] is only used inside the lexer; a well formed token stream never contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, IntoStaticStr)]
pub enum OtherKind {
    #[strum(serialize = ".")]
    Dot,
    #[strum(serialize = ":")]
    Colon,
    #[strum(serialize = ";")]
    Semicolon,
    #[strum(serialize = "?")]
    QuestionMark,
    #[strum(serialize = "->")]
    Arrow,
    #[strum(serialize = ",")]
    Comma,
    #[strum(serialize = "(")]
    LParen,
    #[strum(serialize = ")")]
    RParen,
    #[strum(serialize = "[")]
    LBracket,
    #[strum(serialize = "]")]
    RBracket,
    #[strum(serialize = "{")]
    LBrace,
    #[strum(serialize = "}")]
    RBrace,
    #[strum(serialize = "<eof>")]
    Eof,
    #[strum(serialize = "<bad>")]
    Bad,
}

impl OtherKind {
    /// Checks if this kind is scanned from source text
    pub fn is_punctuation(&self) -> bool {
        !matches!(self, OtherKind::Eof | OtherKind::Bad)
    }
}
