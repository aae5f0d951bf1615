//! Expressions

use crate::span_between;
use crate::types::{GenericArgs, GenericParameters, Param, Type};
use ktpp_tokens::{OperatorKind, Spanned, TextSpan, Token};

/// An expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Constant),
    Binary(ExprBinary),
    Unary(ExprUnary),
    Postfix(ExprPostfix),
    Grouping(GroupingExpr),
    Variable(Token),
    Assign(AssignExpr),
    Call(CallExpr),
    Get(GetExpr),
    Set(SetExpr),
    Ternary(TernaryExpr),
    This(Token),
    Array(ArrayExpr),
    Index(IndexExpr),
    Lambda(LambdaExpr),
}

impl Spanned for Expr {
    fn span(&self) -> TextSpan {
        match self {
            Expr::Literal(c) => c.token.span(),
            Expr::Binary(b) => span_between(b.left.as_ref(), b.right.as_ref()),
            Expr::Unary(u) => span_between(&u.op, u.operand.as_ref()),
            Expr::Postfix(p) => span_between(p.operand.as_ref(), &p.op),
            Expr::Grouping(g) => span_between(&g.lparen, &g.rparen),
            Expr::Variable(name) => name.span(),
            Expr::Assign(a) => span_between(&a.target, a.value.as_ref()),
            Expr::Call(c) => span_between(c.callee.as_ref(), &c.paren),
            Expr::Get(g) => span_between(g.object.as_ref(), &g.member),
            Expr::Set(s) => span_between(s.object.as_ref(), s.value.as_ref()),
            Expr::Ternary(t) => span_between(t.condition.as_ref(), t.otherwise.as_ref()),
            Expr::This(keyword) => keyword.span(),
            Expr::Array(a) => span_between(&a.bracket, &a.close),
            Expr::Index(i) => span_between(i.array.as_ref(), &i.bracket),
            Expr::Lambda(l) => span_between(&l.keyword, l.body.as_ref()),
        }
    }
}

/// A literal value
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub kind: ConstantKind,
    /// The token the value came from
    pub token: Token,
}

/// The value of a [`Constant`]
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantKind {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
}

/// `left op right`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinary {
    pub left: Box<Expr>,
    pub op: Token,
    pub right: Box<Expr>,
}

impl ExprBinary {
    pub fn new(left: Expr, op: Token, right: Expr) -> Self {
        Self {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

/// A prefix operation, `-x` or `++x`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprUnary {
    pub op: Token,
    pub operand: Box<Expr>,
}

/// A postfix operation, `x++` or `x--`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprPostfix {
    pub operand: Box<Expr>,
    pub op: Token,
}

/// A parenthesized expression
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingExpr {
    pub lparen: Token,
    pub inner: Box<Expr>,
    pub rparen: Token,
}

/// Assigns to a variable.
///
/// A compound assignment `x += v` is stored with `compound_op` set to `+` and `value` holding
/// the desugared `x + v`.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub target: Token,
    pub compound_op: Option<OperatorKind>,
    pub value: Box<Expr>,
}

/// A call, `callee<generics>(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    /// The closing `)`
    pub paren: Token,
    pub args: Vec<Expr>,
    pub generics: Option<GenericArgs>,
}

/// Reads a member, `object.member`
#[derive(Debug, Clone, PartialEq)]
pub struct GetExpr {
    pub object: Box<Expr>,
    pub member: Token,
}

/// Assigns to a member, `object.member = value`. Compound assignments are desugared the same
/// way as in [`AssignExpr`].
#[derive(Debug, Clone, PartialEq)]
pub struct SetExpr {
    pub object: Box<Expr>,
    pub member: Token,
    pub compound_op: Option<OperatorKind>,
    pub value: Box<Expr>,
}

/// `condition ? then : otherwise`
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryExpr {
    pub condition: Box<Expr>,
    pub then: Box<Expr>,
    pub colon: Token,
    pub otherwise: Box<Expr>,
}

/// An array literal, `[a, b, c]`
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpr {
    /// The opening `[`
    pub bracket: Token,
    pub elements: Vec<Expr>,
    /// The closing `]`
    pub close: Token,
}

/// `array[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub array: Box<Expr>,
    pub index: Box<Expr>,
    /// The closing `]`
    pub bracket: Token,
}

/// An anonymous function, `fn<T>(x: T) -> T x`
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpr {
    pub keyword: Token,
    pub generics: Option<GenericParameters>,
    pub params: Vec<Param>,
    pub return_type: Option<Type>,
    pub body: Box<Expr>,
}

impl Expr {
    /// Checks if this expression can be assigned to
    pub fn is_lvalue(&self) -> bool {
        matches!(self, Expr::Variable(_) | Expr::Get(_))
    }
}
