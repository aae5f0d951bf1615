//! Statements and declarations

use crate::expr::Expr;
use crate::span_between;
use crate::types::{GenericParameters, Param, Type};
use ktpp_tokens::{Spanned, TextSpan, Token};
use strum::IntoStaticStr;

/// A statement or declaration
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
pub enum Stmt {
    Block(BlockStmt),
    Expression(Expr),
    If(IfStmt),
    Return(ReturnStmt),
    Var(VarStmt),
    While(WhileStmt),
    For(ForStmt),
    ForEach(ForEachStmt),
    Break(Token),
    Continue(Token),
    Function(FunctionStmt),
    Class(ClassStmt),
    Switch(SwitchStmt),
}

impl Stmt {
    /// The name of this kind of statement, like `Var` or `ForEach`
    pub fn kind_name(&self) -> &'static str {
        self.into()
    }
}

impl Spanned for Stmt {
    fn span(&self) -> TextSpan {
        match self {
            Stmt::Block(block) => block.span(),
            Stmt::Expression(expr) => expr.span(),
            Stmt::If(i) => match &i.otherwise {
                Some(otherwise) => span_between(&i.keyword, otherwise.as_ref()),
                None => span_between(&i.keyword, i.then.as_ref()),
            },
            Stmt::Return(r) => match &r.value {
                Some(value) => span_between(&r.keyword, value),
                None => r.keyword.span(),
            },
            Stmt::Var(var) => var.span(),
            Stmt::While(w) => span_between(&w.keyword, w.body.as_ref()),
            Stmt::For(f) => span_between(&f.keyword, f.body.as_ref()),
            Stmt::ForEach(f) => span_between(&f.keyword, f.body.as_ref()),
            Stmt::Break(keyword) | Stmt::Continue(keyword) => keyword.span(),
            Stmt::Function(func) => func.span(),
            Stmt::Class(class) => span_between(&class.keyword, &class.close),
            Stmt::Switch(switch) => span_between(&switch.keyword, &switch.close),
        }
    }
}

/// `{ statements }`
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub lbrace: Token,
    pub statements: Vec<Stmt>,
    pub rbrace: Token,
}

impl Spanned for BlockStmt {
    fn span(&self) -> TextSpan {
        span_between(&self.lbrace, &self.rbrace)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub keyword: Token,
    pub condition: Expr,
    pub then: Box<Stmt>,
    pub otherwise: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub keyword: Token,
    pub value: Option<Expr>,
}

/// A variable declaration, `var mut name: Type = initializer`
#[derive(Debug, Clone, PartialEq)]
pub struct VarStmt {
    pub keyword: Token,
    pub name: Token,
    pub mutable: bool,
    pub declared_type: Option<Type>,
    pub initializer: Option<Expr>,
}

impl Spanned for VarStmt {
    fn span(&self) -> TextSpan {
        match (&self.initializer, &self.declared_type) {
            (Some(init), _) => span_between(&self.keyword, init),
            (None, Some(ty)) => span_between(&self.keyword, ty),
            (None, None) => span_between(&self.keyword, &self.name),
        }
    }
}

/// `while` and `do while` loops
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub keyword: Token,
    pub condition: Expr,
    pub body: Box<Stmt>,
    pub is_do_while: bool,
}

/// A C-style `for init; condition; increment body` loop. When there is an increment, `body` is
/// a block of the written body followed by the increment.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub keyword: Token,
    pub init: Option<Box<Stmt>>,
    pub condition: Expr,
    pub increment: Option<Expr>,
    pub body: Box<Stmt>,
}

/// `for var binding : iterable body`
#[derive(Debug, Clone, PartialEq)]
pub struct ForEachStmt {
    pub keyword: Token,
    pub binding: VarStmt,
    pub colon: Token,
    pub iterable: Expr,
    pub body: Box<Stmt>,
}

/// A named function declaration
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStmt {
    pub keyword: Token,
    pub name: Token,
    pub generics: Option<GenericParameters>,
    pub params: Vec<Param>,
    pub return_type: Option<Type>,
    pub body: BlockStmt,
}

impl Spanned for FunctionStmt {
    fn span(&self) -> TextSpan {
        span_between(&self.keyword, &self.body)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassStmt {
    pub keyword: Token,
    pub name: Token,
    pub generics: Option<GenericParameters>,
    pub superclass: Option<Expr>,
    pub fields: Vec<VarStmt>,
    pub methods: Vec<FunctionStmt>,
    /// The closing `}` of the class body
    pub close: Token,
}

/// `switch subject { value -> { ... } _ -> { ... } }`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub keyword: Token,
    pub subject: Expr,
    pub cases: Vec<SwitchCase>,
    pub default: Option<BlockStmt>,
    pub close: Token,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub value: Expr,
    pub arrow: Token,
    pub body: BlockStmt,
}
