//! Expressions, from assignment down to primary expressions

use crate::parser::{ErrorKind, ParseError, ParseResult, Parser};
use ktpp_ast::{
    ArrayExpr, AssignExpr, CallExpr, Constant, ConstantKind, Expr, ExprBinary, ExprPostfix,
    ExprUnary, GenericArgs, GetExpr, GroupingExpr, IndexExpr, LambdaExpr, SetExpr, TernaryExpr,
};
use ktpp_tokens::{
    KeywordKind, LiteralKind, LiteralValue, OperatorKind, OtherKind, Spanned, Token, TokenKind,
};
use tracing::trace;

const EQUALITY: [OperatorKind; 2] = [OperatorKind::EqEq, OperatorKind::NotEq];
const RELATIONAL: [OperatorKind; 4] = [
    OperatorKind::Less,
    OperatorKind::LessEq,
    OperatorKind::Greater,
    OperatorKind::GreaterEq,
];
const SHIFT: [OperatorKind; 2] = [OperatorKind::Lsh, OperatorKind::Rsh];
const ADDITIVE: [OperatorKind; 2] = [OperatorKind::Plus, OperatorKind::Minus];
const MULTIPLICATIVE: [OperatorKind; 3] =
    [OperatorKind::Star, OperatorKind::Slash, OperatorKind::Mod];
const PREFIX: [OperatorKind; 5] = [
    OperatorKind::Bang,
    OperatorKind::Inv,
    OperatorKind::Minus,
    OperatorKind::Increment,
    OperatorKind::Decrement,
];
const POSTFIX: [OperatorKind; 2] = [OperatorKind::Increment, OperatorKind::Decrement];

impl Parser<'_> {
    pub(crate) fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    /// Checks if the current token can be the first token of an expression
    pub(crate) fn can_start_expression(&self) -> bool {
        match self.peek().kind() {
            TokenKind::Literal(_) => true,
            TokenKind::Keyword(keyword) => matches!(
                keyword,
                KeywordKind::True | KeywordKind::False | KeywordKind::This | KeywordKind::Fn
            ),
            TokenKind::Operator(op) => PREFIX.contains(&op),
            TokenKind::Other(other) => matches!(other, OtherKind::LParen | OtherKind::LBracket),
        }
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.ternary()?;

        let op_kind = match self.peek().kind() {
            TokenKind::Operator(op) if op.is_assignment() => op,
            _ => return Ok(expr),
        };
        let op = self.advance();
        let value = self.assignment()?;

        let compound_op = op_kind.compound_base();
        let base_op = compound_op.map(|base| op.with_kind(base.into(), base.as_ref()));

        match expr {
            Expr::Variable(target) => {
                let value = desugar(Expr::Variable(target.clone()), base_op, value);
                Ok(Expr::Assign(AssignExpr {
                    target,
                    compound_op,
                    value: Box::new(value),
                }))
            }
            Expr::Get(GetExpr { object, member }) => {
                let read = Expr::Get(GetExpr {
                    object: object.clone(),
                    member: member.clone(),
                });
                let value = desugar(read, base_op, value);
                Ok(Expr::Set(SetExpr {
                    object,
                    member,
                    compound_op,
                    value: Box::new(value),
                }))
            }
            expr => {
                let error = ParseError::new(ErrorKind::InvalidAssignmentTarget, op)
                    .with_span(expr.span());
                self.report(&error);
                Ok(expr)
            }
        }
    }

    fn ternary(&mut self) -> ParseResult<Expr> {
        let condition = self.logic_or()?;
        if self.match_token(OtherKind::QuestionMark).is_none() {
            return Ok(condition);
        }
        let then = self.expression()?;
        let colon = self.consume(OtherKind::Colon, "Expect ':' after then branch of ternary.")?;
        let otherwise = self.ternary()?;
        Ok(Expr::Ternary(TernaryExpr {
            condition: Box::new(condition),
            then: Box::new(then),
            colon,
            otherwise: Box::new(otherwise),
        }))
    }

    fn logic_or(&mut self) -> ParseResult<Expr> {
        self.binary_level(&[OperatorKind::LogicOr], Self::logic_and)
    }

    fn logic_and(&mut self) -> ParseResult<Expr> {
        self.binary_level(&[OperatorKind::LogicAnd], Self::bit_or)
    }

    fn bit_or(&mut self) -> ParseResult<Expr> {
        self.binary_level(&[OperatorKind::Or], Self::bit_xor)
    }

    fn bit_xor(&mut self) -> ParseResult<Expr> {
        self.binary_level(&[OperatorKind::Xor], Self::bit_and)
    }

    fn bit_and(&mut self) -> ParseResult<Expr> {
        self.binary_level(&[OperatorKind::And], Self::equality)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        self.comparison_level(&EQUALITY, Self::relational)
    }

    fn relational(&mut self) -> ParseResult<Expr> {
        self.comparison_level(&RELATIONAL, Self::shift)
    }

    fn shift(&mut self) -> ParseResult<Expr> {
        self.binary_level(&SHIFT, Self::additive)
    }

    fn additive(&mut self) -> ParseResult<Expr> {
        self.binary_level(&ADDITIVE, Self::multiplicative)
    }

    fn multiplicative(&mut self) -> ParseResult<Expr> {
        self.binary_level(&MULTIPLICATIVE, Self::power)
    }

    /// `**` is right associative
    fn power(&mut self) -> ParseResult<Expr> {
        let base = self.unary()?;
        match self.match_operator(&[OperatorKind::Power]) {
            Some(op) => {
                let exponent = self.power()?;
                Ok(Expr::Binary(ExprBinary::new(base, op, exponent)))
            }
            None => Ok(base),
        }
    }

    /// A left associative level of binary operators
    fn binary_level(
        &mut self,
        operators: &[OperatorKind],
        next: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut left = next(self)?;
        while let Some(op) = self.match_operator(operators) {
            let right = next(self)?;
            left = Expr::Binary(ExprBinary::new(left, op, right));
        }
        Ok(left)
    }

    /// A level of comparison operators, which can't be chained
    fn comparison_level(
        &mut self,
        operators: &[OperatorKind],
        next: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let left = next(self)?;
        let Some(op) = self.match_operator(operators) else {
            return Ok(left);
        };
        let right = next(self)?;
        if matches!(self.peek().kind(), TokenKind::Operator(op) if operators.contains(&op)) {
            return Err(self.error(ErrorKind::ChainedComparison));
        }
        Ok(Expr::Binary(ExprBinary::new(left, op, right)))
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        match self.match_operator(&PREFIX) {
            Some(op) => {
                let operand = self.unary()?;
                Ok(Expr::Unary(ExprUnary {
                    op,
                    operand: Box::new(operand),
                }))
            }
            None => self.postfix(),
        }
    }

    fn postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;
        loop {
            if self.match_token(OtherKind::Dot).is_some() {
                let member =
                    self.consume(TokenKind::IDENTIFIER, "Expect property name after '.'.")?;
                expr = Expr::Get(GetExpr {
                    object: Box::new(expr),
                    member,
                });
            } else if self.match_token(OtherKind::LParen).is_some() {
                expr = self.finish_call(expr, None)?;
            } else if self.match_token(OtherKind::LBracket).is_some() {
                let index = self.expression()?;
                let bracket = self.consume(OtherKind::RBracket, "Expect ']' after index.")?;
                expr = Expr::Index(IndexExpr {
                    array: Box::new(expr),
                    index: Box::new(index),
                    bracket,
                });
            } else if expr.is_lvalue() && self.check(OperatorKind::Less) {
                match self.speculative_generic_args() {
                    Some(generics) => {
                        self.advance();
                        expr = self.finish_call(expr, Some(generics))?;
                    }
                    None => break,
                }
            } else if expr.is_lvalue() && self.check_any(&POSTFIX.map(TokenKind::from)) {
                let op = self.advance();
                expr = Expr::Postfix(ExprPostfix {
                    operand: Box::new(expr),
                    op,
                });
            } else {
                break;
            }
        }
        Ok(expr)
    }

    /// Tries to read `<...>` as the generic arguments of a call. They are only kept if the
    /// closing `>` is followed by `(`, otherwise the parser is rewound to the `<`.
    fn speculative_generic_args(&mut self) -> Option<GenericArgs> {
        let checkpoint = self.checkpoint();
        trace!("trying generic arguments at {}", self.peek().span());
        match self.generic_args() {
            Ok(generics) if self.check(OtherKind::LParen) => Some(generics),
            Ok(_) => {
                trace!("generic arguments not followed by '(', treating '<' as less than");
                self.restore(checkpoint);
                None
            }
            Err(e) => {
                trace!("not generic arguments ({e}), treating '<' as less than");
                self.restore(checkpoint);
                None
            }
        }
    }

    /// Parses call arguments after the `(`
    fn finish_call(&mut self, callee: Expr, generics: Option<GenericArgs>) -> ParseResult<Expr> {
        let mut args = vec![];
        if !self.check(OtherKind::RParen) {
            loop {
                args.push(self.expression()?);
                if self.match_token(OtherKind::Comma).is_none() {
                    break;
                }
            }
        }
        let paren = self.consume(OtherKind::RParen, "Expect ')' after arguments.")?;
        Ok(Expr::Call(CallExpr {
            callee: Box::new(callee),
            paren,
            args,
            generics,
        }))
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek().clone();
        let expr = match token.kind() {
            TokenKind::Keyword(KeywordKind::True) => Expr::Literal(Constant {
                kind: ConstantKind::Boolean(true),
                token: self.advance(),
            }),
            TokenKind::Keyword(KeywordKind::False) => Expr::Literal(Constant {
                kind: ConstantKind::Boolean(false),
                token: self.advance(),
            }),
            TokenKind::Keyword(KeywordKind::This) => Expr::This(self.advance()),
            TokenKind::Keyword(KeywordKind::Fn) => {
                let keyword = self.advance();
                return self.lambda(keyword);
            }
            TokenKind::Literal(LiteralKind::Identifier) => Expr::Variable(self.advance()),
            TokenKind::Literal(_) => {
                let kind = match token.literal() {
                    Some(LiteralValue::Int(i)) => ConstantKind::Int(*i),
                    Some(LiteralValue::Float(f)) => ConstantKind::Float(*f),
                    Some(LiteralValue::Str(s)) => ConstantKind::String(s.clone()),
                    None => return Err(self.error(ErrorKind::ExpectedExpression)),
                };
                Expr::Literal(Constant {
                    kind,
                    token: self.advance(),
                })
            }
            TokenKind::Other(OtherKind::LParen) => {
                let lparen = self.advance();
                let inner = self.expression()?;
                let rparen = self.consume(OtherKind::RParen, "Expect ')' after expression.")?;
                Expr::Grouping(GroupingExpr {
                    lparen,
                    inner: Box::new(inner),
                    rparen,
                })
            }
            TokenKind::Other(OtherKind::LBracket) => {
                let bracket = self.advance();
                let mut elements = vec![];
                if !self.check(OtherKind::RBracket) {
                    loop {
                        elements.push(self.expression()?);
                        if self.match_token(OtherKind::Comma).is_none() {
                            break;
                        }
                    }
                }
                let close =
                    self.consume(OtherKind::RBracket, "Expect ']' after array elements.")?;
                Expr::Array(ArrayExpr {
                    bracket,
                    elements,
                    close,
                })
            }
            _ => return Err(self.error(ErrorKind::ExpectedExpression)),
        };
        Ok(expr)
    }

    /// `fn <generics>? (params) (-> type)? body`, after the `fn`
    fn lambda(&mut self, keyword: Token) -> ParseResult<Expr> {
        let generics = if self.check(OperatorKind::Less) {
            Some(self.generic_parameters()?)
        } else {
            None
        };
        self.consume(OtherKind::LParen, "Expect '(' after 'fn'.")?;
        let params = self.parameters()?;
        let return_type = match self.match_token(OtherKind::Arrow) {
            Some(_) => Some(self.type_reference()?),
            None => None,
        };
        let body = self.expression()?;
        Ok(Expr::Lambda(LambdaExpr {
            keyword,
            generics,
            params,
            return_type,
            body: Box::new(body),
        }))
    }
}

/// `target X= value` is stored as `target = target X value`
fn desugar(target: Expr, base_op: Option<Token>, value: Expr) -> Expr {
    match base_op {
        Some(op) => Expr::Binary(ExprBinary::new(target, op, value)),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::parser::{ErrorKind, ParseResult, Parser};
    use ktpp_ast::{ConstantKind, Expr};
    use ktpp_diagnostics::{Diagnostics, RecordingLogger};
    use ktpp_tokens::OperatorKind;
    use std::sync::Arc;
    use test_log::test;

    fn parse_expr(src: &str) -> (ParseResult<Expr>, bool, Arc<RecordingLogger>) {
        let logger = Arc::new(RecordingLogger::new());
        let mut diagnostics = Diagnostics::with_shared(logger.clone());
        diagnostics.add_source("expr.ktpp", src);
        let stream = Lexer::new("expr.ktpp", src, &diagnostics).tokenize();
        let mut parser = Parser::new(stream, &diagnostics);
        let expr = parser.expression();
        assert!(
            expr.is_err() || parser.is_at_end(),
            "{src:?} left {} unparsed",
            parser.peek()
        );
        (expr, parser.had_error(), logger)
    }

    fn expr(src: &str) -> Expr {
        let (expr, had_error, logger) = parse_expr(src);
        assert!(!had_error, "{src:?} reported {:#?}", logger.records());
        expr.unwrap_or_else(|e| panic!("{src:?} failed: {e}"))
    }

    /// Renders an expression fully parenthesized
    fn sexp(expr: &Expr) -> String {
        match expr {
            Expr::Literal(c) => c.token.lexeme().to_string(),
            Expr::Variable(t) | Expr::This(t) => t.lexeme().to_string(),
            Expr::Binary(b) => {
                format!("({} {} {})", sexp(&b.left), b.op.lexeme(), sexp(&b.right))
            }
            Expr::Unary(u) => format!("({}{})", u.op.lexeme(), sexp(&u.operand)),
            Expr::Postfix(p) => format!("({}{})", sexp(&p.operand), p.op.lexeme()),
            Expr::Grouping(g) => format!("[{}]", sexp(&g.inner)),
            Expr::Assign(a) => format!("({} = {})", a.target.lexeme(), sexp(&a.value)),
            Expr::Call(c) => format!(
                "{}({})",
                sexp(&c.callee),
                c.args.iter().map(sexp).collect::<Vec<_>>().join(", ")
            ),
            Expr::Get(g) => format!("{}.{}", sexp(&g.object), g.member.lexeme()),
            Expr::Set(s) => format!(
                "({}.{} = {})",
                sexp(&s.object),
                s.member.lexeme(),
                sexp(&s.value)
            ),
            Expr::Ternary(t) => format!(
                "({} ? {} : {})",
                sexp(&t.condition),
                sexp(&t.then),
                sexp(&t.otherwise)
            ),
            Expr::Array(a) => format!(
                "[{}]",
                a.elements.iter().map(sexp).collect::<Vec<_>>().join(", ")
            ),
            Expr::Index(i) => format!("{}[{}]", sexp(&i.array), sexp(&i.index)),
            Expr::Lambda(l) => format!("fn -> {}", sexp(&l.body)),
        }
    }

    #[test]
    fn precedence() {
        assert_eq!(sexp(&expr("1 + 2 * 3")), "(1 + (2 * 3))");
        assert_eq!(sexp(&expr("1 - 2 - 3")), "((1 - 2) - 3)");
        assert_eq!(sexp(&expr("a || b && c")), "(a || (b && c))");
        assert_eq!(sexp(&expr("a | b ^ c & d")), "(a | (b ^ (c & d)))");
        assert_eq!(sexp(&expr("a == b < c")), "(a == (b < c))");
        assert_eq!(sexp(&expr("a < b << 1")), "(a < (b << 1))");
        assert_eq!(sexp(&expr("-a * b")), "((-a) * b)");
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(sexp(&expr("2 ** 3 ** 2")), "(2 ** (3 ** 2))");
        assert_eq!(sexp(&expr("2 * 3 ** 2")), "(2 * (3 ** 2))");
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_eq!(sexp(&expr("a = b = 1")), "(a = (b = 1))");
    }

    #[test]
    fn compound_assignment_desugars() {
        let parsed = expr("x += 2");
        let Expr::Assign(assign) = &parsed else {
            panic!("expected assign, got {parsed:#?}");
        };
        assert_eq!(assign.compound_op, Some(OperatorKind::Plus));
        assert_eq!(sexp(&parsed), "(x = (x + 2))");
    }

    #[test]
    fn member_assignment_is_set() {
        assert_eq!(sexp(&expr("a.b.c = 1")), "(a.b.c = 1)");
        assert_eq!(sexp(&expr("a.b **= 2")), "(a.b = (a.b ** 2))");
    }

    #[test]
    fn invalid_assignment_target_is_reported() {
        let (parsed, had_error, logger) = parse_expr("1 + 2 = 3");
        assert!(parsed.is_ok());
        assert!(had_error);
        assert!(logger.records()[0]
            .message
            .ends_with("Invalid assignment target."));
    }

    #[test]
    fn comparisons_do_not_chain() {
        let (parsed, _, _) = parse_expr("a < b < c");
        assert_eq!(parsed.unwrap_err().kind, ErrorKind::ChainedComparison);
        let (parsed, _, _) = parse_expr("a == b != c");
        assert_eq!(parsed.unwrap_err().kind, ErrorKind::ChainedComparison);
    }

    #[test]
    fn ternary() {
        assert_eq!(
            sexp(&expr("a ? b : c ? d : e")),
            "(a ? b : (c ? d : e))"
        );
    }

    #[test]
    fn less_than_is_not_generics() {
        let parsed = expr("a < b");
        assert!(matches!(&parsed, Expr::Binary(b) if b.op.lexeme() == "<"));
        assert_eq!(sexp(&expr("a < 3")), "(a < 3)");
        assert_eq!(sexp(&expr("f(a < b, c > d)")), "f((a < b), (c > d))");
    }

    #[test]
    fn generic_call() {
        let parsed = expr("make<int, List<str>>(1)");
        let Expr::Call(call) = &parsed else {
            panic!("expected call, got {parsed:#?}");
        };
        let generics = call.generics.as_ref().unwrap();
        let names = generics
            .args
            .iter()
            .map(|t| t.name.lexeme())
            .collect::<Vec<_>>();
        assert_eq!(names, ["int", "List"]);
        assert_eq!(call.args.len(), 1);
    }

    #[test]
    fn calls_members_and_indexes() {
        assert_eq!(sexp(&expr("a.b(1, 2)[0].c")), "a.b(1, 2)[0].c");
        assert_eq!(sexp(&expr("[1, 2, 3][i++]")), "[1, 2, 3][(i++)]");
        assert_eq!(sexp(&expr("this.x")), "this.x");
    }

    #[test]
    fn grouping() {
        assert_eq!(sexp(&expr("(1 + 2) * 3")), "([(1 + 2)] * 3)");
    }

    #[test]
    fn literals() {
        let Expr::Literal(c) = expr("\"hi\"") else {
            panic!("expected literal");
        };
        assert_eq!(c.kind, ConstantKind::String("hi".to_string()));
        let Expr::Literal(c) = expr("false") else {
            panic!("expected literal");
        };
        assert_eq!(c.kind, ConstantKind::Boolean(false));
        let Expr::Literal(c) = expr("1.5") else {
            panic!("expected literal");
        };
        assert_eq!(c.kind, ConstantKind::Float(1.5));
    }

    #[test]
    fn lambda() {
        let parsed = expr("fn<T>(x: T) -> T x * 2");
        let Expr::Lambda(lambda) = &parsed else {
            panic!("expected lambda, got {parsed:#?}");
        };
        assert_eq!(lambda.params.len(), 1);
        assert!(lambda.generics.is_some());
        assert_eq!(lambda.return_type.as_ref().unwrap().to_string(), "T");
        assert_eq!(sexp(&lambda.body), "(x * 2)");
    }

    #[test]
    fn missing_operand() {
        let (parsed, _, _) = parse_expr("1 +");
        let error = parsed.unwrap_err();
        assert_eq!(error.kind, ErrorKind::ExpectedExpression);
        assert!(error.token.is_eof());
    }

    #[test]
    fn unclosed_call() {
        let (parsed, _, _) = parse_expr("f(1, 2");
        assert_eq!(
            parsed.unwrap_err().kind,
            ErrorKind::Expected("Expect ')' after arguments.")
        );
    }
}
