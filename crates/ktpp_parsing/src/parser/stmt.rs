//! Declarations and statements

use crate::parser::{ErrorKind, ParseResult, Parser};
use ktpp_ast::{
    BlockStmt, ClassStmt, Constant, ConstantKind, Expr, ForEachStmt, ForStmt, FunctionStmt,
    IfStmt, ReturnStmt, Stmt, SwitchCase, SwitchStmt, VarStmt, WhileStmt,
};
use ktpp_tokens::{KeywordKind, OperatorKind, OtherKind, Spanned, Token, TokenKind};
use tracing::{debug, trace};

const CONST_NOT_INITIALIZED: &str = "'const' declarations must be initialized.";

impl Parser<'_> {
    pub(super) fn try_declaration(&mut self) -> ParseResult<Stmt> {
        if let Some(keyword) = self.match_token(KeywordKind::Class) {
            return self.class_declaration(keyword).map(Stmt::Class);
        }
        if self.check(KeywordKind::Fn) && self.peek_at(1).kind() == TokenKind::IDENTIFIER {
            let keyword = self.advance();
            return self.function(keyword).map(Stmt::Function);
        }
        if let Some(keyword) = self.match_token(KeywordKind::Var) {
            let var = self.var_declaration(keyword)?;
            self.match_token(OtherKind::Semicolon);
            return Ok(Stmt::Var(var));
        }
        self.statement()
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.peek().clone();
        match keyword.kind() {
            TokenKind::Keyword(KeywordKind::For) => {
                self.advance();
                self.for_statement(keyword)
            }
            TokenKind::Keyword(KeywordKind::If) => {
                self.advance();
                self.if_statement(keyword)
            }
            TokenKind::Keyword(KeywordKind::Return) => {
                self.advance();
                let value = if self.can_start_expression() {
                    Some(self.expression()?)
                } else {
                    None
                };
                self.match_token(OtherKind::Semicolon);
                Ok(Stmt::Return(ReturnStmt { keyword, value }))
            }
            TokenKind::Keyword(KeywordKind::Do) => {
                self.advance();
                self.consume(KeywordKind::While, "Expect \"while\" after \"do\".")?;
                self.while_statement(keyword, true)
            }
            TokenKind::Keyword(KeywordKind::While) => {
                self.advance();
                self.while_statement(keyword, false)
            }
            TokenKind::Keyword(KeywordKind::Break) => {
                self.advance();
                self.match_token(OtherKind::Semicolon);
                Ok(Stmt::Break(keyword))
            }
            TokenKind::Keyword(KeywordKind::Continue) => {
                self.advance();
                self.match_token(OtherKind::Semicolon);
                Ok(Stmt::Continue(keyword))
            }
            TokenKind::Keyword(KeywordKind::Switch) => {
                self.advance();
                self.switch_statement(keyword).map(Stmt::Switch)
            }
            TokenKind::Other(OtherKind::LBrace) => {
                self.advance();
                self.block(keyword).map(Stmt::Block)
            }
            _ => {
                let expr = self.expression()?;
                self.match_token(OtherKind::Semicolon);
                Ok(Stmt::Expression(expr))
            }
        }
    }

    /// Parses the statements of a block whose `{` has already been consumed
    fn block(&mut self, lbrace: Token) -> ParseResult<BlockStmt> {
        let mut statements = vec![];
        while !self.check(OtherKind::RBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        let rbrace = self.consume(OtherKind::RBrace, "Expect '}' after block.")?;
        Ok(BlockStmt {
            lbrace,
            statements,
            rbrace,
        })
    }

    fn if_statement(&mut self, keyword: Token) -> ParseResult<Stmt> {
        let condition = self.expression()?;
        let then = self.statement()?;
        let otherwise = match self.match_token(KeywordKind::Else) {
            Some(_) => Some(Box::new(self.statement()?)),
            None => None,
        };
        Ok(Stmt::If(IfStmt {
            keyword,
            condition,
            then: Box::new(then),
            otherwise,
        }))
    }

    fn while_statement(&mut self, keyword: Token, is_do_while: bool) -> ParseResult<Stmt> {
        let condition = self.optional_condition()?;
        let body = self.statement()?;
        Ok(Stmt::While(WhileStmt {
            keyword,
            condition,
            body: Box::new(body),
            is_do_while,
        }))
    }

    /// A loop condition, or `true` if the next token can't start an expression
    fn optional_condition(&mut self) -> ParseResult<Expr> {
        if self.can_start_expression() {
            self.expression()
        } else {
            trace!("missing condition at {}, using true", self.peek());
            Ok(Expr::Literal(Constant {
                kind: ConstantKind::Boolean(true),
                token: self.peek().with_kind(KeywordKind::True.into(), "true"),
            }))
        }
    }

    fn for_statement(&mut self, keyword: Token) -> ParseResult<Stmt> {
        let parenthesized = self.match_token(OtherKind::LParen).is_some();

        let init = if self.match_token(OtherKind::Semicolon).is_some() {
            None
        } else if let Some(var_keyword) = self.match_token(KeywordKind::Var) {
            let mut binding = self.var_head(var_keyword)?;
            if let Some(colon) = self.match_token(OtherKind::Colon) {
                // `var i: T = ...;` annotates a C-style initializer, `var i: xs` iterates
                let checkpoint = self.checkpoint();
                match self.type_reference() {
                    Ok(ty)
                        if self.check(OperatorKind::Equals) || self.check(OtherKind::Semicolon) =>
                    {
                        binding.declared_type = Some(ty);
                        let var = self.var_initializer(binding)?;
                        self.consume(OtherKind::Semicolon, "Expect ';' after loop initializer.")?;
                        let init = Some(Box::new(Stmt::Var(var)));
                        return self.for_clauses(keyword, parenthesized, init);
                    }
                    _ => {
                        debug!("'for' at {} is a for-each loop", keyword);
                        self.restore(checkpoint);
                    }
                }
                let iterable = self.expression()?;
                if parenthesized {
                    self.consume(OtherKind::RParen, "Expect ')' after for-each clause.")?;
                }
                let body = self.statement()?;
                return Ok(Stmt::ForEach(ForEachStmt {
                    keyword,
                    binding,
                    colon,
                    iterable,
                    body: Box::new(body),
                }));
            }
            let var = self.var_initializer(binding)?;
            self.consume(OtherKind::Semicolon, "Expect ';' after loop initializer.")?;
            Some(Box::new(Stmt::Var(var)))
        } else {
            let expr = self.expression()?;
            self.consume(OtherKind::Semicolon, "Expect ';' after loop initializer.")?;
            Some(Box::new(Stmt::Expression(expr)))
        };
        self.for_clauses(keyword, parenthesized, init)
    }

    /// The condition, increment and body of a C-style for loop, after its initializer. The
    /// increment also runs as the last statement of the body.
    fn for_clauses(
        &mut self,
        keyword: Token,
        parenthesized: bool,
        init: Option<Box<Stmt>>,
    ) -> ParseResult<Stmt> {
        let condition = self.optional_condition()?;
        self.consume(OtherKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if self.can_start_expression() {
            Some(self.expression()?)
        } else {
            None
        };
        if parenthesized {
            self.consume(OtherKind::RParen, "Expect ')' after for clauses.")?;
        }

        let mut body = self.statement()?;
        if let Some(increment) = &increment {
            // the synthetic braces cover the written body
            let span = body.span();
            body = Stmt::Block(BlockStmt {
                lbrace: Token::new(OtherKind::LBrace.into(), "{", span.clone(), None),
                statements: vec![body, Stmt::Expression(increment.clone())],
                rbrace: Token::new(OtherKind::RBrace.into(), "}", span, None),
            });
        }
        Ok(Stmt::For(ForStmt {
            keyword,
            init,
            condition,
            increment,
            body: Box::new(body),
        }))
    }

    fn switch_statement(&mut self, keyword: Token) -> ParseResult<SwitchStmt> {
        let subject = self.expression()?;
        self.consume(OtherKind::LBrace, "Expect '{' after switch value.")?;

        let mut cases = vec![];
        let mut default: Option<BlockStmt> = None;
        while !self.check(OtherKind::RBrace) && !self.is_at_end() {
            if self.peek().lexeme() == "_" && self.peek_at(1).kind() == OtherKind::Arrow.into() {
                if default.is_some() {
                    let error = self.error(ErrorKind::DuplicateDefaultCase);
                    self.report(&error);
                }
                self.advance();
                self.advance();
                let lbrace = self.consume(OtherKind::LBrace, "Expect '{' after '->'.")?;
                let body = self.block(lbrace)?;
                default.get_or_insert(body);
                continue;
            }
            let value = self.expression()?;
            let arrow = self.consume(OtherKind::Arrow, "Expect '->' after case value.")?;
            let lbrace = self.consume(OtherKind::LBrace, "Expect '{' after '->'.")?;
            let body = self.block(lbrace)?;
            cases.push(SwitchCase { value, arrow, body });
        }
        let close = self.consume(OtherKind::RBrace, "Expect '}' after switch cases.")?;

        Ok(SwitchStmt {
            keyword,
            subject,
            cases,
            default,
            close,
        })
    }

    fn class_declaration(&mut self, keyword: Token) -> ParseResult<ClassStmt> {
        let name = self.consume(TokenKind::IDENTIFIER, "Expect class name.")?;
        let generics = if self.check(OperatorKind::Less) {
            Some(self.generic_parameters()?)
        } else {
            None
        };
        let superclass = match self.match_token(OtherKind::Colon) {
            Some(_) => Some(Expr::Variable(
                self.consume(TokenKind::IDENTIFIER, "Expect superclass name.")?,
            )),
            None => None,
        };
        self.consume(OtherKind::LBrace, "Expect '{' before class body.")?;

        let mut fields = vec![];
        let mut methods = vec![];
        while !self.check(OtherKind::RBrace) && !self.is_at_end() {
            if let Some(fn_keyword) = self.match_token(KeywordKind::Fn) {
                methods.push(self.function(fn_keyword)?);
            } else if let Some(keyword) = self.match_token(KeywordKind::Var) {
                fields.push(self.var_declaration(keyword)?);
                self.match_token(OtherKind::Semicolon);
            } else if self.match_token(OtherKind::Semicolon).is_none() {
                return Err(self.error(ErrorKind::Expected(
                    "Expect 'fn' or 'var' in class body.",
                )));
            }
        }
        let close = self.consume(OtherKind::RBrace, "Expect '}' after class body.")?;

        Ok(ClassStmt {
            keyword,
            name,
            generics,
            superclass,
            fields,
            methods,
            close,
        })
    }

    /// Parses a named function after its `fn` keyword
    pub(super) fn function(&mut self, keyword: Token) -> ParseResult<FunctionStmt> {
        let name = self.consume(TokenKind::IDENTIFIER, "Expect function name.")?;
        let generics = if self.check(OperatorKind::Less) {
            Some(self.generic_parameters()?)
        } else {
            None
        };
        self.consume(OtherKind::LParen, "Expect '(' after function name.")?;
        let params = self.parameters()?;
        let return_type = match self.match_token(OtherKind::Arrow) {
            Some(_) => Some(self.type_reference()?),
            None => None,
        };
        let lbrace = self.consume(OtherKind::LBrace, "Expect '{' before function body.")?;
        let body = self.block(lbrace)?;
        Ok(FunctionStmt {
            keyword,
            name,
            generics,
            params,
            return_type,
            body,
        })
    }

    /// Parses a variable declaration after its `var` keyword
    fn var_declaration(&mut self, keyword: Token) -> ParseResult<VarStmt> {
        let mut var = self.var_head(keyword)?;
        if self.match_token(OtherKind::Colon).is_some() {
            var.declared_type = Some(self.type_reference()?);
        }
        self.var_initializer(var)
    }

    /// `mut? name`
    fn var_head(&mut self, keyword: Token) -> ParseResult<VarStmt> {
        let mutable = self.match_token(KeywordKind::Mut).is_some();
        let name = self.consume(TokenKind::IDENTIFIER, "Expect variable name.")?;
        Ok(VarStmt {
            keyword,
            name,
            mutable,
            declared_type: None,
            initializer: None,
        })
    }

    /// Parses the optional `= initializer` of a variable. Immutable variables must have one.
    fn var_initializer(&mut self, mut var: VarStmt) -> ParseResult<VarStmt> {
        if self.match_token(OperatorKind::Equals).is_some() {
            var.initializer = Some(self.expression()?);
        } else if !var.mutable {
            let error = self
                .error(ErrorKind::illegal_statement(CONST_NOT_INITIALIZED))
                .with_span(var.name.span());
            self.report(&error);
        }
        Ok(var)
    }
}
