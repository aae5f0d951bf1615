//! Type references, generic parameter lists and function parameters

use crate::parser::{ErrorKind, ParseResult, Parser};
use ktpp_ast::{GenericArgs, GenericParameter, GenericParameters, Param, Type};
use ktpp_tokens::{OperatorKind, OtherKind, TokenKind};

impl Parser<'_> {
    /// `name ('<' generic_parameters)? (':' type)?`
    pub(crate) fn type_reference(&mut self) -> ParseResult<Type> {
        let name = self.consume(TokenKind::IDENTIFIER, "Expect type name.")?;
        let generics = if self.check(OperatorKind::Less) {
            Some(self.generic_parameters()?)
        } else {
            None
        };
        let extends = match self.match_token(OtherKind::Colon) {
            Some(_) => Some(Box::new(self.type_reference()?)),
            None => None,
        };
        Ok(Type {
            name,
            generics,
            extends,
        })
    }

    /// Parses `<A, B: Bound, List<C>, ...>`, starting at the `<`
    pub(crate) fn generic_parameters(&mut self) -> ParseResult<GenericParameters> {
        let angle = self.consume(OperatorKind::Less, "Expect '<'.")?;
        let mut entries = vec![];
        loop {
            let name = self.consume(TokenKind::IDENTIFIER, "Expect generic parameter name.")?;
            let generics = if self.check(OperatorKind::Less) {
                Some(self.generic_parameters()?)
            } else {
                None
            };
            let bound = match self.match_token(OtherKind::Colon) {
                Some(_) => Some(self.type_reference()?),
                None => None,
            };
            entries.push(GenericParameter {
                name,
                generics,
                bound,
            });

            if self.match_token(OtherKind::Comma).is_some() {
                continue;
            }
            if self.match_closing_angle().is_some() {
                break;
            }
            return Err(self.error(ErrorKind::Expected("Expect ',' or '>'.")));
        }
        Ok(GenericParameters { angle, entries })
    }

    /// Parses explicit generic arguments of a call, `<T, List<U>>`. Fails without reporting
    /// anything, so the caller can fall back to a comparison.
    pub(crate) fn generic_args(&mut self) -> ParseResult<GenericArgs> {
        let angle = self.consume(OperatorKind::Less, "Expect '<'.")?;
        let mut args = vec![];
        loop {
            if !self.check(TokenKind::IDENTIFIER) {
                return Err(self.error(ErrorKind::Expected("Expect type name.")));
            }
            args.push(self.type_reference()?);
            if self.match_token(OtherKind::Comma).is_some() {
                continue;
            }
            if self.match_closing_angle().is_some() {
                break;
            }
            return Err(self.error(ErrorKind::Expected("Expect ',' or '>'.")));
        }
        Ok(GenericArgs { angle, args })
    }

    /// Parses `name: type, ...` up to and including the closing `)`
    pub(crate) fn parameters(&mut self) -> ParseResult<Vec<Param>> {
        let mut params = vec![];
        if !self.check(OtherKind::RParen) {
            loop {
                let name = self.consume(TokenKind::IDENTIFIER, "Expect parameter name.")?;
                self.consume(OtherKind::Colon, "Expect ':' after parameter name.")?;
                let ty = self.type_reference()?;
                params.push(Param { name, ty });
                if self.match_token(OtherKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.consume(OtherKind::RParen, "Expect ')' after parameters.")?;
        Ok(params)
    }
}
