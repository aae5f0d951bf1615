//! Type references and generic parameter lists

use crate::span_between;
use itertools::Itertools;
use ktpp_tokens::{Spanned, TextSpan, Token};
use std::fmt::{Display, Formatter};

/// A reference to a type, like `int`, `List<T>` or `T: Comparable`
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub name: Token,
    pub generics: Option<GenericParameters>,
    pub extends: Option<Box<Type>>,
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name.lexeme())?;
        if let Some(generics) = &self.generics {
            write!(f, "{generics}")?;
        }
        if let Some(extends) = &self.extends {
            write!(f, ": {extends}")?;
        }
        Ok(())
    }
}

impl Spanned for Type {
    fn span(&self) -> TextSpan {
        match (&self.extends, &self.generics) {
            (Some(extends), _) => span_between(&self.name, extends.as_ref()),
            (None, Some(generics)) => span_between(&self.name, generics),
            (None, None) => self.name.span(),
        }
    }
}

/// A generic parameter list, `<K, V: Hash>`
#[derive(Debug, Clone, PartialEq)]
pub struct GenericParameters {
    /// The opening `<`
    pub angle: Token,
    pub entries: Vec<GenericParameter>,
}

impl GenericParameters {
    /// The names of the declared parameters, in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.lexeme())
    }
}

impl Display for GenericParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.entries.iter().join(", "))
    }
}

impl Spanned for GenericParameters {
    fn span(&self) -> TextSpan {
        match self.entries.last() {
            Some(last) => span_between(&self.angle, last),
            None => self.angle.span(),
        }
    }
}

/// One entry of a [`GenericParameters`] list. Inside a type reference an entry can carry its
/// own list, as `List<V>` does in `Map<K, List<V>>`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericParameter {
    pub name: Token,
    pub generics: Option<GenericParameters>,
    pub bound: Option<Type>,
}

impl Display for GenericParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name.lexeme())?;
        if let Some(generics) = &self.generics {
            write!(f, "{generics}")?;
        }
        if let Some(bound) = &self.bound {
            write!(f, ": {bound}")?;
        }
        Ok(())
    }
}

impl Spanned for GenericParameter {
    fn span(&self) -> TextSpan {
        match (&self.bound, &self.generics) {
            (Some(bound), _) => span_between(&self.name, bound),
            (None, Some(generics)) => span_between(&self.name, generics),
            (None, None) => self.name.span(),
        }
    }
}

/// Explicit generic arguments at a call site, `foo<int, T>(...)`
#[derive(Debug, Clone, PartialEq)]
pub struct GenericArgs {
    /// The opening `<`
    pub angle: Token,
    pub args: Vec<Type>,
}

impl Display for GenericArgs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.args.iter().join(", "))
    }
}

impl Spanned for GenericArgs {
    fn span(&self) -> TextSpan {
        match self.args.last() {
            Some(last) => span_between(&self.angle, last),
            None => self.angle.span(),
        }
    }
}

/// A named, typed parameter of a function or lambda
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Token,
    pub ty: Type,
}

impl Spanned for Param {
    fn span(&self) -> TextSpan {
        span_between(&self.name, &self.ty)
    }
}
