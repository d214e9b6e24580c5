//! Typed AST surface for the tsw compiler.
//!
//! The binder consumes an already-built AST: the parser (external to this
//! repository) produces `Source`s whose declaration nodes carry
//! parser-precomputed, path-qualified internal names per the conventions in
//! `tsw_common::naming`. Declaration nodes are `Arc`-shared so program
//! elements can retain them past binding.
//!
//! Every node carries a `Range`: a byte span plus the internal path of the
//! source it came from.

use std::sync::Arc;

use tsw_common::span::Span;

pub mod expressions;
pub mod statements;
pub mod types;

pub use expressions::*;
pub use statements::*;
pub use types::*;

/// A source span together with the internal path of its source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Range {
    /// Internal path of the owning source, e.g. `std/math`.
    pub source: Arc<str>,
    pub span: Span,
}

impl Range {
    pub fn new(source: impl Into<Arc<str>>, span: Span) -> Self {
        Range {
            source: source.into(),
            span,
        }
    }

    /// A range for synthetic nodes (builtins) that have no source.
    pub fn none() -> Self {
        Range {
            source: Arc::from(""),
            span: Span::dummy(),
        }
    }

    /// Join two ranges of the same source into one covering both.
    pub fn merge(&self, other: &Range) -> Range {
        Range {
            source: self.source.clone(),
            span: self.span.merge(other.span),
        }
    }

    /// An empty range at the end of this one.
    pub fn at_end(&self) -> Range {
        Range {
            source: self.source.clone(),
            span: self.span.at_end(),
        }
    }
}

/// A name as written in source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier {
    pub text: String,
    pub range: Range,
}

impl Identifier {
    pub fn new(text: impl Into<String>, range: Range) -> Self {
        Identifier {
            text: text.into(),
            range,
        }
    }
}

/// Declaration modifier kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModifierKind {
    Import,
    Export,
    Declare,
    Const,
    Static,
    Get,
    Set,
    Readonly,
    Private,
    Protected,
    Public,
    Abstract,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Modifier {
    pub kind: ModifierKind,
    pub range: Range,
}

impl Modifier {
    pub fn new(kind: ModifierKind, range: Range) -> Self {
        Modifier { kind, range }
    }
}

/// Check whether a modifier of the given kind is present.
pub fn has_modifier(kind: ModifierKind, modifiers: &[Modifier]) -> bool {
    modifiers.iter().any(|m| m.kind == kind)
}

/// A decorator applied to a declaration, e.g. `@global`.
#[derive(Clone, Debug, PartialEq)]
pub struct Decorator {
    pub name: Identifier,
    pub arguments: Vec<Expression>,
    pub range: Range,
}

/// Check for a decorator by name. Only the identifier-only form with at
/// most one argument counts; anything fancier is not a recognized decorator.
pub fn has_decorator(name: &str, decorators: &[Decorator]) -> bool {
    decorators
        .iter()
        .any(|d| d.name.text == name && d.arguments.len() <= 1)
}

/// A parsed source file: top-level statements plus the paths the binder
/// mangles internal and external names from.
#[derive(Clone, Debug)]
pub struct Source {
    /// Path as written/normalized, e.g. `./std/math`.
    pub path: String,
    /// Internal path used in mangled names, e.g. `std/math`.
    pub internal_path: Arc<str>,
    pub statements: Vec<Statement>,
}

impl Source {
    pub fn new(internal_path: impl Into<Arc<str>>, statements: Vec<Statement>) -> Self {
        let internal_path = internal_path.into();
        Source {
            path: internal_path.to_string(),
            internal_path,
            statements,
        }
    }
}
