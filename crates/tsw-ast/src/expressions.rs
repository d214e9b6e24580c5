//! Expression nodes.
//!
//! Only the expression forms the binder and resolver inspect are modeled:
//! identifiers, property accesses, `this`, `new`, and the literal forms
//! that appear as initializers.

use crate::{Identifier, Range};
use crate::types::TypeNode;

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Identifier(IdentifierExpression),
    PropertyAccess(Box<PropertyAccessExpression>),
    This(ThisExpression),
    New(Box<NewExpression>),
    IntegerLiteral(IntegerLiteralExpression),
    FloatLiteral(FloatLiteralExpression),
    StringLiteral(StringLiteralExpression),
}

impl Expression {
    pub fn range(&self) -> &Range {
        match self {
            Expression::Identifier(e) => &e.range,
            Expression::PropertyAccess(e) => &e.range,
            Expression::This(e) => &e.range,
            Expression::New(e) => &e.range,
            Expression::IntegerLiteral(e) => &e.range,
            Expression::FloatLiteral(e) => &e.range,
            Expression::StringLiteral(e) => &e.range,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IdentifierExpression {
    pub text: String,
    pub range: Range,
}

impl IdentifierExpression {
    pub fn new(text: impl Into<String>, range: Range) -> Self {
        IdentifierExpression {
            text: text.into(),
            range,
        }
    }
}

/// `<expression>.<property>`
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyAccessExpression {
    pub expression: Expression,
    pub property: Identifier,
    pub range: Range,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ThisExpression {
    pub range: Range,
}

/// `new <expression><typeArguments>(<arguments>)`
#[derive(Clone, Debug, PartialEq)]
pub struct NewExpression {
    pub expression: Expression,
    pub type_arguments: Vec<TypeNode>,
    pub arguments: Vec<Expression>,
    pub range: Range,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntegerLiteralExpression {
    pub value: i64,
    pub range: Range,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatLiteralExpression {
    pub value: f64,
    pub range: Range,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StringLiteralExpression {
    pub value: String,
    pub range: Range,
}
