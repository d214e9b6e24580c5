//! Type annotation nodes.

use crate::{Expression, Identifier, Range};

/// A type reference as written in source: a name plus optional type
/// arguments, e.g. `i32` or `Map<string,V>`.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeNode {
    pub name: Identifier,
    pub type_arguments: Vec<TypeNode>,
    pub range: Range,
}

impl TypeNode {
    pub fn new(name: Identifier, type_arguments: Vec<TypeNode>, range: Range) -> Self {
        TypeNode {
            name,
            type_arguments,
            range,
        }
    }

    /// A bare type reference with no arguments.
    pub fn simple(name: impl Into<String>, range: Range) -> Self {
        TypeNode {
            name: Identifier::new(name, range.clone()),
            type_arguments: Vec::new(),
            range,
        }
    }
}

/// A declared type parameter, e.g. the `T` in `function id<T>(...)`.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeParameterNode {
    pub name: Identifier,
    pub range: Range,
}

impl TypeParameterNode {
    pub fn new(name: impl Into<String>, range: Range) -> Self {
        TypeParameterNode {
            name: Identifier::new(name, range.clone()),
            range,
        }
    }
}

/// A declared function or method parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterNode {
    pub name: Identifier,
    pub type_node: Option<TypeNode>,
    pub initializer: Option<Expression>,
    pub range: Range,
}

impl ParameterNode {
    pub fn new(name: impl Into<String>, type_node: Option<TypeNode>, range: Range) -> Self {
        ParameterNode {
            name: Identifier::new(name, range.clone()),
            type_node,
            initializer: None,
            range,
        }
    }
}
