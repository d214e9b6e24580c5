//! Statement and declaration nodes.
//!
//! Declaration nodes carry their parser-precomputed internal name. Methods
//! reuse the function node shape and interfaces reuse the class node shape;
//! the binder distinguishes them by statement/member position.

use std::sync::Arc;

use crate::expressions::Expression;
use crate::types::{ParameterNode, TypeNode, TypeParameterNode};
use crate::{Decorator, Identifier, Modifier, Range};

/// A top-level or namespace-level statement.
///
/// Statement kinds the binder does not register (expression statements and
/// the like) are represented so source order is preserved, but the
/// initialization pass skips them.
#[derive(Clone, Debug)]
pub enum Statement {
    Class(Arc<ClassDeclaration>),
    Enum(Arc<EnumDeclaration>),
    Export(Arc<ExportStatement>),
    Function(Arc<FunctionDeclaration>),
    Import(Arc<ImportStatement>),
    Interface(Arc<ClassDeclaration>),
    Namespace(Arc<NamespaceDeclaration>),
    TypeDeclaration(Arc<TypeDeclaration>),
    Variable(Arc<VariableStatement>),
    Expression(Expression),
}

/// `class C<T> extends B { ... }` — also used for interface declarations.
#[derive(Clone, Debug)]
pub struct ClassDeclaration {
    pub name: Identifier,
    pub internal_name: String,
    pub modifiers: Vec<Modifier>,
    pub decorators: Vec<Decorator>,
    pub type_parameters: Vec<TypeParameterNode>,
    pub extends: Option<TypeNode>,
    pub members: Vec<ClassMember>,
    pub range: Range,
}

/// A member of a class or interface body.
#[derive(Clone, Debug)]
pub enum ClassMember {
    Field(Arc<FieldDeclaration>),
    Method(Arc<FunctionDeclaration>),
}

#[derive(Clone, Debug)]
pub struct FieldDeclaration {
    pub name: Identifier,
    pub internal_name: String,
    pub modifiers: Vec<Modifier>,
    pub type_node: Option<TypeNode>,
    pub initializer: Option<Expression>,
    pub range: Range,
}

/// `function f<T>(...): R` — also used for method declarations.
#[derive(Clone, Debug)]
pub struct FunctionDeclaration {
    pub name: Identifier,
    pub internal_name: String,
    pub modifiers: Vec<Modifier>,
    pub decorators: Vec<Decorator>,
    pub type_parameters: Vec<TypeParameterNode>,
    pub parameters: Vec<ParameterNode>,
    pub return_type: Option<TypeNode>,
    pub range: Range,
}

#[derive(Clone, Debug)]
pub struct EnumDeclaration {
    pub name: Identifier,
    pub internal_name: String,
    pub modifiers: Vec<Modifier>,
    pub decorators: Vec<Decorator>,
    pub values: Vec<Arc<EnumValueDeclaration>>,
    pub range: Range,
}

#[derive(Clone, Debug)]
pub struct EnumValueDeclaration {
    pub name: Identifier,
    pub internal_name: String,
    pub initializer: Option<Expression>,
    pub range: Range,
}

#[derive(Clone, Debug)]
pub struct NamespaceDeclaration {
    pub name: Identifier,
    pub internal_name: String,
    pub modifiers: Vec<Modifier>,
    pub decorators: Vec<Decorator>,
    pub members: Vec<Statement>,
    pub range: Range,
}

/// `type Name = <alias>;`
#[derive(Clone, Debug)]
pub struct TypeDeclaration {
    pub name: Identifier,
    pub modifiers: Vec<Modifier>,
    pub alias: TypeNode,
    pub range: Range,
}

#[derive(Clone, Debug)]
pub struct VariableStatement {
    pub modifiers: Vec<Modifier>,
    pub decorators: Vec<Decorator>,
    pub declarations: Vec<Arc<VariableDeclaration>>,
    pub range: Range,
}

#[derive(Clone, Debug)]
pub struct VariableDeclaration {
    pub name: Identifier,
    pub internal_name: String,
    pub type_node: Option<TypeNode>,
    pub initializer: Option<Expression>,
    pub range: Range,
}

/// `import { a as b } from "mod";` or `import * as ns from "mod";`
#[derive(Clone, Debug)]
pub struct ImportStatement {
    /// Named import declarations; `None` for the namespace form.
    pub declarations: Option<Vec<Arc<ImportDeclaration>>>,
    /// Local name of a namespace-form import (`import * as ns`).
    pub namespace_name: Option<Identifier>,
    /// Module path as written.
    pub path: String,
    /// Internal path of the imported module.
    pub internal_path: String,
    pub range: Range,
}

/// One `<externalName> as <name>` entry of a named import.
#[derive(Clone, Debug)]
pub struct ImportDeclaration {
    /// Name the exporting module declares.
    pub external_name: Identifier,
    /// Local binding name.
    pub name: Identifier,
    /// Internal name of the local binding, `<importingPath>/<name>`.
    pub internal_name: String,
    pub range: Range,
}

/// `export { a as b };` or `export { a as b } from "mod";`
#[derive(Clone, Debug)]
pub struct ExportStatement {
    pub members: Vec<Arc<ExportMember>>,
    /// Module path of a re-export, as written; `None` for local exports.
    pub path: Option<String>,
    /// Internal path of the re-exported module; `None` for local exports.
    pub internal_path: Option<String>,
    pub range: Range,
}

/// One `<name> as <externalName>` entry of an export statement.
#[derive(Clone, Debug)]
pub struct ExportMember {
    /// Local (or re-exported) name.
    pub name: Identifier,
    /// Name seen by importers.
    pub external_name: Identifier,
    pub range: Range,
}
