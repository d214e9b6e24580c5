//! Shared AST builders for binder tests.
//!
//! The parser is external to this repository, so tests construct sources
//! directly, supplying the internal names the parser would precompute.

#![allow(dead_code)]

use std::sync::Arc;

use tsw_ast::{
    ClassDeclaration, ClassMember, Decorator, EnumDeclaration, EnumValueDeclaration,
    ExportMember, ExportStatement, FieldDeclaration, FunctionDeclaration, Identifier,
    ImportDeclaration, ImportStatement, Modifier, ModifierKind, NamespaceDeclaration,
    ParameterNode, Range, Source, Statement, TypeDeclaration, TypeNode, TypeParameterNode,
    VariableDeclaration, VariableStatement,
};
use tsw_binder::{Program, Target};
use tsw_common::Span;
use tsw_common::diagnostics::Diagnostic;

pub fn range(source: &str) -> Range {
    Range::new(source, Span::new(0, 0))
}

pub fn ident(source: &str, text: &str) -> Identifier {
    Identifier::new(text, range(source))
}

pub fn modifiers(source: &str, kinds: &[ModifierKind]) -> Vec<Modifier> {
    kinds
        .iter()
        .map(|&kind| Modifier::new(kind, range(source)))
        .collect()
}

pub fn global_decorator(source: &str) -> Decorator {
    Decorator {
        name: ident(source, "global"),
        arguments: Vec::new(),
        range: range(source),
    }
}

pub fn ty(source: &str, name: &str) -> TypeNode {
    TypeNode::simple(name, range(source))
}

pub fn param(source: &str, name: &str, type_name: &str) -> ParameterNode {
    ParameterNode::new(name, Some(ty(source, type_name)), range(source))
}

pub fn untyped_param(source: &str, name: &str) -> ParameterNode {
    ParameterNode::new(name, None, range(source))
}

pub fn function_declaration(
    source: &str,
    internal_name: &str,
    name: &str,
    modifiers: Vec<Modifier>,
    type_parameters: &[&str],
    parameters: Vec<ParameterNode>,
    return_type: Option<TypeNode>,
) -> Arc<FunctionDeclaration> {
    Arc::new(FunctionDeclaration {
        name: ident(source, name),
        internal_name: internal_name.to_string(),
        modifiers,
        decorators: Vec::new(),
        type_parameters: type_parameters
            .iter()
            .map(|&parameter| TypeParameterNode::new(parameter, range(source)))
            .collect(),
        parameters,
        return_type,
        range: range(source),
    })
}

pub fn void_function(source: &str, name: &str) -> Statement {
    Statement::Function(function_declaration(
        source,
        &format!("{source}/{name}"),
        name,
        Vec::new(),
        &[],
        Vec::new(),
        Some(ty(source, "void")),
    ))
}

pub fn exported_void_function(source: &str, name: &str) -> Statement {
    Statement::Function(function_declaration(
        source,
        &format!("{source}/{name}"),
        name,
        modifiers(source, &[ModifierKind::Export]),
        &[],
        Vec::new(),
        Some(ty(source, "void")),
    ))
}

pub fn variable(source: &str, name: &str, kinds: &[ModifierKind]) -> Statement {
    Statement::Variable(Arc::new(VariableStatement {
        modifiers: modifiers(source, kinds),
        decorators: Vec::new(),
        declarations: vec![Arc::new(VariableDeclaration {
            name: ident(source, name),
            internal_name: format!("{source}/{name}"),
            type_node: Some(ty(source, "i32")),
            initializer: None,
            range: range(source),
        })],
        range: range(source),
    }))
}

pub fn type_alias(source: &str, name: &str, aliased: &str) -> Statement {
    Statement::TypeDeclaration(Arc::new(TypeDeclaration {
        name: ident(source, name),
        modifiers: Vec::new(),
        alias: ty(source, aliased),
        range: range(source),
    }))
}

pub fn enum_statement(source: &str, name: &str, values: &[&str]) -> Statement {
    Statement::Enum(Arc::new(EnumDeclaration {
        name: ident(source, name),
        internal_name: format!("{source}/{name}"),
        modifiers: Vec::new(),
        decorators: Vec::new(),
        values: values
            .iter()
            .map(|&value| {
                Arc::new(EnumValueDeclaration {
                    name: ident(source, value),
                    internal_name: format!("{source}/{name}.{value}"),
                    initializer: None,
                    range: range(source),
                })
            })
            .collect(),
        range: range(source),
    }))
}

pub fn field_declaration(
    source: &str,
    class: &str,
    name: &str,
    kinds: &[ModifierKind],
    type_name: &str,
) -> Arc<FieldDeclaration> {
    let delimiter = if kinds.contains(&ModifierKind::Static) {
        "."
    } else {
        "#"
    };
    Arc::new(FieldDeclaration {
        name: ident(source, name),
        internal_name: format!("{source}/{class}{delimiter}{name}"),
        modifiers: modifiers(source, kinds),
        type_node: Some(ty(source, type_name)),
        initializer: None,
        range: range(source),
    })
}

pub fn method_declaration(
    source: &str,
    class: &str,
    name: &str,
    kinds: &[ModifierKind],
    type_parameters: &[&str],
    parameters: Vec<ParameterNode>,
    return_type: Option<TypeNode>,
) -> Arc<FunctionDeclaration> {
    let delimiter = if kinds.contains(&ModifierKind::Static) {
        "."
    } else {
        "#"
    };
    function_declaration(
        source,
        &format!("{source}/{class}{delimiter}{name}"),
        name,
        modifiers(source, kinds),
        type_parameters,
        parameters,
        return_type,
    )
}

pub fn class(
    source: &str,
    name: &str,
    type_parameters: &[&str],
    members: Vec<ClassMember>,
) -> Statement {
    Statement::Class(Arc::new(ClassDeclaration {
        name: ident(source, name),
        internal_name: format!("{source}/{name}"),
        modifiers: Vec::new(),
        decorators: Vec::new(),
        type_parameters: type_parameters
            .iter()
            .map(|&parameter| TypeParameterNode::new(parameter, range(source)))
            .collect(),
        extends: None,
        members,
        range: range(source),
    }))
}

pub fn namespace(source: &str, name: &str, members: Vec<Statement>) -> Statement {
    Statement::Namespace(Arc::new(NamespaceDeclaration {
        name: ident(source, name),
        internal_name: format!("{source}/{name}"),
        modifiers: Vec::new(),
        decorators: Vec::new(),
        members,
        range: range(source),
    }))
}

/// `import { external as local, ... } from "module";`
pub fn import(source: &str, module: &str, names: &[(&str, &str)]) -> Statement {
    Statement::Import(Arc::new(ImportStatement {
        declarations: Some(
            names
                .iter()
                .map(|&(external, local)| {
                    Arc::new(ImportDeclaration {
                        external_name: ident(source, external),
                        name: ident(source, local),
                        internal_name: format!("{source}/{local}"),
                        range: range(source),
                    })
                })
                .collect(),
        ),
        namespace_name: None,
        path: module.to_string(),
        internal_path: module.to_string(),
        range: range(source),
    }))
}

/// `import * as name from "module";`
pub fn namespace_import(source: &str, module: &str, name: &str) -> Statement {
    Statement::Import(Arc::new(ImportStatement {
        declarations: None,
        namespace_name: Some(ident(source, name)),
        path: module.to_string(),
        internal_path: module.to_string(),
        range: range(source),
    }))
}

/// `export { name as external, ... };`
pub fn local_export(source: &str, names: &[(&str, &str)]) -> Statement {
    Statement::Export(Arc::new(ExportStatement {
        members: export_members(source, names),
        path: None,
        internal_path: None,
        range: range(source),
    }))
}

/// `export { name as external, ... } from "module";`
pub fn reexport(source: &str, module: &str, names: &[(&str, &str)]) -> Statement {
    Statement::Export(Arc::new(ExportStatement {
        members: export_members(source, names),
        path: Some(module.to_string()),
        internal_path: Some(module.to_string()),
        range: range(source),
    }))
}

fn export_members(source: &str, names: &[(&str, &str)]) -> Vec<Arc<ExportMember>> {
    names
        .iter()
        .map(|&(name, external)| {
            Arc::new(ExportMember {
                name: ident(source, name),
                external_name: ident(source, external),
                range: range(source),
            })
        })
        .collect()
}

pub fn source(path: &str, statements: Vec<Statement>) -> Source {
    Source::new(path, statements)
}

/// Build a program from sources and run initialization for wasm32.
pub fn bind(sources: Vec<Source>) -> Program {
    let mut program = Program::new();
    for source in sources {
        program.add_source(source);
    }
    program.initialize(Target::Wasm32);
    program
}

/// All diagnostics with the given code.
pub fn diagnostics_with_code(program: &Program, code: u32) -> Vec<&Diagnostic> {
    program
        .diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.code == code)
        .collect()
}
