//! Type and expression resolution tests: lookup order, aliases, contextual
//! placeholders, and the identifier scope chain.

mod support;

use std::sync::Arc;

use rustc_hash::FxHashMap;
use support::*;
use tsw_ast::{
    ClassMember, Expression, IdentifierExpression, NewExpression, PropertyAccessExpression,
    Statement, ThisExpression, TypeParameterNode,
};
use tsw_binder::{ElementId, ElementKind, Program, Target, Type};
use tsw_common::diagnostics::diagnostic_codes;

fn resolved_function(program: &mut Program, internal_name: &str) -> ElementId {
    let prototype = program.elements[internal_name];
    program
        .resolve_function_prototype(prototype, &[], None)
        .expect("function should resolve")
}

fn identifier(text: &str) -> IdentifierExpression {
    IdentifierExpression::new(text, range("main"))
}

// =============================================================================
// Type resolution
// =============================================================================

#[test]
fn test_resolve_primitive_types() {
    let mut program = bind(vec![]);
    assert_eq!(
        program.resolve_type(&ty("main", "i32"), None, true),
        Some(Type::i32())
    );
    assert_eq!(
        program.resolve_type(&ty("main", "void"), None, true),
        Some(Type::void())
    );
    // Surface-language aliases.
    assert_eq!(
        program.resolve_type(&ty("main", "number"), None, true),
        Some(Type::f64())
    );
    assert_eq!(
        program.resolve_type(&ty("main", "boolean"), None, true),
        Some(Type::bool())
    );
}

#[test]
fn test_pointer_sized_types_follow_target() {
    let mut program32 = Program::new();
    program32.initialize(Target::Wasm32);
    assert_eq!(
        program32.resolve_type(&ty("main", "usize"), None, true),
        Some(Type::usize(32))
    );

    let mut program64 = Program::new();
    program64.initialize(Target::Wasm64);
    assert_eq!(
        program64.resolve_type(&ty("main", "usize"), None, true),
        Some(Type::usize(64))
    );
    assert_eq!(
        program64.resolve_type(&ty("main", "isize"), None, true),
        Some(Type::isize(64))
    );
}

#[test]
fn test_resolve_type_alias() {
    let mut program = bind(vec![source("main", vec![type_alias("main", "MyInt", "i32")])]);
    assert_eq!(
        program.resolve_type(&ty("main", "MyInt"), None, true),
        Some(Type::i32())
    );
}

#[test]
fn test_alias_chase_drops_contextual_arguments() {
    // `type A = T;` where T only exists as a contextual placeholder: the
    // alias target resolves without the contextual mapping, so it misses.
    let mut program = bind(vec![source("main", vec![type_alias("main", "A", "T")])]);
    let mut contextual = FxHashMap::default();
    contextual.insert("T".to_string(), Type::i64());

    assert_eq!(
        program.resolve_type(&ty("main", "A"), Some(&contextual), true),
        None
    );
    assert_eq!(
        diagnostics_with_code(&program, diagnostic_codes::CANNOT_FIND_NAME).len(),
        1
    );
}

#[test]
fn test_contextual_placeholder_resolution() {
    let mut program = bind(vec![]);
    let mut contextual = FxHashMap::default();
    contextual.insert("T".to_string(), Type::i64());

    assert_eq!(
        program.resolve_type(&ty("main", "T"), Some(&contextual), true),
        Some(Type::i64())
    );
}

#[test]
fn test_unknown_type_reports_when_asked() {
    let mut program = bind(vec![]);
    assert_eq!(program.resolve_type(&ty("main", "Missing"), None, false), None);
    assert!(program.diagnostics.is_empty());

    assert_eq!(program.resolve_type(&ty("main", "Missing"), None, true), None);
    let missing = diagnostics_with_code(&program, diagnostic_codes::CANNOT_FIND_NAME);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].message_text, "Cannot find name 'Missing'.");
}

#[test]
fn test_type_argument_arity() {
    let mut program = bind(vec![]);
    let parameters = vec![TypeParameterNode::new("T", range("main"))];

    // Matching arity resolves.
    assert_eq!(
        program.resolve_type_arguments(&parameters, &[ty("main", "i32")], None, &range("main")),
        Some(vec![Type::i32()])
    );

    // Mismatch is reported with both counts.
    assert_eq!(
        program.resolve_type_arguments(
            &parameters,
            &[ty("main", "i32"), ty("main", "i64")],
            None,
            &range("main"),
        ),
        None
    );
    let mismatched = diagnostics_with_code(&program, diagnostic_codes::EXPECTED_TYPE_ARGUMENTS);
    assert_eq!(mismatched.len(), 1);
    assert_eq!(
        mismatched[0].message_text,
        "Expected 1 type arguments, but got 2."
    );

    // No arguments supplied at all also mismatches.
    assert_eq!(
        program.resolve_type_arguments(&parameters, &[], None, &range("main")),
        None
    );
}

// =============================================================================
// Identifier resolution
// =============================================================================

#[test]
fn test_local_shadows_everything() {
    let program_sources = vec![source(
        "main",
        vec![namespace(
            "main",
            "N",
            vec![
                Statement::Function(function_declaration(
                    "main",
                    "main/N.g",
                    "g",
                    vec![],
                    &[],
                    vec![param("main", "f", "i32")],
                    Some(ty("main", "void")),
                )),
                Statement::Function(function_declaration(
                    "main",
                    "main/N.f",
                    "f",
                    vec![],
                    &[],
                    vec![],
                    Some(ty("main", "void")),
                )),
            ],
        )],
    )];
    let mut program = bind(program_sources);
    let context = resolved_function(&mut program, "main/N.g");

    let resolved = program
        .resolve_identifier(&identifier("f"), context)
        .expect("expected the parameter local");
    assert_eq!(program.arena[resolved].kind, ElementKind::Local);
}

#[test]
fn test_namespace_shadows_file_scope() {
    // S6: inside N.f, `f` is N's f; inside a top-level function, `f` is the
    // top-level f.
    let mut program = bind(vec![source(
        "main",
        vec![
            namespace(
                "main",
                "N",
                vec![Statement::Function(function_declaration(
                    "main",
                    "main/N.f",
                    "f",
                    vec![],
                    &[],
                    vec![],
                    Some(ty("main", "void")),
                ))],
            ),
            void_function("main", "f"),
            void_function("main", "g"),
        ],
    )]);

    let inside_namespace = resolved_function(&mut program, "main/N.f");
    let from_namespace = program
        .resolve_identifier(&identifier("f"), inside_namespace)
        .expect("expected N.f");
    assert_eq!(from_namespace, program.elements["main/N.f"]);

    let top_level = resolved_function(&mut program, "main/g");
    let from_top_level = program
        .resolve_identifier(&identifier("f"), top_level)
        .expect("expected main/f");
    assert_eq!(from_top_level, program.elements["main/f"]);
}

#[test]
fn test_file_scope_shadows_global_scope() {
    // A file-level `abs` hides the builtin of the same name.
    let mut program = bind(vec![source(
        "main",
        vec![void_function("main", "abs"), void_function("main", "g")],
    )]);
    let context = resolved_function(&mut program, "main/g");

    let resolved = program
        .resolve_identifier(&identifier("abs"), context)
        .expect("expected file-level abs");
    assert_eq!(resolved, program.elements["main/abs"]);
    assert_ne!(resolved, program.elements["abs"]);
}

#[test]
fn test_global_scope_fallback() {
    let mut program = bind(vec![source("main", vec![void_function("main", "g")])]);
    let context = resolved_function(&mut program, "main/g");

    let resolved = program
        .resolve_identifier(&identifier("NaN"), context)
        .expect("expected the builtin global");
    assert_eq!(resolved, program.elements["NaN"]);
    assert_eq!(program.arena[resolved].kind, ElementKind::Global);
}

#[test]
fn test_unresolved_identifier_reports() {
    let mut program = bind(vec![source("main", vec![void_function("main", "g")])]);
    let context = resolved_function(&mut program, "main/g");

    assert_eq!(program.resolve_identifier(&identifier("missing"), context), None);
    let missing = diagnostics_with_code(&program, diagnostic_codes::CANNOT_FIND_NAME);
    assert_eq!(missing.len(), 1);
}

// =============================================================================
// Property access and element resolution
// =============================================================================

#[test]
fn test_property_access_on_namespace() {
    let mut program = bind(vec![source(
        "main",
        vec![
            namespace(
                "main",
                "N",
                vec![Statement::Function(function_declaration(
                    "main",
                    "main/N.f",
                    "f",
                    vec![],
                    &[],
                    vec![],
                    Some(ty("main", "void")),
                ))],
            ),
            void_function("main", "g"),
        ],
    )]);
    let context = resolved_function(&mut program, "main/g");

    let access = PropertyAccessExpression {
        expression: Expression::Identifier(identifier("N")),
        property: ident("main", "f"),
        range: range("main"),
    };
    let resolved = program
        .resolve_property_access(&access, context)
        .expect("expected N.f");
    assert_eq!(resolved, program.elements["main/N.f"]);
}

#[test]
fn test_missing_property_reports() {
    let mut program = bind(vec![source(
        "main",
        vec![namespace("main", "N", vec![]), void_function("main", "g")],
    )]);
    let context = resolved_function(&mut program, "main/g");

    let access = PropertyAccessExpression {
        expression: Expression::Identifier(identifier("N")),
        property: ident("main", "missing"),
        range: range("main"),
    };
    assert_eq!(program.resolve_property_access(&access, context), None);
    let missing = diagnostics_with_code(&program, diagnostic_codes::PROPERTY_DOES_NOT_EXIST);
    assert_eq!(missing.len(), 1);
    assert_eq!(
        missing[0].message_text,
        "Property 'missing' does not exist on type 'main/N'."
    );
}

#[test]
fn test_this_resolves_to_enclosing_class() {
    let mut program = bind(vec![source(
        "main",
        vec![class(
            "main",
            "C",
            &[],
            vec![ClassMember::Method(method_declaration(
                "main",
                "C",
                "m",
                &[],
                &[],
                vec![],
                Some(ty("main", "void")),
            ))],
        )],
    )]);
    let class_prototype = program.elements["main/C"];
    let class_instance = program
        .resolve_class_prototype(class_prototype, &[], None)
        .expect("class should resolve");
    let method_prototype = program.arena[class_prototype]
        .as_class_prototype()
        .expect("class prototype data")
        .instance_member("m")
        .expect("expected method m");
    let method = program.create_function(
        method_prototype,
        "main/C#m".to_string(),
        Vec::new(),
        Vec::new(),
        Type::void(),
        class_instance,
        None,
    );

    let this = Expression::This(ThisExpression {
        range: range("main"),
    });
    assert_eq!(program.resolve_element(&this, method), Some(class_instance));
}

#[test]
fn test_this_outside_instance_method_reports() {
    let mut program = bind(vec![source("main", vec![void_function("main", "g")])]);
    let context = resolved_function(&mut program, "main/g");

    let this = Expression::This(ThisExpression {
        range: range("main"),
    });
    assert_eq!(program.resolve_element(&this, context), None);
    let illegal = diagnostics_with_code(&program, diagnostic_codes::THIS_CANNOT_BE_REFERENCED);
    assert_eq!(illegal.len(), 1);
    assert_eq!(
        illegal[0].message_text,
        "'this' cannot be referenced in current location."
    );
}

#[test]
fn test_new_resolves_constructed_class() {
    let mut program = bind(vec![source(
        "main",
        vec![class("main", "C", &[], vec![]), void_function("main", "g")],
    )]);
    let context = resolved_function(&mut program, "main/g");

    let new = Expression::New(Box::new(NewExpression {
        expression: Expression::Identifier(identifier("C")),
        type_arguments: Vec::new(),
        arguments: Vec::new(),
        range: range("main"),
    }));
    let resolved = program
        .resolve_element(&new, context)
        .expect("expected the class prototype");
    assert_eq!(resolved, program.elements["main/C"]);
    assert_eq!(program.arena[resolved].kind, ElementKind::ClassPrototype);
}

#[test]
fn test_nested_property_access() {
    // N.Inner.f through two access levels.
    let mut program = bind(vec![source(
        "main",
        vec![
            namespace(
                "main",
                "N",
                vec![Statement::Namespace(Arc::new(tsw_ast::NamespaceDeclaration {
                    name: ident("main", "Inner"),
                    internal_name: "main/N.Inner".to_string(),
                    modifiers: Vec::new(),
                    decorators: Vec::new(),
                    members: vec![Statement::Function(function_declaration(
                        "main",
                        "main/N.Inner.f",
                        "f",
                        vec![],
                        &[],
                        vec![],
                        Some(ty("main", "void")),
                    ))],
                    range: range("main"),
                }))],
            ),
            void_function("main", "g"),
        ],
    )]);
    let context = resolved_function(&mut program, "main/g");

    let access = PropertyAccessExpression {
        expression: Expression::PropertyAccess(Box::new(PropertyAccessExpression {
            expression: Expression::Identifier(identifier("N")),
            property: ident("main", "Inner"),
            range: range("main"),
        })),
        property: ident("main", "f"),
        range: range("main"),
    };
    let resolved = program
        .resolve_property_access(&access, context)
        .expect("expected N.Inner.f");
    assert_eq!(resolved, program.elements["main/N.Inner.f"]);
}
