//! Cross-module linking tests: immediate and queued imports/exports,
//! re-export chains, cycles, and their diagnostics.

mod support;

use support::*;
use tsw_common::diagnostics::diagnostic_codes;

#[test]
fn test_simple_export_and_import() {
    // S1: `m` exports f, `main` imports it.
    let program = bind(vec![
        source("m", vec![exported_void_function("m", "f")]),
        source("main", vec![import("main", "m", &[("f", "f")])]),
    ]);

    assert!(program.diagnostics.is_empty(), "expected a clean bind");
    let exported = program.exports.get("m/f").expect("expected export m/f");
    let imported = program.elements.get("main/f").expect("expected import binding");
    assert_eq!(exported, imported);
}

#[test]
fn test_import_resolves_before_module_is_bound() {
    // Importing file bound first: the binding is queued, then resolved in
    // the post-pass.
    let program = bind(vec![
        source("main", vec![import("main", "m", &[("f", "f")])]),
        source("m", vec![exported_void_function("m", "f")]),
    ]);

    assert!(program.diagnostics.is_empty(), "expected a clean bind");
    assert_eq!(program.elements.get("main/f"), program.exports.get("m/f"));
}

#[test]
fn test_renamed_import() {
    let program = bind(vec![
        source("m", vec![exported_void_function("m", "f")]),
        source("main", vec![import("main", "m", &[("f", "local")])]),
    ]);

    assert_eq!(program.elements.get("main/local"), program.exports.get("m/f"));
    assert!(!program.elements.contains_key("main/f"));
}

#[test]
fn test_reexport_chain_closure() {
    // S2: a re-exports f from b; b declares and exports f; main imports
    // from a. All three views resolve to the same element.
    let program = bind(vec![
        source("a", vec![reexport("a", "b", &[("f", "f")])]),
        source("b", vec![exported_void_function("b", "f")]),
        source("main", vec![import("main", "a", &[("f", "f")])]),
    ]);

    assert!(program.diagnostics.is_empty(), "expected a clean bind");
    let declared = program.elements.get("b/f").expect("expected b/f");
    assert_eq!(program.exports.get("b/f"), Some(declared));
    assert_eq!(program.exports.get("a/f"), Some(declared));
    assert_eq!(program.elements.get("main/f"), Some(declared));
}

#[test]
fn test_long_reexport_chain() {
    // a <- b <- c, with c declaring x; every hop queued before c binds.
    let program = bind(vec![
        source("a", vec![reexport("a", "b", &[("x", "x")])]),
        source("b", vec![reexport("b", "c", &[("x", "x")])]),
        source("c", vec![exported_void_function("c", "x")]),
        source("main", vec![import("main", "a", &[("x", "x")])]),
    ]);

    assert!(program.diagnostics.is_empty(), "expected a clean bind");
    assert_eq!(program.exports.get("a/x"), program.elements.get("c/x"));
    assert_eq!(program.elements.get("main/x"), program.elements.get("c/x"));
}

#[test]
fn test_missing_import_reports_once() {
    // S3: `m` exports nothing.
    let program = bind(vec![
        source("m", vec![void_function("m", "f")]),
        source("main", vec![import("main", "m", &[("g", "g")])]),
    ]);

    let missing =
        diagnostics_with_code(&program, diagnostic_codes::MODULE_HAS_NO_EXPORTED_MEMBER);
    assert_eq!(missing.len(), 1);
    assert_eq!(
        missing[0].message_text,
        "Module 'm' has no exported member 'g'."
    );
    assert!(!program.elements.contains_key("main/g"));
}

#[test]
fn test_local_export_forward_reference() {
    // The export statement precedes the declaration it references.
    let program = bind(vec![source(
        "main",
        vec![local_export("main", &[("f", "g")]), void_function("main", "f")],
    )]);

    assert!(program.diagnostics.is_empty(), "expected a clean bind");
    assert_eq!(program.exports.get("main/g"), program.elements.get("main/f"));
}

#[test]
fn test_local_export_of_missing_name() {
    let program = bind(vec![source("main", vec![local_export("main", &[("nope", "nope")])])]);

    let missing = diagnostics_with_code(&program, diagnostic_codes::CANNOT_FIND_NAME);
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].message_text, "Cannot find name 'nope'.");
}

#[test]
fn test_export_conflict() {
    let program = bind(vec![source(
        "main",
        vec![
            void_function("main", "a"),
            void_function("main", "b"),
            local_export("main", &[("a", "x")]),
            local_export("main", &[("b", "x")]),
        ],
    )]);

    let conflicts =
        diagnostics_with_code(&program, diagnostic_codes::EXPORT_DECLARATION_CONFLICTS);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(
        conflicts[0].message_text,
        "Export declaration conflicts with exported declaration of 'x'."
    );
    // The first export wins.
    assert_eq!(program.exports.get("main/x"), program.elements.get("main/a"));
}

#[test]
fn test_self_referential_reexport_terminates_with_single_diagnostic() {
    let program = bind(vec![source("a", vec![reexport("a", "a", &[("x", "x")])])]);

    let missing =
        diagnostics_with_code(&program, diagnostic_codes::MODULE_HAS_NO_EXPORTED_MEMBER);
    assert_eq!(missing.len(), 1);
    assert_eq!(
        missing[0].message_text,
        "Module 'a' has no exported member 'x'."
    );
}

#[test]
fn test_reexport_cycle_terminates() {
    // a and b re-export x from each other; main imports from a. Each
    // unsatisfiable chain walk (one per queued export, one for the import)
    // reports exactly one missing-member diagnostic.
    let program = bind(vec![
        source("a", vec![reexport("a", "b", &[("x", "x")])]),
        source("b", vec![reexport("b", "a", &[("x", "x")])]),
        source("main", vec![import("main", "a", &[("x", "x")])]),
    ]);

    assert!(!program.exports.contains_key("a/x"));
    assert!(!program.exports.contains_key("b/x"));
    assert!(!program.elements.contains_key("main/x"));
    let missing =
        diagnostics_with_code(&program, diagnostic_codes::MODULE_HAS_NO_EXPORTED_MEMBER);
    assert_eq!(missing.len(), 3);
    assert_eq!(missing.len(), program.diagnostics.len());
}

#[test]
fn test_namespace_import_is_unsupported() {
    let program = bind(vec![
        source("m", vec![exported_void_function("m", "f")]),
        source("main", vec![namespace_import("main", "m", "ns")]),
    ]);

    let unsupported =
        diagnostics_with_code(&program, diagnostic_codes::OPERATION_NOT_SUPPORTED);
    assert_eq!(unsupported.len(), 1);
    assert_eq!(unsupported[0].message_text, "Operation not supported.");
}

#[test]
fn test_duplicate_import_binding() {
    // Importing over an existing local declaration of the same name.
    let program = bind(vec![
        source("m", vec![exported_void_function("m", "f")]),
        source(
            "main",
            vec![void_function("main", "f"), import("main", "m", &[("f", "f")])],
        ),
    ]);

    let duplicates = diagnostics_with_code(&program, diagnostic_codes::DUPLICATE_IDENTIFIER);
    assert_eq!(duplicates.len(), 1);
    // The local declaration keeps the slot.
    assert_ne!(program.elements.get("main/f"), program.exports.get("m/f"));
}

#[test]
fn test_import_through_queued_local_export() {
    // b's export of f is still queued (declaration follows the export
    // statement) when main's import is bound; the chain walk ends at a
    // non-re-export queued entry and resolves through `elements`.
    let program = bind(vec![
        source("b", vec![local_export("b", &[("f", "f")]), void_function("b", "f")]),
        source("main", vec![import("main", "b", &[("f", "f")])]),
    ]);

    assert!(program.diagnostics.is_empty(), "expected a clean bind");
    assert_eq!(program.elements.get("main/f"), program.elements.get("b/f"));
}
