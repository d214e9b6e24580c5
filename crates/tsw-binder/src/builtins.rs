//! Built-in element registration.
//!
//! Populates the program with the globals and generic function prototypes
//! available without imports. Built-ins carry no declarations; downstream
//! compilation recognizes them by the `BUILTIN` flag and lowers them
//! intrinsically instead of resolving them through the generic path.

use rustc_hash::FxHashMap;

use crate::elements::{
    ConstantValue, Element, ElementData, ElementId, ElementKind, FunctionPrototypeData,
    GlobalData, element_flags,
};
use crate::program::Program;
use crate::types::Type;

static BUILTIN_CONSTANTS: &[(&str, f64)] = &[("NaN", f64::NAN), ("Infinity", f64::INFINITY)];

static BUILTIN_FUNCTIONS: &[&str] = &[
    "clz",
    "ctz",
    "popcnt",
    "rotl",
    "rotr",
    "abs",
    "ceil",
    "floor",
    "copysign",
    "max",
    "min",
    "nearest",
    "sqrt",
    "trunc",
    "fmod",
    "load",
    "store",
    "reinterpret",
    "select",
    "sizeof",
    "changetype",
    "isNaN",
    "isFinite",
    "assert",
    "parseInt",
    "parseFloat",
];

/// Register built-in globals and function prototypes under their bare names.
pub fn initialize(program: &mut Program) {
    for &(name, value) in BUILTIN_CONSTANTS {
        let id = program.arena.alloc(Element::new(
            ElementKind::Global,
            name,
            name,
            element_flags::BUILTIN
                | element_flags::DECLARED
                | element_flags::CONSTANT
                | element_flags::CONSTANT_VALUE,
            ElementData::Global(GlobalData {
                declaration: None,
                ty: Some(Type::f64()),
                constant_value: Some(ConstantValue::Float(value)),
            }),
        ));
        program.elements.insert(name.to_string(), id);
    }

    for &name in BUILTIN_FUNCTIONS {
        let id = program.arena.alloc(Element::new(
            ElementKind::FunctionPrototype,
            name,
            name,
            element_flags::BUILTIN | element_flags::DECLARED | element_flags::GENERIC,
            ElementData::FunctionPrototype(FunctionPrototypeData {
                declaration: None,
                class_prototype: ElementId::NONE,
                instances: FxHashMap::default(),
            }),
        ));
        program.elements.insert(name.to_string(), id);
    }
}
