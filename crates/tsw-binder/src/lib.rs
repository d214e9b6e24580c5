//! Semantic binder and symbol resolver for the tsw compiler.
//!
//! This crate provides:
//! - `Program` - The program model: sources, the element/type/alias/export
//!   directories, and the element arena
//! - `Binder` - The initialization pass that populates the model from
//!   parsed sources, including deferred import/export linking
//! - Type, identifier, property-access, and element resolution
//! - On-demand monomorphization of generic function and class prototypes
//!
//! Lexing, parsing, constant folding, and code generation live elsewhere;
//! the binder consumes the AST surface of `tsw_ast` and exposes the
//! populated program to later compilation passes.

pub mod binder;
pub mod builtins;
pub mod elements;
pub mod function;
pub mod program;
pub mod types;

mod monomorphize;
mod resolver;

pub use binder::Binder;
pub use elements::{
    ConstantValue, Element, ElementArena, ElementData, ElementId, ElementKind, element_flags,
};
pub use function::{FunctionData, Parameter};
pub use program::{Program, Target};
pub use types::{NativeType, Type, TypeKind, types_to_string};
