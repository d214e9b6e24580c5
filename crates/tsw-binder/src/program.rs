//! The program model.
//!
//! A `Program` owns the parsed sources, the element arena, and the four
//! top-level name directories: `types` (qualified type name to concrete
//! type), `type_aliases` (bare name to unresolved type node), `elements`
//! (internal name to element), and `exports` (file-scoped external name to
//! element). Initialization populates the primitive type table, runs the
//! built-in initializer, binds every source, and resolves queued imports
//! and exports.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tsw_ast::{Range, Source, TypeNode};
use tsw_common::diagnostics::{Diagnostic, format_message, get_message_template};

use crate::binder::Binder;
use crate::builtins;
use crate::elements::{ElementArena, ElementId};
use crate::types::Type;

/// Compilation target, selecting pointer width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Target {
    /// 32-bit linear memory.
    #[default]
    Wasm32,
    /// 64-bit linear memory.
    Wasm64,
}

impl Target {
    /// Pointer size in bits.
    pub const fn pointer_size(self) -> u32 {
        match self {
            Target::Wasm32 => 32,
            Target::Wasm64 => 64,
        }
    }
}

/// The root program object.
#[derive(Debug, Default)]
pub struct Program {
    /// Parsed sources, in the order they were added.
    pub sources: Vec<Arc<Source>>,
    /// Diagnostics reported so far.
    pub diagnostics: Vec<Diagnostic>,
    /// Cursor for callers that consume diagnostics incrementally.
    pub diagnostics_offset: usize,
    pub target: Target,
    /// Qualified type name to concrete type.
    pub types: FxHashMap<String, Type>,
    /// Bare alias name to its unresolved type node.
    pub type_aliases: FxHashMap<String, TypeNode>,
    /// Internal name to element. `@global` elements are additionally
    /// registered here under their bare simple name.
    pub elements: FxHashMap<String, ElementId>,
    /// File-scoped external name to element.
    pub exports: FxHashMap<String, ElementId>,
    pub arena: ElementArena,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn add_source(&mut self, source: Source) {
        self.sources.push(Arc::new(source));
    }

    /// Report an error diagnostic at a range, substituting `args` into the
    /// code's message template.
    pub fn error(&mut self, code: u32, range: &Range, args: &[&str]) {
        let template = get_message_template(code).expect("unknown diagnostic code");
        let message = format_message(template, args);
        self.diagnostics
            .push(Diagnostic::error(range.source.as_ref(), range.span, message, code));
    }

    /// Diagnostics reported since the last call, advancing the cursor.
    pub fn new_diagnostics(&mut self) -> &[Diagnostic] {
        let start = self.diagnostics_offset;
        self.diagnostics_offset = self.diagnostics.len();
        &self.diagnostics[start..]
    }

    /// Set up built-in types and elements for the given target, then bind
    /// every source and resolve queued imports and exports.
    pub fn initialize(&mut self, target: Target) {
        self.target = target;
        let pointer_size = target.pointer_size();

        self.types.insert("i8".to_string(), Type::i8());
        self.types.insert("i16".to_string(), Type::i16());
        self.types.insert("i32".to_string(), Type::i32());
        self.types.insert("i64".to_string(), Type::i64());
        self.types.insert("u8".to_string(), Type::u8());
        self.types.insert("u16".to_string(), Type::u16());
        self.types.insert("u32".to_string(), Type::u32());
        self.types.insert("u64".to_string(), Type::u64());
        self.types.insert("bool".to_string(), Type::bool());
        self.types.insert("f32".to_string(), Type::f32());
        self.types.insert("f64".to_string(), Type::f64());
        self.types.insert("void".to_string(), Type::void());
        self.types
            .insert("isize".to_string(), Type::isize(pointer_size));
        self.types
            .insert("usize".to_string(), Type::usize(pointer_size));
        // Convenience aliases matching the surface language.
        self.types.insert("number".to_string(), Type::f64());
        self.types.insert("boolean".to_string(), Type::bool());

        builtins::initialize(self);

        let mut binder = Binder::new(self);
        binder.run();
    }
}
