//! The program entity model.
//!
//! Every named thing the binder tracks - namespaces, enums, globals,
//! function and class prototypes, their resolved instances, fields and
//! properties - is an `Element` stored in a flat `ElementArena` and
//! addressed by `ElementId`. All kinds share the base record (simple name,
//! internal name, flags bitmap, enclosing-namespace link, lazily allocated
//! member map) so name lookup has a uniform surface; kind-specific state
//! lives in the `ElementData` payload.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Serialize;
use tsw_ast::{
    ClassDeclaration, EnumDeclaration, EnumValueDeclaration, FieldDeclaration,
    FunctionDeclaration, NamespaceDeclaration, VariableDeclaration,
};

use crate::function::FunctionData;
use crate::types::Type;

// =============================================================================
// Element Flags
// =============================================================================

/// Flags that describe properties shared by all element kinds.
pub mod element_flags {
    pub const NONE: u32 = 0;
    /// Already processed by code generation.
    pub const COMPILED: u32 = 1 << 0;
    /// Carries an `import` modifier.
    pub const IMPORTED: u32 = 1 << 1;
    /// Carries an `export` modifier.
    pub const EXPORTED: u32 = 1 << 2;
    /// Registered by the built-in initializer, not declared in source.
    pub const BUILTIN: u32 = 1 << 3;
    /// Carries a `declare` modifier (ambient declaration).
    pub const DECLARED: u32 = 1 << 4;
    /// Declares type parameters.
    pub const GENERIC: u32 = 1 << 5;
    /// Declared with `const`.
    pub const CONSTANT: u32 = 1 << 6;
    /// Has a compile-time constant value.
    pub const CONSTANT_VALUE: u32 = 1 << 7;
    /// An instance member (method, field, accessor).
    pub const INSTANCE: u32 = 1 << 8;
    /// A getter accessor.
    pub const GETTER: u32 = 1 << 9;
    /// A setter accessor.
    pub const SETTER: u32 = 1 << 10;
    /// Additionally registered under its bare name (`@global`).
    pub const GLOBAL: u32 = 1 << 11;
    /// Declared `readonly`.
    pub const READONLY: u32 = 1 << 12;
    pub const PUBLIC: u32 = 1 << 13;
    pub const PROTECTED: u32 = 1 << 14;
    pub const PRIVATE: u32 = 1 << 15;
}

// =============================================================================
// Element Id / Arena
// =============================================================================

/// Handle of an element in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ElementId(pub u32);

impl ElementId {
    pub const NONE: ElementId = ElementId(u32::MAX);

    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

/// Flat store for program elements.
///
/// The entity graph is cyclic (prototypes own instance caches, instances
/// point back at prototypes, members link their containers), so elements
/// live in one arena for the lifetime of the program and reference each
/// other by id. Elements are never removed.
#[derive(Debug, Default)]
pub struct ElementArena {
    elements: Vec<Element>,
}

impl ElementArena {
    pub fn new() -> Self {
        ElementArena {
            elements: Vec::new(),
        }
    }

    /// Store an element and assign its id.
    pub fn alloc(&mut self, mut element: Element) -> ElementId {
        let id = ElementId(self.elements.len() as u32);
        element.id = id;
        self.elements.push(element);
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        if id.is_none() {
            None
        } else {
            self.elements.get(id.0 as usize)
        }
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        if id.is_none() {
            None
        } else {
            self.elements.get_mut(id.0 as usize)
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl std::ops::Index<ElementId> for ElementArena {
    type Output = Element;

    fn index(&self, id: ElementId) -> &Element {
        self.get(id).expect("dangling element id")
    }
}

impl std::ops::IndexMut<ElementId> for ElementArena {
    fn index_mut(&mut self, id: ElementId) -> &mut Element {
        self.get_mut(id).expect("dangling element id")
    }
}

// =============================================================================
// Element
// =============================================================================

/// Discriminant of an element's kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ElementKind {
    Namespace,
    Enum,
    EnumValue,
    Global,
    Local,
    FunctionPrototype,
    Function,
    ClassPrototype,
    Class,
    InterfacePrototype,
    Interface,
    FieldPrototype,
    Field,
    Property,
}

/// A named program entity.
#[derive(Debug)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Simple (unqualified) name.
    pub name: String,
    /// Unique, path-qualified name.
    pub internal_name: String,
    /// Bitmap of `element_flags`.
    pub flags: u32,
    /// Enclosing entity, if any.
    pub namespace: ElementId,
    /// Named members, allocated on first insertion.
    pub members: Option<FxHashMap<String, ElementId>>,
    pub data: ElementData,
}

impl Element {
    pub fn new(
        kind: ElementKind,
        name: impl Into<String>,
        internal_name: impl Into<String>,
        flags: u32,
        data: ElementData,
    ) -> Self {
        Element {
            id: ElementId::NONE,
            kind,
            name: name.into(),
            internal_name: internal_name.into(),
            flags,
            namespace: ElementId::NONE,
            members: None,
            data,
        }
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags & flag) == flag
    }

    pub fn has_any_flag(&self, flags: u32) -> bool {
        (self.flags & flags) != 0
    }

    pub fn set_flag(&mut self, flag: u32) {
        self.flags |= flag;
    }

    /// Whether this element can be reassigned.
    pub fn is_mutable(&self) -> bool {
        !self.has_flag(element_flags::CONSTANT)
    }

    /// The member map, allocating it on first use.
    pub fn members_mut(&mut self) -> &mut FxHashMap<String, ElementId> {
        self.members.get_or_insert_with(FxHashMap::default)
    }

    /// Look up a named member.
    pub fn member(&self, name: &str) -> Option<ElementId> {
        self.members.as_ref().and_then(|m| m.get(name)).copied()
    }

    pub fn as_global(&self) -> Option<&GlobalData> {
        match &self.data {
            ElementData::Global(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_global_mut(&mut self) -> Option<&mut GlobalData> {
        match &mut self.data {
            ElementData::Global(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_local(&self) -> Option<&LocalData> {
        match &self.data {
            ElementData::Local(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_function_prototype(&self) -> Option<&FunctionPrototypeData> {
        match &self.data {
            ElementData::FunctionPrototype(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_function_prototype_mut(&mut self) -> Option<&mut FunctionPrototypeData> {
        match &mut self.data {
            ElementData::FunctionPrototype(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionData> {
        match &self.data {
            ElementData::Function(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_function_mut(&mut self) -> Option<&mut FunctionData> {
        match &mut self.data {
            ElementData::Function(data) => Some(data),
            _ => None,
        }
    }

    /// Class or interface prototype data; the two kinds share the shape.
    pub fn as_class_prototype(&self) -> Option<&ClassPrototypeData> {
        match &self.data {
            ElementData::ClassPrototype(data) | ElementData::InterfacePrototype(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_class_prototype_mut(&mut self) -> Option<&mut ClassPrototypeData> {
        match &mut self.data {
            ElementData::ClassPrototype(data) | ElementData::InterfacePrototype(data) => Some(data),
            _ => None,
        }
    }

    /// Class or interface instance data; the two kinds share the shape.
    pub fn as_class(&self) -> Option<&ClassData> {
        match &self.data {
            ElementData::Class(data) | ElementData::Interface(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassData> {
        match &mut self.data {
            ElementData::Class(data) | ElementData::Interface(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyData> {
        match &self.data {
            ElementData::Property(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_property_mut(&mut self) -> Option<&mut PropertyData> {
        match &mut self.data {
            ElementData::Property(data) => Some(data),
            _ => None,
        }
    }
}

// =============================================================================
// Kind-specific data
// =============================================================================

#[derive(Debug)]
pub enum ElementData {
    Namespace(NamespaceData),
    Enum(EnumData),
    EnumValue(EnumValueData),
    Global(GlobalData),
    Local(LocalData),
    FunctionPrototype(FunctionPrototypeData),
    Function(FunctionData),
    ClassPrototype(ClassPrototypeData),
    Class(ClassData),
    /// Interface prototypes reuse the class prototype shape; the kind tag
    /// preserves the distinction.
    InterfacePrototype(ClassPrototypeData),
    Interface(ClassData),
    FieldPrototype(FieldPrototypeData),
    Field(FieldData),
    Property(PropertyData),
}

/// A compile-time constant initializer value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum ConstantValue {
    Integer(i64),
    Float(f64),
}

#[derive(Debug)]
pub struct NamespaceData {
    pub declaration: Arc<NamespaceDeclaration>,
}

#[derive(Debug)]
pub struct EnumData {
    pub declaration: Arc<EnumDeclaration>,
}

#[derive(Debug)]
pub struct EnumValueData {
    pub declaration: Arc<EnumValueDeclaration>,
    /// The enum this value belongs to.
    pub parent_enum: ElementId,
    pub constant_value: i32,
}

/// What a global was declared by. Static fields are represented as globals,
/// so the declaration is either a variable or a field node.
#[derive(Clone, Debug)]
pub enum GlobalDeclaration {
    Variable(Arc<VariableDeclaration>),
    Field(Arc<FieldDeclaration>),
}

#[derive(Debug)]
pub struct GlobalData {
    /// `None` for built-in globals.
    pub declaration: Option<GlobalDeclaration>,
    /// Resolved lazily; `None` until then.
    pub ty: Option<Type>,
    pub constant_value: Option<ConstantValue>,
}

/// A local variable or parameter of a resolved function.
#[derive(Debug)]
pub struct LocalData {
    /// Zero-based index within the function's locals.
    pub index: u32,
    pub ty: Type,
}

#[derive(Debug)]
pub struct FunctionPrototypeData {
    /// `None` for built-in prototypes, which are compiled intrinsically.
    pub declaration: Option<Arc<FunctionDeclaration>>,
    /// Owning class prototype for instance methods and accessors.
    pub class_prototype: ElementId,
    /// Resolved instances keyed by canonical type-argument strings.
    pub instances: FxHashMap<String, ElementId>,
}

#[derive(Debug)]
pub struct ClassPrototypeData {
    pub declaration: Option<Arc<ClassDeclaration>>,
    /// Resolved instances keyed by canonical type-argument strings.
    pub instances: FxHashMap<String, ElementId>,
    /// Instance fields, methods, and properties, allocated on first use.
    /// Static members live in the element's `members` map.
    pub instance_members: Option<FxHashMap<String, ElementId>>,
}

impl ClassPrototypeData {
    pub fn instance_members_mut(&mut self) -> &mut FxHashMap<String, ElementId> {
        self.instance_members.get_or_insert_with(FxHashMap::default)
    }

    pub fn instance_member(&self, name: &str) -> Option<ElementId> {
        self.instance_members
            .as_ref()
            .and_then(|m| m.get(name))
            .copied()
    }
}

#[derive(Debug)]
pub struct ClassData {
    pub prototype: ElementId,
    pub type_arguments: Vec<Type>,
    /// The pointer-width class reference type of this instance.
    pub ty: Type,
    /// Base class instance, once resolved.
    pub base: ElementId,
    /// Type-parameter bindings in effect for member resolution.
    pub contextual_type_arguments: Option<FxHashMap<String, Type>>,
}

#[derive(Debug)]
pub struct FieldPrototypeData {
    pub declaration: Arc<FieldDeclaration>,
    pub class_prototype: ElementId,
}

#[derive(Debug)]
pub struct FieldData {
    pub prototype: ElementId,
    pub ty: Type,
    pub constant_value: Option<ConstantValue>,
}

/// A property merging up to one getter and one setter prototype.
#[derive(Debug)]
pub struct PropertyData {
    pub class_prototype: ElementId,
    pub getter_prototype: ElementId,
    pub setter_prototype: ElementId,
}
