//! Concrete types and their canonical string forms.
//!
//! A `Type` is a small value: a kind, a bit size, and (for class references)
//! a handle to the class element. The canonical string form produced by
//! `types_to_string` keys the prototype instance caches and suffixes generic
//! internal names, so it is part of the program's name mangling contract.

use serde::Serialize;

use crate::elements::ElementId;

/// Kinds of concrete types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeKind {
    I8,
    I16,
    I32,
    I64,
    /// Signed pointer-sized integer; 32 or 64 bits depending on target.
    Isize,
    U8,
    U16,
    U32,
    U64,
    /// Unsigned pointer-sized integer; also the carrier of class references.
    Usize,
    Bool,
    F32,
    F64,
    Void,
}

/// Underlying machine type, used to bucket temporary locals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NativeType {
    I32,
    I64,
    F32,
    F64,
}

/// A concrete type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Type {
    pub kind: TypeKind,
    /// Size in bits.
    pub size: u32,
    /// Referenced class when this is a class type.
    pub class: ElementId,
    /// Canonical name of the referenced class, set iff `class` is set.
    class_name: Option<String>,
}

impl Type {
    pub const fn new(kind: TypeKind, size: u32) -> Self {
        Type {
            kind,
            size,
            class: ElementId::NONE,
            class_name: None,
        }
    }

    pub const fn i8() -> Self {
        Type::new(TypeKind::I8, 8)
    }
    pub const fn i16() -> Self {
        Type::new(TypeKind::I16, 16)
    }
    pub const fn i32() -> Self {
        Type::new(TypeKind::I32, 32)
    }
    pub const fn i64() -> Self {
        Type::new(TypeKind::I64, 64)
    }
    pub const fn isize(size: u32) -> Self {
        Type::new(TypeKind::Isize, size)
    }
    pub const fn u8() -> Self {
        Type::new(TypeKind::U8, 8)
    }
    pub const fn u16() -> Self {
        Type::new(TypeKind::U16, 16)
    }
    pub const fn u32() -> Self {
        Type::new(TypeKind::U32, 32)
    }
    pub const fn u64() -> Self {
        Type::new(TypeKind::U64, 64)
    }
    pub const fn usize(size: u32) -> Self {
        Type::new(TypeKind::Usize, size)
    }
    pub const fn bool() -> Self {
        Type::new(TypeKind::Bool, 1)
    }
    pub const fn f32() -> Self {
        Type::new(TypeKind::F32, 32)
    }
    pub const fn f64() -> Self {
        Type::new(TypeKind::F64, 64)
    }
    pub const fn void() -> Self {
        Type::new(TypeKind::Void, 0)
    }

    /// A class reference type: pointer-width unsigned integer carrying the
    /// class element and its canonical instance name.
    pub fn class_type(size: u32, class: ElementId, class_name: String) -> Self {
        Type {
            kind: TypeKind::Usize,
            size,
            class,
            class_name: Some(class_name),
        }
    }

    pub fn is_class(&self) -> bool {
        !self.class.is_none()
    }

    /// The machine type this type lowers to. Calling this on `void` is a
    /// compiler bug: `void` values never materialize.
    pub fn to_native_type(&self) -> NativeType {
        match self.kind {
            TypeKind::I8
            | TypeKind::I16
            | TypeKind::I32
            | TypeKind::U8
            | TypeKind::U16
            | TypeKind::U32
            | TypeKind::Bool => NativeType::I32,
            TypeKind::I64 | TypeKind::U64 => NativeType::I64,
            TypeKind::Isize | TypeKind::Usize => {
                if self.size == 64 {
                    NativeType::I64
                } else {
                    NativeType::I32
                }
            }
            TypeKind::F32 => NativeType::F32,
            TypeKind::F64 => NativeType::F64,
            TypeKind::Void => unreachable!("void has no native representation"),
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(class_name) = &self.class_name {
            return f.write_str(class_name);
        }
        f.write_str(match self.kind {
            TypeKind::I8 => "i8",
            TypeKind::I16 => "i16",
            TypeKind::I32 => "i32",
            TypeKind::I64 => "i64",
            TypeKind::Isize => "isize",
            TypeKind::U8 => "u8",
            TypeKind::U16 => "u16",
            TypeKind::U32 => "u32",
            TypeKind::U64 => "u64",
            TypeKind::Usize => "usize",
            TypeKind::Bool => "bool",
            TypeKind::F32 => "f32",
            TypeKind::F64 => "f64",
            TypeKind::Void => "void",
        })
    }
}

/// Serialize a type list to its canonical string form.
///
/// An empty list yields the empty string regardless of affixes; otherwise
/// the comma-joined canonical names are wrapped in `prefix`/`postfix`.
/// `("", "")` produces instance-cache keys, `("<", ">")` produces the
/// generic internal-name suffix.
pub fn types_to_string(types: &[Type], prefix: &str, postfix: &str) -> String {
    if types.is_empty() {
        return String::new();
    }
    let mut out = String::from(prefix);
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&ty.to_string());
    }
    out.push_str(postfix);
    out
}
