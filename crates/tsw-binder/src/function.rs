//! Resolved-function state and machinery.
//!
//! A resolved `Function` owns its locals (parameters first, `this` at index
//! 0 for instance methods), per-native-type free lists of temporary locals
//! for code generation, and the break-context label stack. Temp lists and
//! the break stack are transient per-compile state cleared by `finalize`.

use rustc_hash::FxHashMap;
use tsw_ast::Expression;

use crate::elements::{Element, ElementData, ElementId, ElementKind, LocalData};
use crate::types::{NativeType, Type};

/// A resolved function parameter.
#[derive(Clone, Debug)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
    pub initializer: Option<Expression>,
}

#[derive(Debug)]
pub struct FunctionData {
    pub prototype: ElementId,
    pub type_arguments: Vec<Type>,
    pub parameters: Vec<Parameter>,
    pub return_type: Type,
    /// Enclosing class instance when this is an instance method.
    pub instance_method_of: ElementId,
    /// Locals by name, including parameters and `this`.
    pub locals: FxHashMap<String, ElementId>,
    /// Types of locals added beyond the parameters, in index order.
    pub additional_locals: Vec<Type>,
    /// Type-parameter bindings in effect inside this function.
    pub contextual_type_arguments: Option<FxHashMap<String, Type>>,
    /// Current break label, a decimal id, or `None` outside any breakable
    /// construct.
    pub break_context: Option<String>,
    break_stack: Vec<u32>,
    next_break_id: u32,
    temp_i32s: Vec<ElementId>,
    temp_i64s: Vec<ElementId>,
    temp_f32s: Vec<ElementId>,
    temp_f64s: Vec<ElementId>,
}

impl FunctionData {
    pub fn new(
        prototype: ElementId,
        type_arguments: Vec<Type>,
        parameters: Vec<Parameter>,
        return_type: Type,
        instance_method_of: ElementId,
        contextual_type_arguments: Option<FxHashMap<String, Type>>,
    ) -> Self {
        FunctionData {
            prototype,
            type_arguments,
            parameters,
            return_type,
            instance_method_of,
            locals: FxHashMap::default(),
            additional_locals: Vec::new(),
            contextual_type_arguments,
            break_context: None,
            break_stack: Vec::new(),
            next_break_id: 0,
            temp_i32s: Vec::new(),
            temp_i64s: Vec::new(),
            temp_f32s: Vec::new(),
            temp_f64s: Vec::new(),
        }
    }

    fn temp_list_mut(&mut self, native_type: NativeType) -> &mut Vec<ElementId> {
        match native_type {
            NativeType::I32 => &mut self.temp_i32s,
            NativeType::I64 => &mut self.temp_i64s,
            NativeType::F32 => &mut self.temp_f32s,
            NativeType::F64 => &mut self.temp_f64s,
        }
    }

    /// Enter a new breakable construct, pushing a fresh label id.
    pub fn enter_break_context(&mut self) -> &str {
        let id = self.next_break_id;
        self.next_break_id += 1;
        self.break_stack.push(id);
        self.break_context = Some(id.to_string());
        self.break_context.as_deref().unwrap_or_default()
    }

    /// Leave the current breakable construct, restoring the enclosing label.
    pub fn leave_break_context(&mut self) {
        assert!(
            !self.break_stack.is_empty(),
            "leave_break_context without matching enter"
        );
        self.break_stack.pop();
        self.break_context = self.break_stack.last().map(|id| id.to_string());
    }

    /// Clear per-compile transient state after code generation.
    pub fn finalize(&mut self) {
        debug_assert!(
            self.break_stack.is_empty(),
            "break context stack not unwound"
        );
        self.break_stack.clear();
        self.break_context = None;
        self.temp_i32s.clear();
        self.temp_i64s.clear();
        self.temp_f32s.clear();
        self.temp_f64s.clear();
    }
}

impl crate::elements::ElementArena {
    /// Append a local to a resolved function. Anonymous locals are named
    /// `anonymous$<index>`; registering a duplicate named local is a
    /// compiler bug.
    pub fn function_add_local(
        &mut self,
        function: ElementId,
        ty: Type,
        name: Option<&str>,
    ) -> ElementId {
        let index = {
            let data = self[function]
                .as_function()
                .expect("function_add_local on a non-function element");
            let mut index = (data.parameters.len() + data.additional_locals.len()) as u32;
            if !data.instance_method_of.is_none() {
                index += 1;
            }
            index
        };
        let local_name = match name {
            Some(name) => name.to_string(),
            None => format!("anonymous${index}"),
        };
        let local = self.alloc(Element::new(
            ElementKind::Local,
            local_name.clone(),
            local_name.clone(),
            crate::elements::element_flags::NONE,
            ElementData::Local(LocalData {
                index,
                ty: ty.clone(),
            }),
        ));
        let data = self[function]
            .as_function_mut()
            .expect("function_add_local on a non-function element");
        if name.is_some() {
            assert!(
                !data.locals.contains_key(&local_name),
                "duplicate local name '{local_name}'"
            );
        }
        data.locals.insert(local_name, local);
        data.additional_locals.push(ty);
        local
    }

    /// Take a temporary local of the given type, reusing a freed one if the
    /// matching free list is non-empty.
    pub fn function_get_temp_local(&mut self, function: ElementId, ty: &Type) -> ElementId {
        let native_type = ty.to_native_type();
        let reused = {
            let data = self[function]
                .as_function_mut()
                .expect("function_get_temp_local on a non-function element");
            data.temp_list_mut(native_type).pop()
        };
        match reused {
            Some(local) => local,
            None => self.function_add_local(function, ty.clone(), None),
        }
    }

    /// Return a temporary local to its free list.
    pub fn function_free_temp_local(&mut self, function: ElementId, local: ElementId) {
        let native_type = self[local]
            .as_local()
            .expect("function_free_temp_local on a non-local element")
            .ty
            .to_native_type();
        let data = self[function]
            .as_function_mut()
            .expect("function_free_temp_local on a non-function element");
        data.temp_list_mut(native_type).push(local);
    }

    /// Take a temporary local whose lifetime ends immediately: peeks the
    /// free list without popping, or allocates directly onto it.
    pub fn function_get_and_free_temp_local(
        &mut self,
        function: ElementId,
        ty: &Type,
    ) -> ElementId {
        let native_type = ty.to_native_type();
        let peeked = {
            let data = self[function]
                .as_function_mut()
                .expect("function_get_and_free_temp_local on a non-function element");
            data.temp_list_mut(native_type).last().copied()
        };
        match peeked {
            Some(local) => local,
            None => {
                let local = self.function_add_local(function, ty.clone(), None);
                let data = self[function]
                    .as_function_mut()
                    .expect("function_get_and_free_temp_local on a non-function element");
                data.temp_list_mut(native_type).push(local);
                local
            }
        }
    }
}
